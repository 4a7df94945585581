use crate::lobby::LobbyCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{ParticipantId, PartnerId, ServerEvent, SignalPayload};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{SendError, TrySendError};
use tracing::{debug, error, warn};

/// Frames buffered per socket before further events to it are dropped.
pub const PEER_QUEUE_CAPACITY: usize = 64;

struct SignalingInner {
    peers: DashMap<ParticipantId, mpsc::Sender<Message>>,
}

/// Holds the outbound half of every open socket and the lobby's command queue.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) lobby_tx: mpsc::Sender<LobbyCommand>,
}

impl SignalingService {
    pub fn new(lobby_tx: mpsc::Sender<LobbyCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
            lobby_tx,
        }
    }

    pub fn add_peer(&self, participant_id: ParticipantId, tx: mpsc::Sender<Message>) {
        self.inner.peers.insert(participant_id, tx);
    }

    pub fn remove_peer(&self, participant_id: &ParticipantId) {
        self.inner.peers.remove(participant_id);
    }

    /// Queue a command for the lobby, waiting if its queue is full.
    pub async fn submit(&self, cmd: LobbyCommand) -> Result<(), SendError<LobbyCommand>> {
        self.lobby_tx.send(cmd).await
    }

    /// Ask the lobby to stop once it has drained what is already queued.
    pub async fn shutdown(&self) {
        if self.lobby_tx.send(LobbyCommand::Shutdown).await.is_err() {
            debug!("Lobby already stopped");
        }
    }

    pub fn send_event(&self, participant_id: ParticipantId, event: &ServerEvent) {
        let Some(peer) = self.inner.peers.get(&participant_id) else {
            warn!(participant = %participant_id, "Attempted to signal disconnected participant");
            return;
        };

        match serde_json::to_string(event) {
            Ok(json) => {
                match peer.try_send(Message::Text(json.into())) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        warn!(participant = %participant_id, "Outbound queue full, dropping event");
                    }
                    Err(TrySendError::Closed(_)) => {
                        debug!(participant = %participant_id, "Socket already closing");
                    }
                }
            }
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn broadcast_active_users(&self, users: Vec<ParticipantId>) {
        let recipients = users.clone();
        let event = ServerEvent::ActiveUsers { users };
        for participant_id in recipients {
            self.send_event(participant_id, &event);
        }
    }

    async fn send_matched(&self, participant_id: ParticipantId, partner_id: PartnerId) {
        let event = ServerEvent::Matched {
            partner_id,
            is_synthetic: partner_id.is_synthetic(),
        };
        self.send_event(participant_id, &event);
    }

    async fn send_partner_left(&self, participant_id: ParticipantId, partner_id: ParticipantId) {
        self.send_event(participant_id, &ServerEvent::PartnerLeft { partner_id });
    }

    async fn send_offer(
        &self,
        participant_id: ParticipantId,
        offer: SignalPayload,
        sender_id: ParticipantId,
    ) {
        self.send_event(participant_id, &ServerEvent::Offer { offer, sender_id });
    }

    async fn send_answer(&self, participant_id: ParticipantId, answer: SignalPayload) {
        self.send_event(participant_id, &ServerEvent::Answer { answer });
    }

    async fn send_ice(&self, participant_id: ParticipantId, candidate: SignalPayload) {
        self.send_event(participant_id, &ServerEvent::IceCandidate { candidate });
    }
}
