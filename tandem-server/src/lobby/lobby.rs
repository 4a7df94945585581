use crate::error::LobbyError;
use crate::lobby::lobby_command::LobbyCommand;
use crate::lobby::matchmaker::{Matchmaker, Notice};
use crate::lobby::router::{Relay, SessionRouter, SignalKind};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::{ParticipantId, PartnerId, SignalPayload};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Single owner of all matching state.
///
/// Commands are applied one at a time in arrival order, so no two handlers
/// ever observe the registry or the pool half-updated.
pub struct Lobby {
    matchmaker: Matchmaker,
    router: SessionRouter,
    command_rx: mpsc::Receiver<LobbyCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Lobby {
    pub fn new(
        router: SessionRouter,
        command_rx: mpsc::Receiver<LobbyCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            matchmaker: Matchmaker::new(),
            router,
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!(strict_routing = self.router.is_strict(), "Lobby event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            if let LobbyCommand::Shutdown = cmd {
                info!("Shutdown requested");
                break;
            }
            self.handle_command(cmd).await;
        }

        info!(
            participants = self.matchmaker.registry().len(),
            "Lobby event loop finished"
        );
    }

    async fn handle_command(&mut self, cmd: LobbyCommand) {
        match cmd {
            LobbyCommand::Connect { participant_id } => {
                match self.matchmaker.register(participant_id) {
                    Ok(()) => {
                        info!(participant = %participant_id, "Participant connected");
                        self.broadcast_active_users().await;
                    }
                    Err(e) => report(e),
                }
            }

            LobbyCommand::StartCall {
                participant_id,
                is_test,
            } => {
                debug!(participant = %participant_id, is_test, "Start call");
                let result = if is_test {
                    self.matchmaker
                        .request_test_match(participant_id)
                        .map(|notice| vec![notice])
                } else {
                    self.matchmaker.enqueue(participant_id)
                };
                self.deliver(result).await;
            }

            LobbyCommand::EndCall { participant_id } => {
                debug!(participant = %participant_id, "End call");
                let result = self.matchmaker.end_or_skip(participant_id, false);
                self.deliver(result).await;
            }

            LobbyCommand::SkipCall {
                participant_id,
                is_test,
            } => {
                debug!(participant = %participant_id, is_test, "Skip call");
                let result = self.matchmaker.skip(participant_id, is_test);
                self.deliver(result).await;
            }

            LobbyCommand::Offer {
                participant_id,
                partner_id,
                offer,
            } => {
                self.relay(SignalKind::Offer, offer, participant_id, partner_id)
                    .await;
            }

            LobbyCommand::Answer {
                participant_id,
                partner_id,
                answer,
            } => {
                self.relay(SignalKind::Answer, answer, participant_id, partner_id)
                    .await;
            }

            LobbyCommand::IceCandidate {
                participant_id,
                partner_id,
                candidate,
            } => {
                self.relay(SignalKind::Candidate, candidate, participant_id, partner_id)
                    .await;
            }

            LobbyCommand::Disconnect { participant_id } => {
                let Some(notices) = self.matchmaker.disconnect(&participant_id) else {
                    debug!(participant = %participant_id, "Disconnect for unknown participant");
                    return;
                };
                info!(participant = %participant_id, "Participant disconnected");
                self.notify(notices).await;
                self.broadcast_active_users().await;
            }

            LobbyCommand::Shutdown => {}
        }
    }

    async fn relay(
        &self,
        kind: SignalKind,
        payload: SignalPayload,
        from: ParticipantId,
        to: PartnerId,
    ) {
        debug!(from = %from, to = %to, ?kind, "Relaying signal");

        let relay = match self
            .router
            .relay(self.matchmaker.registry(), kind, payload, from, to)
        {
            Ok(Some(relay)) => relay,
            Ok(None) => return,
            Err(e) => return report(e),
        };

        match relay {
            Relay::Offer { to, sender, offer } => self.signaling.send_offer(to, offer, sender).await,
            Relay::Answer { to, answer } => self.signaling.send_answer(to, answer).await,
            Relay::Candidate { to, candidate } => self.signaling.send_ice(to, candidate).await,
        }
    }

    async fn deliver(&self, result: Result<Vec<Notice>, LobbyError>) {
        match result {
            Ok(notices) => self.notify(notices).await,
            Err(e) => report(e),
        }
    }

    async fn notify(&self, notices: Vec<Notice>) {
        for notice in notices {
            match notice {
                Notice::Matched {
                    participant,
                    partner,
                } => self.signaling.send_matched(participant, partner).await,
                Notice::PartnerLeft {
                    participant,
                    partner,
                } => self.signaling.send_partner_left(participant, partner).await,
            }
        }
    }

    async fn broadcast_active_users(&self) {
        let users = self.matchmaker.registry().active_set();
        self.signaling.broadcast_active_users(users).await;
    }
}

fn report(e: LobbyError) {
    match e {
        LobbyError::DuplicateIdentity(_) => error!(error = %e, "Transport reused an id"),
        _ if e.is_race() => debug!(error = %e, "Ignoring command"),
        _ => warn!(error = %e, "Ignoring command"),
    }
}
