use crate::lobby::LobbyCommand;
use crate::signaling::{PEER_QUEUE_CAPACITY, SignalingService};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tandem_core::{ClientEvent, ParticipantId, ServerEvent};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let participant_id = ParticipantId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, participant_id, service))
}

async fn handle_socket(socket: WebSocket, participant_id: ParticipantId, service: SignalingService) {
    info!(participant = %participant_id, "New WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel(PEER_QUEUE_CAPACITY);

    service.add_peer(participant_id, tx);
    service.send_event(participant_id, &ServerEvent::Welcome { participant_id });

    if let Err(e) = service.submit(LobbyCommand::Connect { participant_id }).await {
        error!("Lobby died: {}", e);
        service.remove_peer(&participant_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            let cmd = into_command(participant_id, event);
                            if let Err(e) = service.submit(cmd).await {
                                error!("Lobby died: {}", e);
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(participant = %participant_id, "Invalid client event: {:?}", e)
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    leave_lobby(&service, participant_id).await;
    info!(participant = %participant_id, "WebSocket disconnected");
}

async fn leave_lobby(service: &SignalingService, participant_id: ParticipantId) {
    if service
        .submit(LobbyCommand::Disconnect { participant_id })
        .await
        .is_err()
    {
        debug!(participant = %participant_id, "Lobby already stopped");
    }
    service.remove_peer(&participant_id);
}

/// Maps a decoded client event onto the lobby command it stands for.
fn into_command(participant_id: ParticipantId, event: ClientEvent) -> LobbyCommand {
    match event {
        ClientEvent::StartCall { is_test } => LobbyCommand::StartCall {
            participant_id,
            is_test,
        },
        ClientEvent::EndCall => LobbyCommand::EndCall { participant_id },
        ClientEvent::SkipCall { is_test } => LobbyCommand::SkipCall {
            participant_id,
            is_test,
        },
        ClientEvent::Offer { offer, partner_id } => LobbyCommand::Offer {
            participant_id,
            partner_id,
            offer,
        },
        ClientEvent::Answer { answer, partner_id } => LobbyCommand::Answer {
            participant_id,
            partner_id,
            answer,
        },
        ClientEvent::IceCandidate {
            candidate,
            partner_id,
        } => LobbyCommand::IceCandidate {
            participant_id,
            partner_id,
            candidate,
        },
    }
}
