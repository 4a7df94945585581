use async_trait::async_trait;
use tandem_core::{ParticipantId, PartnerId, SignalPayload};

/// What the lobby needs from the transport to reach participants.
///
/// Implementations must not block: the lobby awaits these calls inside its
/// event loop.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Send the current list of connected participants to every one of them.
    async fn broadcast_active_users(&self, users: Vec<ParticipantId>);

    async fn send_matched(&self, participant_id: ParticipantId, partner_id: PartnerId);

    async fn send_partner_left(&self, participant_id: ParticipantId, partner_id: ParticipantId);

    async fn send_offer(
        &self,
        participant_id: ParticipantId,
        offer: SignalPayload,
        sender_id: ParticipantId,
    );

    async fn send_answer(&self, participant_id: ParticipantId, answer: SignalPayload);

    async fn send_ice(&self, participant_id: ParticipantId, candidate: SignalPayload);
}
