use tandem_core::{ParticipantId, PartnerId, SignalPayload};

/// Commands the transport feeds into the lobby, one per client event.
#[derive(Debug)]
pub enum LobbyCommand {
    /// A socket opened and was given this id.
    Connect { participant_id: ParticipantId },

    StartCall {
        participant_id: ParticipantId,
        is_test: bool,
    },

    EndCall { participant_id: ParticipantId },

    SkipCall {
        participant_id: ParticipantId,
        is_test: bool,
    },

    Offer {
        participant_id: ParticipantId,
        partner_id: PartnerId,
        offer: SignalPayload,
    },

    Answer {
        participant_id: ParticipantId,
        partner_id: PartnerId,
        answer: SignalPayload,
    },

    IceCandidate {
        participant_id: ParticipantId,
        partner_id: PartnerId,
        candidate: SignalPayload,
    },

    /// The socket closed, whatever the participant was doing.
    Disconnect { participant_id: ParticipantId },

    /// Stop the event loop.
    Shutdown,
}
