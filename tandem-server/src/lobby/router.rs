use crate::error::LobbyError;
use crate::lobby::registry::{ParticipantState, Registry};
use tandem_core::{ParticipantId, PartnerId, SignalPayload};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

/// A signaling message ready to be handed to the addressee's channel.
///
/// Only offers tell the recipient who sent them; the answer and candidates
/// that follow travel on addressing the offer already established.
#[derive(Debug, Clone, PartialEq)]
pub enum Relay {
    Offer {
        to: ParticipantId,
        sender: ParticipantId,
        offer: SignalPayload,
    },
    Answer {
        to: ParticipantId,
        answer: SignalPayload,
    },
    Candidate {
        to: ParticipantId,
        candidate: SignalPayload,
    },
}

/// Decides where offers, answers and candidates go.
///
/// By default the caller-supplied addressee is trusted. With `strict` set, a
/// sender may only reach the participant it is currently matched with.
#[derive(Debug, Clone, Default)]
pub struct SessionRouter {
    strict: bool,
}

impl SessionRouter {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns `Ok(None)` when the addressee is synthetic: nobody is there to receive it.
    pub fn relay(
        &self,
        registry: &Registry,
        kind: SignalKind,
        payload: SignalPayload,
        from: ParticipantId,
        to: PartnerId,
    ) -> Result<Option<Relay>, LobbyError> {
        let sender_state = registry
            .state(&from)
            .ok_or(LobbyError::UnknownParticipant(from))?;

        let to = match to {
            PartnerId::Participant(id) => id,
            PartnerId::Synthetic(synthetic) => {
                trace!(from = %from, to = %synthetic, ?kind, "Dropping signal for synthetic partner");
                return Ok(None);
            }
        };

        if !registry.contains(&to) {
            return Err(LobbyError::UnknownParticipant(to));
        }

        if self.strict && sender_state != ParticipantState::Matched(to.into()) {
            return Err(LobbyError::NotPartners {
                from,
                to: to.into(),
            });
        }

        Ok(Some(match kind {
            SignalKind::Offer => Relay::Offer {
                to,
                sender: from,
                offer: payload,
            },
            SignalKind::Answer => Relay::Answer {
                to,
                answer: payload,
            },
            SignalKind::Candidate => Relay::Candidate {
                to,
                candidate: payload,
            },
        }))
    }
}
