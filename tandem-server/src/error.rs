//! Errors raised by the matching engine.
//!
//! None of these reach a client. The lobby logs them and moves on, since a
//! dropped signaling message is less disruptive to a live call than an error.

use crate::lobby::ParticipantState;
use tandem_core::{ParticipantId, PartnerId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LobbyError {
    /// The transport handed out the same id twice.
    #[error("Participant {0} is already registered")]
    DuplicateIdentity(ParticipantId),

    /// The id is not (or no longer) registered, usually a disconnect race.
    #[error("Unknown participant {0}")]
    UnknownParticipant(ParticipantId),

    #[error("{participant} cannot {action} while {from}")]
    InvalidStateTransition {
        participant: ParticipantId,
        from: ParticipantState,
        action: &'static str,
    },

    /// Only raised when strict routing is enabled.
    #[error("{from} is not matched with {to}")]
    NotPartners { from: ParticipantId, to: PartnerId },
}

impl LobbyError {
    /// Races with disconnect are expected and not worth more than a debug line.
    pub fn is_race(&self) -> bool {
        matches!(self, LobbyError::UnknownParticipant(_))
    }
}
