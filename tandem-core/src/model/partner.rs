use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counterfeit partner handed out for test calls. Never backed by a connection.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SyntheticId(pub u64);

impl fmt::Display for SyntheticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "synthetic-{}", self.0)
    }
}

/// The other side of a call: either a real participant or a synthetic one.
///
/// On the wire a real partner is its UUID string and a synthetic partner is a
/// bare integer, so the two never collide.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum PartnerId {
    Participant(ParticipantId),
    Synthetic(SyntheticId),
}

impl PartnerId {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, PartnerId::Synthetic(_))
    }

    pub fn participant(&self) -> Option<ParticipantId> {
        match self {
            PartnerId::Participant(id) => Some(*id),
            PartnerId::Synthetic(_) => None,
        }
    }
}

impl From<ParticipantId> for PartnerId {
    fn from(id: ParticipantId) -> Self {
        PartnerId::Participant(id)
    }
}

impl From<SyntheticId> for PartnerId {
    fn from(id: SyntheticId) -> Self {
        PartnerId::Synthetic(id)
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartnerId::Participant(id) => write!(f, "{}", id),
            PartnerId::Synthetic(id) => write!(f, "{}", id),
        }
    }
}
