use crate::error::LobbyError;
use std::collections::HashMap;
use std::fmt;
use tandem_core::{ParticipantId, PartnerId};

/// Lifecycle state of a registered participant.
///
/// A disconnected participant is simply absent from the [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantState {
    Connected,
    Waiting,
    Matched(PartnerId),
}

impl ParticipantState {
    pub fn partner(&self) -> Option<PartnerId> {
        match self {
            ParticipantState::Matched(partner) => Some(*partner),
            _ => None,
        }
    }
}

impl fmt::Display for ParticipantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantState::Connected => write!(f, "connected"),
            ParticipantState::Waiting => write!(f, "waiting"),
            ParticipantState::Matched(partner) => write!(f, "matched with {}", partner),
        }
    }
}

/// Every currently connected participant and its lifecycle state.
#[derive(Debug, Default)]
pub struct Registry {
    participants: HashMap<ParticipantId, ParticipantState>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ParticipantId) -> Result<(), LobbyError> {
        if self.participants.contains_key(&id) {
            return Err(LobbyError::DuplicateIdentity(id));
        }
        self.participants.insert(id, ParticipantState::Connected);
        Ok(())
    }

    /// Removes the participant whatever its state. Returns the state it had, if any.
    pub fn deregister(&mut self, id: &ParticipantId) -> Option<ParticipantState> {
        self.participants.remove(id)
    }

    /// Replaces the state, returning the previous one.
    pub fn set_state(
        &mut self,
        id: &ParticipantId,
        state: ParticipantState,
    ) -> Result<ParticipantState, LobbyError> {
        let slot = self
            .participants
            .get_mut(id)
            .ok_or(LobbyError::UnknownParticipant(*id))?;
        Ok(std::mem::replace(slot, state))
    }

    pub fn state(&self, id: &ParticipantId) -> Option<ParticipantState> {
        self.participants.get(id).copied()
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    /// Snapshot of every registered id, in no particular order.
    pub fn active_set(&self) -> Vec<ParticipantId> {
        self.participants.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantState)> {
        self.participants.iter()
    }
}
