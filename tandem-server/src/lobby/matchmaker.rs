use crate::error::LobbyError;
use crate::lobby::registry::{ParticipantState, Registry};
use crate::lobby::synthetic::SyntheticPartners;
use crate::lobby::waiting_pool::WaitingPool;
use tandem_core::{ParticipantId, PartnerId};
use tracing::{debug, error, info};

/// Something a participant must be told after a matchmaking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Matched {
        participant: ParticipantId,
        partner: PartnerId,
    },
    /// `partner` left the call `participant` was in.
    PartnerLeft {
        participant: ParticipantId,
        partner: ParticipantId,
    },
}

/// Owns the registry, the waiting pool and the synthetic counter, and moves
/// participants through their lifecycle.
///
/// Every method runs to completion without suspending, so a single owner
/// calling them one at a time gets the atomicity pairing needs.
#[derive(Debug, Default)]
pub struct Matchmaker {
    registry: Registry,
    pool: WaitingPool,
    synthetic: SyntheticPartners,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn pool(&self) -> &WaitingPool {
        &self.pool
    }

    pub fn register(&mut self, id: ParticipantId) -> Result<(), LobbyError> {
        self.registry.register(id)
    }

    /// Removes `id` from every structure at once and frees its partner.
    ///
    /// Returns `None` if `id` was not registered.
    pub fn disconnect(&mut self, id: &ParticipantId) -> Option<Vec<Notice>> {
        self.pool.remove(id);
        let state = self.registry.deregister(id)?;

        Some(self.release_partner(id, state).into_iter().collect())
    }

    /// Puts `id` in the waiting pool and pairs whoever can be paired.
    pub fn enqueue(&mut self, id: ParticipantId) -> Result<Vec<Notice>, LobbyError> {
        let state = self.state_of(&id)?;
        if let ParticipantState::Matched(_) = state {
            return Err(LobbyError::InvalidStateTransition {
                participant: id,
                from: state,
                action: "wait for a partner",
            });
        }

        self.registry.set_state(&id, ParticipantState::Waiting)?;
        if self.pool.push(id) {
            debug!(participant = %id, waiting = self.pool.len(), "Entered waiting pool");
        }

        Ok(self.drain())
    }

    /// Pairs the most recently enqueued members until fewer than two remain.
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();

        while let Some((first, second)) = self.pool.pop_pair() {
            if let Err(e) = self.pair(first, second) {
                error!(error = %e, "Dropping stale pairing");
                for id in [first, second] {
                    if self.registry.state(&id) == Some(ParticipantState::Waiting) {
                        self.pool.push(id);
                    }
                }
                continue;
            }

            info!(first = %first, second = %second, "Matched participants");
            notices.push(Notice::Matched {
                participant: first,
                partner: second.into(),
            });
            notices.push(Notice::Matched {
                participant: second,
                partner: first.into(),
            });
        }

        notices
    }

    /// Matches `id` with a freshly minted synthetic partner.
    ///
    /// Registry membership and the waiting pool are left alone.
    pub fn request_test_match(&mut self, id: ParticipantId) -> Result<Notice, LobbyError> {
        let state = self.state_of(&id)?;
        match state {
            ParticipantState::Connected | ParticipantState::Matched(PartnerId::Synthetic(_)) => {}
            _ => {
                return Err(LobbyError::InvalidStateTransition {
                    participant: id,
                    from: state,
                    action: "start a test call",
                });
            }
        }

        let partner = PartnerId::Synthetic(self.synthetic.next());
        self.registry
            .set_state(&id, ParticipantState::Matched(partner))?;
        info!(participant = %id, partner = %partner, "Matched with synthetic partner");

        Ok(Notice::Matched {
            participant: id,
            partner,
        })
    }

    /// Leaves the current call (or the pool) and either goes idle or waits again.
    pub fn end_or_skip(
        &mut self,
        id: ParticipantId,
        wants_retry: bool,
    ) -> Result<Vec<Notice>, LobbyError> {
        let state = self.state_of(&id)?;
        if !wants_retry && state == ParticipantState::Connected {
            return Err(LobbyError::InvalidStateTransition {
                participant: id,
                from: state,
                action: "end a call",
            });
        }

        let mut notices = self.leave(&id, state)?;
        if wants_retry {
            notices.extend(self.enqueue(id)?);
        }
        Ok(notices)
    }

    /// Skips to the next partner: a real one from the pool, or a new synthetic one.
    pub fn skip(&mut self, id: ParticipantId, is_test: bool) -> Result<Vec<Notice>, LobbyError> {
        if !is_test {
            return self.end_or_skip(id, true);
        }

        let state = self.state_of(&id)?;
        let mut notices = self.leave(&id, state)?;
        notices.push(self.request_test_match(id)?);
        Ok(notices)
    }

    fn state_of(&self, id: &ParticipantId) -> Result<ParticipantState, LobbyError> {
        self.registry
            .state(id)
            .ok_or(LobbyError::UnknownParticipant(*id))
    }

    fn leave(
        &mut self,
        id: &ParticipantId,
        state: ParticipantState,
    ) -> Result<Vec<Notice>, LobbyError> {
        self.pool.remove(id);
        self.registry.set_state(id, ParticipantState::Connected)?;
        Ok(self.release_partner(id, state).into_iter().collect())
    }

    /// Sends a real partner of `id` back to `Connected`.
    fn release_partner(&mut self, id: &ParticipantId, state: ParticipantState) -> Option<Notice> {
        let partner = state.partner()?.participant()?;
        if self.registry.state(&partner) != Some(ParticipantState::Matched((*id).into())) {
            return None;
        }

        self.registry
            .set_state(&partner, ParticipantState::Connected)
            .ok()?;
        debug!(participant = %partner, left = %id, "Partner left the call");

        Some(Notice::PartnerLeft {
            participant: partner,
            partner: *id,
        })
    }

    fn pair(&mut self, first: ParticipantId, second: ParticipantId) -> Result<(), LobbyError> {
        for id in [first, second] {
            let state = self.state_of(&id)?;
            if state != ParticipantState::Waiting {
                return Err(LobbyError::InvalidStateTransition {
                    participant: id,
                    from: state,
                    action: "be paired",
                });
            }
        }

        self.registry
            .set_state(&first, ParticipantState::Matched(second.into()))?;
        self.registry
            .set_state(&second, ParticipantState::Matched(first.into()))?;
        Ok(())
    }
}
