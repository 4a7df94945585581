use tandem_core::ParticipantId;

/// Participants asking for a real partner.
///
/// Kept as a stack: pairing always takes the two most recently enqueued
/// members, which makes drain order reproducible.
#[derive(Debug, Default)]
pub struct WaitingPool {
    stack: Vec<ParticipantId>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `id` unless it is already waiting. Returns whether it was added.
    pub fn push(&mut self, id: ParticipantId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.stack.push(id);
        true
    }

    /// Returns whether `id` was a member.
    pub fn remove(&mut self, id: &ParticipantId) -> bool {
        let before = self.stack.len();
        self.stack.retain(|member| member != id);
        self.stack.len() != before
    }

    /// Pops the top two members, most recent first.
    pub fn pop_pair(&mut self) -> Option<(ParticipantId, ParticipantId)> {
        if self.stack.len() < 2 {
            return None;
        }
        let first = self.stack.pop()?;
        let second = self.stack.pop()?;
        Some((first, second))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.stack.contains(id)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Members from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &ParticipantId> {
        self.stack.iter()
    }
}
