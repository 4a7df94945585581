use tandem_core::SyntheticId;

/// Hands out ids for synthetic partners: 1, 2, 3, ... never reused.
#[derive(Debug, Default)]
pub struct SyntheticPartners {
    issued: u64,
}

impl SyntheticPartners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> SyntheticId {
        self.issued += 1;
        SyntheticId(self.issued)
    }
}
