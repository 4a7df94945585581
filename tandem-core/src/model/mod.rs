mod participant;
mod partner;
mod signaling;

pub use participant::ParticipantId;
pub use partner::{PartnerId, SyntheticId};
pub use signaling::{ClientEvent, ServerEvent, SignalPayload};
