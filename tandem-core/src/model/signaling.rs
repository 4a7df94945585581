use crate::model::participant::ParticipantId;
use crate::model::partner::PartnerId;
use serde::{Deserialize, Serialize};

/// Offer, answer or candidate body. Relayed verbatim, never inspected.
pub type SignalPayload = serde_json::Value;

/// Events a client sends over its signaling channel.
///
/// Connect and disconnect are not listed: they follow from the socket itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    StartCall {
        #[serde(default)]
        is_test: bool,
    },
    EndCall,
    #[serde(rename_all = "camelCase")]
    SkipCall {
        #[serde(default)]
        is_test: bool,
    },
    #[serde(rename_all = "camelCase")]
    Offer {
        offer: SignalPayload,
        partner_id: PartnerId,
    },
    #[serde(rename_all = "camelCase")]
    Answer {
        answer: SignalPayload,
        partner_id: PartnerId,
    },
    #[serde(rename = "ice-candidate", rename_all = "camelCase")]
    IceCandidate {
        candidate: SignalPayload,
        partner_id: PartnerId,
    },
}

/// Events the relay pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    Welcome { participant_id: ParticipantId },
    ActiveUsers { users: Vec<ParticipantId> },
    #[serde(rename_all = "camelCase")]
    Matched {
        partner_id: PartnerId,
        is_synthetic: bool,
    },
    #[serde(rename_all = "camelCase")]
    PartnerLeft { partner_id: ParticipantId },
    #[serde(rename_all = "camelCase")]
    Offer {
        offer: SignalPayload,
        sender_id: ParticipantId,
    },
    Answer { answer: SignalPayload },
    #[serde(rename = "ice-candidate")]
    IceCandidate { candidate: SignalPayload },
}
