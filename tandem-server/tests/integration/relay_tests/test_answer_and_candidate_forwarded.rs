use serde_json::json;
use tandem_core::PartnerId;
use tandem_server::LobbyCommand;

use crate::integration::{create_test_lobby, init_tracing};
use crate::utils::{SignalMessage, collect_signals, matched_pair};

#[tokio::test]
async fn test_answer_and_candidate_forwarded() {
    init_tracing();

    let (cmd_tx, mut signal_rx, _signaling) = create_test_lobby(false);

    let (a, b) = matched_pair(&cmd_tx, &mut signal_rx).await.unwrap();

    let answer = json!({"type": "answer", "sdp": "v=0"});
    let candidates = [
        json!({"candidate": "candidate:1 1 udp 2122260223 10.0.0.2 54400 typ host", "sdpMid": "0"}),
        json!({"candidate": "candidate:2 1 udp 1686052607 1.2.3.4 54400 typ srflx", "sdpMid": "0"}),
    ];

    cmd_tx
        .send(LobbyCommand::Answer {
            participant_id: b,
            partner_id: PartnerId::Participant(a),
            answer: answer.clone(),
        })
        .await
        .unwrap();
    for candidate in &candidates {
        cmd_tx
            .send(LobbyCommand::IceCandidate {
                participant_id: b,
                partner_id: PartnerId::Participant(a),
                candidate: candidate.clone(),
            })
            .await
            .unwrap();
    }

    let signals = collect_signals(&mut signal_rx).await;
    assert_eq!(
        signals,
        vec![
            SignalMessage::Answer { to: a, answer },
            SignalMessage::Ice {
                to: a,
                candidate: candidates[0].clone()
            },
            SignalMessage::Ice {
                to: a,
                candidate: candidates[1].clone()
            },
        ],
        "Signals should arrive in the order they were sent"
    );
}
