use tandem_core::PartnerId;
use tandem_server::LobbyCommand;

use crate::integration::{create_test_lobby, init_tracing};
use crate::utils::{SignalMessage, collect_signals, connect_participant};

#[tokio::test]
async fn test_two_participants_match() {
    init_tracing();

    let (cmd_tx, mut signal_rx, signaling) = create_test_lobby(false);

    let a = connect_participant(&cmd_tx, &mut signal_rx).await.unwrap();
    let b = connect_participant(&cmd_tx, &mut signal_rx).await.unwrap();

    for participant_id in [a, b] {
        cmd_tx
            .send(LobbyCommand::StartCall {
                participant_id,
                is_test: false,
            })
            .await
            .unwrap();
    }

    collect_signals(&mut signal_rx).await;

    let matched_a: Vec<_> = signaling
        .signals_for(&a)
        .await
        .into_iter()
        .filter(|s| matches!(s, SignalMessage::Matched { .. }))
        .collect();
    assert_eq!(
        matched_a,
        vec![SignalMessage::Matched {
            to: a,
            partner_id: PartnerId::Participant(b),
            is_synthetic: false
        }]
    );

    let matched_b: Vec<_> = signaling
        .signals_for(&b)
        .await
        .into_iter()
        .filter(|s| matches!(s, SignalMessage::Matched { .. }))
        .collect();
    assert_eq!(
        matched_b,
        vec![SignalMessage::Matched {
            to: b,
            partner_id: PartnerId::Participant(a),
            is_synthetic: false
        }]
    );
}
