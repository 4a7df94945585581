use tandem_server::LobbyCommand;

use crate::integration::{create_test_lobby, init_tracing};
use crate::utils::{SignalMessage, collect_signals, connect_participant};

#[tokio::test]
async fn test_disconnect_removes_participant() {
    init_tracing();

    let (cmd_tx, mut signal_rx, _signaling) = create_test_lobby(false);

    let a = connect_participant(&cmd_tx, &mut signal_rx).await.unwrap();
    let b = connect_participant(&cmd_tx, &mut signal_rx).await.unwrap();

    // A waits, then leaves before anyone else shows up.
    cmd_tx
        .send(LobbyCommand::StartCall {
            participant_id: a,
            is_test: false,
        })
        .await
        .unwrap();
    cmd_tx
        .send(LobbyCommand::Disconnect { participant_id: a })
        .await
        .unwrap();

    let signals = collect_signals(&mut signal_rx).await;
    assert!(
        signals.contains(&SignalMessage::ActiveUsers {
            to: b,
            users: vec![b]
        }),
        "B should see A leave: {:?}",
        signals
    );

    // A must not be in the pool any more, so B is left waiting alone.
    cmd_tx
        .send(LobbyCommand::StartCall {
            participant_id: b,
            is_test: false,
        })
        .await
        .unwrap();

    // Late commands from A are ignored.
    cmd_tx
        .send(LobbyCommand::EndCall { participant_id: a })
        .await
        .unwrap();
    cmd_tx
        .send(LobbyCommand::Disconnect { participant_id: a })
        .await
        .unwrap();

    let signals = collect_signals(&mut signal_rx).await;
    assert!(signals.is_empty(), "Unexpected signals: {:?}", signals);
}
