use tandem_server::LobbyCommand;

use crate::integration::{create_test_lobby, init_tracing};
use crate::utils::{collect_signals, connect_participant};

#[tokio::test]
async fn test_lone_participant_waits() {
    init_tracing();

    let (cmd_tx, mut signal_rx, _signaling) = create_test_lobby(false);

    let a = connect_participant(&cmd_tx, &mut signal_rx).await.unwrap();

    cmd_tx
        .send(LobbyCommand::StartCall {
            participant_id: a,
            is_test: false,
        })
        .await
        .unwrap();

    // Starting again while waiting changes nothing.
    cmd_tx
        .send(LobbyCommand::StartCall {
            participant_id: a,
            is_test: false,
        })
        .await
        .unwrap();

    let signals = collect_signals(&mut signal_rx).await;
    assert!(signals.is_empty(), "Nobody to match with: {:?}", signals);
}
