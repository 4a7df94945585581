use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::mpsc;

use tandem_core::{ParticipantId, PartnerId};
use tandem_server::LobbyCommand;

use super::mock_signaling::SignalMessage;

/// Timeout for a single expected signal (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 2000;

/// How long the lobby must stay silent before we assume it is done (ms).
pub const QUIET_PERIOD_MS: u64 = 200;

/// Connect a fresh participant and wait until the lobby has registered it.
pub async fn connect_participant(
    cmd_tx: &mpsc::Sender<LobbyCommand>,
    signal_rx: &mut mpsc::UnboundedReceiver<SignalMessage>,
) -> Result<ParticipantId> {
    let participant_id = ParticipantId::new();

    cmd_tx
        .send(LobbyCommand::Connect { participant_id })
        .await
        .context("Failed to send Connect")?;

    wait_for_signal(
        signal_rx,
        |s| matches!(s, SignalMessage::ActiveUsers { to, .. } if *to == participant_id),
        SIGNAL_TIMEOUT_MS,
    )
    .await
    .context("Connect was never acknowledged")?;

    Ok(participant_id)
}

/// Connect two participants and have both start a real call.
pub async fn matched_pair(
    cmd_tx: &mpsc::Sender<LobbyCommand>,
    signal_rx: &mut mpsc::UnboundedReceiver<SignalMessage>,
) -> Result<(ParticipantId, ParticipantId)> {
    let a = connect_participant(cmd_tx, signal_rx).await?;
    let b = connect_participant(cmd_tx, signal_rx).await?;

    for participant_id in [a, b] {
        cmd_tx
            .send(LobbyCommand::StartCall {
                participant_id,
                is_test: false,
            })
            .await
            .context("Failed to send StartCall")?;
    }

    let is_match_of = |me: ParticipantId, partner: ParticipantId| {
        move |s: &SignalMessage| {
            matches!(s, SignalMessage::Matched { to, partner_id, .. }
                if *to == me && *partner_id == PartnerId::Participant(partner))
        }
    };
    let (a_matched, b_matched) = (is_match_of(a, b), is_match_of(b, a));

    let mut seen = (false, false);
    while seen != (true, true) {
        let signal = wait_for_signal(
            signal_rx,
            |s| a_matched(s) || b_matched(s),
            SIGNAL_TIMEOUT_MS,
        )
        .await
        .context("Pair was never matched")?;
        seen.0 |= a_matched(&signal);
        seen.1 |= b_matched(&signal);
    }

    Ok((a, b))
}

/// Wait for the first signal matching `predicate`, discarding the others.
pub async fn wait_for_signal<F>(
    signal_rx: &mut mpsc::UnboundedReceiver<SignalMessage>,
    predicate: F,
    timeout_ms: u64,
) -> Result<SignalMessage>
where
    F: Fn(&SignalMessage) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);

    loop {
        match tokio::time::timeout_at(deadline, signal_rx.recv()).await {
            Ok(Some(signal)) if predicate(&signal) => return Ok(signal),
            Ok(Some(_)) => continue,
            Ok(None) => anyhow::bail!("Signal channel closed"),
            Err(_) => anyhow::bail!("Timeout waiting for signal"),
        }
    }
}

/// Collect everything the lobby emits until it has been quiet for a while.
pub async fn collect_signals(
    signal_rx: &mut mpsc::UnboundedReceiver<SignalMessage>,
) -> Vec<SignalMessage> {
    let mut signals = Vec::new();

    while let Ok(Some(signal)) =
        tokio::time::timeout(Duration::from_millis(QUIET_PERIOD_MS), signal_rx.recv()).await
    {
        signals.push(signal);
    }

    signals
}
