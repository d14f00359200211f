//! Integration tests for the result board
//!
//! These tests drive the full feed path: a scripted snapshot source feeding
//! the driver task, computed snapshots arriving on the subscription stream,
//! and highlight expiry under paused time.

use futures::StreamExt;
use std::time::Duration;

use paceboard::{
    BoardOptions, CompetitorRecord, CompetitorStatus, Paceboard, Result, Snapshot, SnapshotScope,
    SnapshotSource, SplitRecord,
};
use tokio::sync::mpsc;

/// Source fed by hand from the test body, one snapshot per send.
struct ScriptedSource {
    rx: mpsc::Receiver<Result<Snapshot>>,
}

#[async_trait::async_trait]
impl SnapshotSource for ScriptedSource {
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        match self.rx.recv().await {
            Some(next) => next.map(Some),
            None => Ok(None),
        }
    }
}

fn scripted() -> (mpsc::Sender<Result<Snapshot>>, ScriptedSource) {
    let (tx, rx) = mpsc::channel(16);
    (tx, ScriptedSource { rx })
}

fn competitor(id: &str, time: u32, splits: &[u32]) -> CompetitorRecord {
    CompetitorRecord {
        id: id.into(),
        name: format!("Competitor {id}"),
        organisation: "Club".to_string(),
        status: CompetitorStatus::Ok,
        start_time: None,
        finish_time: None,
        time: Some(time),
        splits: splits
            .iter()
            .enumerate()
            .map(|(i, &cumulative)| SplitRecord { control: format!("{}", 101 + i), cumulative })
            .collect(),
        class_id: None,
        class_name: Some("Elite".to_string()),
    }
}

fn elite(competitors: Vec<CompetitorRecord>) -> Snapshot {
    Snapshot::new(SnapshotScope::Class("Elite".to_string()), competitors)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("paceboard=debug").try_init();
}

#[tokio::test(start_paused = true)]
async fn snapshots_flow_through_to_the_subscription_stream() -> anyhow::Result<()> {
    init_tracing();
    let (tx, source) = scripted();
    let board = Paceboard::launch(source);
    let mut results = board.results();

    tx.send(Ok(elite(vec![
        competitor("x", 100, &[30, 70]),
        competitor("y", 110, &[35, 72]),
    ])))
    .await?;

    let computed = results.next().await.expect("first snapshot must arrive");
    assert_eq!(computed.competitors.len(), 2);
    assert_eq!(computed.competitors[0].record.id, "x".into());
    assert_eq!(computed.competitors[0].placement.position(), Some(1));
    assert_eq!(computed.competitors[1].placement.loss(), Some(10));
    assert_eq!(computed.leg_count, 3);
    assert_eq!(board.current().unwrap(), computed);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn changed_rows_highlight_and_expire() -> anyhow::Result<()> {
    init_tracing();
    let (tx, source) = scripted();
    let board =
        Paceboard::launch_with(source, BoardOptions { highlight_for: Duration::from_secs(10) });
    let mut results = board.results();

    tx.send(Ok(elite(vec![
        competitor("x", 100, &[30, 70]),
        competitor("y", 110, &[35, 72]),
    ])))
    .await?;
    results.next().await.unwrap();
    assert!(board.current_changed().is_empty(), "first snapshot has no baseline");

    // X improves; Y's record is byte-for-byte identical... but Y's loss grows,
    // so Y's computed row changes too.
    tx.send(Ok(elite(vec![
        competitor("x", 90, &[28, 65]),
        competitor("y", 110, &[35, 72]),
    ])))
    .await?;
    results.next().await.unwrap();

    let changed = board.current_changed();
    assert!(changed.contains(&"x".into()));
    assert!(changed.contains(&"y".into()));

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(board.current_changed().is_empty(), "highlight must expire");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn untouched_rows_are_not_highlighted() -> anyhow::Result<()> {
    let (tx, source) = scripted();
    let board = Paceboard::launch(source);
    let mut results = board.results();

    // Two finishers and one runner still out; only the runner punches a control.
    let x = competitor("x", 100, &[30, 70]);
    let y = competitor("y", 110, &[35, 72]);
    let mut out = competitor("z", 0, &[40]);
    out.time = None;
    out.status = CompetitorStatus::Active;

    tx.send(Ok(elite(vec![x.clone(), y.clone(), out]))).await?;
    results.next().await.unwrap();

    let mut out = competitor("z", 0, &[40, 90]);
    out.time = None;
    out.status = CompetitorStatus::Active;
    tx.send(Ok(elite(vec![x, y, out]))).await?;
    results.next().await.unwrap();

    let changed = board.current_changed();
    assert!(changed.contains(&"z".into()));
    assert!(!changed.contains(&"x".into()), "x's computed row is identical");
    assert!(!changed.contains(&"y".into()));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn scope_change_resets_highlight_state() -> anyhow::Result<()> {
    let (tx, source) = scripted();
    let board = Paceboard::launch(source);
    let mut results = board.results();

    tx.send(Ok(elite(vec![competitor("x", 100, &[30])]))).await?;
    results.next().await.unwrap();

    // Same id, different time, but a different class scope: this is a fresh
    // view, not a change to the old one.
    tx.send(Ok(Snapshot::new(
        SnapshotScope::Class("Veterans".to_string()),
        vec![competitor("x", 90, &[28])],
    )))
    .await?;
    results.next().await.unwrap();

    assert!(board.current_changed().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn bad_snapshots_are_discarded_and_the_feed_continues() -> anyhow::Result<()> {
    init_tracing();
    let (tx, source) = scripted();
    let board = Paceboard::launch(source);
    let mut results = board.results();

    // Duplicate ids violate the engine precondition; the driver drops the
    // snapshot and keeps serving the feed.
    tx.send(Ok(elite(vec![competitor("dup", 100, &[]), competitor("dup", 110, &[])]))).await?;
    tx.send(Ok(elite(vec![competitor("ok", 100, &[])]))).await?;

    let computed = results.next().await.unwrap();
    assert_eq!(computed.competitors.len(), 1);
    assert_eq!(computed.competitors[0].record.id, "ok".into());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn transient_source_errors_back_off_and_recover() -> anyhow::Result<()> {
    init_tracing();
    let (tx, source) = scripted();
    let board = Paceboard::launch(source);
    let mut results = board.results();

    tx.send(Err(paceboard::EngineError::source_failed("connection reset"))).await?;
    tx.send(Ok(elite(vec![competitor("x", 100, &[30])]))).await?;

    let computed = results.next().await.unwrap();
    assert_eq!(computed.competitors[0].record.id, "x".into());
    Ok(())
}
