//! Integration tests for the batch queue runner: ordering, pacing,
//! exhaustion halt, and cancellation guarantees.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use common::{dispatcher, project_with_scenes, RecordingClipboard, RecordingSurface};
use tokio_util::sync::CancellationToken;

use sceneflow_core::scene::GenerationStatus;
use sceneflow_pipeline::{BatchRunner, DispatchOutcome, PipelineConfig, RunnerState};

// Deliberately not the default, so the observed gap can only come
// from the configured value.
const PACING: Duration = Duration::from_secs(3);

fn paced_config(active_slots: usize, daily_cap: u32) -> PipelineConfig {
    PipelineConfig {
        pacing: PACING,
        ..common::config(active_slots, daily_cap)
    }
}

// ---------------------------------------------------------------------------
// Full completion
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn completes_queue_in_order_with_configured_pacing_between_items() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    let config = paced_config(1, 100);
    let mut dispatcher = dispatcher(&config, clipboard.clone(), surface.clone());
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(2);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    let started = tokio::time::Instant::now();
    let state = runner
        .run(
            &mut dispatcher,
            &mut session,
            &mut project,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(state, RunnerState::Completed);
    assert_eq!(runner.state(), RunnerState::Completed);
    for scene in &project.scenes {
        assert_eq!(scene.generation_status, GenerationStatus::Completed);
    }
    // Scene order is preserved in the dispatched prompts.
    let writes = clipboard.writes.lock().unwrap();
    assert_eq!(writes.len(), 2);
    assert!(writes[0].contains("performs action 0"));
    assert!(writes[1].contains("performs action 1"));
    // Exactly one pacing gap between the two items, none after the last.
    assert_eq!(started.elapsed(), PACING);
}

#[tokio::test(start_paused = true)]
async fn empty_queue_completes_immediately() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    let config = paced_config(1, 2);
    let mut dispatcher = dispatcher(&config, clipboard, surface);
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(0);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    let state = runner
        .run(
            &mut dispatcher,
            &mut session,
            &mut project,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(state, RunnerState::Completed);
    assert_eq!(session.ledger.usage(0), 0);
}

// ---------------------------------------------------------------------------
// Exhaustion halt
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn halts_without_advancing_when_quota_runs_out() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    // One slot with capacity for exactly one more dispatch.
    let config = paced_config(1, 1);
    let mut dispatcher = dispatcher(&config, clipboard, surface.clone());
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(3);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    let state = runner
        .run(
            &mut dispatcher,
            &mut session,
            &mut project,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_matches!(state, RunnerState::Stopped { current: 1 });
    assert_eq!(
        project.scenes[0].generation_status,
        GenerationStatus::Completed
    );
    assert_eq!(project.scenes[1].generation_status, GenerationStatus::Idle);
    assert_eq!(project.scenes[2].generation_status, GenerationStatus::Idle);
    // Only the first item consumed quota or opened a window.
    assert_eq!(session.ledger.usage(0), 1);
    assert_eq!(surface.opens.lock().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn stop_during_pacing_wait_prevents_the_next_item() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    let config = paced_config(1, 100);
    let mut dispatcher = dispatcher(&config, clipboard, surface.clone());
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(3);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    let cancel = CancellationToken::new();
    let stop = cancel.clone();
    let handle = tokio::spawn(async move {
        let state = runner
            .run(&mut dispatcher, &mut session, &mut project, &cancel)
            .await
            .unwrap();
        (state, project, session)
    });

    // Let item 0 dispatch and the runner park in its pacing wait.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    stop.cancel();
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    // Even well past the original delay window, item 1 must never run.
    tokio::time::advance(PACING * 3).await;

    let (state, project, session) = handle.await.unwrap();
    assert_matches!(state, RunnerState::Stopped { current: 0 });
    assert_eq!(
        project.scenes[0].generation_status,
        GenerationStatus::Completed
    );
    assert_eq!(project.scenes[1].generation_status, GenerationStatus::Idle);
    assert_eq!(project.scenes[2].generation_status, GenerationStatus::Idle);
    assert_eq!(session.ledger.usage(0), 1);
    assert_eq!(surface.opens.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start_runs_nothing() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    let config = paced_config(1, 100);
    let mut dispatcher = dispatcher(&config, clipboard, surface.clone());
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(2);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let state = runner
        .run(&mut dispatcher, &mut session, &mut project, &cancel)
        .await
        .unwrap();

    assert_matches!(state, RunnerState::Stopped { current: 0 });
    assert_eq!(session.ledger.usage(0), 0);
    assert!(surface.opens.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Manual launch and reopen
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn launch_one_runs_a_single_item_without_pacing() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    let config = paced_config(1, 100);
    let mut dispatcher = dispatcher(&config, clipboard, surface.clone());
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(3);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    let started = tokio::time::Instant::now();
    let outcome = runner
        .launch_one(1, &mut dispatcher, &mut session, &mut project)
        .await
        .unwrap();

    assert_matches!(outcome, DispatchOutcome::Dispatched { slot: 0 });
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(project.scenes[0].generation_status, GenerationStatus::Idle);
    assert_eq!(
        project.scenes[1].generation_status,
        GenerationStatus::Completed
    );
    assert_eq!(project.scenes[2].generation_status, GenerationStatus::Idle);
    assert_eq!(session.ledger.usage(0), 1);
}

#[tokio::test]
async fn launch_one_out_of_range_is_an_error() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    let config = paced_config(1, 2);
    let mut dispatcher = dispatcher(&config, clipboard, surface);
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(1);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    let err = runner
        .launch_one(5, &mut dispatcher, &mut session, &mut project)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sceneflow_pipeline::PipelineError::ItemOutOfRange { index: 5, len: 1 }
    );
}

#[tokio::test(start_paused = true)]
async fn reopen_returns_a_stopped_queue_to_idle() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let surface = Arc::new(RecordingSurface::default());
    let config = paced_config(1, 1);
    let mut dispatcher = dispatcher(&config, clipboard, surface);
    let mut session = dispatcher.new_session().unwrap();
    let mut project = project_with_scenes(2);
    let mut runner = BatchRunner::from_project(&project, &[], &config);

    runner
        .run(
            &mut dispatcher,
            &mut session,
            &mut project,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_matches!(runner.state(), RunnerState::Stopped { .. });

    runner.reopen();
    assert_eq!(runner.state(), RunnerState::Idle);
    assert_eq!(runner.queue().len(), 2);
}
