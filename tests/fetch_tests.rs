use std::time::Duration;

use firebird::fetch::{FetchHandle, FetchState};
use tokio::time::sleep;

async fn after<T>(ms: u64, result: Result<T, String>) -> Result<T, String> {
    sleep(Duration::from_millis(ms)).await;
    result
}

#[tokio::test]
async fn test_success_sets_only_data() {
    let handle: FetchHandle<Vec<u32>> = FetchHandle::new();
    assert!(handle.snapshot().is_idle());

    let state = handle.execute(after(0, Ok(vec![1, 2]))).await;
    assert_eq!(state, FetchState::success(vec![1, 2]));
    assert_eq!(handle.snapshot(), state);
    assert!(handle.snapshot().error().is_none());
}

#[tokio::test]
async fn test_failure_clears_previous_data() {
    let handle: FetchHandle<u32> = FetchHandle::new();
    handle.execute(after(0, Ok(5))).await;

    let state = handle
        .execute(after(0, Err::<u32, _>("quota exceeded".to_string())))
        .await;
    assert!(state.data().is_none());
    assert_eq!(state.error(), Some("quota exceeded"));
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_loading_is_observable() {
    let handle: FetchHandle<u32> = FetchHandle::new();
    let mut rx = handle.subscribe();

    let running = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.execute(after(50, Ok(1))).await })
    };
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_loading());

    running.await.unwrap();
    assert_eq!(handle.snapshot().data(), Some(&1));
}

#[tokio::test]
async fn test_reset_is_always_idle() {
    let handle: FetchHandle<u32> = FetchHandle::new();
    handle.reset();
    assert!(handle.snapshot().is_idle());

    handle.execute(after(0, Ok(3))).await;
    handle.reset();
    assert!(handle.snapshot().is_idle());

    handle
        .execute(after(0, Err::<u32, _>("boom".to_string())))
        .await;
    handle.reset();
    assert!(handle.snapshot().is_idle());
}

#[tokio::test]
async fn test_stale_resolution_never_overwrites_newer() {
    let handle: FetchHandle<&'static str> = FetchHandle::new();

    let slow = handle.execute(after(100, Ok("first")));
    let fast = async {
        sleep(Duration::from_millis(10)).await;
        handle.execute(after(0, Ok("second"))).await
    };
    let (slow_state, fast_state) = tokio::join!(slow, fast);

    // Each call still reports its own outcome.
    assert_eq!(slow_state.data(), Some(&"first"));
    assert_eq!(fast_state.data(), Some(&"second"));
    assert_eq!(handle.snapshot().data(), Some(&"second"));
}

#[tokio::test]
async fn test_resolution_after_reset_is_dropped() {
    let handle: FetchHandle<u32> = FetchHandle::new();

    let pending = handle.execute(after(50, Ok(9)));
    let reset = async {
        sleep(Duration::from_millis(10)).await;
        handle.reset();
    };
    tokio::join!(pending, reset);

    assert!(handle.snapshot().is_idle());
}

#[tokio::test]
async fn test_spawned_fetch_is_aborted_by_newer_spawn() {
    let handle: FetchHandle<u32> = FetchHandle::new();

    let first = handle.spawn(after(200, Ok(1)));
    let second = handle.spawn(after(10, Ok(2)));

    second.await.unwrap();
    assert!(first.await.unwrap_err().is_cancelled());
    assert_eq!(handle.snapshot(), FetchState::success(2));
}

#[tokio::test]
async fn test_reset_aborts_spawned_fetch() {
    let handle: FetchHandle<u32> = FetchHandle::new();

    let task = handle.spawn(after(200, Ok(1)));
    assert!(handle.snapshot().is_loading());
    handle.reset();

    assert!(task.await.unwrap_err().is_cancelled());
    assert!(handle.snapshot().is_idle());
}

#[tokio::test]
async fn test_blank_error_uses_fallback_text() {
    let handle: FetchHandle<u32> = FetchHandle::new();
    let state = handle.execute(after(0, Err::<u32, _>(String::new()))).await;
    assert_eq!(state.error(), Some(firebird::api::FALLBACK_MESSAGE));
}
