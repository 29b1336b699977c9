//! Contract tests for the retry engine
//!
//! These run under a paused tokio clock, so backoff sleeps advance virtual
//! time instantly and elapsed-time assertions are exact to the jitter bound.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use uprec_core::error::Error;
use uprec_core::retry::{RetryPolicy, MAX_JITTER_MS};

#[tokio::test(start_paused = true)]
async fn succeeds_after_transient_server_failures() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);
    let started = Instant::now();

    let result = policy
        .run(|| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(Error::api(Some(503), "service overloaded"))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);

    // Two sleeps: 2s and 4s base, each plus at most 1s jitter
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(6), "elapsed {elapsed:?}");
    assert!(
        elapsed <= Duration::from_secs(6) + 2 * Duration::from_millis(MAX_JITTER_MS),
        "elapsed {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn non_retryable_error_propagates_immediately() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);
    let started = Instant::now();

    let result: Result<(), _> = policy
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::api(None, "Invalid parameter: url")) }
        })
        .await;

    let err = result.unwrap_err();
    assert!(
        matches!(&err, Error::Api { status: None, message } if message.contains("Invalid parameter")),
        "expected the original error verbatim, got {err:?}"
    );
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO, "no sleeps expected");
}

#[tokio::test(start_paused = true)]
async fn deadline_exceeded_wraps_last_error() {
    let policy = RetryPolicy {
        ceiling: Duration::from_secs(1),
        ..RetryPolicy::default()
    };
    let attempts = AtomicUsize::new(0);
    let started = Instant::now();

    let result: Result<(), _> = policy
        .run(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::api(Some(500), "internal error")) }
        })
        .await;

    match result.unwrap_err() {
        Error::DeadlineExceeded { ceiling, last } => {
            assert_eq!(ceiling, Duration::from_secs(1));
            assert_eq!(last.status_code(), Some(500));
        }
        other => panic!("expected DeadlineExceeded, got {other:?}"),
    }

    // Overshoot is bounded by one in-flight sleep (2s base + 1s jitter)
    let elapsed = started.elapsed();
    assert!(
        elapsed <= Duration::from_secs(1) + Duration::from_secs(2) + Duration::from_millis(MAX_JITTER_MS),
        "elapsed {elapsed:?}"
    );
    assert!(attempts.load(Ordering::SeqCst) >= 2);
}

#[tokio::test(start_paused = true)]
async fn known_quirk_bad_request_is_retried() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);

    let result = policy
        .run(|| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(Error::api(
                        None,
                        r#"Invalid Input: Bad request for "newMonitor": {"code":400,"type":"already_exists"}"#,
                    ))
                } else {
                    Ok("created")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "created");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn eventual_consistency_marker_is_retried() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);

    let result = policy
        .run(|| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(Error::api(None, "Eventual consistency. Please try again"))
                } else {
                    Ok(())
                }
            }
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
