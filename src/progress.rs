//! Synthetic progress estimation.
//!
//! Some external tools run for minutes without emitting any machine-readable
//! percentage. The estimator fabricates a monotonically increasing value for
//! them: it is an explicit UX approximation, not an inference of real
//! completion. Each monitored phase owns a sub-range `[lower, lower + span)`
//! of the overall bar, so several sequential tools display as one continuous
//! 0–100 progression.

use crate::ProgressEvent;
use std::time::Duration;
use tokio::time::sleep;

/// Fraction of the span the estimator may reach while the monitored
/// process is still alive. The remainder is claimed by the exact terminal
/// event.
const LIVE_CAP: f64 = 0.9;

/// Tuning knobs for the estimator.
#[derive(Debug, Clone)]
pub struct EstimatorOptions {
    /// How often the monitored process is polled.
    ///
    /// Default: 500 milliseconds.
    pub poll_interval: Duration,

    /// Fraction of the span added per poll while below the live cap.
    ///
    /// Default: 0.01.
    pub step: f64,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            step: 0.01,
        }
    }
}

/// Emit a synthetic, monotonic percentage for a running external process.
///
/// While `is_alive()` returns true, the internal fraction advances by
/// `opts.step` per poll, capped at 90% of the span, and
/// `lower + fraction * span` is emitted. The moment `is_alive()` returns
/// false, exactly `lower + span` is emitted and the estimator stops. The
/// terminal event of a phase is always exact, however little of the cap was
/// reached.
///
/// Every emitted percentage `p` satisfies `lower <= p <= lower + span`, and
/// values never decrease.
///
/// # Example
///
/// ```rust
/// use tuneup_engine::{estimate, EstimatorOptions};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// # async fn demo() {
/// let alive = Arc::new(AtomicBool::new(true));
/// let flag = alive.clone();
/// estimate(
///     move || flag.load(Ordering::Relaxed),
///     0.0,
///     50.0,
///     EstimatorOptions::default(),
///     |event| println!("{:.1}%", event.percent),
/// )
/// .await;
/// # }
/// ```
pub async fn estimate<A, F>(
    is_alive: A,
    lower: f64,
    span: f64,
    opts: EstimatorOptions,
    on_progress: F,
) where
    A: Fn() -> bool,
    F: Fn(ProgressEvent),
{
    let mut fraction = 0.0_f64;
    while is_alive() {
        sleep(opts.poll_interval).await;
        if !is_alive() {
            break;
        }
        if fraction < LIVE_CAP {
            fraction = (fraction + opts.step).min(LIVE_CAP);
            on_progress(ProgressEvent {
                percent: lower + fraction * span,
            });
        }
    }

    // Terminal event: exact upper bound of this phase's sub-range.
    on_progress(ProgressEvent {
        percent: lower + span,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn fast_opts() -> EstimatorOptions {
        EstimatorOptions {
            poll_interval: Duration::from_millis(1),
            step: 0.05,
        }
    }

    /// is_alive that reports true for the first `n` calls.
    fn alive_for(n: usize) -> impl Fn() -> bool {
        let calls = AtomicUsize::new(0);
        move || calls.fetch_add(1, Ordering::SeqCst) < n
    }

    async fn collect(lower: f64, span: f64, alive_calls: usize) -> Vec<f64> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        estimate(alive_for(alive_calls), lower, span, fast_opts(), move |e| {
            sink.lock().unwrap().push(e.percent);
        })
        .await;
        let out = events.lock().unwrap().clone();
        out
    }

    #[tokio::test]
    async fn test_terminal_event_is_exact_upper_bound() {
        let events = collect(0.0, 50.0, 6).await;
        assert_eq!(*events.last().unwrap(), 50.0);
    }

    #[tokio::test]
    async fn test_terminal_is_exact_even_when_process_dies_immediately() {
        // Process already gone: no intermediate events, just the terminal one.
        let events = collect(25.0, 25.0, 0).await;
        assert_eq!(events, vec![50.0]);
    }

    #[tokio::test]
    async fn test_events_stay_within_sub_range_and_monotonic() {
        let lower = 50.0;
        let span = 50.0;
        let events = collect(lower, span, 40).await;

        assert!(!events.is_empty());
        for pair in events.windows(2) {
            assert!(pair[0] <= pair[1], "progress went backwards: {pair:?}");
        }
        for p in &events {
            assert!(*p >= lower && *p <= lower + span, "out of range: {p}");
        }
        assert_eq!(*events.last().unwrap(), 100.0);
    }

    #[tokio::test]
    async fn test_live_values_capped_below_terminal() {
        // Long-lived process: intermediate values must plateau at 90% of
        // the span, never touching the upper bound before the terminal event.
        let events = collect(0.0, 100.0, 60).await;
        let (terminal, live) = events.split_last().unwrap();
        assert_eq!(*terminal, 100.0);
        for p in live {
            assert!(*p <= 90.0 + 1e-9, "live value exceeded cap: {p}");
        }
    }

    #[tokio::test]
    async fn test_sequential_phases_hand_off_exactly() {
        // Two phases over [0,50) then [50,50): phase one must end at exactly
        // 50, phase two must start above 50 and end at exactly 100.
        let first = collect(0.0, 50.0, 8).await;
        assert_eq!(*first.last().unwrap(), 50.0);

        let second = collect(50.0, 50.0, 8).await;
        assert!(second[0] > 50.0);
        assert!(second.iter().all(|p| *p > 50.0 && *p <= 100.0));
        assert_eq!(*second.last().unwrap(), 100.0);
    }
}
