//! Mid-run cancellation signalling.
//!
//! The engine threads a [`CancelToken`] through execution, progress
//! estimation and the installer pipeline. Cancellation is cooperative: the
//! running component observes the token at its suspension points, kills any
//! child process it owns, runs its cleanup, and reports
//! [`crate::RunOutcome::Cancelled`].

use tokio::sync::watch;

/// The caller-held half of a cancellation pair.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. Idempotent; safe to call from any task.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// The engine-held half of a cancellation pair.
///
/// Cloneable so a single run can hand it to several cooperating tasks.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves when cancellation is signalled.
    ///
    /// If the [`CancelHandle`] is dropped without cancelling, this future
    /// never resolves; a run whose handle is gone can no longer be
    /// cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if *rx.borrow() {
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

/// Create a connected handle/token pair.
///
/// # Example
///
/// ```rust
/// use tuneup_engine::cancel_pair;
///
/// let (handle, token) = cancel_pair();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}
