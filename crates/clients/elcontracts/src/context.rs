//! Per-call cancellation and deadlines.

use core::future::Future;
use core::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// The scope of a single remote read.
///
/// Every call the reader makes is bound to the [`CallContext`] the caller passes in. Cancelling
/// the token, or reaching the deadline, fails the in-flight call with [`Error::Cancelled`] or
/// [`Error::DeadlineExceeded`]. A context that is already cancelled or expired never issues the
/// call at all.
///
/// Cloning a context shares its token, so cancelling any clone cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context with no deadline that is only cancelled explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context cancelled through an existing token.
    #[must_use]
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            deadline: None,
        }
    }

    /// Fail calls still pending `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Fail calls still pending at `deadline`. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// A context cancelled together with `self`, or on its own through its child token.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Drive `call` to completion unless the context ends first.
    ///
    /// # Errors
    ///
    /// * [`Error::Cancelled`] if the token is (or becomes) cancelled
    /// * [`Error::DeadlineExceeded`] if the deadline is (or becomes) reached
    /// * Any error returned by `call`
    pub async fn scope<F, T>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancellation.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => core::future::pending::<()>().await,
            }
        };

        // `biased` polls the context branches first, so an ended context never polls `call`.
        tokio::select! {
            biased;
            () = self.cancellation.cancelled() => Err(Error::Cancelled),
            () = expired => Err(Error::DeadlineExceeded),
            result = call => result,
        }
    }
}
