//! # View Lifetimes
//!
//! A mounted page owns a [`ViewLifetime`]. Every backend call it starts is
//! raced against the lifetime's signal, so leaving the page cancels whatever
//! is still in flight and the late results are never applied.
//!
//! ```text
//!  page mounts ──► ViewLifetime::new()
//!                        │ token()
//!                        ▼
//!                 LifetimeToken::run(call) ──┬── call finishes   → Ok / Err
//!                                            └── lifetime ends   → Cancelled
//!  page drops  ──► signal = true
//! ```
//!
//! Built on a `tokio::sync::watch` channel: the owner flips the value to
//! `true`, and dropping the owner does the same. A [`Canceller`] can flip it
//! from elsewhere while the owner is borrowed by a running call.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Owner side of a cancellation signal. Cancels on drop.
#[derive(Debug)]
pub struct ViewLifetime {
    tx: Arc<watch::Sender<bool>>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        ViewLifetime { tx: Arc::new(tx) }
    }

    /// A detached handle that can end this lifetime.
    pub fn canceller(&self) -> Canceller {
        Canceller {
            tx: Arc::clone(&self.tx),
        }
    }

    /// A handle that observes this lifetime.
    pub fn token(&self) -> LifetimeToken {
        LifetimeToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Ends the lifetime now.
    pub fn cancel(&self) {
        if !self.tx.send_replace(true) {
            debug!("View lifetime cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Ends a [`ViewLifetime`] without owning it.
#[derive(Debug, Clone)]
pub struct Canceller {
    tx: Arc<watch::Sender<bool>>,
}

impl Canceller {
    pub fn cancel(&self) {
        if !self.tx.send_replace(true) {
            debug!("View lifetime cancelled by handle");
        }
    }
}

/// Observer side of a [`ViewLifetime`].
#[derive(Debug, Clone)]
pub struct LifetimeToken {
    rx: watch::Receiver<bool>,
}

impl LifetimeToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the lifetime has ended.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            // Owner gone without signalling counts as ended.
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Runs `call` unless the lifetime ends first.
    pub async fn run<T, F>(&self, call: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        let mut token = self.clone();
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(ClientError::Cancelled),
            result = call => result,
        }
    }
}
