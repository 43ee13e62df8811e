// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An awaitable, cancelable handle for a value produced exactly once.
//!
//! [`ScopedAsyncOperation::create`] returns the handle together with its
//! [`CompletionToken`]. The producer keeps the token and calls
//! [`CompletionToken::complete`] when the work finishes; the consumer awaits the
//! handle. Completing consumes the token, so a value is delivered at most once.
//!
//! Cancelling the handle (or dropping it) makes any later completion a no-op:
//! the value is dropped on the producer side and never observed.

use std::{
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    task::{ready, Context, Poll},
};
use thiserror::Error;
use tokio::sync::oneshot;

/// Why an operation finished without a result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// The consumer cancelled the operation.
    #[error("the operation was cancelled")]
    Cancelled,
    /// The producer dropped its token without completing.
    #[error("the operation was abandoned before completing")]
    Abandoned,
    /// The result was already handed out by an earlier call.
    #[error("the operation's result was already taken")]
    AlreadyTaken,
}

/// The outcome of a finished operation: `Some` value, or `None` for an empty
/// completion (the work finished but produced nothing).
pub type OperationResult<T> = Result<Option<T>, OperationError>;

/// The consumer side of a single-shot asynchronous operation.
///
/// It implements [`Future`], so it can be `.await`ed directly. Outside an async
/// context use [`blocking_wait`](Self::blocking_wait) or poll with
/// [`try_take`](Self::try_take) once per frame.
///
/// The result is handed out once, whichever way it is read. Afterwards
/// `try_take` returns `None` and awaiting yields [`OperationError::AlreadyTaken`].
#[derive(Debug)]
pub struct ScopedAsyncOperation<T> {
    receiver: oneshot::Receiver<Option<T>>,
    cancelled: Arc<AtomicBool>,
    finished: bool,
}

/// The producer side of a [`ScopedAsyncOperation`].
#[derive(Debug)]
pub struct CompletionToken<T> {
    sender: oneshot::Sender<Option<T>>,
    cancelled: Arc<AtomicBool>,
}

impl<T> ScopedAsyncOperation<T> {
    /// Creates a pending operation and the token that completes it.
    pub fn create() -> (Self, CompletionToken<T>) {
        let (sender, receiver) = oneshot::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        (
            Self {
                receiver,
                cancelled: Arc::clone(&cancelled),
                finished: false,
            },
            CompletionToken { sender, cancelled },
        )
    }

    /// Creates an operation that is already complete.
    pub fn completed(value: Option<T>) -> Self {
        let (operation, token) = Self::create();
        token.complete(value);
        operation
    }

    /// Cancels the operation. Any later completion is discarded.
    pub fn cancel(&mut self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            log::trace!("Async operation cancelled");
        }
        self.receiver.close();
    }

    /// Returns `true` if [`cancel`](Self::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Takes the result if the operation has finished.
    ///
    /// Returns `None` while the operation is still pending, and after the result
    /// has been taken once.
    pub fn try_take(&mut self) -> Option<OperationResult<T>> {
        if self.finished {
            return None;
        }
        if self.is_cancelled() {
            self.finished = true;
            return Some(Err(OperationError::Cancelled));
        }
        match self.receiver.try_recv() {
            Ok(value) => {
                self.finished = true;
                Some(Ok(value))
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.finished = true;
                Some(Err(OperationError::Abandoned))
            }
        }
    }

    /// Blocks the current thread until the operation finishes.
    ///
    /// # Panics
    /// Panics if called from within an asynchronous execution context, like
    /// [`tokio::sync::oneshot::Receiver::blocking_recv`].
    pub fn blocking_wait(self) -> OperationResult<T> {
        if self.is_cancelled() {
            return Err(OperationError::Cancelled);
        }
        if self.finished {
            return Err(OperationError::AlreadyTaken);
        }
        self.receiver
            .blocking_recv()
            .map_err(|_| OperationError::Abandoned)
    }
}

impl<T> Future for ScopedAsyncOperation<T> {
    type Output = OperationResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.is_cancelled() {
            self.finished = true;
            return Poll::Ready(Err(OperationError::Cancelled));
        }
        if self.finished {
            return Poll::Ready(Err(OperationError::AlreadyTaken));
        }
        let received = ready!(Pin::new(&mut self.receiver).poll(cx));
        self.finished = true;
        Poll::Ready(received.map_err(|_| OperationError::Abandoned))
    }
}

impl<T> CompletionToken<T> {
    /// Returns `true` while the consumer is still interested in the result.
    pub fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst) && !self.sender.is_closed()
    }

    /// Delivers the result. Returns `false` if it was discarded because the
    /// operation was cancelled or dropped.
    pub fn complete(self, value: Option<T>) -> bool {
        if !self.is_live() {
            log::trace!("Discarding result of an abandoned async operation");
            return false;
        }
        self.sender.send(value).is_ok()
    }
}
