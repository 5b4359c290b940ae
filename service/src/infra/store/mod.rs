//! [`Store`]-related implementations.

#[cfg(feature = "memory")]
pub mod memory;

use std::{
    fmt,
    pin::Pin,
    task::{Context, Poll},
};

use derive_more::{Display, Error as StdError};
use futures::{stream::BoxStream, Stream};

use crate::domain::offer;

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Document store operation.
pub use common::Handler as Store;

/// [`Store`] error.
///
/// An absent document is never an [`Error`]: point reads return [`None`]
/// instead, so callers can tell "nothing there" apart from "the store
/// didn't answer".
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Revision-conditional merge-patch lost against a concurrent writer.
    #[display("expected `Offer` revision {expected}, found {found}")]
    Conflict {
        /// [`offer::Revision`] the failed writer expected.
        expected: offer::Revision,

        /// [`offer::Revision`] the document is actually at.
        found: offer::Revision,
    },

    /// Store backend is unreachable or failed to serve the operation.
    #[display("store unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),
}

/// Live result of a [`Watch`] operation.
///
/// Yields the current snapshot immediately and a fresh snapshot after every
/// matching change. The underlying listener lives exactly as long as this
/// value: dropping it (on sign-out, screen teardown or an error path) tears
/// the listener down.
///
/// [`Watch`]: common::operations::Watch
pub struct Subscription<T> {
    /// Inner stream of snapshots.
    inner: BoxStream<'static, T>,
}

impl<T> Subscription<T> {
    /// Creates a new [`Subscription`] over the provided snapshot stream.
    #[must_use]
    pub fn new(stream: impl Stream<Item = T> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Tears this [`Subscription`] down explicitly.
    ///
    /// Equivalent to dropping it; exists to make teardown visible at call
    /// sites that outlive their actor context.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.as_mut().poll_next(cx)
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
