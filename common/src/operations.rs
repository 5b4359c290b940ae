//! Abstract document store operations.
//!
//! The hosted document store is only ever reached through these wrappers, so
//! the exact SDK behind them stays an implementation detail of the
//! [`Handler`] executing them.
//!
//! [`Handler`]: crate::Handler

use std::marker::PhantomData;

/// Operation to insert a new document.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Operation to read a document (or a filtered set of documents).
///
/// An absent document is a successful [`None`] result, distinct from a
/// transport failure.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Operation to merge-patch a document.
///
/// Only the fields named by the patch are touched, so independent writers
/// never clobber each other's fields.
#[derive(Clone, Copy, Debug)]
pub struct Patch<T>(pub T);

/// Operation to append a value to an array field of a document.
#[derive(Clone, Copy, Debug)]
pub struct Push<T>(pub T);

/// Operation to remove a value from an array field of a document.
#[derive(Clone, Copy, Debug)]
pub struct Pull<T>(pub T);

/// Operation to increment a numeric field of a document.
#[derive(Clone, Copy, Debug)]
pub struct Increment<T>(pub T);

/// Operation to subscribe to live results of a query.
///
/// Yields the current snapshot immediately and a fresh snapshot after every
/// matching change, until the returned subscription is dropped.
#[derive(Clone, Copy, Debug)]
pub struct Watch<T>(pub T);

/// Selector of `W` by `B`.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Type of the value to select.
    _what: PhantomData<W>,

    /// Value to select by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Creates a new [`By`] with the given value.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Consumes this [`By`] and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
