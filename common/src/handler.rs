//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of a single operation.
///
/// Every boundary of the system (document store, payment gateway, commands
/// and queries themselves) is expressed as a set of [`Handler`]
/// implementations over small operation types, so any of them can be
/// substituted with a fake in tests.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
