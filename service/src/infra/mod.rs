//! Infrastructure layer.

pub mod payments;
pub mod store;

pub use self::payments::Payments;
#[cfg(feature = "memory")]
pub use self::store::Memory;
pub use self::store::Store;
