//! Offer lifecycle core of the marketplace.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
#[cfg(all(feature = "memory", any(test, feature = "test-support")))]
pub mod testing;

use common::money::Currency;
use serde::Deserialize;
use smart_default::SmartDefault;

#[cfg(doc)]
use infra::{Payments, Store};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// [`Currency`] the [`Service`] charges payments in.
    #[default(Currency::Usd)]
    pub currency: Currency,
}

/// Domain service.
///
/// Generic over its [`Store`] and [`Payments`] gateway, so tests substitute
/// in-process fakes where production wires the real adapters.
#[derive(Clone, Debug)]
pub struct Service<Db, Pg> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Store`] of this [`Service`].
    store: Db,

    /// [`Payments`] gateway of this [`Service`].
    payments: Pg,
}

impl<Db, Pg> Service<Db, Pg> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, store: Db, payments: Pg) -> Self {
        Self { config, store, payments }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Store`] of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &Db {
        &self.store
    }

    /// Returns [`Payments`] gateway of this [`Service`].
    #[must_use]
    pub fn payments(&self) -> &Pg {
        &self.payments
    }
}
