//! Payment gateway implementations.

#[cfg(feature = "http")]
pub mod http;

use common::money::Currency;
use derive_more::{
    AsRef, Debug, Display, Error as StdError, From, Into,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Payment gateway operation.
pub use common::Handler as Payments;

/// [`Payments`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] gateway error.
    Http(http::Error),
}

/// Operation to provision a payment intent at the hosted payment processor.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntent {
    /// ID of the paying customer at the processor.
    pub customer_id: CustomerId,

    /// Amount to charge, as an integer in minor currency units
    /// (`price × 100`).
    pub amount: i64,

    /// [`Currency`] of the `amount`.
    pub currency: Currency,

    /// Connected account receiving the payment.
    pub target_id: AccountId,
}

/// Provisioned payment intent, as the processor returns it.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Client secret of the payment intent.
    #[debug(skip)]
    pub payment_intent: String,

    /// Ephemeral key authorizing the customer session.
    #[debug(skip)]
    pub ephemeral_key: String,

    /// ID of the customer the intent was created for.
    pub customer: CustomerId,
}

/// ID of a customer at the payment processor.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(String, &str)]
pub struct CustomerId(String);

/// ID of a connected account at the payment processor.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(String, &str)]
pub struct AccountId(String);
