//! Helpers for wiring a [`Service`] in tests.
//!
//! Everything here runs on the in-memory [`Store`] and a canned payment
//! gateway, so tests exercise real command flows without any external
//! processes.
//!
//! [`Store`]: crate::infra::Store

use std::sync::{Arc, Mutex, PoisonError};

use common::{money::Currency, DateTime, Money};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{listing, offer, user, Listing, Offer, User},
    infra::{payments, Memory, Payments},
    Config, Service,
};

/// Creates a [`Service`] over the provided [`Memory`] store and a
/// [`PaymentsMock`] gateway.
#[must_use]
pub fn service(store: Memory) -> Service<Memory, PaymentsMock> {
    Service::new(Config::default(), store, PaymentsMock::default())
}

/// Creates a [`Money`] amount of whole US dollars.
#[must_use]
pub fn usd(amount: i64) -> Money {
    Money { amount: Decimal::from(amount), currency: Currency::Usd }
}

/// Creates a [`Window`] between the provided Unix timestamps.
///
/// # Panics
///
/// If the timestamps don't form a valid [`Window`].
///
/// [`Window`]: offer::Window
#[must_use]
pub fn window(start: i64, end: i64) -> offer::Window {
    offer::Window::new(
        DateTime::from_unix_timestamp(start).unwrap().coerce(),
        DateTime::from_unix_timestamp(end).unwrap().coerce(),
    )
    .unwrap()
}

/// Creates a [`Listing`] owned by the `owner`, with the provided whole-USD
/// price entries.
///
/// # Panics
///
/// If the `prices` are empty.
#[must_use]
pub fn listing(owner: &str, prices: &[i64]) -> Listing {
    Listing {
        id: listing::Id::new(),
        owner_id: owner.into(),
        name: listing::Name::new("Mountain bike").unwrap(),
        image: listing::ImageUrl::new("https://cdn.test/bike.jpg"),
        prices: listing::PriceTable::new(
            prices.iter().map(|&p| usd(p)).collect(),
        )
        .unwrap(),
        availability: listing::Availability::default(),
        offer_count: 0,
        created_at: DateTime::now().coerce(),
    }
}

/// Creates a [`User`] with a verified email, a payment customer
/// (`cus_{id}`) and a payout account (`acct_{id}`).
#[must_use]
pub fn user(id: &str) -> User {
    User {
        id: id.into(),
        email_verified: true,
        offered_listings: vec![],
        saved_listings: vec![],
        customer_id: Some(format!("cus_{id}").into()),
        payment_account: Some(format!("acct_{id}").into()),
        created_at: DateTime::now().coerce(),
    }
}

/// Creates a verified [`Identity`] of the [`User`] with the provided ID.
///
/// [`Identity`]: user::Identity
#[must_use]
pub fn identity(id: &str) -> user::Identity {
    user::Identity { user_id: id.into(), email_verified: true }
}

/// Creates a pending purchase [`Offer`] between the provided [`User`]s,
/// priced at 10 USD.
#[must_use]
pub fn offer(sender: &str, receiver: &str) -> Offer {
    Offer {
        id: offer::Id::new(),
        listing_id: listing::Id::new(),
        sender: sender.into(),
        receiver: Some(receiver.into()),
        price: usd(10),
        kind: offer::Kind::Purchase,
        status: offer::Status::Pending,
        revision: offer::Revision::INITIAL,
        item: listing::Name::new("Mountain bike").unwrap(),
        image: None,
        created_at: DateTime::now().coerce(),
    }
}

/// Creates a pending rental [`Offer`] between the provided [`User`]s over
/// the [`Window`] between the provided Unix timestamps.
///
/// [`Window`]: offer::Window
#[must_use]
pub fn rental_offer(
    sender: &str,
    receiver: &str,
    start: i64,
    end: i64,
) -> Offer {
    Offer {
        kind: offer::Kind::Rental { window: window(start, end) },
        ..offer(sender, receiver)
    }
}

/// [`Payments`] gateway returning canned [`Intent`]s and recording every
/// request it receives.
///
/// [`Intent`]: payments::Intent
#[derive(Clone, Debug, Default)]
pub struct PaymentsMock {
    /// Requests this [`PaymentsMock`] has received.
    requests: Arc<Mutex<Vec<payments::CreateIntent>>>,
}

impl PaymentsMock {
    /// Returns the requests this [`PaymentsMock`] has received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<payments::CreateIntent> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Payments<payments::CreateIntent> for PaymentsMock {
    type Ok = payments::Intent;
    type Err = Traced<payments::Error>;

    async fn execute(
        &self,
        intent: payments::CreateIntent,
    ) -> Result<Self::Ok, Self::Err> {
        let customer = intent.customer_id.clone();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(intent);
        Ok(payments::Intent {
            payment_intent: "pi_secret".into(),
            ephemeral_key: "ek_test".into(),
            customer,
        })
    }
}
