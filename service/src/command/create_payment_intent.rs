//! [`Command`] for provisioning a payment intent for an [`Offer`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, offer, user, Listing, Offer, User},
    infra::{payments, store, Payments, Store},
    Service,
};

use super::Command;

/// [`Command`] for provisioning a payment intent for an accepted [`Offer`]
/// at the hosted payment processor.
///
/// The charged amount is the [`Offer`]'s immutable price, converted into
/// minor currency units. Whether the payment actually settles is confirmed
/// on the client side; this [`Command`] only opens the payment session.
#[derive(Clone, Debug)]
pub struct CreatePaymentIntent {
    /// ID of the [`Offer`] to pay for.
    pub offer_id: offer::Id,

    /// ID of the paying [`User`].
    pub actor: user::Id,
}

impl<Db, Pg> Command<CreatePaymentIntent> for Service<Db, Pg>
where
    Db: Store<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<store::Error>,
        > + Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<store::Error>,
        >,
    Pg: Payments<
        payments::CreateIntent,
        Ok = payments::Intent,
        Err = Traced<payments::Error>,
    >,
{
    type Ok = payments::Intent;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePaymentIntent,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePaymentIntent { offer_id, actor } = cmd;

        let offer = self
            .store()
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        if offer.sender != actor {
            return Err(tracerr::new!(E::NotSender(offer_id)));
        }
        if !offer.status.is_accepted() {
            return Err(tracerr::new!(E::NotPayable(offer.status)));
        }
        if offer.price.currency != self.config().currency {
            return Err(tracerr::new!(E::UnsupportedCurrency(
                offer.price.currency
            )));
        }

        let payer = self
            .store()
            .execute(Select(By::<Option<User>, _>::new(actor.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UserNotExists(actor.clone()))
            .map_err(tracerr::wrap!())?;
        let customer_id = payer
            .customer_id
            .ok_or(E::NoCustomer(payer.id))
            .map_err(tracerr::wrap!())?;

        let listing = self
            .store()
            .execute(Select(By::<Option<Listing>, _>::new(offer.listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(offer.listing_id))
            .map_err(tracerr::wrap!())?;
        let owner = self
            .store()
            .execute(Select(By::<Option<User>, _>::new(
                listing.owner_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UserNotExists(listing.owner_id))
            .map_err(tracerr::wrap!())?;
        let target_id = owner
            .payment_account
            .ok_or(E::OwnerNotPayable(owner.id))
            .map_err(tracerr::wrap!())?;

        let amount = offer
            .price
            .minor_units()
            .ok_or(E::AmountOverflow)
            .map_err(tracerr::wrap!())?;

        let intent = self
            .payments()
            .execute(payments::CreateIntent {
                customer_id,
                amount,
                currency: offer.price.currency,
                target_id,
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tracing::debug!(offer = %offer.id, amount, "payment intent created");

        Ok(intent)
    }
}

/// Error of [`CreatePaymentIntent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Offer`]'s price doesn't fit into minor currency units.
    #[display("offer price doesn't fit into minor currency units")]
    AmountOverflow,

    /// [`Listing`] of the [`Offer`] does not exist anymore.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Paying [`User`] has no customer at the payment processor.
    #[display("`User(id: {_0})` has no payment customer")]
    NoCustomer(#[error(not(source))] user::Id),

    /// [`Offer`] is not in the [`Status`] allowing payment.
    ///
    /// [`Status`]: offer::Status
    #[display("`Offer` in `{_0}` status cannot be paid for")]
    NotPayable(#[error(not(source))] offer::Status),

    /// [`User`] paying for the [`Offer`] is not its sender.
    #[display("`Offer(id: {_0})` was sent by another `User`")]
    NotSender(#[error(not(source))] offer::Id),

    /// [`Offer`] with the provided ID does not exist.
    #[display("`Offer(id: {_0})` does not exist")]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`Listing`]'s owner has no connected payout account.
    #[display("`User(id: {_0})` has no payout account")]
    OwnerNotPayable(#[error(not(source))] user::Id),

    /// [`Payments`] gateway error.
    #[display("`Payments` operation failed: {_0}")]
    #[from]
    Payments(payments::Error),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),

    /// [`Offer`]'s [`Currency`] is not the one the [`Service`] charges in.
    ///
    /// [`Currency`]: common::money::Currency
    #[display("cannot charge in `{_0}` currency")]
    UnsupportedCurrency(#[error(not(source))] common::money::Currency),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}
