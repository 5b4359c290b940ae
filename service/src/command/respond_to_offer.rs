//! [`Command`] for responding to a received [`Offer`].

use common::operations::{By, Patch, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{offer, user, Offer},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for responding to a received [`Offer`]: accepting or rejecting
/// it.
///
/// Rejection additionally clears the receiver, which removes the [`Offer`]
/// from the actor's inbox while keeping its document as history.
#[derive(Clone, Debug)]
pub struct RespondToOffer {
    /// ID of the [`Offer`] to respond to.
    pub offer_id: offer::Id,

    /// ID of the responding [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub actor: user::Id,

    /// [`Decision`] on the [`Offer`].
    pub decision: Decision,
}

/// Decision of an [`Offer`]'s receiver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Accept the [`Offer`], letting its sender pay and finalize it.
    Accept,

    /// Reject the [`Offer`] terminally.
    Reject,
}

impl<Db, Pg> Command<RespondToOffer> for Service<Db, Pg>
where
    Db: Store<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<store::Error>,
        > + Store<
            Patch<offer::PatchBy>,
            Ok = Option<Offer>,
            Err = Traced<store::Error>,
        >,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RespondToOffer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RespondToOffer { offer_id, actor, decision } = cmd;

        let offer = self
            .store()
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        if offer.receiver.as_ref() != Some(&actor) {
            return Err(tracerr::new!(E::NotReceiver(offer_id)));
        }

        let (status, receiver) = match decision {
            Decision::Accept => (
                offer.status.accept().map_err(tracerr::from_and_wrap!(=> E))?,
                None,
            ),
            Decision::Reject => (
                offer.status.reject().map_err(tracerr::from_and_wrap!(=> E))?,
                Some(None),
            ),
        };

        let patched = self
            .store()
            .execute(Patch(offer::PatchBy {
                id: offer.id,
                expected: offer.revision,
                fields: offer::Fields {
                    status: Some(status),
                    receiver,
                },
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;

        tracing::debug!(offer = %patched.id, ?decision, "responded");

        Ok(patched)
    }
}

/// Error of [`RespondToOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Offer`] is not in a [`Status`] allowing the decision.
    ///
    /// [`Status`]: offer::Status
    #[display("{_0}")]
    #[from]
    InvalidTransition(offer::TransitionError),

    /// [`User`] responding to the [`Offer`] is not its receiver.
    ///
    /// [`User`]: crate::domain::User
    #[display("`Offer(id: {_0})` is addressed to another `User`")]
    NotReceiver(#[error(not(source))] offer::Id),

    /// [`Offer`] with the provided ID does not exist.
    #[display("`Offer(id: {_0})` does not exist")]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::operations::{By, Insert, Select};

    use crate::{
        domain::{offer, Offer},
        infra::{Memory, Store as _},
        testing,
        Command as _,
    };

    use super::{Decision, ExecutionError, RespondToOffer};

    #[tokio::test]
    async fn accept_moves_pending_offer_to_accepted() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let offer = testing::offer("alice", "bob");
        store.execute(Insert(offer.clone())).await.unwrap();

        let patched = service
            .execute(RespondToOffer {
                offer_id: offer.id,
                actor: "bob".into(),
                decision: Decision::Accept,
            })
            .await
            .unwrap();

        assert!(patched.status.is_accepted());
        assert_eq!(patched.receiver, Some("bob".into()));
        assert_eq!(patched.revision, offer.revision.next());
    }

    #[tokio::test]
    async fn reject_clears_receiver_but_keeps_document() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let offer = testing::offer("alice", "bob");
        store.execute(Insert(offer.clone())).await.unwrap();

        let patched = service
            .execute(RespondToOffer {
                offer_id: offer.id,
                actor: "bob".into(),
                decision: Decision::Reject,
            })
            .await
            .unwrap();

        assert!(patched.status.is_rejected());
        assert_eq!(patched.receiver, None);

        let stored: Option<Offer> = store
            .execute(Select(By::<Option<Offer>, _>::new(offer.id)))
            .await
            .unwrap();
        assert!(stored.unwrap().status.is_rejected());
    }

    #[tokio::test]
    async fn forbids_non_receiver() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let offer = testing::offer("alice", "bob");
        store.execute(Insert(offer.clone())).await.unwrap();

        // Neither the sender nor a stranger may decide.
        for actor in ["alice", "carol"] {
            let err = service
                .execute(RespondToOffer {
                    offer_id: offer.id,
                    actor: actor.into(),
                    decision: Decision::Accept,
                })
                .await
                .unwrap_err()
                .split()
                .0;
            assert!(matches!(err, ExecutionError::NotReceiver(_)));
        }
    }

    #[tokio::test]
    async fn forbids_deciding_twice() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let mut offer = testing::offer("alice", "bob");
        offer.status = offer::Status::Accepted;
        store.execute(Insert(offer.clone())).await.unwrap();

        let err = service
            .execute(RespondToOffer {
                offer_id: offer.id,
                actor: "bob".into(),
                decision: Decision::Reject,
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn missing_offer_is_reported() {
        let service = testing::service(Memory::new());

        let err = service
            .execute(RespondToOffer {
                offer_id: offer::Id::new(),
                actor: "bob".into(),
                decision: Decision::Accept,
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::OfferNotExists(_)));
    }
}
