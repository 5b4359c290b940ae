//! [`Query`] collection related to the multiple [`Offer`]s.

use common::operations::By;

use crate::{domain::Offer, read};
#[cfg(doc)]
use crate::Query;

use super::WatchQuery;

/// Watches the active received [`Offer`]s of a [`User`]: addressed to them
/// and not yet finalized (the inbox).
///
/// [`User`]: crate::domain::User
pub type Received = WatchQuery<By<Vec<Offer>, read::offer::ReceivedBy>>;

/// Watches all the [`Offer`]s a [`User`] has sent.
///
/// The accepted and archived subsets are derived client-side over its
/// snapshots via [`read::offer::Accepted`] and [`read::offer::Archived`].
///
/// [`User`]: crate::domain::User
pub type Sent = WatchQuery<By<Vec<Offer>, read::offer::SentBy>>;

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::operations::Insert;
    use futures::StreamExt as _;

    use crate::{
        domain::offer,
        infra::{Memory, Store as _},
        read,
        testing,
        Query as _,
    };

    #[tokio::test]
    async fn received_watch_yields_fresh_snapshots() {
        let store = Memory::new();
        let service = testing::service(store.clone());

        let mut subscription = service
            .execute(super::Received::by(read::offer::ReceivedBy(
                "bob".into(),
            )))
            .await
            .unwrap();

        // Initial snapshot of an empty collection.
        assert!(subscription.next().await.unwrap().is_empty());

        let offer = testing::offer("alice", "bob");
        store.execute(Insert(offer.clone())).await.unwrap();

        let snapshot = subscription.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, offer.id);
    }

    #[tokio::test]
    async fn received_watch_omits_foreign_and_finalized_offers() {
        let store = Memory::new();
        let service = testing::service(store.clone());

        let mut own = testing::offer("alice", "bob");
        own.status = offer::Status::Accepted;
        let mut finalized = testing::offer("alice", "bob");
        finalized.status = offer::Status::Finalized;
        let foreign = testing::offer("alice", "carol");
        for o in [own.clone(), finalized, foreign] {
            store.execute(Insert(o)).await.unwrap();
        }

        let mut subscription = service
            .execute(super::Received::by(read::offer::ReceivedBy(
                "bob".into(),
            )))
            .await
            .unwrap();

        let snapshot = subscription.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, own.id);
    }

    #[tokio::test]
    async fn sent_watch_feeds_client_side_filters() {
        let store = Memory::new();
        let service = testing::service(store.clone());

        let pending = testing::offer("alice", "bob");
        let mut accepted = testing::offer("alice", "bob");
        accepted.status = offer::Status::Accepted;
        let mut archived = testing::offer("alice", "bob");
        archived.status = offer::Status::Finalized;
        for o in [pending, accepted.clone(), archived.clone()] {
            store.execute(Insert(o)).await.unwrap();
        }

        let mut subscription = service
            .execute(super::Sent::by(read::offer::SentBy("alice".into())))
            .await
            .unwrap();
        let snapshot = subscription.next().await.unwrap();
        assert_eq!(snapshot.len(), 3);

        let read::offer::Accepted(subset) = snapshot.clone().into();
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].id, accepted.id);

        let read::offer::Active(subset) = snapshot.clone().into();
        assert_eq!(subset.len(), 2);

        let read::offer::Archived(subset) = snapshot.into();
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].id, archived.id);

        subscription.unsubscribe();
    }
}
