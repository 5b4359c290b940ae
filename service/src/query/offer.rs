//! [`Query`] collection related to a single [`Offer`].

use common::operations::By;

use crate::domain::{offer, Offer};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries an [`Offer`] by its ID.
pub type ById = StoreQuery<By<Option<Offer>, offer::Id>>;

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::operations::Insert;

    use crate::{
        domain::offer,
        infra::{Memory, Store as _},
        testing,
        Query as _,
    };

    #[tokio::test]
    async fn reads_one_offer_by_id() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let offer = testing::offer("alice", "bob");
        store.execute(Insert(offer.clone())).await.unwrap();

        let found = service.execute(super::ById::by(offer.id)).await.unwrap();
        assert_eq!(found.unwrap().id, offer.id);

        // An absent document is a successful `None`, not an error.
        let missing = service
            .execute(super::ById::by(offer::Id::new()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
