//! [`Offer`]-related [`Store`] implementations.

use common::operations::{By, Insert, Patch, Select, Watch};
use tokio::sync::broadcast;
use tracerr::Traced;

use crate::{
    domain::{offer, Offer},
    infra::store::{self, memory::Filter, Memory, Store, Subscription},
    read,
};

impl Store<Insert<Offer>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(&self, Insert(offer): Insert<Offer>) -> Result<(), Self::Err> {
        drop(self.offers_mut().insert(offer.id, offer));
        self.notify_offers();
        Ok(())
    }
}

impl Store<Select<By<Option<Offer>, offer::Id>>> for Memory {
    type Ok = Option<Offer>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Offer>, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.offers().get(&by.into_inner()).cloned())
    }
}

impl<F: Filter> Store<Select<By<Vec<Offer>, F>>> for Memory {
    type Ok = Vec<Offer>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Offer>, F>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.offers_snapshot(&by.into_inner()))
    }
}

impl Store<Patch<offer::PatchBy>> for Memory {
    type Ok = Option<Offer>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Patch(by): Patch<offer::PatchBy>,
    ) -> Result<Self::Ok, Self::Err> {
        let offer::PatchBy {
            id,
            expected,
            fields,
        } = by;

        let patched = {
            let mut offers = self.offers_mut();
            let Some(offer) = offers.get_mut(&id) else {
                return Ok(None);
            };

            if offer.revision != expected {
                return Err(tracerr::new!(store::Error::Conflict {
                    expected,
                    found: offer.revision,
                }));
            }

            if let Some(status) = fields.status {
                offer.status = status;
            }
            if let Some(receiver) = fields.receiver {
                offer.receiver = receiver;
            }
            offer.revision = offer.revision.next();

            offer.clone()
        };

        self.notify_offers();
        Ok(Some(patched))
    }
}

impl<F> Store<Watch<By<Vec<Offer>, F>>> for Memory
where
    F: Filter + Send + Sync + 'static,
{
    type Ok = Subscription<Vec<Offer>>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Watch(by): Watch<By<Vec<Offer>, F>>,
    ) -> Result<Self::Ok, Self::Err> {
        let this = self.clone();
        let filter = by.into_inner();
        let mut changes = self.inner.offers_changed.subscribe();

        Ok(Subscription::new(async_stream::stream! {
            yield this.offers_snapshot(&filter);
            loop {
                match changes.recv().await {
                    Ok(()) => yield this.offers_snapshot(&filter),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Snapshots are re-read, so lag only coalesces.
                        tracing::warn!(skipped, "offers watcher lagged");
                        yield this.offers_snapshot(&filter);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }))
    }
}

impl Filter for read::offer::ReceivedBy {
    fn matches(&self, offer: &Offer) -> bool {
        offer.receiver.as_ref() == Some(&self.0)
            && !offer.status.is_finalized()
    }
}

impl Filter for read::offer::SentBy {
    fn matches(&self, offer: &Offer) -> bool {
        offer.sender == self.0
    }
}
