//! [`Offer`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{listing, user};
#[cfg(doc)]
use crate::domain::{Listing, User};

/// Proposed transaction between two [`User`]s over a [`Listing`].
///
/// An [`Offer`] is never deleted: once terminal, its document persists
/// indefinitely as transaction history.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Offer {
    /// ID of this [`Offer`].
    pub id: Id,

    /// ID of the [`Listing`] this [`Offer`] is about.
    pub listing_id: listing::Id,

    /// ID of the [`User`] who sent this [`Offer`].
    pub sender: user::Id,

    /// ID of the [`User`] this [`Offer`] is addressed to.
    ///
    /// Cleared to [`None`] on rejection, removing this [`Offer`] from the
    /// receiver's inbox without deleting its history.
    pub receiver: Option<user::Id>,

    /// Price of this [`Offer`], resolved from the [`Listing`]'s
    /// [`PriceTable`] at creation time and immutable afterwards.
    ///
    /// [`PriceTable`]: listing::PriceTable
    pub price: Money,

    /// [`Kind`] of this [`Offer`].
    pub kind: Kind,

    /// [`Status`] of this [`Offer`].
    pub status: Status,

    /// [`Revision`] of this [`Offer`], bumped on every merge-patch.
    pub revision: Revision,

    /// [`Name`] of the [`Listing`] at the time this [`Offer`] was created.
    ///
    /// Denormalized for display: later [`Listing`] edits don't propagate.
    ///
    /// [`Name`]: listing::Name
    pub item: listing::Name,

    /// Image of the [`Listing`] at the time this [`Offer`] was created.
    ///
    /// Denormalized for display: later [`Listing`] edits don't propagate.
    pub image: Option<listing::ImageUrl>,

    /// [`DateTime`] when this [`Offer`] was created.
    pub created_at: CreationDateTime,
}

impl Offer {
    /// Returns the rental [`Window`] of this [`Offer`], if it's a rental one.
    #[must_use]
    pub fn rental_window(&self) -> Option<Window> {
        match self.kind {
            Kind::Rental { window } => Some(window),
            Kind::Purchase => None,
        }
    }

    /// Returns whether this [`Offer`] is a rental one.
    #[must_use]
    pub fn is_rental(&self) -> bool {
        matches!(self.kind, Kind::Rental { .. })
    }
}

/// ID of an [`Offer`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Kind of an [`Offer`]: an outright purchase, or a rental over a [`Window`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    /// Purchase of the [`Listing`]'s item.
    ///
    /// [`Listing`]: crate::domain::Listing
    Purchase,

    /// Rental of the [`Listing`]'s item over the [`Window`].
    ///
    /// [`Listing`]: crate::domain::Listing
    Rental {
        /// Rental period of the [`Offer`].
        window: Window,
    },
}

/// Calendar period `[start, end)` an item is rented for.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Window {
    /// [`DateTime`] when the rental starts.
    ///
    /// [`DateTime`]: common::DateTime
    start: StartDateTime,

    /// [`DateTime`] when the rental ends.
    ///
    /// [`DateTime`]: common::DateTime
    end: EndDateTime,
}

impl Window {
    /// Creates a new [`Window`] if the given `end` is after the `start`.
    #[must_use]
    pub fn new(start: StartDateTime, end: EndDateTime) -> Option<Self> {
        (end.coerce::<()>() > start.coerce()).then_some(Self { start, end })
    }

    /// Returns the [`DateTime`] when this [`Window`] starts.
    ///
    /// [`DateTime`]: common::DateTime
    #[must_use]
    pub fn start(&self) -> StartDateTime {
        self.start
    }

    /// Returns the [`DateTime`] when this [`Window`] ends.
    ///
    /// [`DateTime`]: common::DateTime
    #[must_use]
    pub fn end(&self) -> EndDateTime {
        self.end
    }

    /// Returns whether this [`Window`] overlaps with the `other` one.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start.coerce::<()>() < other.end.coerce()
            && other.start.coerce::<()>() < self.end.coerce()
    }
}

define_kind! {
    #[doc = "Status of an [`Offer`] in its lifecycle."]
    enum Status {
        #[doc = "Awaiting the receiver's decision."]
        Pending = 1,

        #[doc = "Accepted by the receiver, awaiting payment."]
        Accepted = 2,

        #[doc = "Rejected by the receiver. Terminal."]
        Rejected = 3,

        #[doc = "Paid and completed. Terminal."]
        Finalized = 4,
    }
}

impl Status {
    /// Transitions this [`Status`] into [`Accepted`].
    ///
    /// # Errors
    ///
    /// If this [`Status`] is not [`Pending`].
    ///
    /// [`Accepted`]: Status::Accepted
    /// [`Pending`]: Status::Pending
    pub fn accept(self) -> Result<Self, TransitionError> {
        self.transition(Self::Accepted, matches!(self, Self::Pending))
    }

    /// Transitions this [`Status`] into [`Rejected`].
    ///
    /// # Errors
    ///
    /// If this [`Status`] is not [`Pending`].
    ///
    /// [`Pending`]: Status::Pending
    /// [`Rejected`]: Status::Rejected
    pub fn reject(self) -> Result<Self, TransitionError> {
        self.transition(Self::Rejected, matches!(self, Self::Pending))
    }

    /// Transitions this [`Status`] into [`Finalized`].
    ///
    /// # Errors
    ///
    /// If this [`Status`] is not [`Accepted`].
    ///
    /// [`Accepted`]: Status::Accepted
    /// [`Finalized`]: Status::Finalized
    pub fn finalize(self) -> Result<Self, TransitionError> {
        self.transition(Self::Finalized, matches!(self, Self::Accepted))
    }

    /// Returns whether this [`Status`] counts as accepted.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns whether this [`Status`] counts as rejected.
    #[must_use]
    pub fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }

    /// Returns whether this [`Status`] counts as finalized.
    #[must_use]
    pub fn is_finalized(self) -> bool {
        matches!(self, Self::Finalized)
    }

    /// Performs the checked transition.
    fn transition(
        self,
        to: Self,
        allowed: bool,
    ) -> Result<Self, TransitionError> {
        allowed
            .then_some(to)
            .ok_or(TransitionError { from: self, to })
    }
}

/// Error of an invalid [`Status`] transition.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("`Offer` in `{from}` status cannot become `{to}`")]
pub struct TransitionError {
    /// [`Status`] the transition was attempted from.
    pub from: Status,

    /// [`Status`] the transition was attempted into.
    pub to: Status,
}

/// Revision of an [`Offer`] document, used for conditional merge-patches.
///
/// Two devices racing to mutate the same [`Offer`] cannot both win: the
/// patch carrying a stale [`Revision`] fails with a conflict.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Revision(u64);

impl Revision {
    /// The [`Revision`] every new [`Offer`] document starts with.
    pub const INITIAL: Self = Self(0);

    /// Returns the [`Revision`] following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Merge-patch of an [`Offer`] document: only the named fields are touched.
#[derive(Clone, Debug, Default)]
pub struct Fields {
    /// New [`Status`], if it's to be changed.
    pub status: Option<Status>,

    /// New receiver, if it's to be changed.
    ///
    /// `Some(None)` clears the receiver.
    pub receiver: Option<Option<user::Id>>,
}

/// Revision-conditional merge-patch of an [`Offer`].
#[derive(Clone, Debug)]
pub struct PatchBy {
    /// ID of the [`Offer`] to patch.
    pub id: Id,

    /// [`Revision`] the [`Offer`] document is expected to be at.
    pub expected: Revision,

    /// [`Fields`] to merge into the document.
    pub fields: Fields,
}

/// [`DateTime`] when an [`Offer`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Offer, unit::Creation)>;

/// [`DateTime`] when a rental [`Window`] starts.
///
/// [`DateTime`]: common::DateTime
pub type StartDateTime = DateTimeOf<(Window, unit::Start)>;

/// [`DateTime`] when a rental [`Window`] ends.
///
/// [`DateTime`]: common::DateTime
pub type EndDateTime = DateTimeOf<(Window, unit::End)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{Status, Window};

    fn window(start: i64, end: i64) -> Option<Window> {
        Window::new(
            DateTime::from_unix_timestamp(start).unwrap().coerce(),
            DateTime::from_unix_timestamp(end).unwrap().coerce(),
        )
    }

    #[test]
    fn window_requires_end_after_start() {
        assert!(window(100, 200).is_some());
        assert!(window(200, 100).is_none());
        assert!(window(100, 100).is_none());
    }

    #[test]
    fn window_overlaps() {
        let w = |s, e| window(s, e).unwrap();

        assert!(w(100, 200).overlaps(&w(150, 250)));
        assert!(w(150, 250).overlaps(&w(100, 200)));
        assert!(w(100, 200).overlaps(&w(120, 180)));
        assert!(w(100, 200).overlaps(&w(50, 300)));

        // Touching endpoints don't overlap.
        assert!(!w(100, 200).overlaps(&w(200, 300)));
        assert!(!w(200, 300).overlaps(&w(100, 200)));
        assert!(!w(100, 200).overlaps(&w(300, 400)));
    }

    #[test]
    fn status_accepts_from_pending_only() {
        assert_eq!(Status::Pending.accept(), Ok(Status::Accepted));
        assert!(Status::Accepted.accept().is_err());
        assert!(Status::Rejected.accept().is_err());
        assert!(Status::Finalized.accept().is_err());
    }

    #[test]
    fn status_rejects_from_pending_only() {
        assert_eq!(Status::Pending.reject(), Ok(Status::Rejected));
        assert!(Status::Accepted.reject().is_err());
        assert!(Status::Rejected.reject().is_err());
        assert!(Status::Finalized.reject().is_err());
    }

    #[test]
    fn status_finalizes_from_accepted_only() {
        assert_eq!(Status::Accepted.finalize(), Ok(Status::Finalized));
        assert!(Status::Pending.finalize().is_err());
        assert!(Status::Rejected.finalize().is_err());
        assert!(Status::Finalized.finalize().is_err());
    }

    #[test]
    fn status_predicates_match_flag_semantics() {
        assert!(Status::Accepted.is_accepted());
        assert!(!Status::Rejected.is_accepted());
        assert!(Status::Rejected.is_rejected());
        assert!(Status::Finalized.is_finalized());
        assert!(!Status::Pending.is_accepted());
        assert!(!Status::Pending.is_rejected());
        assert!(!Status::Pending.is_finalized());
    }
}
