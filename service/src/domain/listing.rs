//! [`Listing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{offer, user};
#[cfg(doc)]
use crate::domain::{Offer, User};

/// Item listed on the marketplace, in the subset relevant to [`Offer`]s.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// ID of the [`User`] who owns this [`Listing`].
    pub owner_id: user::Id,

    /// [`Name`] of this [`Listing`].
    pub name: Name,

    /// URL of this [`Listing`]'s image, if any.
    pub image: Option<ImageUrl>,

    /// [`PriceTable`] of this [`Listing`].
    pub prices: PriceTable,

    /// Reserved-date-range set of this [`Listing`].
    pub availability: Availability,

    /// Denormalized count of [`Offer`]s ever made on this [`Listing`].
    pub offer_count: i64,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Listing`].
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

/// Name of a [`Listing`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// URL of a [`Listing`]'s image in the object store.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        (url.starts_with("https://") || url.starts_with("http://"))
            .then_some(Self(url))
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// Price table of a [`Listing`].
///
/// The first entry is the rental price. A purchase [`Offer`] may select the
/// alternate second entry (e.g. a buy-it-now price), falling back to the
/// first one when no second entry exists.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Vec<Money>")]
pub struct PriceTable(Vec<Money>);

impl PriceTable {
    /// Creates a new [`PriceTable`] from the given non-empty `prices`.
    #[must_use]
    pub fn new(prices: Vec<Money>) -> Option<Self> {
        (!prices.is_empty()).then_some(Self(prices))
    }

    /// Returns the rental price: the first entry of this [`PriceTable`].
    #[must_use]
    pub fn rental(&self) -> Money {
        self.0[0]
    }

    /// Returns the purchase price: the second entry of this [`PriceTable`]
    /// when `alternate` is requested and a second entry exists, otherwise
    /// the first one.
    #[must_use]
    pub fn purchase(&self, alternate: bool) -> Money {
        if alternate {
            if let Some(&price) = self.0.get(1) {
                return price;
            }
        }
        self.0[0]
    }
}

impl TryFrom<Vec<Money>> for PriceTable {
    type Error = &'static str;

    fn try_from(prices: Vec<Money>) -> Result<Self, Self::Error> {
        Self::new(prices).ok_or("`PriceTable` cannot be empty")
    }
}

/// Reserved-date-range set of a [`Listing`].
///
/// Kept as the two parallel sequences the document store holds
/// (`starts[i]..ends[i]` is one reserved range). Appended to on rental
/// [`Offer`] finalization and never shrunk: no cancellation path exists.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Availability {
    /// Start instants of the reserved ranges.
    starts: Vec<offer::StartDateTime>,

    /// End instants of the reserved ranges, parallel to `starts`.
    ends: Vec<offer::EndDateTime>,
}

impl Availability {
    /// Returns the reserved [`Window`]s of this [`Availability`].
    ///
    /// Unpaired or inverted entries (possible only for documents written
    /// outside this core) are skipped.
    ///
    /// [`Window`]: offer::Window
    pub fn windows(&self) -> impl Iterator<Item = offer::Window> + '_ {
        self.starts
            .iter()
            .zip(&self.ends)
            .filter_map(|(&start, &end)| offer::Window::new(start, end))
    }

    /// Returns whether the given [`Window`] overlaps any reserved range of
    /// this [`Availability`].
    ///
    /// [`Window`]: offer::Window
    #[must_use]
    pub fn overlaps(&self, window: &offer::Window) -> bool {
        self.windows().any(|w| w.overlaps(window))
    }

    /// Reserves the given [`Window`], appending its start and end instants
    /// (in that order) to the parallel sequences.
    ///
    /// [`Window`]: offer::Window
    pub fn reserve(&mut self, window: offer::Window) {
        self.starts.push(window.start());
        self.ends.push(window.end());
    }

    /// Returns the start instants of the reserved ranges.
    #[must_use]
    pub fn starts(&self) -> &[offer::StartDateTime] {
        &self.starts
    }

    /// Returns the end instants of the reserved ranges.
    #[must_use]
    pub fn ends(&self) -> &[offer::EndDateTime] {
        &self.ends
    }
}

/// Append of a reserved rental [`Window`] onto a [`Listing`]'s
/// [`Availability`] arrays.
///
/// [`Window`]: offer::Window
#[derive(Clone, Copy, Debug)]
pub struct Reserve {
    /// ID of the [`Listing`] to reserve.
    pub id: Id,

    /// [`Window`] to reserve.
    ///
    /// [`Window`]: offer::Window
    pub window: offer::Window,
}

/// Increment of a [`Listing`]'s denormalized offers counter.
#[derive(Clone, Copy, Debug)]
pub struct OfferCount(pub Id);

/// [`DateTime`] when a [`Listing`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;
