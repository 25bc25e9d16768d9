//! [`Space`] definitions.

use common::{define_kind, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Creation;

/// Commercial space listed for rent.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// ID of this [`Space`].
    pub id: Id,

    /// [`Name`] of this [`Space`].
    pub name: Name,

    /// [`Description`] of this [`Space`], if any.
    pub description: Option<Description>,

    /// [`Address`] of this [`Space`].
    pub address: Address,

    /// [`Kind`] of this [`Space`].
    #[serde(with = "common::kind::serde::as_str")]
    pub kind: Kind,

    /// [`Area`] of this [`Space`].
    pub area: Area,

    /// Monthly rent this [`Space`] is listed at.
    pub price_per_month: Money,

    /// Number of floors, for office [`Space`]s.
    pub floors: Option<Floors>,

    /// Number of rooms, for office [`Space`]s.
    pub num_rooms: Option<NumRooms>,

    /// Maximum allowed occupancy, for retail [`Space`]s.
    pub max_occupancy: Option<MaxOccupancy>,

    /// Ceiling height in meters, for warehouse [`Space`]s.
    pub ceiling_height: Option<CeilingHeight>,

    /// Whether this [`Space`] has a loading dock, for warehouse [`Space`]s.
    pub has_loading_dock: Option<bool>,

    /// Whether this [`Space`] is available for rent.
    pub available: bool,

    /// [`DateTime`] when this [`Space`] was listed.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(with = "common::datetime::serde::unix_timestamp")]
    pub created_at: CreationDateTime,
}

/// ID of a [`Space`].
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

/// Name of a [`Space`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Description of a [`Space`].
#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `description` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 1000
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Address of a [`Space`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 200
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

define_kind! {
    #[doc = "Kind of a [`Space`]."]
    enum Kind {
        #[doc = "Office space."]
        Office = 1,

        #[doc = "Retail space."]
        Retail = 2,

        #[doc = "Warehouse space."]
        Warehouse = 3,
    }
}

/// Area of a [`Space`], in square meters.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq, Serialize,
)]
pub struct Area(Decimal);

impl Area {
    /// Maximum supported [`Area`], in square meters.
    const MAX: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

    /// Creates a new [`Area`] if the given `val` is positive, not larger
    /// than 10 000 m², and has no more than 2 decimal places.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val > Decimal::ZERO
            && val <= Self::MAX
            && val.normalize().scale() <= 2)
            .then_some(Self(val))
    }

    /// Returns the numeric value of this [`Area`].
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl FromStr for Area {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Area` value")
    }
}

/// Number of floors of an office [`Space`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq,
    Serialize,
)]
pub struct Floors(u8);

/// Number of rooms of an office [`Space`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq,
    Serialize,
)]
pub struct NumRooms(u16);

/// Maximum allowed occupancy of a retail [`Space`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq,
    Serialize,
)]
pub struct MaxOccupancy(u16);

/// Ceiling height of a warehouse [`Space`], in meters.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq,
    Serialize,
)]
pub struct CeilingHeight(Decimal);

/// [`DateTime`] when a [`Space`] was listed.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Space, Creation)>;

#[cfg(test)]
mod spec {
    use super::{Area, Name};

    #[test]
    fn validates_name() {
        assert!(Name::new("Victoria Business Center").is_some());

        assert!(Name::new("").is_none());
        assert!(Name::new(" padded ").is_none());
        assert!(Name::new("x".repeat(101)).is_none());
    }

    #[test]
    fn validates_area() {
        assert!(Area::new("120.5".parse().unwrap()).is_some());
        assert!(Area::new("10000".parse().unwrap()).is_some());

        assert!(Area::new("0".parse().unwrap()).is_none());
        assert!(Area::new("-15".parse().unwrap()).is_none());
        assert!(Area::new("10000.01".parse().unwrap()).is_none());
        assert!(Area::new("99.999".parse().unwrap()).is_none());
    }
}
