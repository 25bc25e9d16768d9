//! Rental contract definitions.

use common::{define_kind, DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{space, user},
    pricing::Months,
};
#[cfg(doc)]
use crate::{
    domain::{Space, User},
    pricing::Quote,
};

/// Contract about a [`User`] renting a [`Space`].
///
/// The monetary terms are copied from the [`Quote`] the contract was
/// concluded with, rounded to cents at the copy.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rent {
    /// ID of this contract.
    pub id: Id,

    /// Human-readable [`Number`] of this contract.
    pub number: Number,

    /// ID of the rented [`Space`].
    pub space_id: space::Id,

    /// ID of the [`User`] renting the [`Space`].
    pub tenant_id: user::Id,

    /// Duration of the rent.
    pub duration: Months,

    /// Monthly rent after the applied discount.
    pub monthly_rent: Money,

    /// Security deposit of two months of undiscounted rent.
    pub security_deposit: Money,

    /// Method the initial payment is made with.
    #[serde(with = "common::kind::serde::as_str")]
    pub payment_method: PaymentMethod,

    /// Electronic [`Signature`] of the tenant.
    pub signature: Signature,

    /// Human-readable [`Notes`] about the conclusion.
    pub notes: Notes,

    /// Whether the initial payment has been made.
    pub is_paid: bool,

    /// [`DateTime`] when this contract was signed.
    #[serde(with = "common::datetime::serde::unix_timestamp")]
    pub signed_at: SigningDateTime,

    /// [`DateTime`] when the rent commences.
    #[serde(with = "common::datetime::serde::unix_timestamp")]
    pub commences_at: CommencementDateTime,

    /// [`DateTime`] when this contract expires.
    #[serde(with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,

    /// [`DateTime`] when this contract was terminated, if it was.
    #[serde(with = "common::datetime::serde::unix_timestamp::opt")]
    pub terminated_at: Option<TerminationDateTime>,
}

impl Rent {
    /// Returns [`Status`] of this contract.
    #[must_use]
    pub fn status(&self) -> Status {
        use Status as S;

        if self.terminated_at.is_some() {
            return S::Terminated;
        }

        let now: ExpirationDateTime = DateTime::now().coerce();
        if now > self.expires_at {
            return S::Completed;
        }

        S::Active
    }

    /// Returns whether this contract is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == Status::Active
    }
}

/// ID of a [`Rent`] contract.
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

/// Human-readable number of a [`Rent`] contract.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Number(String);

impl Number {
    /// Generates a new [`Number`] out of the provided signing [`DateTime`].
    #[must_use]
    pub fn generate(signed_at: SigningDateTime) -> Self {
        Self(format!("RENT-{}", signed_at.unix_timestamp()))
    }
}

/// Electronic signature of a [`Rent`] contract.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Signature(String);

impl Signature {
    /// Creates a new [`Signature`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `signature` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(signature: impl Into<String>) -> Self {
        Self(signature.into())
    }

    /// Creates a new [`Signature`] if the given `signature` is valid.
    #[must_use]
    pub fn new(signature: impl Into<String>) -> Option<Self> {
        let signature = signature.into();
        Self::check(&signature).then_some(Self(signature))
    }

    /// Checks whether the given `signature` is a valid [`Signature`].
    fn check(signature: impl AsRef<str>) -> bool {
        let signature = signature.as_ref();
        signature.trim() == signature
            && !signature.is_empty()
            && signature.len() <= 200
    }
}

impl FromStr for Signature {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Signature`")
    }
}

/// Human-readable notes about a [`Rent`] contract conclusion.
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Notes(String);

define_kind! {
    #[doc = "Method the initial payment of a [`Rent`] contract is made with."]
    enum PaymentMethod {
        #[doc = "Bank card."]
        Card = 1,

        #[doc = "Bank transfer."]
        Transfer = 2,

        #[doc = "Cash."]
        Cash = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Rent`] contract."]
    enum Status {
        #[doc = "The contract is active."]
        Active = 1,

        #[doc = "The contract has run its full duration."]
        Completed = 2,

        #[doc = "The contract was terminated early."]
        Terminated = 3,
    }
}

/// Marker type indicating [`Rent`] contract signing.
#[derive(Clone, Copy, Debug)]
pub struct Signing;

/// Marker type indicating [`Rent`] commencement.
#[derive(Clone, Copy, Debug)]
pub struct Commencement;

/// Marker type indicating [`Rent`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Marker type indicating [`Rent`] termination.
#[derive(Clone, Copy, Debug)]
pub struct Termination;

/// [`DateTime`] when a [`Rent`] contract was signed.
pub type SigningDateTime = DateTimeOf<(Rent, Signing)>;

/// [`DateTime`] when a [`Rent`] commences.
pub type CommencementDateTime = DateTimeOf<(Rent, Commencement)>;

/// [`DateTime`] when a [`Rent`] contract expires.
pub type ExpirationDateTime = DateTimeOf<(Rent, Expiration)>;

/// [`DateTime`] when a [`Rent`] contract was terminated.
pub type TerminationDateTime = DateTimeOf<(Rent, Termination)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::{domain::{space, user}, pricing::Months};

    use super::{
        CommencementDateTime, ExpirationDateTime, Id, Notes, Number,
        PaymentMethod, Rent, Signature, SigningDateTime, Status,
        TerminationDateTime,
    };

    fn rent(
        expires_at: ExpirationDateTime,
        terminated_at: Option<TerminationDateTime>,
    ) -> Rent {
        Rent {
            id: Id::new(),
            number: Number::generate(SigningDateTime::UNIX_EPOCH),
            space_id: space::Id::new(),
            tenant_id: user::Id::new(),
            duration: Months::YEAR,
            monthly_rent: "500EUR".parse().unwrap(),
            security_deposit: "1000EUR".parse().unwrap(),
            payment_method: PaymentMethod::Card,
            signature: "Ion Popescu".parse().unwrap(),
            notes: Notes::from(String::from("concluded electronically")),
            is_paid: true,
            signed_at: SigningDateTime::UNIX_EPOCH,
            commences_at: CommencementDateTime::UNIX_EPOCH,
            expires_at,
            terminated_at,
        }
    }

    #[test]
    fn generates_number_from_signing_time() {
        let number =
            Number::generate(DateTime::from_unix_timestamp(1_750_000_000)
                .unwrap()
                .coerce());

        assert_eq!(number.to_string(), "RENT-1750000000");
    }

    #[test]
    fn validates_signature() {
        assert!(Signature::new("Ion Popescu").is_some());

        assert!(Signature::new("").is_none());
        assert!(Signature::new("  ").is_none());
        assert!(Signature::new(" padded ").is_none());
        assert!(Signature::new("x".repeat(201)).is_none());
    }

    #[test]
    fn derives_status() {
        let future = (DateTime::now() + Duration::from_secs(3600)).coerce();
        let past = ExpirationDateTime::UNIX_EPOCH;

        assert_eq!(rent(future, None).status(), Status::Active);
        assert!(rent(future, None).is_active());

        assert_eq!(rent(past, None).status(), Status::Completed);

        let terminated = Some(DateTime::now().coerce());
        assert_eq!(rent(future, terminated).status(), Status::Terminated);
        assert_eq!(rent(past, terminated).status(), Status::Terminated);
    }
}
