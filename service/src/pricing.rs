//! Duration-tiered pricing of rental contracts.
//!
//! Renting a [`Space`] for longer earns a discount on the monthly rent. The
//! whole policy is the duration-to-rate table of [`Tier::resolve()`], and
//! [`quote()`] turns it into the full breakdown presented to the tenant and
//! submitted with the concluded contract.
//!
//! [`Space`]: crate::domain::Space

use common::{define_kind, Money, Percent};
use derive_more::{Display, Error, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contract duration in calendar months.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Months(i32);

impl Months {
    /// One calendar year of [`Months`].
    pub const YEAR: Self = Self(12);

    /// Returns the number of months as an integer.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

define_kind! {
    #[doc = "Duration bucket determining the discount rate of a rent."]
    enum Tier {
        #[doc = "Rents shorter than a year."]
        ShortTerm = 1,

        #[doc = "Rents of exactly one year."]
        MediumTerm = 2,

        #[doc = "Rents longer than a year."]
        LongTerm = 3,
    }
}

impl Tier {
    /// Human-readable label of this [`Tier`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "Short-Term",
            Self::MediumTerm => "Medium-Term",
            Self::LongTerm => "Long-Term",
        }
    }

    /// Describes the discount policy of this [`Tier`].
    #[must_use]
    pub const fn blurb(self) -> &'static str {
        match self {
            Self::ShortTerm => "No discount for contracts under 12 months",
            Self::MediumTerm => "5% discount for 12-month contracts",
            Self::LongTerm => "Special discount for long contracts",
        }
    }

    /// Resolves the [`Tier`] of the provided `duration`, along with the
    /// discount rate it earns.
    ///
    /// First matching row wins:
    ///
    /// | `duration`, months | Discount | [`Tier`]       |
    /// |--------------------|----------|----------------|
    /// | `< 12`             | 0%       | [`ShortTerm`]  |
    /// | `== 12`            | 5%       | [`MediumTerm`] |
    /// | `13..=35`          | 10%      | [`LongTerm`]   |
    /// | `>= 36`            | 15%      | [`LongTerm`]   |
    ///
    /// Only a duration of exactly 12 months hits the 5% row, so 11 and 13
    /// months land in different rows on both sides of it. Sharp as this edge
    /// is, it's the platform's established pricing policy: changing it here
    /// would silently reprice contracts.
    ///
    /// [`LongTerm`]: Tier::LongTerm
    /// [`MediumTerm`]: Tier::MediumTerm
    /// [`ShortTerm`]: Tier::ShortTerm
    #[must_use]
    pub fn resolve(duration: Months) -> (Self, Percent) {
        /// Discount rate of the provided whole number of percents.
        #[expect(unsafe_code, reason = "table rates are in range")]
        fn rate(val: i64) -> Percent {
            unsafe { Percent::new_unchecked(Decimal::new(val, 0)) }
        }

        match duration.get() {
            i32::MIN..=11 => (Self::ShortTerm, Percent::ZERO),
            12 => (Self::MediumTerm, rate(5)),
            13..=35 => (Self::LongTerm, rate(10)),
            36..=i32::MAX => (Self::LongTerm, rate(15)),
        }
    }
}

/// Full pricing breakdown of a rental contract.
///
/// All the monetary amounts carry the currency of the base price and are kept
/// unrounded: [`Quote::rounded()`] is the presentation and serialization
/// boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// [`Tier`] the priced duration falls into.
    pub tier: Tier,

    /// Monthly rent after the discount.
    pub monthly_rent: Money,

    /// Total value of the contract over its whole duration.
    pub total_value: Money,

    /// Applied discount.
    pub discount: Percent,

    /// Absolute savings against the undiscounted total.
    ///
    /// Always the exact difference of [`Quote::original_total`] and
    /// [`Quote::total_value`].
    pub discount_amount: Money,

    /// Undiscounted total the savings are measured against.
    pub original_total: Money,

    /// Collateral of two months of rent.
    ///
    /// Always computed from the undiscounted rent, whatever the discount
    /// tier.
    pub security_deposit: Money,

    /// Amount due at signing: first month's discounted rent plus the
    /// security deposit.
    pub initial_payment: Money,
}

impl Quote {
    /// Rounds all the monetary amounts of this [`Quote`] to cents.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            tier: self.tier,
            monthly_rent: self.monthly_rent.rounded(),
            total_value: self.total_value.rounded(),
            discount: self.discount,
            discount_amount: self.discount_amount.rounded(),
            original_total: self.original_total.rounded(),
            security_deposit: self.security_deposit.rounded(),
            initial_payment: self.initial_payment.rounded(),
        }
    }
}

/// Prices a rental contract of the provided `duration` at the provided
/// monthly `base_price`.
///
/// Pure and deterministic: the same inputs always produce the same [`Quote`].
///
/// # Errors
///
/// - [`InvalidInput::Price`] if `base_price` is not positive.
/// - [`InvalidInput::Duration`] if `duration` is shorter than one month.
/// - [`InvalidInput::Overflow`] if the amounts exceed the representable
///   range.
pub fn quote(
    base_price: Money,
    duration: Months,
) -> Result<Quote, InvalidInput> {
    use InvalidInput as E;

    let Money {
        amount: base,
        currency,
    } = base_price;
    if base <= Decimal::ZERO {
        return Err(E::Price(base_price));
    }
    if duration.get() < 1 {
        return Err(E::Duration(duration));
    }

    let (tier, discount) = Tier::resolve(duration);
    let months = Decimal::from(duration.get());

    let monthly_rent = base
        .checked_mul(Decimal::ONE - discount.fraction())
        .ok_or(E::Overflow)?;
    let original_total = base.checked_mul(months).ok_or(E::Overflow)?;
    let total_value = monthly_rent.checked_mul(months).ok_or(E::Overflow)?;
    let discount_amount = original_total - total_value;
    let security_deposit = base.checked_mul(Decimal::TWO).ok_or(E::Overflow)?;
    let initial_payment =
        monthly_rent.checked_add(security_deposit).ok_or(E::Overflow)?;

    let money = |amount| Money { amount, currency };
    Ok(Quote {
        tier,
        monthly_rent: money(monthly_rent),
        total_value: money(total_value),
        discount,
        discount_amount: money(discount_amount),
        original_total: money(original_total),
        security_deposit: money(security_deposit),
        initial_payment: money(initial_payment),
    })
}

/// Error of pricing a rental contract with invalid arguments.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum InvalidInput {
    /// Base price is not positive.
    #[display("non-positive base price: {_0}")]
    Price(#[error(not(source))] Money),

    /// Duration is shorter than a single month.
    #[display("non-positive contract duration: {_0} months")]
    Duration(#[error(not(source))] Months),

    /// Computed amounts exceed the representable range.
    #[display("pricing amounts are out of the representable range")]
    Overflow,
}
