//! [`Command`] definition.

pub mod conclude_rent_contract;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::conclude_rent_contract::ConcludeRentContract;
