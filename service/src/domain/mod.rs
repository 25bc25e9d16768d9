//! Domain definitions.

pub mod contract;
pub mod space;
pub mod user;

pub use self::{contract::Rent, space::Space, user::User};

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;
