//! [`Backend`]-related definitions.
//!
//! The platform's REST backend is an external collaborator: commands only
//! describe the operations they issue against it, while the transport lives
//! with the calling application.

use derive_more::{Display, Error as StdError};

/// Gateway to the platform's backend.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// [`Backend`] cannot be reached.
    #[display("backend is unreachable")]
    Unreachable,

    /// [`Backend`] rejected the submitted operation.
    #[display("backend rejected the operation: {reason}")]
    Rejected {
        /// Reason of the rejection.
        #[error(not(source))]
        reason: String,
    },
}
