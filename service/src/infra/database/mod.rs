//! [`Database`]-related implementations.

#[cfg(feature = "memory")]
pub mod memory;

use derive_more::{Display, Error as StdError};

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Property;

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Property store operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    NotFound(#[error(not(source))] property::Id),

    /// Property store refused to perform the operation.
    #[display("property store refused the operation: {_0}")]
    Refused(#[error(not(source))] String),
}
