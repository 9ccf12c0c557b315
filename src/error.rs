use thiserror::Error;

/// Errors returned by fallible map operations.
///
/// Every operation that returns an `Err` leaves the map exactly as it was
/// before the call — membership, total weight, and replacement order are all
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The entry cannot be stored: even after evicting every entry the
    /// policy is willing to give up, the required weight does not fit
    /// within the configured capacity.
    #[error("not enough capacity to store the entry")]
    NoSpace,

    /// The requested key is not resident.  Returned only by [`at`] and
    /// [`quiet_at`]; the other lookups report absence with `None`.
    ///
    /// [`at`]: crate::BoundedMap::at
    /// [`quiet_at`]: crate::BoundedMap::quiet_at
    #[error("no entry for the requested key")]
    KeyNotFound,
}
