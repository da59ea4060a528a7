//! Common error definitions.

/// Alias for Result<T, Error>.
pub type Result<T> = core::result::Result<T, Error>;

/// Collection of all errors that can occur.
///
/// Most of the driver has no failure path; these only come out of the bounded and
/// checked variants of its operations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Occurs when an expected change of a register does not happen in time.
    ///
    /// This is returned when a bounded loop exceeds its alotted iteration count.
    RegisterUnchanged,
    /// A channel index outside 0 - 15.
    InvalidChannel(u8),
}
