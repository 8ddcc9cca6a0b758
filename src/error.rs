use std::fmt;

/// Typed errors for map write operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The key was empty; keys must be non-empty identifiers
    EmptyKey,
    /// Building the successor snapshot could not reserve memory.
    /// The previously published snapshot is untouched and still visible.
    CapacityExhausted {
        /// Number of entries the successor snapshot needed room for
        entries: usize,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::EmptyKey => {
                write!(f, "Empty key is not a valid map key")
            }
            MapError::CapacityExhausted { entries } => {
                write!(
                    f,
                    "Could not reserve memory for a {} entry snapshot",
                    entries
                )
            }
        }
    }
}

impl std::error::Error for MapError {}
