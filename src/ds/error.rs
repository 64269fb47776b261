use std::fmt;
use std::fmt::{Display, Formatter};

/// Error raised by user-supplied accessor functions.
///
/// The object model itself never raises: empty inputs, duplicate or
/// malformed delegates, and missing properties all normalize silently.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    TypeError(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::TypeError(m) => write!(f, "Uncaught type error: {}.", m),
        }
    }
}
