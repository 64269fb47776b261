use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// A symbol key. Two symbols are the same key exactly when their
/// descriptions are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolData {
    description: String,
}

impl SymbolData {
    pub fn new(description: String) -> Self {
        SymbolData { description }
    }

    /// A symbol no other party can re-create by guessing its description.
    pub fn new_unique(prefix: &str) -> Self {
        SymbolData {
            description: format!("{}:{}", prefix, Uuid::new_v4().to_hyphenated()),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/* Internal bookkeeping symbols */
lazy_static! {
    /// Marks an object as a delegation node built by this crate.
    pub static ref DELEGATION_SELF_MARKER: SymbolData = SymbolData::new_unique("delegation.self");
    /// Holds the node's type tag for debugging.
    pub static ref DELEGATION_TYPE_TAG: SymbolData = SymbolData::new_unique("delegation.tag");
}
