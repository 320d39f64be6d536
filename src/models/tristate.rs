use serde::{Deserialize, Serialize};

/// Three-valued answer used for collaboration progress fields.
///
/// "Not yet determined" is a legitimate state of its own and must never be
/// collapsed into `No` by business logic. At the storage and wire boundaries
/// the type maps to a nullable boolean (NULL = Unknown).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    #[default]
    Unknown,
    Yes,
    No,
}

impl TriState {
    /// Nullable-boolean representation used by the storage layer.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::Unknown => None,
            TriState::Yes => Some(true),
            TriState::No => Some(false),
        }
    }

    pub fn is_known(self) -> bool {
        self != TriState::Unknown
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => TriState::Unknown,
            Some(true) => TriState::Yes,
            Some(false) => TriState::No,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        value.as_bool()
    }
}
