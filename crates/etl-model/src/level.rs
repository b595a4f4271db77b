use serde::{Deserialize, Serialize};

/// One distinct raw value observed in a column, with its occurrence count.
///
/// The count is display metadata; the timeline engine never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    pub value: String,
    #[serde(default)]
    pub count: u64,
}

impl Level {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}
