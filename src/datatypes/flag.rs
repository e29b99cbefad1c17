use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Capability indicator of an asset setting.
///
/// Feeds deliver `true`, `false` or `null` (or omit the field entirely);
/// the unknown state is kept instead of collapsing it to `false`. Any other
/// value is read as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Option<bool>")]
pub enum Flag {
    Enabled,
    Disabled,
    #[default]
    Unknown,
}

impl Flag {
    /// Only an explicit `true` counts as enabled
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Enabled => "✅",
            Self::Disabled => "❌",
            Self::Unknown => "⚪",
        }
    }
}

impl From<Option<bool>> for Flag {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
            None => Self::Unknown,
        }
    }
}

impl From<Value> for Flag {
    fn from(value: Value) -> Self {
        value.as_bool().into()
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Some(value).into()
    }
}

impl From<Flag> for Option<bool> {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Enabled => Some(true),
            Flag::Disabled => Some(false),
            Flag::Unknown => None,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
