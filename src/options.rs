//! Load and subset configuration.
//!
//! Both option sets deserialize from JSON with camelCase keys and default
//! every missing field, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

/// Options for [`TrueTypeFont::load_with_options`](crate::TrueTypeFont::load_with_options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadOptions {
    /// Drop an unparsable `name`, `OS/2` or `post` table with a warning
    /// instead of failing the load.
    pub lenient_optional_tables: bool,
}

/// Options for [`FontSubsetter`](crate::FontSubsetter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubsetOptions {
    /// Keep `name` and `OS/2` in the subset. They are dropped otherwise.
    pub retain_name_tables: bool,
    /// Pick the smallest `loca` encoding for the subset instead of keeping
    /// the original font's `indexToLocFormat`.
    pub optimize_loca_format: bool,
}

impl SubsetOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
