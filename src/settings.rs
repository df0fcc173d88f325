use better_default::Default;
use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Options for [crate::processor::ResultProcessor].
///
/// Missing fields in a json document fall back to their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
#[serde(default)]
pub struct ProcessorOptions {
    /// Results (groups count as one) per page.
    #[default(20)]
    page_size: i64,
    color: ColorOptions,
}

impl ProcessorOptions {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Saturation and lightness for badge colors; the hue is always derived
/// from the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
#[serde(default)]
pub struct ColorOptions {
    #[default(70)]
    saturation: u8,
    #[default(60)]
    lightness: u8,
}
