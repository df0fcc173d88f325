use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::settings::ColorOptions;

/// Color key -> color, in first-appearance order.
pub type ColorMap = IndexMap<String, Hsl>;

/// A color as hue (degrees), saturation and lightness (percent).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Rolling `hash = c + ((hash << 5) - hash)` over the UTF-16 code units of
/// `key`, with 32-bit signed wraparound.
pub fn string_hash(key: &str) -> i32 {
    key.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// Hue in `[0, 360)` derived from [string_hash].
pub fn hue_of(key: &str) -> u16 {
    // rem_euclid keeps negative hashes in range
    string_hash(key).rem_euclid(360) as u16
}

/// Derives stable badge colors from arbitrary keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorAssigner {
    saturation: u8,
    lightness: u8,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(&ColorOptions::default())
    }
}

impl ColorAssigner {
    pub fn new(options: &ColorOptions) -> Self {
        Self {
            saturation: *options.saturation(),
            lightness: *options.lightness(),
        }
    }

    pub fn color(&self, key: impl Display) -> Hsl {
        Hsl {
            hue: hue_of(&key.to_string()),
            saturation: self.saturation,
            lightness: self.lightness,
        }
    }

    /// One color per distinct key; repeated keys keep their first position.
    pub fn color_map<I, K>(&self, keys: I) -> ColorMap
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut map = ColorMap::new();
        for key in keys {
            let key = key.into();
            if !map.contains_key(&key) {
                let color = self.color(&key);
                map.insert(key, color);
            }
        }
        map
    }
}
