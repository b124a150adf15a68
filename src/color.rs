//! Highlight colors.
//!
//! `Color` is a plain RGBA value. `SharedColor` is the cell that several
//! phrases (and whatever UI edits them) hold on to: writing through one handle
//! is observed by every other holder.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

/// Generic phrase highlight.
pub const FALLBACK_HIGHLIGHT_COLOR: Color = Color::rgba(127, 63, 73, 127);
/// Channel-points "highlight my message" redemption.
pub const FALLBACK_REDEEMED_HIGHLIGHT_COLOR: Color = Color::rgba(28, 126, 141, 60);
/// Subscription events.
pub const FALLBACK_SUB_COLOR: Color = Color::rgba(196, 102, 255, 100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}' (expected #AARRGGBB or #RRGGBB)")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#AARRGGBB` or `#RRGGBB` (hex digits in either case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = regex!(r"^#([0-9a-fA-F]{2})?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
            .captures(s.trim())
            .ok_or_else(|| ColorParseError(s.to_string()))?;

        let byte = |idx: usize| -> u8 {
            caps.get(idx).map(|m| u8::from_str_radix(m.as_str(), 16).unwrap_or(0)).unwrap_or(255)
        };

        Ok(Color { a: byte(1), r: byte(2), g: byte(3), b: byte(4) })
    }
}

impl fmt::Display for Color {
    /// Formats as `#aarrggbb`, the form the settings file stores.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Shared, mutable color cell.
///
/// Cloning the handle shares the cell; use [`SharedColor::new`] with
/// [`SharedColor::get`] to detach a copy.
#[derive(Clone)]
pub struct SharedColor(Arc<RwLock<Color>>);

impl SharedColor {
    pub fn new(color: Color) -> Self {
        SharedColor(Arc::new(RwLock::new(color)))
    }

    pub fn get(&self) -> Color {
        // `Color` is `Copy`; a panicking writer cannot leave it half-written.
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, color: Color) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = color;
    }

    /// True when both handles refer to the same cell.
    pub fn ptr_eq(&self, other: &SharedColor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Color> for SharedColor {
    fn from(color: Color) -> Self {
        SharedColor::new(color)
    }
}

impl PartialEq for SharedColor {
    /// Compares the current values, not cell identity.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.get() == other.get()
    }
}

impl Eq for SharedColor {}

impl fmt::Debug for SharedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedColor").field(&self.get()).finish()
    }
}
