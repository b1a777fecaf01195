use crate::foundation::error::{CaseforgeError, CaseforgeResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Shape, Vec2};

/// Straight-alpha RGBA8 color.
///
/// Template classification and text fills both speak this type; hex parsing is
/// case-insensitive and accepts `#rgb`, `#rrggbb`, and `#rrggbbaa`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Construct a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex color string.
    pub fn from_hex(s: &str) -> CaseforgeResult<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());

        fn nibble(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        let bytes = hex.as_bytes();
        let channel = |hi: u8, lo: u8| -> CaseforgeResult<u8> {
            match (nibble(hi), nibble(lo)) {
                (Some(h), Some(l)) => Ok((h << 4) | l),
                _ => Err(CaseforgeError::validation(format!(
                    "invalid hex color '{s}'"
                ))),
            }
        };

        match bytes.len() {
            3 => Ok(Self {
                r: channel(bytes[0], bytes[0])?,
                g: channel(bytes[1], bytes[1])?,
                b: channel(bytes[2], bytes[2])?,
                a: 255,
            }),
            6 => Ok(Self {
                r: channel(bytes[0], bytes[1])?,
                g: channel(bytes[2], bytes[3])?,
                b: channel(bytes[4], bytes[5])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: channel(bytes[0], bytes[1])?,
                g: channel(bytes[2], bytes[3])?,
                b: channel(bytes[4], bytes[5])?,
                a: channel(bytes[6], bytes[7])?,
            }),
            _ => Err(CaseforgeError::validation(format!(
                "invalid hex color '{s}'"
            ))),
        }
    }

    /// True when the RGB channels match exactly (alpha ignored).
    pub fn rgb_eq(self, other: Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Largest per-channel RGB distance to `other` (alpha ignored).
    pub fn rgb_distance(self, other: Self) -> u8 {
        let d = |a: u8, b: u8| a.abs_diff(b);
        d(self.r, other.r).max(d(self.g, other.g)).max(d(self.b, other.b))
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
