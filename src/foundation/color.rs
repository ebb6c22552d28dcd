use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Axis;
use crate::foundation::error::VizError;

/// Straight-alpha color with components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel (0 transparent, 1 opaque).
    pub a: f64,
}

const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("light-gray", [200, 200, 200]),
    ("silver", [192, 192, 192]),
    ("red", [255, 0, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("crimson", [220, 20, 60]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("teal", [0, 128, 128]),
    ("navy-blue", [0, 0, 128]),
    ("midnight-blue", [25, 25, 112]),
    ("light-blue", [173, 216, 230]),
    ("forest-green", [34, 139, 34]),
    ("rose-red", [194, 30, 86]),
    ("indigo", [75, 0, 130]),
];

const OBJECT_CATEGORIES: &[&str] = &[
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "animal",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "food",
    "furniture",
    "electronics",
    "object",
];

// Categorical palette indexed by object id / category.
const PALETTE: &[[u8; 3]] = &[
    [230, 25, 75],
    [60, 180, 75],
    [0, 130, 200],
    [245, 130, 48],
    [145, 30, 180],
    [70, 240, 240],
    [240, 50, 230],
    [210, 245, 60],
    [250, 190, 212],
    [0, 128, 128],
    [220, 190, 255],
    [170, 110, 40],
    [128, 0, 0],
    [170, 255, 195],
    [128, 128, 0],
    [255, 215, 180],
    [0, 0, 128],
    [128, 128, 128],
    [255, 225, 25],
    [0, 0, 0],
];

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Build a color from float components.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Look up a named color (`"navy-blue"`, `"white"`, ...).
    pub fn named(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        NAMED
            .iter()
            .find(|(n, _)| *n == norm)
            .map(|(_, [r, g, b])| Self::from_rgb8(*r, *g, *b))
    }

    /// Deterministic categorical color for a numeric object/track id.
    pub fn from_object_id(id: u64) -> Self {
        let [r, g, b] = PALETTE[(id % PALETTE.len() as u64) as usize];
        Self::from_rgb8(r, g, b)
    }

    /// Deterministic categorical color for an object category name.
    ///
    /// Known categories map to a fixed palette slot; unknown names are hashed.
    pub fn from_object_category(name: &str) -> Self {
        let norm = name.trim().to_ascii_lowercase();
        let id = match OBJECT_CATEGORIES.iter().position(|c| *c == norm) {
            Some(i) => i as u64,
            None => fnv1a64(norm.as_bytes()),
        };
        Self::from_object_id(id)
    }

    /// Category names with a dedicated palette slot.
    pub fn object_category_names() -> &'static [&'static str] {
        OBJECT_CATEGORIES
    }

    /// Conventional axis color: x red, y green, z blue.
    pub fn axis(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::rgba(0.96, 0.26, 0.21, 1.0),
            Axis::Y => Self::rgba(0.30, 0.69, 0.31, 1.0),
            Axis::Z => Self::rgba(0.13, 0.59, 0.95, 1.0),
        }
    }

    /// Straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Return `true` if all components are finite.
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl FromStr for Color {
    type Err = VizError;

    /// Parse `#RRGGBB`, `#RRGGBBAA` or a color name, optionally followed by `!<alpha percent>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (base, alpha) = match s.split_once('!') {
            Some((base, pct)) => {
                let pct: f64 = pct.trim().parse().map_err(|_| {
                    VizError::validation(format!("invalid alpha suffix in color \"{s}\""))
                })?;
                (base.trim(), Some((pct / 100.0).clamp(0.0, 1.0)))
            }
            None => (s, None),
        };

        let color = if base.starts_with('#') {
            parse_hex(base).map_err(VizError::validation)?
        } else {
            Self::named(base)
                .ok_or_else(|| VizError::validation(format!("unknown color name \"{base}\"")))?
        };
        Ok(match alpha {
            Some(a) => color.with_alpha(a),
            None => color,
        })
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::HslaObj { h, s, l, a } => Ok(hsla_to_rgba(h, s, l, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgba(v[0], v[1], v[2], 1.0))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    let (r, g, b, a) = match s.len() {
        6 => (hex_byte(&s[0..2])?, hex_byte(&s[2..4])?, hex_byte(&s[4..6])?, 255),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Color {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Color::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Color::rgba(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h = 0xcbf2_9ce4_8422_2325u64;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    h
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
