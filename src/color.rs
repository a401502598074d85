//! Colours and the built-in palette table.
//!
//! Every switch owns a [`Palette`] of four colours.  The defaults come from
//! a constant table keyed by [`Variant`]; callers override individual
//! fields through [`PaletteOverrides`].
//!
//! On the wire a [`Color`] is either a hex string (`"#rgb"`, `"#rrggbb"`,
//! `"#rrggbbaa"`) or an object `{"r":255,"g":165,"b":0,"a":0.5}` with
//! 0–255 channels and alpha in `[0, 1]`.

use crate::types::Variant;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An RGBA colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba8(0, 0, 0, 0.0);

    /// Opaque colour from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    /// Colour from 8-bit channels and a fractional alpha.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a,
        }
    }

    /// Same colour with alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Same colour with alpha multiplied by `factor`.
    pub fn fade(self, factor: f64) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    /// Component-wise linear interpolation, `t` in `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Color, ColorParseError> {
        let hex = s.trim().trim_start_matches('#');
        let err = || ColorParseError(s.to_string());
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|n| n * 17)
                        .map_err(|_| err())
                };
                Ok(Color::rgb8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Color::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgba8(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                byte(6)? as f64 / 255.0,
            )),
            _ => Err(err()),
        }
    }

    /// `#rrggbbaa` representation.
    pub fn to_hex(self) -> String {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            q(self.r),
            q(self.g),
            q(self.b),
            q(self.a)
        )
    }

    /// Approximate equality, for comparing sampled animation output.
    pub fn approx_eq(self, other: Color) -> bool {
        const EPS: f64 = 1e-6;
        (self.r - other.r).abs() < EPS
            && (self.g - other.g).abs() < EPS
            && (self.b - other.b).abs() < EPS
            && (self.a - other.a).abs() < EPS
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A malformed hex colour string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid colour: {0:?}")]
pub struct ColorParseError(String);

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Color;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "hex string \"#rrggbb[aa]\" or object {{r, g, b, a}}")
            }
            fn visit_str<E>(self, s: &str) -> Result<Color, E>
            where
                E: DeError,
            {
                Color::from_hex(s).map_err(DeError::custom)
            }
            fn visit_map<A>(self, mut map: A) -> Result<Color, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut r: Option<u8> = None;
                let mut g: Option<u8> = None;
                let mut b: Option<u8> = None;
                let mut a: Option<f64> = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "r" => r = Some(map.next_value()?),
                        "g" => g = Some(map.next_value()?),
                        "b" => b = Some(map.next_value()?),
                        "a" => a = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                let a = a.unwrap_or(1.0);
                if !(0.0..=1.0).contains(&a) {
                    return Err(DeError::custom(format!("alpha out of range: {}", a)));
                }
                Ok(Color::rgba8(
                    r.ok_or_else(|| DeError::missing_field("r"))?,
                    g.ok_or_else(|| DeError::missing_field("g"))?,
                    b.ok_or_else(|| DeError::missing_field("b"))?,
                    a,
                ))
            }
        }
        deserializer.deserialize_any(V)
    }
}

//  Built-in colours

pub const MATERIAL_ON_KNOB: Color = Color::rgb8(0, 150, 136);
pub const MATERIAL_ON_TRACK: Color = Color::rgba8(0, 150, 136, 0.5);
pub const MATERIAL_OFF_KNOB: Color = Color::rgb8(241, 241, 241);
pub const MATERIAL_OFF_TRACK: Color = Color::rgba8(34, 31, 31, 0.26);

pub const IOS_ON_TRACK: Color = Color::rgb8(52, 199, 89);
pub const IOS_OFF_TRACK: Color = Color::rgba8(120, 120, 128, 0.16);
/// Border (and background) of an idle iOS track.
pub const IOS_TRACK_BORDER: Color = Color::rgb8(204, 204, 204);
/// The inner layer that hides the track while an iOS switch is idle and off.
pub const IOS_FILL: Color = Color::WHITE;

/// The four colours a switch paints with.
///
/// "Active" colours are used in the on state, "idle" colours in the off
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub active_knob: Color,
    pub active_track: Color,
    pub idle_knob: Color,
    pub idle_track: Color,
}

impl Palette {
    /// Default palette for `variant`.
    pub const fn defaults(variant: Variant) -> Palette {
        match variant {
            Variant::Ios | Variant::IosImage => Palette {
                active_knob: Color::WHITE,
                active_track: IOS_ON_TRACK,
                idle_knob: Color::WHITE,
                idle_track: IOS_OFF_TRACK,
            },
            Variant::Material | Variant::Rounded => Palette {
                active_knob: MATERIAL_ON_KNOB,
                active_track: MATERIAL_ON_TRACK,
                idle_knob: MATERIAL_OFF_KNOB,
                idle_track: MATERIAL_OFF_TRACK,
            },
        }
    }

    /// Knob colour for a state (pending states use their target's colour).
    pub fn knob(&self, on: bool) -> Color {
        if on {
            self.active_knob
        } else {
            self.idle_knob
        }
    }

    /// Track colour for a state.
    pub fn track(&self, on: bool) -> Color {
        if on {
            self.active_track
        } else {
            self.idle_track
        }
    }
}

/// Optional replacements for individual [`Palette`] fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    pub active_knob: Option<Color>,
    pub active_track: Option<Color>,
    pub idle_knob: Option<Color>,
    pub idle_track: Option<Color>,
}

impl PaletteOverrides {
    /// Replace the fields of `palette` that are set here.
    pub fn apply(&self, palette: &mut Palette) {
        if let Some(c) = self.active_knob {
            palette.active_knob = c;
        }
        if let Some(c) = self.active_track {
            palette.active_track = c;
        }
        if let Some(c) = self.idle_knob {
            palette.idle_knob = c;
        }
        if let Some(c) = self.idle_track {
            palette.idle_track = c;
        }
    }
}
