//! Per-variant layout rules.
//!
//! [`Layout::compute`] derives every static measurement of a switch (track
//! height, knob size, knob positions, halo and image sizes, corner radii)
//! from its bounding box and [`Variant`].  The animated parts of a switch
//! only ever move between values computed here.
//!
//! Coordinates are in logical units with the origin at the top-left of the
//! switch's bounding box.  The knob and track are vertically centred.

use crate::color::Color;
use crate::types::Variant;
use serde::{Deserialize, Serialize};

/// Extra knob width while an iOS switch is pressed.
pub const IOS_SQUEEZE: f64 = 5.0;
/// How much larger than the knob the material halo grows.
pub const HALO_SIZE_DELTA: f64 = 26.0;
/// Opacity of the material halo.
pub const HALO_ALPHA: f64 = 0.3;
/// Corner radius of a rounded switch when none is configured.
pub const DEFAULT_CORNER_RADIUS: f64 = 10.0;
/// Scale of the iOS fill layer when collapsed.  Not zero so the layer
/// keeps a defined centre.
pub const FILL_COLLAPSED: f64 = 0.001;

/// Width and height of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Default bounding box of each variant.
    pub const fn default_for(variant: Variant) -> Size {
        match variant {
            Variant::Ios | Variant::IosImage => Size::new(53.0, 33.0),
            Variant::Rounded => Size::new(60.0, 30.0),
            Variant::Material => Size::new(50.0, 50.0),
        }
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

impl From<Size> for (f64, f64) {
    fn from(s: Size) -> Self {
        (s.width, s.height)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width × height` rectangle centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Scale about the centre.
    pub fn scaled(&self, factor: f64) -> Self {
        let (cx, cy) = self.center();
        Self::centered(cx, cy, self.width * factor, self.height * factor)
    }
}

/// A rectangle with uniformly rounded corners.
///
/// The radius is clamped to half the shorter side when painted, so a
/// capsule can be described with any large radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f64,
}

impl RoundedRect {
    pub const fn new(rect: Rect, radius: f64) -> Self {
        Self { rect, radius }
    }

    /// The radius actually drawn.
    pub fn effective_radius(&self) -> f64 {
        self.radius
            .min(self.rect.width / 2.0)
            .min(self.rect.height / 2.0)
            .max(0.0)
    }
}

/// Drop shadow under the knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub radius: f64,
}

impl Shadow {
    const IOS: Shadow = Shadow {
        color: Color::BLACK,
        opacity: 0.30,
        offset_x: 0.0,
        offset_y: 2.0,
        radius: 8.0,
    };

    const FLAT: Shadow = Shadow {
        color: Color::BLACK,
        opacity: 0.24,
        offset_x: 0.0,
        offset_y: 1.0,
        radius: 1.0,
    };
}

/// Static measurements of a switch, derived from size and variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub variant: Variant,
    pub size: Size,
    /// Height of the track (crease).
    pub track_height: f64,
    /// Diameter (or side) of the knob at rest.
    pub knob_size: f64,
    /// Signed knob/track size difference; negative means the knob is inset.
    pub knob_track_delta: f64,
    pub track_radius: f64,
    pub knob_radius: f64,
    /// iOS only: width of the track border.
    pub border_width: f64,
    pub shadow: Shadow,
    /// Material only: halo diameter while pressed.
    pub halo_size: Option<f64>,
    /// iOS-with-image only: padding between knob edge and image.
    pub image_padding: f64,
}

impl Layout {
    /// Derive the layout for `variant` at `size`.
    ///
    /// `corner_radius` only affects [`Variant::Rounded`]; `None` falls back to
    /// [`DEFAULT_CORNER_RADIUS`].
    pub fn compute(variant: Variant, size: Size, corner_radius: Option<f64>) -> Layout {
        let h = size.height;
        match variant {
            Variant::Ios | Variant::IosImage => {
                let delta: f64 = -2.0;
                let track_height = h - delta.abs();
                // The delta is applied twice so the knob clears the border
                // on both sides.
                let knob_size = track_height + delta * 2.0;
                Layout {
                    variant,
                    size,
                    track_height,
                    knob_size,
                    knob_track_delta: delta,
                    track_radius: track_height / 2.0,
                    knob_radius: knob_size / 2.0,
                    border_width: delta.abs(),
                    shadow: Shadow::IOS,
                    halo_size: None,
                    image_padding: 0.0,
                }
            }
            Variant::Material => {
                let delta = 8.0;
                let track_height = h / 3.0;
                let knob_size = track_height + delta;
                Layout {
                    variant,
                    size,
                    track_height,
                    knob_size,
                    knob_track_delta: delta,
                    track_radius: track_height / 2.0,
                    knob_radius: knob_size / 2.0,
                    border_width: 0.0,
                    shadow: Shadow::FLAT,
                    halo_size: Some(knob_size + HALO_SIZE_DELTA),
                    image_padding: 0.0,
                }
            }
            Variant::Rounded => {
                let delta = -10.0;
                let track_height = h;
                let knob_size = track_height + delta;
                let mut layout = Layout {
                    variant,
                    size,
                    track_height,
                    knob_size,
                    knob_track_delta: delta,
                    track_radius: DEFAULT_CORNER_RADIUS,
                    knob_radius: DEFAULT_CORNER_RADIUS,
                    border_width: 0.0,
                    shadow: Shadow::FLAT,
                    halo_size: None,
                    image_padding: 0.0,
                };
                layout.set_corner_radius(corner_radius.unwrap_or(DEFAULT_CORNER_RADIUS));
                layout
            }
        }
    }

    /// Apply a custom corner radius.  Only meaningful for rounded switches;
    /// returns `false` (and changes nothing) for other variants.
    pub fn set_corner_radius(&mut self, radius: f64) -> bool {
        if self.variant != Variant::Rounded {
            return false;
        }
        // The knob keeps the same curvature ratio as whichever of the two
        // shapes is smaller.
        let ratio = if self.knob_size > self.track_height {
            radius / self.track_height
        } else {
            radius / self.knob_size
        };
        self.track_radius = radius;
        self.knob_radius = self.knob_size * ratio;
        true
    }

    /// Divisor applied to the delta when insetting the knob horizontally.
    fn inset_divisor(&self) -> f64 {
        if self.variant == Variant::Rounded {
            2.0
        } else {
            1.0
        }
    }

    /// Knob leading edge in the off position.
    pub fn knob_x_off(&self) -> f64 {
        -(self.knob_track_delta / self.inset_divisor())
    }

    /// Knob leading edge in the on position.
    pub fn knob_x_on(&self) -> f64 {
        self.size.width - (self.knob_size - self.knob_track_delta / self.inset_divisor())
    }

    /// Knob leading edge for a state.
    pub fn knob_x(&self, on: bool) -> f64 {
        if on {
            self.knob_x_on()
        } else {
            self.knob_x_off()
        }
    }

    /// Knob leading edge while pressed: iOS knobs widen toward the centre
    /// when on, every other knob stays put.
    pub fn knob_x_pressed(&self, on: bool) -> f64 {
        if on && self.variant.is_ios() {
            self.knob_x_on() - IOS_SQUEEZE
        } else {
            self.knob_x(on)
        }
    }

    /// Knob width while pressed.
    pub fn knob_width_pressed(&self) -> f64 {
        if self.variant.is_ios() {
            self.knob_size + IOS_SQUEEZE
        } else {
            self.knob_size
        }
    }

    /// Vertical centre line shared by knob and track.
    pub fn center_y(&self) -> f64 {
        self.size.height / 2.0
    }

    pub fn track_rect(&self) -> RoundedRect {
        let rect = Rect::new(
            0.0,
            self.center_y() - self.track_height / 2.0,
            self.size.width,
            self.track_height,
        );
        RoundedRect::new(rect, self.track_radius)
    }

    /// Knob shape at leading edge `x` and width `width`.
    pub fn knob_rect(&self, x: f64, width: f64) -> RoundedRect {
        let rect = Rect::new(
            x,
            self.center_y() - self.knob_size / 2.0,
            width,
            self.knob_size,
        );
        RoundedRect::new(rect, self.knob_radius)
    }

    /// iOS only: the full-size fill layer, centred on the track.
    pub fn fill_rect(&self) -> Option<RoundedRect> {
        if !self.variant.is_ios() {
            return None;
        }
        let (cx, cy) = self.track_rect().rect.center();
        let rect = Rect::centered(cx, cy, self.size.width, self.size.height);
        Some(RoundedRect::new(rect, self.size.height / 2.0))
    }

    /// Side length of the knob image after padding.
    pub fn image_size(&self) -> f64 {
        (self.knob_size - self.image_padding * 2.0).max(0.0)
    }

    /// Image shape centred in the given knob.
    pub fn image_rect(&self, knob: &RoundedRect) -> RoundedRect {
        let side = self.image_size();
        let (cx, cy) = knob.rect.center();
        RoundedRect::new(Rect::centered(cx, cy, side, side), side / 2.0)
    }

    /// Halo shape of diameter `size` centred on the given knob.
    pub fn halo_rect(&self, knob: &RoundedRect, size: f64) -> RoundedRect {
        let (cx, cy) = knob.rect.center();
        RoundedRect::new(Rect::centered(cx, cy, size, size), size / 2.0)
    }
}
