//! A sampled, backend-neutral picture of a switch.
//!
//! [`Switch::frame`](crate::switch::Switch::frame) evaluates every animated
//! property at one instant and returns a [`SwitchFrame`]: plain shapes and
//! colours, nothing left to interpolate.  [`SwitchFrame::paint`] then emits
//! the layers in z-order onto any [`Canvas`].
//!
//! ```text
//! track            (background capsule / rectangle)
//! └ fill          (iOS only, clipped to the track)
//! track border     (iOS only)
//! halo             (material only, while pressed)
//! knob shadow
//! knob
//! └ image         (iOS-with-image only)
//! ```

use crate::color::Color;
use crate::geometry::{RoundedRect, Shadow, Size};
use crate::traits::Canvas;
use crate::types::KnobImage;

/// A filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub shape: RoundedRect,
    pub color: Color,
}

/// An inside stroke along the track's edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

/// Everything needed to draw a switch at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchFrame {
    pub size: Size,
    pub track: Layer,
    pub border: Option<Border>,
    /// Drawn clipped to the track.
    pub fill: Option<Layer>,
    pub halo: Option<Layer>,
    pub knob: Layer,
    pub shadow: Shadow,
    pub image: Option<(RoundedRect, KnobImage)>,
}

impl SwitchFrame {
    /// Paint all layers onto `canvas`, back to front.
    pub fn paint<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        canvas.fill_rounded_rect(self.track.shape, self.track.color)?;

        if let Some(fill) = &self.fill {
            canvas.push_clip(self.track.shape)?;
            canvas.fill_rounded_rect(fill.shape, fill.color)?;
            canvas.pop_clip()?;
        }

        if let Some(border) = &self.border {
            canvas.stroke_rounded_rect(self.track.shape, border.width, border.color)?;
        }

        if let Some(halo) = &self.halo {
            canvas.fill_rounded_rect(halo.shape, halo.color)?;
        }

        canvas.shadow(self.knob.shape, &self.shadow)?;
        canvas.fill_rounded_rect(self.knob.shape, self.knob.color)?;

        if let Some((shape, image)) = &self.image {
            canvas.image(*shape, image)?;
        }
        Ok(())
    }
}
