//! Core traits that decouple the switch model from any host toolkit.
//!
//! * [`ToggleListener`] is the output side: the host learns about every
//!   state the user commits.
//! * [`Canvas`] is the drawing side: a [`SwitchFrame`](crate::frame::SwitchFrame)
//!   paints itself through it, so the same switch renders with cairo, a
//!   test recorder, or anything else that can fill a rounded rectangle.

use crate::color::Color;
use crate::geometry::{RoundedRect, Shadow};
use crate::types::{KnobImage, SwitchState};
use std::sync::mpsc;

/// Receives the committed state after each completed user toggle.
///
/// Programmatic changes ([`Switch::set_state`](crate::switch::Switch::set_state))
/// never notify.
pub trait ToggleListener {
    fn did_toggle(&mut self, state: SwitchState);
}

/// Forward toggles into a channel.  A closed receiver is ignored.
impl ToggleListener for mpsc::Sender<SwitchState> {
    fn did_toggle(&mut self, state: SwitchState) {
        let _ = self.send(state);
    }
}

/// Adapt a closure into a [`ToggleListener`].
pub struct FnListener<F>(pub F);

impl<F: FnMut(SwitchState)> ToggleListener for FnListener<F> {
    fn did_toggle(&mut self, state: SwitchState) {
        (self.0)(state)
    }
}

/// A 2D drawing surface a switch can paint onto.
///
/// Implementations only need to handle rounded rectangles, a clip stack,
/// and images; every switch layer is one of those.
pub trait Canvas {
    /// The error type produced by this backend.
    type Error: std::error::Error + 'static;

    fn fill_rounded_rect(&mut self, shape: RoundedRect, color: Color) -> Result<(), Self::Error>;

    /// Stroke the inside edge of `shape` with a line `width` wide.
    fn stroke_rounded_rect(
        &mut self,
        shape: RoundedRect,
        width: f64,
        color: Color,
    ) -> Result<(), Self::Error>;

    /// Draw a soft shadow for `shape`.
    fn shadow(&mut self, shape: RoundedRect, shadow: &Shadow) -> Result<(), Self::Error>;

    /// Draw `image` scaled into `shape`, clipped to its corners.
    fn image(&mut self, shape: RoundedRect, image: &KnobImage) -> Result<(), Self::Error>;

    /// Restrict subsequent drawing to `shape` until the matching
    /// [`pop_clip`](Canvas::pop_clip).
    fn push_clip(&mut self, shape: RoundedRect) -> Result<(), Self::Error>;

    fn pop_clip(&mut self) -> Result<(), Self::Error>;
}
