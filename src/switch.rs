//! The switch control: state, palette, layout and gesture handling.
//!
//! [`Switch`] is a headless model.  The host feeds it [`TouchEvent`]s
//! stamped with its own clock, asks it for a [`SwitchFrame`] whenever it
//! redraws, and receives committed states through a [`ToggleListener`].
//!
//! # Gesture state machine
//!
//! ```text
//!           Down               |d| > threshold
//!   Idle ─────────► Pressed ──────────────────► Pending(on|off)
//!    ▲                 │  ◄─────────────────────    │
//!    │                 │    back within threshold   │
//!    ├── Up (tap) ─────┘                            │
//!    └── Up: commit + notify ───────────────────────┘
//!
//!   Cancel, from any phase: revert to the committed state, no notify
//! ```
//!
//! Visual changes are animated with fixed durations (0.2–0.4 s).  A new
//! gesture simply overwrites the properties it touches; see
//! [`animation`](crate::animation).

use crate::animation::{Animated, Transition};
use crate::color::{Color, Palette, PaletteOverrides, IOS_FILL, IOS_TRACK_BORDER};
use crate::frame::{Border, Layer, SwitchFrame};
use crate::geometry::{Layout, Size, FILL_COLLAPSED, HALO_ALPHA, IOS_SQUEEZE};
use crate::gesture::{classify_drag, DragIntent, GestureConfig, GesturePhase, Touch, TouchEvent};
use crate::traits::ToggleListener;
use crate::types::{KnobImage, SwitchState, Variant};
use log::debug;
use std::fmt;
use std::time::Duration;

/// Halo pop-in / collapse, knob squeeze and release.
const PRESS_SECS: f64 = 0.2;
/// Pending previews, commits and taps.
const TOGGLE_SECS: f64 = 0.25;
/// iOS fill collapse / restore.
const FILL_SECS: f64 = 0.4;

/// Optional construction parameters.  Everything left as `None` falls back
/// to the variant's defaults.
///
/// ```ignore
/// let switch = Switch::new(Variant::Rounded, SwitchOptions {
///     size: Some(Size::new(150.0, 100.0)),
///     corner_radius: Some(20.0),
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwitchOptions {
    pub size: Option<Size>,
    /// Initial state; pending states are committed.  Default: off.
    pub state: Option<SwitchState>,
    pub colors: PaletteOverrides,
    /// Only used by [`Variant::IosImage`].
    pub image: Option<KnobImage>,
    /// Only used by [`Variant::Rounded`].
    pub corner_radius: Option<f64>,
}

/// Every animated property of the visual layers.
#[derive(Debug, Clone)]
struct Layers {
    knob_x: Animated<f64>,
    knob_width: Animated<f64>,
    knob_color: Animated<Color>,
    track_color: Animated<Color>,
    border_color: Animated<Color>,
    fill_scale: Animated<f64>,
    halo_size: Animated<f64>,
    halo_color: Animated<Color>,
}

impl Layers {
    /// Placeholder until [`Switch::rebuild`] runs.
    fn blank() -> Self {
        Self {
            knob_x: Animated::new(0.0),
            knob_width: Animated::new(0.0),
            knob_color: Animated::new(Color::TRANSPARENT),
            track_color: Animated::new(Color::TRANSPARENT),
            border_color: Animated::new(Color::TRANSPARENT),
            fill_scale: Animated::new(1.0),
            halo_size: Animated::new(0.0),
            halo_color: Animated::new(Color::TRANSPARENT),
        }
    }

    fn is_animating(&self, now: Duration) -> bool {
        self.knob_x.is_animating(now)
            || self.knob_width.is_animating(now)
            || self.knob_color.is_animating(now)
            || self.track_color.is_animating(now)
            || self.border_color.is_animating(now)
            || self.fill_scale.is_animating(now)
            || self.halo_size.is_animating(now)
            || self.halo_color.is_animating(now)
    }
}

/// An animated toggle switch.
pub struct Switch {
    variant: Variant,
    layout: Layout,
    /// What the switch shows right now; pending while dragged past the
    /// threshold.
    state: SwitchState,
    /// The last settled state (never pending).
    committed: SwitchState,
    palette: Palette,
    knob_clear: bool,
    image: Option<KnobImage>,
    image_padding: f64,
    corner_radius: Option<f64>,
    gestures: GestureConfig,
    phase: GesturePhase,
    touch: Option<Touch>,
    layers: Layers,
    listener: Option<Box<dyn ToggleListener>>,
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("variant", &self.variant)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("size", &self.layout.size)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

impl Switch {
    /// Build a switch of `variant`, laid out and at rest.
    ///
    /// Options that do not apply to the variant (an image on a material
    /// switch, a corner radius on an iOS switch) are ignored.
    pub fn new(variant: Variant, options: SwitchOptions) -> Self {
        let size = options.size.unwrap_or_else(|| Size::default_for(variant));
        let committed = options.state.unwrap_or_default().committed();

        let mut palette = Palette::defaults(variant);
        options.colors.apply(&mut palette);

        let image = match (variant, options.image) {
            (Variant::IosImage, img) => Some(img.unwrap_or_default()),
            (_, Some(img)) => {
                debug!("{}: ignoring image {} on a non-image switch", variant, img.path.display());
                None
            }
            (_, None) => None,
        };
        let corner_radius = match (variant, options.corner_radius) {
            (Variant::Rounded, r) => r,
            (_, Some(r)) => {
                debug!("{}: ignoring corner radius {} on a capsule switch", variant, r);
                None
            }
            (_, None) => None,
        };

        let layout = Layout::compute(variant, size, corner_radius);
        let mut switch = Self {
            variant,
            layout,
            state: committed,
            committed,
            palette,
            knob_clear: false,
            image,
            image_padding: 0.0,
            corner_radius,
            gestures: GestureConfig::default(),
            phase: GesturePhase::Idle,
            touch: None,
            layers: Layers::blank(),
            listener: None,
        };
        switch.rebuild();
        switch
    }

    /// A switch with every option at its default.
    pub fn with_defaults(variant: Variant) -> Self {
        Self::new(variant, SwitchOptions::default())
    }

    //  Accessors

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Current state, including the transient pending states mid-drag.
    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// The last settled state.
    pub fn committed_state(&self) -> SwitchState {
        self.committed
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn size(&self) -> Size {
        self.layout.size
    }

    pub fn image(&self) -> Option<&KnobImage> {
        self.image.as_ref()
    }

    pub fn image_padding(&self) -> f64 {
        self.image_padding
    }

    pub fn knob_clear(&self) -> bool {
        self.knob_clear
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gestures
    }

    //  Configuration

    /// Attach the listener that receives committed toggles, replacing any
    /// previous one.
    pub fn set_listener(&mut self, listener: impl ToggleListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn set_gesture_config(&mut self, config: GestureConfig) {
        self.gestures = config;
    }

    /// Jump to `state` without animating or notifying.  Any gesture in
    /// progress is abandoned.  Pending states are committed.
    pub fn set_state(&mut self, state: SwitchState) {
        self.committed = state.committed();
        self.state = self.committed;
        self.phase = GesturePhase::Idle;
        self.touch = None;
        debug!("{}: state set to {}", self.variant, self.state);
        self.rebuild();
    }

    /// Change the skin.  The palette resets to the new variant's defaults,
    /// the size is kept, and the layers are rebuilt.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
        self.palette = Palette::defaults(variant);
        if variant == Variant::IosImage && self.image.is_none() {
            self.image = Some(KnobImage::default());
        }
        if variant != Variant::Rounded {
            self.corner_radius = None;
        }
        self.phase = GesturePhase::Idle;
        self.touch = None;
        self.state = self.committed;
        self.relayout(self.layout.size);
    }

    /// Resize the bounding box and rebuild the layers.
    pub fn set_size(&mut self, size: Size) {
        self.relayout(size);
    }

    /// Rounded switches only; ignored otherwise.
    pub fn set_corner_radius(&mut self, radius: f64) {
        if self.layout.set_corner_radius(radius) {
            self.corner_radius = Some(radius);
        } else {
            debug!("{}: corner radius only applies to rounded switches", self.variant);
        }
    }

    /// iOS-with-image switches only; ignored otherwise.
    pub fn set_image(&mut self, image: KnobImage) {
        if self.variant == Variant::IosImage {
            self.image = Some(image);
        } else {
            debug!("{}: image only applies to image switches", self.variant);
        }
    }

    /// Inset of the knob image on every side.  The image stays centred on
    /// the knob.
    pub fn set_image_padding(&mut self, padding: f64) {
        self.image_padding = padding;
        self.layout.image_padding = padding;
    }

    /// Make both knob colours transparent (or restore the palette's).
    pub fn set_knob_clear(&mut self, clear: bool) {
        self.knob_clear = clear;
        self.recolor();
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.recolor();
    }

    pub fn set_active_knob(&mut self, color: Color) {
        self.palette.active_knob = color;
        self.recolor();
    }

    pub fn set_active_track(&mut self, color: Color) {
        self.palette.active_track = color;
        self.recolor();
    }

    pub fn set_idle_knob(&mut self, color: Color) {
        self.palette.idle_knob = color;
        self.recolor();
    }

    pub fn set_idle_track(&mut self, color: Color) {
        self.palette.idle_track = color;
        self.recolor();
    }

    //  Appearance rules

    fn knob_color(&self, on: bool) -> Color {
        if self.knob_clear {
            Color::TRANSPARENT
        } else {
            self.palette.knob(on)
        }
    }

    /// iOS tracks show the border grey when off; the white fill covers the
    /// rest.
    fn track_color(&self, on: bool) -> Color {
        if self.variant.is_ios() && !on {
            IOS_TRACK_BORDER
        } else {
            self.palette.track(on)
        }
    }

    fn border_color(&self, on: bool) -> Color {
        if on {
            self.palette.active_track
        } else {
            IOS_TRACK_BORDER
        }
    }

    /// iOS border while previewing a state.
    fn pending_border_color(&self, target_on: bool) -> Color {
        if target_on {
            self.palette.active_track
        } else {
            self.palette.idle_track
        }
    }

    fn fill_scale(on: bool) -> f64 {
        if on {
            FILL_COLLAPSED
        } else {
            1.0
        }
    }

    fn relayout(&mut self, size: Size) {
        self.layout = Layout::compute(self.variant, size, self.corner_radius);
        self.layout.image_padding = self.image_padding;
        self.rebuild();
    }

    /// Reset every layer to rest for the current state.
    fn rebuild(&mut self) {
        let on = self.state.is_on();
        self.layers = Layers {
            knob_x: Animated::new(self.layout.knob_x(on)),
            knob_width: Animated::new(self.layout.knob_size),
            knob_color: Animated::new(self.knob_color(on)),
            track_color: Animated::new(self.track_color(on)),
            border_color: Animated::new(self.border_color(on)),
            fill_scale: Animated::new(Self::fill_scale(on)),
            halo_size: Animated::new(0.0),
            halo_color: Animated::new(self.palette.track(on)),
        };
    }

    /// Apply palette changes immediately, leaving geometry and state alone.
    fn recolor(&mut self) {
        let on = self.state.is_on();
        let border = if self.state.is_pending() && self.variant.is_ios() {
            self.pending_border_color(on)
        } else {
            self.border_color(on)
        };
        let (knob, track, halo) = (
            self.knob_color(on),
            self.track_color(on),
            self.palette.track(on),
        );
        self.layers.knob_color.set(knob);
        self.layers.track_color.set(track);
        self.layers.border_color.set(border);
        self.layers.halo_color.set(halo);
    }

    //  Input

    /// Feed one touch event at host time `now`.
    pub fn handle(&mut self, event: TouchEvent, now: Duration) {
        match event {
            TouchEvent::Down { x } => self.touch_down(x, now),
            TouchEvent::Move { x } => self.touch_move(x, now),
            TouchEvent::Up { x } => self.touch_up(x, now),
            TouchEvent::Cancel => self.touch_cancel(now),
            TouchEvent::Tap => self.tap(now),
        }
    }

    /// Toggle as if tapped: animate to the opposite state and notify.
    ///
    /// A finger still on the switch is released first, so its later `Up`
    /// is ignored.
    pub fn tap(&mut self, now: Duration) {
        if self.touch.take().is_some() {
            debug!("{}: tap ends the gesture in progress", self.variant);
            self.phase = GesturePhase::Idle;
            self.toggle(now);
            self.release_knob(now);
        } else {
            self.toggle(now);
        }
    }

    fn toggle(&mut self, now: Duration) {
        let next = self.committed.toggled();
        debug!("{}: tap {} -> {}", self.variant, self.committed, next);
        self.committed = next;
        self.state = next;
        let on = next.is_on();

        let t = Transition::ease_in_out(TOGGLE_SECS);
        self.layers.knob_x.animate_to(self.layout.knob_x(on), now, t);
        self.layers.knob_color.animate_to(self.knob_color(on), now, t);
        self.layers.track_color.animate_to(self.track_color(on), now, t);
        self.layers.border_color.animate_to(self.border_color(on), now, t);
        if self.variant.is_ios() {
            self.layers
                .fill_scale
                .animate_to(Self::fill_scale(on), now, Transition::ease_in_out(FILL_SECS));
        }
        self.collapse_halo(now, TOGGLE_SECS, Some(on));

        self.notify(next);
    }

    fn touch_down(&mut self, x: f64, now: Duration) {
        if self.phase != GesturePhase::Idle {
            debug!("{}: touch down during {:?}, restarting gesture", self.variant, self.phase);
            if self.state != self.committed {
                self.state = self.committed;
                self.restore_committed(now);
            }
        }
        self.touch = Some(Touch::begin(x));
        self.phase = GesturePhase::Pressed;
        self.pop_halo(now);
        self.squeeze_knob(now);
    }

    fn touch_move(&mut self, x: f64, now: Duration) {
        let Some(touch) = self.touch.as_mut() else {
            return;
        };
        let distance = touch.track(x);
        match (classify_drag(distance, self.gestures.drag_threshold), self.phase) {
            (DragIntent::TowardOn, GesturePhase::Pending { target_on: true }) => {}
            (DragIntent::TowardOff, GesturePhase::Pending { target_on: false }) => {}
            (DragIntent::TowardOn, _) => self.enter_pending(true, now),
            (DragIntent::TowardOff, _) => self.enter_pending(false, now),
            (DragIntent::Neutral, GesturePhase::Pending { .. }) => self.return_to_pressed(now),
            (DragIntent::Neutral, _) => {}
        }
    }

    fn touch_up(&mut self, x: f64, now: Duration) {
        let Some(mut touch) = self.touch.take() else {
            return;
        };
        touch.track(x);
        let phase = std::mem::take(&mut self.phase);

        match phase {
            GesturePhase::Pending { target_on } => self.commit(target_on, now),
            _ if touch.is_tap(self.gestures.tap_slop) => self.toggle(now),
            _ => {
                debug!("{}: released without crossing the threshold", self.variant);
                self.collapse_halo(now, PRESS_SECS, None);
            }
        }
        self.release_knob(now);
    }

    fn touch_cancel(&mut self, now: Duration) {
        if self.touch.take().is_none() {
            return;
        }
        debug!("{}: touch cancelled, reverting to {}", self.variant, self.committed);
        self.phase = GesturePhase::Idle;
        if self.state != self.committed {
            self.state = self.committed;
            self.restore_committed(now);
        }
        self.collapse_halo(now, PRESS_SECS, None);
        self.release_knob(now);
    }

    //  Transitions

    fn enter_pending(&mut self, target_on: bool, now: Duration) {
        self.state = if target_on {
            SwitchState::OnPending
        } else {
            SwitchState::OffPending
        };
        self.phase = GesturePhase::Pending { target_on };
        if let Some(touch) = self.touch.as_mut() {
            touch.entered_pending = true;
        }
        debug!("{}: {}", self.variant, self.state);

        let t = Transition::ease_in_out(TOGGLE_SECS);
        let x = if target_on && self.variant.is_ios() {
            self.layout.knob_x_on() - IOS_SQUEEZE
        } else {
            self.layout.knob_x(target_on)
        };
        self.layers.knob_x.animate_to(x, now, t);
        self.layers.knob_color.animate_to(self.knob_color(target_on), now, t);
        self.layers.track_color.animate_to(self.track_color(target_on), now, t);
        if self.variant.is_ios() {
            let border = self.pending_border_color(target_on);
            self.layers.border_color.animate_to(border, now, t);
        }
        self.collapse_halo(now, PRESS_SECS, None);
    }

    /// Dragged back within the threshold: preview the committed state again.
    fn return_to_pressed(&mut self, now: Duration) {
        self.state = self.committed;
        self.phase = GesturePhase::Pressed;
        debug!("{}: back within threshold, {}", self.variant, self.state);

        let on = self.committed.is_on();
        let t = Transition::ease_in_out(TOGGLE_SECS);
        self.layers.knob_x.animate_to(self.layout.knob_x_pressed(on), now, t);
        self.layers.knob_color.animate_to(self.knob_color(on), now, t);
        self.layers.track_color.animate_to(self.track_color(on), now, t);
        self.layers.border_color.animate_to(self.border_color(on), now, t);
        self.pop_halo(now);
    }

    fn commit(&mut self, target_on: bool, now: Duration) {
        let next = if target_on {
            SwitchState::On
        } else {
            SwitchState::Off
        };
        debug!("{}: commit {} -> {}", self.variant, self.committed, next);
        self.committed = next;
        self.state = next;
        self.collapse_halo(now, TOGGLE_SECS, Some(target_on));
        self.notify(next);
    }

    /// Animate knob and colours back to the committed state.
    fn restore_committed(&mut self, now: Duration) {
        let on = self.committed.is_on();
        let t = Transition::ease_in_out(TOGGLE_SECS);
        self.layers.knob_x.animate_to(self.layout.knob_x(on), now, t);
        self.layers.knob_color.animate_to(self.knob_color(on), now, t);
        self.layers.track_color.animate_to(self.track_color(on), now, t);
        self.layers.border_color.animate_to(self.border_color(on), now, t);
    }

    /// Material only: grow the halo under the knob.
    fn pop_halo(&mut self, now: Duration) {
        if let Some(size) = self.layout.halo_size {
            let color = self.palette.track(self.committed.is_on());
            self.layers.halo_color.set(color);
            self.layers
                .halo_size
                .animate_to(size, now, Transition::ease_in_out(PRESS_SECS));
        }
    }

    /// Material only: shrink the halo.  With `recolor_to`, the halo takes
    /// that state's track colour once it has fully collapsed.
    fn collapse_halo(&mut self, now: Duration, secs: f64, recolor_to: Option<bool>) {
        if self.layout.halo_size.is_none() {
            return;
        }
        self.layers
            .halo_size
            .animate_to(0.0, now, Transition::ease_in_out(secs));
        if let Some(on) = recolor_to {
            let color = self.palette.track(on);
            self.layers
                .halo_color
                .animate_to(color, now, Transition::after(secs));
        }
    }

    /// iOS only: widen the knob and collapse the fill.
    fn squeeze_knob(&mut self, now: Duration) {
        if !self.variant.is_ios() {
            return;
        }
        let on = self.committed.is_on();
        let t = Transition::ease_in_out(PRESS_SECS);
        self.layers
            .knob_width
            .animate_to(self.layout.knob_width_pressed(), now, t);
        if on {
            self.layers
                .knob_x
                .animate_to(self.layout.knob_x_pressed(true), now, t);
        }
        self.layers
            .fill_scale
            .animate_to(FILL_COLLAPSED, now, Transition::ease_in_out(FILL_SECS));
    }

    /// iOS only: settle the knob back into the committed position.
    fn release_knob(&mut self, now: Duration) {
        if !self.variant.is_ios() {
            return;
        }
        let on = self.committed.is_on();
        let t = Transition::ease_in_out(PRESS_SECS);
        self.layers.knob_x.animate_to(self.layout.knob_x(on), now, t);
        self.layers
            .knob_width
            .animate_to(self.layout.knob_size, now, t);
        self.layers
            .border_color
            .animate_to(self.border_color(on), now, t);
        if !on {
            self.layers
                .fill_scale
                .animate_to(1.0, now, Transition::ease_in_out(FILL_SECS));
        }
    }

    fn notify(&mut self, state: SwitchState) {
        if let Some(listener) = self.listener.as_mut() {
            listener.did_toggle(state);
        }
    }

    //  Output

    /// Whether any layer is still moving at `now`.  Hosts can stop
    /// redrawing once this is `false`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.layers.is_animating(now)
    }

    /// Sample every layer at `now`.
    pub fn frame(&self, now: Duration) -> SwitchFrame {
        let layout = &self.layout;
        let l = &self.layers;

        let knob_shape = layout.knob_rect(l.knob_x.value_at(now), l.knob_width.value_at(now));

        let border = (layout.border_width > 0.0).then(|| Border {
            width: layout.border_width,
            color: l.border_color.value_at(now),
        });

        let fill = layout.fill_rect().map(|base| {
            let scale = l.fill_scale.value_at(now);
            let mut shape = base;
            shape.rect = base.rect.scaled(scale);
            shape.radius = base.radius * scale;
            Layer {
                shape,
                color: IOS_FILL,
            }
        });

        let halo_size = l.halo_size.value_at(now);
        let halo = (layout.halo_size.is_some() && halo_size > 0.0).then(|| Layer {
            shape: layout.halo_rect(&knob_shape, halo_size),
            color: l.halo_color.value_at(now).fade(HALO_ALPHA),
        });

        let image = match &self.image {
            Some(img) if !img.is_empty() && self.variant == Variant::IosImage => {
                Some((layout.image_rect(&knob_shape), img.clone()))
            }
            _ => None,
        };

        SwitchFrame {
            size: layout.size,
            track: Layer {
                shape: layout.track_rect(),
                color: l.track_color.value_at(now),
            },
            border,
            fill,
            halo,
            knob: Layer {
                shape: knob_shape,
                color: l.knob_color.value_at(now),
            },
            shadow: layout.shadow,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RoundedRect;
    use crate::color::{IOS_OFF_TRACK, IOS_ON_TRACK, MATERIAL_OFF_TRACK, MATERIAL_ON_KNOB, MATERIAL_ON_TRACK};
    use std::sync::mpsc;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Far enough ahead that every animation has finished.
    const SETTLED: Duration = Duration::from_secs(10);

    fn recorded(variant: Variant, options: SwitchOptions) -> (Switch, mpsc::Receiver<SwitchState>) {
        let (tx, rx) = mpsc::channel();
        let mut sw = Switch::new(variant, options);
        sw.set_listener(tx);
        (sw, rx)
    }

    fn starting(variant: Variant, state: SwitchState) -> (Switch, mpsc::Receiver<SwitchState>) {
        recorded(
            variant,
            SwitchOptions {
                state: Some(state),
                ..Default::default()
            },
        )
    }

    fn drag(sw: &mut Switch, from: f64, to: f64) {
        sw.handle(TouchEvent::Down { x: from }, ms(0));
        let steps = 5;
        for i in 1..=steps {
            let x = from + (to - from) * i as f64 / steps as f64;
            sw.handle(TouchEvent::Move { x }, ms(10 * i));
        }
    }

    fn same_center(a: &RoundedRect, b: &RoundedRect) -> bool {
        let ((ax, ay), (bx, by)) = (a.rect.center(), b.rect.center());
        (ax - bx).abs() < 1e-9 && (ay - by).abs() < 1e-9
    }

    fn resting_frame(variant: Variant, state: SwitchState) -> SwitchFrame {
        Switch::new(
            variant,
            SwitchOptions {
                state: Some(state),
                ..Default::default()
            },
        )
        .frame(Duration::ZERO)
    }

    //  Construction

    #[test]
    fn defaults_per_variant() {
        for variant in Variant::ALL {
            let sw = Switch::with_defaults(variant);
            assert_eq!(sw.size(), Size::default_for(variant));
            assert_eq!(sw.palette(), Palette::defaults(variant));
            assert_eq!(sw.state(), SwitchState::Off);
            assert_eq!(sw.gesture_phase(), GesturePhase::Idle);
            assert!(!sw.is_animating(Duration::ZERO));
        }
    }

    #[test]
    fn initial_state_places_knob() {
        let sw = Switch::new(
            Variant::Material,
            SwitchOptions {
                state: Some(SwitchState::On),
                ..Default::default()
            },
        );
        let f = sw.frame(Duration::ZERO);
        assert_eq!(f.knob.shape.rect.x, sw.layout().knob_x_on());
        assert_eq!(f.knob.color, MATERIAL_ON_KNOB);
        assert_eq!(f.track.color, MATERIAL_ON_TRACK);
    }

    #[test]
    fn pending_initial_state_is_committed() {
        let sw = Switch::new(
            Variant::Ios,
            SwitchOptions {
                state: Some(SwitchState::OnPending),
                ..Default::default()
            },
        );
        assert_eq!(sw.state(), SwitchState::On);
    }

    #[test]
    fn color_overrides_apply() {
        let orange = Color::rgb8(255, 165, 0);
        let sw = Switch::new(
            Variant::Material,
            SwitchOptions {
                colors: PaletteOverrides {
                    active_knob: Some(orange),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        assert_eq!(sw.palette().active_knob, orange);
        assert_eq!(sw.palette().idle_track, MATERIAL_OFF_TRACK);
    }

    #[test]
    fn mismatched_options_are_ignored() {
        let sw = Switch::new(
            Variant::Material,
            SwitchOptions {
                image: Some(KnobImage::new("grape.png")),
                corner_radius: Some(3.0),
                ..Default::default()
            },
        );
        assert!(sw.image().is_none());
        assert!(sw.frame(Duration::ZERO).image.is_none());
        assert_eq!(sw.layout().knob_radius, sw.layout().knob_size / 2.0);
    }

    #[test]
    fn image_switch_without_image_draws_none() {
        let sw = Switch::with_defaults(Variant::IosImage);
        assert!(sw.image().is_some_and(|i| i.is_empty()));
        assert!(sw.frame(Duration::ZERO).image.is_none());
    }

    //  Taps

    #[test]
    fn tap_toggles_once_and_notifies_once() {
        let (mut sw, rx) = starting(Variant::Ios, SwitchState::Off);
        sw.handle(TouchEvent::Down { x: 10.0 }, ms(0));
        sw.handle(TouchEvent::Up { x: 12.0 }, ms(80));
        assert_eq!(sw.state(), SwitchState::On);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::On]);
        assert_eq!(sw.frame(SETTLED), resting_frame(Variant::Ios, SwitchState::On));
    }

    #[test]
    fn tap_during_press_ends_the_gesture() {
        let (mut sw, rx) = starting(Variant::Ios, SwitchState::Off);
        sw.handle(TouchEvent::Down { x: 10.0 }, ms(0));
        sw.handle(TouchEvent::Tap, ms(50));
        assert_eq!(sw.gesture_phase(), GesturePhase::Idle);
        sw.handle(TouchEvent::Up { x: 10.0 }, ms(100));
        assert_eq!(sw.state(), SwitchState::On);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::On]);
        assert_eq!(sw.frame(SETTLED), resting_frame(Variant::Ios, SwitchState::On));
    }

    #[test]
    fn tap_during_pending_drag_toggles_once() {
        let (mut sw, rx) = starting(Variant::Material, SwitchState::Off);
        drag(&mut sw, 5.0, 40.0);
        assert_eq!(sw.state(), SwitchState::OnPending);
        sw.handle(TouchEvent::Tap, ms(100));
        sw.handle(TouchEvent::Up { x: 40.0 }, ms(150));
        assert_eq!(sw.state(), SwitchState::On);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::On]);
        assert_eq!(sw.frame(SETTLED), resting_frame(Variant::Material, SwitchState::On));
    }

    #[test]
    fn host_recognised_tap_toggles() {
        let (mut sw, rx) = starting(Variant::Rounded, SwitchState::On);
        sw.handle(TouchEvent::Tap, ms(0));
        assert_eq!(sw.state(), SwitchState::Off);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::Off]);
    }

    #[test]
    fn toggling_twice_round_trips() {
        for variant in Variant::ALL {
            let (mut sw, rx) = starting(variant, SwitchState::On);
            sw.tap(ms(0));
            sw.tap(ms(500));
            assert_eq!(sw.state(), SwitchState::On);
            assert_eq!(
                rx.try_iter().collect::<Vec<_>>(),
                vec![SwitchState::Off, SwitchState::On]
            );
            assert_eq!(sw.frame(SETTLED), resting_frame(variant, SwitchState::On));
        }
    }

    #[test]
    fn tap_animates_knob() {
        let (mut sw, _rx) = starting(Variant::Rounded, SwitchState::Off);
        sw.tap(ms(0));
        let mid = sw.frame(ms(125)).knob.shape.rect.x;
        assert!(mid > sw.layout().knob_x_off() && mid < sw.layout().knob_x_on());
        assert!(sw.is_animating(ms(125)));
        assert!(!sw.is_animating(ms(300)));
    }

    //  Drags

    #[test]
    fn drag_right_past_threshold_commits_on() {
        let (mut sw, rx) = starting(Variant::Material, SwitchState::Off);
        drag(&mut sw, 5.0, 35.0);
        assert_eq!(sw.state(), SwitchState::OnPending);
        assert_eq!(sw.committed_state(), SwitchState::Off);
        assert!(rx.try_recv().is_err());

        sw.handle(TouchEvent::Up { x: 35.0 }, ms(100));
        assert_eq!(sw.state(), SwitchState::On);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::On]);
        assert_eq!(sw.frame(SETTLED), resting_frame(Variant::Material, SwitchState::On));
    }

    #[test]
    fn drag_left_past_threshold_commits_off() {
        let (mut sw, rx) = starting(Variant::Ios, SwitchState::On);
        drag(&mut sw, 40.0, 10.0);
        assert_eq!(sw.state(), SwitchState::OffPending);
        sw.handle(TouchEvent::Up { x: 10.0 }, ms(100));
        assert_eq!(sw.state(), SwitchState::Off);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::Off]);
        assert_eq!(sw.frame(SETTLED), resting_frame(Variant::Ios, SwitchState::Off));
    }

    #[test]
    fn drag_toward_current_state_still_resolves_and_notifies() {
        let (mut sw, rx) = starting(Variant::Material, SwitchState::Off);
        drag(&mut sw, 40.0, 15.0);
        assert_eq!(sw.state(), SwitchState::OffPending);
        sw.handle(TouchEvent::Up { x: 15.0 }, ms(100));
        assert_eq!(sw.state(), SwitchState::Off);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::Off]);
    }

    #[test]
    fn short_drag_changes_nothing() {
        let (mut sw, rx) = starting(Variant::Rounded, SwitchState::Off);
        drag(&mut sw, 10.0, 25.0);
        assert_eq!(sw.gesture_phase(), GesturePhase::Pressed);
        sw.handle(TouchEvent::Up { x: 25.0 }, ms(100));
        assert_eq!(sw.state(), SwitchState::Off);
        assert!(rx.try_recv().is_err());
        assert_eq!(sw.gesture_phase(), GesturePhase::Idle);
    }

    #[test]
    fn drag_back_within_threshold_returns_to_pressed() {
        let (mut sw, rx) = starting(Variant::Material, SwitchState::Off);
        drag(&mut sw, 5.0, 35.0);
        assert_eq!(sw.state(), SwitchState::OnPending);
        sw.handle(TouchEvent::Move { x: 10.0 }, ms(100));
        assert_eq!(sw.state(), SwitchState::Off);
        assert_eq!(sw.gesture_phase(), GesturePhase::Pressed);

        sw.handle(TouchEvent::Up { x: 10.0 }, ms(150));
        assert_eq!(sw.state(), SwitchState::Off);
        assert!(rx.try_recv().is_err());
        assert_eq!(sw.frame(SETTLED), resting_frame(Variant::Material, SwitchState::Off));
    }

    #[test]
    fn drag_across_both_thresholds_follows_finger() {
        let (mut sw, rx) = starting(Variant::Ios, SwitchState::Off);
        sw.handle(TouchEvent::Down { x: 26.0 }, ms(0));
        sw.handle(TouchEvent::Move { x: 50.0 }, ms(10));
        assert_eq!(sw.state(), SwitchState::OnPending);
        sw.handle(TouchEvent::Move { x: 2.0 }, ms(20));
        assert_eq!(sw.state(), SwitchState::OffPending);
        sw.handle(TouchEvent::Up { x: 2.0 }, ms(30));
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::Off]);
    }

    #[test]
    fn pending_previews_target_colours() {
        let (mut sw, _rx) = starting(Variant::Ios, SwitchState::Off);
        drag(&mut sw, 5.0, 40.0);
        let f = sw.frame(SETTLED);
        assert_eq!(f.track.color, IOS_ON_TRACK);
        assert_eq!(f.border.map(|b| b.color), Some(IOS_ON_TRACK));
        assert_eq!(f.knob.shape.rect.x, sw.layout().knob_x_on() - IOS_SQUEEZE);

        let (mut sw, _rx) = starting(Variant::Ios, SwitchState::On);
        drag(&mut sw, 40.0, 5.0);
        assert_eq!(sw.state(), SwitchState::OffPending);
        let f = sw.frame(SETTLED);
        assert_eq!(f.track.color, IOS_TRACK_BORDER);
        assert_eq!(f.border.map(|b| b.color), Some(IOS_OFF_TRACK));

        let red = Color::rgb8(255, 0, 0);
        sw.set_idle_track(red);
        assert_eq!(sw.frame(SETTLED).border.map(|b| b.color), Some(red));
    }

    #[test]
    fn custom_threshold_is_honoured() {
        let (mut sw, _rx) = starting(Variant::Material, SwitchState::Off);
        sw.set_gesture_config(GestureConfig {
            drag_threshold: 5.0,
            tap_slop: 2.0,
        });
        drag(&mut sw, 10.0, 17.0);
        assert_eq!(sw.state(), SwitchState::OnPending);
    }

    //  Cancellation

    #[test]
    fn cancel_reverts_without_notifying() {
        for variant in Variant::ALL {
            let (mut sw, rx) = starting(variant, SwitchState::On);
            drag(&mut sw, 40.0, 5.0);
            assert_eq!(sw.state(), SwitchState::OffPending);
            sw.handle(TouchEvent::Cancel, ms(100));
            assert_eq!(sw.state(), SwitchState::On);
            assert_eq!(sw.gesture_phase(), GesturePhase::Idle);
            assert!(rx.try_recv().is_err());
            assert_eq!(sw.frame(SETTLED), resting_frame(variant, SwitchState::On));
        }
    }

    #[test]
    fn cancel_while_pressed_restores_rest() {
        let (mut sw, rx) = starting(Variant::Ios, SwitchState::Off);
        sw.handle(TouchEvent::Down { x: 10.0 }, ms(0));
        sw.handle(TouchEvent::Cancel, ms(50));
        assert!(rx.try_recv().is_err());
        assert_eq!(sw.frame(SETTLED), resting_frame(Variant::Ios, SwitchState::Off));
    }

    #[test]
    fn events_without_touch_down_are_ignored() {
        let (mut sw, rx) = starting(Variant::Material, SwitchState::Off);
        sw.handle(TouchEvent::Move { x: 100.0 }, ms(0));
        sw.handle(TouchEvent::Up { x: 100.0 }, ms(10));
        sw.handle(TouchEvent::Cancel, ms(20));
        assert_eq!(sw.state(), SwitchState::Off);
        assert!(rx.try_recv().is_err());
        assert!(!sw.is_animating(ms(20)));
    }

    #[test]
    fn touch_down_mid_drag_restarts_from_committed() {
        let (mut sw, rx) = starting(Variant::Material, SwitchState::Off);
        drag(&mut sw, 5.0, 40.0);
        sw.handle(TouchEvent::Down { x: 40.0 }, ms(100));
        assert_eq!(sw.state(), SwitchState::Off);
        assert_eq!(sw.gesture_phase(), GesturePhase::Pressed);
        assert_eq!(sw.frame(SETTLED).knob.shape.rect.x, sw.layout().knob_x_off());
        sw.handle(TouchEvent::Up { x: 40.0 }, ms(150));
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SwitchState::On]);
    }

    //  Press feedback

    #[test]
    fn ios_press_squeezes_and_release_restores() {
        let (mut sw, _rx) = starting(Variant::Ios, SwitchState::On);
        let knob = sw.layout().knob_size;
        sw.handle(TouchEvent::Down { x: 30.0 }, ms(0));
        let pressed = sw.frame(ms(500));
        assert_eq!(pressed.knob.shape.rect.width, knob + IOS_SQUEEZE);
        assert_eq!(pressed.knob.shape.rect.x, sw.layout().knob_x_on() - IOS_SQUEEZE);

        sw.handle(TouchEvent::Move { x: 40.0 }, ms(500));
        sw.handle(TouchEvent::Up { x: 45.0 }, ms(600));
        let released = sw.frame(SETTLED);
        assert_eq!(released.knob.shape.rect.width, knob);
        assert_eq!(released, resting_frame(Variant::Ios, SwitchState::On));
    }

    #[test]
    fn ios_fill_collapses_while_pressed() {
        let (mut sw, _rx) = starting(Variant::Ios, SwitchState::Off);
        let full = sw.frame(Duration::ZERO).fill.unwrap().shape.rect.width;
        sw.handle(TouchEvent::Down { x: 10.0 }, ms(0));
        let collapsed = sw.frame(ms(400)).fill.unwrap().shape.rect.width;
        assert!(collapsed < full * 0.01);
    }

    #[test]
    fn material_halo_pops_and_collapses() {
        let (mut sw, _rx) = starting(Variant::Material, SwitchState::Off);
        assert!(sw.frame(Duration::ZERO).halo.is_none());
        sw.handle(TouchEvent::Down { x: 5.0 }, ms(0));
        let halo = sw.frame(ms(200)).halo.unwrap();
        let expected = sw.layout().halo_size.unwrap();
        assert_eq!(halo.shape.rect.width, expected);
        assert!(halo.color.approx_eq(MATERIAL_OFF_TRACK.fade(HALO_ALPHA)));

        sw.handle(TouchEvent::Move { x: 20.0 }, ms(200));
        sw.handle(TouchEvent::Up { x: 20.0 }, ms(200));
        assert!(sw.frame(ms(400)).halo.is_none());
    }

    #[test]
    fn halo_recolours_after_commit_animation() {
        let (mut sw, _rx) = starting(Variant::Material, SwitchState::Off);
        sw.tap(ms(0));
        assert_eq!(sw.layers.halo_color.value_at(ms(100)), MATERIAL_OFF_TRACK);
        assert_eq!(sw.layers.halo_color.value_at(ms(250)), MATERIAL_ON_TRACK);
    }

    #[test]
    fn new_gesture_supersedes_pending_completion() {
        let (mut sw, _rx) = starting(Variant::Material, SwitchState::Off);
        sw.tap(ms(0));
        sw.tap(ms(100));
        sw.handle(TouchEvent::Down { x: 5.0 }, ms(150));
        // Committed is off again, so the halo must not flip to the on colour
        // when the first tap's completion would have fired.
        assert_eq!(sw.layers.halo_color.value_at(ms(300)), MATERIAL_OFF_TRACK);
    }

    #[test]
    fn non_material_variants_have_no_halo() {
        for variant in [Variant::Ios, Variant::IosImage, Variant::Rounded] {
            let (mut sw, _rx) = starting(variant, SwitchState::Off);
            sw.handle(TouchEvent::Down { x: 5.0 }, ms(0));
            assert!(sw.frame(ms(200)).halo.is_none());
        }
    }

    //  Programmatic changes

    #[test]
    fn set_state_is_immediate_and_silent() {
        let (mut sw, rx) = starting(Variant::Rounded, SwitchState::Off);
        sw.set_state(SwitchState::On);
        assert_eq!(sw.state(), SwitchState::On);
        assert!(rx.try_recv().is_err());
        assert!(!sw.is_animating(Duration::ZERO));
        assert_eq!(
            sw.frame(Duration::ZERO),
            resting_frame(Variant::Rounded, SwitchState::On)
        );
    }

    #[test]
    fn palette_change_recolours_without_state_change() {
        let (mut sw, rx) = starting(Variant::Material, SwitchState::On);
        let red = Color::rgb8(255, 0, 0);
        let blue = Color::rgb8(0, 0, 255);
        sw.set_active_knob(red);
        sw.set_active_track(blue);
        sw.set_idle_knob(Color::BLACK);
        let f = sw.frame(Duration::ZERO);
        assert_eq!(f.knob.color, red);
        assert_eq!(f.track.color, blue);
        assert_eq!(sw.state(), SwitchState::On);
        assert_eq!(sw.palette().idle_knob, Color::BLACK);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn idle_track_recolours_off_material_switch() {
        let (mut sw, _rx) = starting(Variant::Material, SwitchState::Off);
        let green = Color::rgb8(0, 255, 0);
        sw.set_idle_track(green);
        assert_eq!(sw.frame(Duration::ZERO).track.color, green);
        assert_eq!(sw.state(), SwitchState::Off);
    }

    #[test]
    fn knob_clear_hides_knob() {
        let (mut sw, _rx) = starting(Variant::Ios, SwitchState::On);
        sw.set_knob_clear(true);
        assert_eq!(sw.frame(Duration::ZERO).knob.color, Color::TRANSPARENT);
        sw.tap(ms(0));
        assert_eq!(sw.frame(SETTLED).knob.color, Color::TRANSPARENT);
        sw.set_knob_clear(false);
        assert_eq!(sw.frame(SETTLED).knob.color, Color::WHITE);
    }

    #[test]
    fn corner_radius_only_for_rounded() {
        let mut rounded = Switch::with_defaults(Variant::Rounded);
        rounded.set_corner_radius(4.0);
        assert_eq!(rounded.frame(Duration::ZERO).track.shape.radius, 4.0);

        let mut ios = Switch::with_defaults(Variant::Ios);
        let before = ios.frame(Duration::ZERO);
        ios.set_corner_radius(4.0);
        assert_eq!(ios.frame(Duration::ZERO), before);
    }

    #[test]
    fn corner_radius_survives_resize() {
        let mut sw = Switch::new(
            Variant::Rounded,
            SwitchOptions {
                corner_radius: Some(20.0),
                ..Default::default()
            },
        );
        sw.set_size(Size::new(150.0, 100.0));
        assert_eq!(sw.layout().track_radius, 20.0);
        assert_eq!(sw.layout().knob_size, 90.0);
    }

    #[test]
    fn image_padding_recentres_image() {
        let mut sw = Switch::new(
            Variant::IosImage,
            SwitchOptions {
                image: Some(KnobImage::new("grape.png")),
                ..Default::default()
            },
        );
        sw.set_image_padding(4.0);
        let f = sw.frame(Duration::ZERO);
        let (img, path) = f.image.unwrap();
        assert_eq!(img.rect.width, sw.layout().knob_size - 8.0);
        assert!(same_center(&img, &f.knob.shape));
        assert_eq!(path, KnobImage::new("grape.png"));
    }

    #[test]
    fn image_follows_knob_during_drag() {
        let (mut sw, _rx) = recorded(
            Variant::IosImage,
            SwitchOptions {
                image: Some(KnobImage::new("grape.png")),
                ..Default::default()
            },
        );
        drag(&mut sw, 5.0, 40.0);
        let f = sw.frame(ms(150));
        let (img, _) = f.image.unwrap();
        assert!(same_center(&img, &f.knob.shape));
    }

    #[test]
    fn set_image_ignored_on_other_variants() {
        let mut sw = Switch::with_defaults(Variant::Ios);
        sw.set_image(KnobImage::new("grape.png"));
        assert!(sw.image().is_none());
    }

    #[test]
    fn set_variant_resets_palette_and_rebuilds() {
        let mut sw = Switch::new(
            Variant::Material,
            SwitchOptions {
                state: Some(SwitchState::On),
                colors: PaletteOverrides {
                    active_knob: Some(Color::BLACK),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        sw.set_variant(Variant::Ios);
        assert_eq!(sw.variant(), Variant::Ios);
        assert_eq!(sw.palette(), Palette::defaults(Variant::Ios));
        assert_eq!(sw.size(), Size::default_for(Variant::Material));
        assert_eq!(sw.state(), SwitchState::On);
        let f = sw.frame(Duration::ZERO);
        assert!(f.fill.is_some());
        assert_eq!(f.knob.shape.rect.x, sw.layout().knob_x_on());
    }
}
