//! Eased, interruptible property tweens.
//!
//! Every animated visual property of a switch is an [`Animated<T>`].
//! Starting a new tween always begins from the value currently on screen,
//! so a gesture that arrives mid-animation simply takes over the property
//! (last writer wins).  There is no separate completion callback: work that
//! should happen "when the animation finishes" is scheduled as a delayed,
//! zero-length [`Transition`] on the affected property and is discarded
//! automatically if anything writes that property first.
//!
//! Time is a [`Duration`] measured from any fixed epoch the host chooses.

use crate::color::Color;
use std::time::Duration;

/// Types that can be blended between two values.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: f64, t: f64) -> f64 {
        self + (to - self) * t
    }
}

impl Lerp for Color {
    fn lerp(self, to: Color, t: f64) -> Color {
        Color::lerp(self, to, t)
    }
}

/// Timing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    Ease,
    /// `cubic-bezier(0.42, 0, 0.58, 1.0)`
    EaseInOut,
    /// Arbitrary CSS-style cubic bezier with control points `(x1, y1)`,
    /// `(x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Map normalised time `u` in `[0, 1]` to eased progress.
    pub fn apply(self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Easing::Linear => u,
            Easing::Ease => cubic_bezier(u, 0.25, 0.10, 0.25, 1.00),
            Easing::EaseInOut => cubic_bezier(u, 0.42, 0.0, 0.58, 1.00),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(u, x1, y1, x2, y2),
        }
    }
}

/// Coefficients of one axis of a cubic bezier anchored at 0 and 1, in
/// Horner form `((a·t + b)·t + c)·t`.
#[derive(Clone, Copy)]
struct Axis {
    a: f64,
    b: f64,
    c: f64,
}

impl Axis {
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn sample(self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn slope(self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Find `t` with `sample(t) == x`.  Newton steps first, bisection when
    /// the slope flattens or the estimate leaves `[0, 1]`.
    fn solve(self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample(t) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let d = self.slope(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..32 {
            let v = self.sample(t);
            if (v - x).abs() < 1e-7 {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        t
    }
}

/// Evaluate a CSS `cubic-bezier(x1, y1, x2, y2)` timing function at `u`.
pub fn cubic_bezier(u: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = Axis::new(x1, x2).solve(u);
    Axis::new(y1, y2).sample(t)
}

/// How a property moves to a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Transition {
    /// Ease-in-out over `secs` seconds, the curve every switch animation uses.
    pub fn ease_in_out(secs: f64) -> Self {
        Self {
            duration: Duration::from_secs_f64(secs),
            delay: Duration::ZERO,
            easing: Easing::EaseInOut,
        }
    }

    /// Jump to the new value after `secs` seconds.
    pub fn after(secs: f64) -> Self {
        Self {
            duration: Duration::ZERO,
            delay: Duration::from_secs_f64(secs),
            easing: Easing::Linear,
        }
    }
}

/// A value that may be moving between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated<T: Lerp> {
    from: T,
    to: T,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp> Animated<T> {
    /// A value at rest.
    pub fn new(value: T) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    /// Jump to `value` immediately, discarding any tween in flight.
    pub fn set(&mut self, value: T) {
        *self = Self::new(value);
    }

    /// Start moving toward `target` from whatever is rendered at `now`.
    pub fn animate_to(&mut self, target: T, now: Duration, transition: Transition) {
        let from = self.value_at(now);
        *self = Self {
            from,
            to: target,
            start: now + transition.delay,
            duration: transition.duration,
            easing: transition.easing,
        };
    }

    /// The rendered value at `now`.
    pub fn value_at(&self, now: Duration) -> T {
        if now < self.start {
            return self.from;
        }
        if self.duration.is_zero() {
            return self.to;
        }
        let u = (now - self.start).as_secs_f64() / self.duration.as_secs_f64();
        if u >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(u))
    }

    /// The value this property is heading for.
    pub fn target(&self) -> T {
        self.to
    }

    /// Whether the value is still changing at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        now < self.start + self.duration
    }
}
