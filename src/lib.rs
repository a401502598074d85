//! **sstswitch**: an animated, gesture-driven toggle switch.
//!
//! A [`Switch`](switch::Switch) comes in four skins ([`types::Variant`]):
//! a material switch with a press halo, an iOS switch whose knob squeezes
//! while held, the same iOS switch with an image in its knob, and a
//! rounded-rectangle switch with a configurable corner radius.  Users flip
//! it by tapping or by dragging the knob past a threshold; every committed
//! change is reported to a [`traits::ToggleListener`].
//!
//! # Architecture
//!
//! The control is a headless model.  It never talks to a windowing
//! system directly:
//!
//! * Input arrives as [`gesture::TouchEvent`]s stamped with the host's
//!   clock.
//! * Output is a [`frame::SwitchFrame`] sampled at any instant, which
//!   paints itself through the [`traits::Canvas`] trait.
//!
//! Concrete hosts live in [`host`]: a GTK4 demo window (feature
//! `demo-gtk`) and a headless JSON-lines driver.

pub mod animation;
pub mod color;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod switch;
pub mod traits;
pub mod types;
