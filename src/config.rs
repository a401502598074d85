//! Application configuration.
//!
//! The demo host loads a JSON file from
//! `$XDG_CONFIG_HOME/sstswitch/config.json`.  Every key is optional: a
//! minimal `{}` file is valid, and a missing `"switches"` list gives the
//! built-in demo set (one of each variant).
//!
//! # Example
//!
//! ```json
//! {
//!   "gestures": { "drag_threshold": 20.0, "tap_slop": 10.0 },
//!   "switches": [
//!     { "variant": "material", "size": [70, 50], "state": "on",
//!       "colors": { "active_knob": "#ffa500" } },
//!     { "variant": "ios-image", "image": "grape.png", "image_padding": 2.0 },
//!     { "variant": "rounded", "size": [150, 100], "corner_radius": 20.0 }
//!   ]
//! }
//! ```

use crate::color::{Color, PaletteOverrides};
use crate::geometry::Size;
use crate::gesture::GestureConfig;
use crate::switch::{Switch, SwitchOptions};
use crate::types::{KnobImage, SwitchState, Variant};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture recognition settings shared by every switch.
    pub gestures: GestureConfig,

    /// Switches shown by the demo host, top to bottom.
    pub switches: Vec<SwitchEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gestures: GestureConfig::default(),
            switches: demo_switches(),
        }
    }
}

/// One switch as described in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchEntry {
    pub variant: Variant,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub state: Option<SwitchState>,
    #[serde(default)]
    pub colors: PaletteOverrides,
    #[serde(default)]
    pub image: Option<KnobImage>,
    /// Padding between the knob edge and its image.
    #[serde(default)]
    pub image_padding: Option<f64>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    #[serde(default)]
    pub knob_clear: bool,
}

impl SwitchEntry {
    /// An entry with every option at the variant's default.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            size: None,
            state: None,
            colors: PaletteOverrides::default(),
            image: None,
            image_padding: None,
            corner_radius: None,
            knob_clear: false,
        }
    }

    /// Construction options for [`Switch::new`].
    pub fn options(&self) -> SwitchOptions {
        SwitchOptions {
            size: self.size,
            state: self.state,
            colors: self.colors,
            image: self.image.clone(),
            corner_radius: self.corner_radius,
        }
    }

    /// Build the switch this entry describes, using `gestures` for input.
    pub fn build(&self, gestures: &GestureConfig) -> Switch {
        let mut switch = Switch::new(self.variant, self.options());
        switch.set_gesture_config(gestures.clone());
        if let Some(padding) = self.image_padding {
            switch.set_image_padding(padding);
        }
        if self.knob_clear {
            switch.set_knob_clear(true);
        }
        switch
    }
}

/// The demo screen: a custom-coloured material switch, a default one, an
/// iOS switch that starts on, an image switch and a large rounded switch.
pub fn demo_switches() -> Vec<SwitchEntry> {
    let orange = Color {
        r: 1.0,
        g: 0.5,
        b: 0.0,
        a: 1.0,
    };
    let blue = Color::rgb8(0, 0, 255);

    vec![
        SwitchEntry {
            size: Some(Size::new(50.0, 50.0)),
            colors: PaletteOverrides {
                active_knob: Some(orange),
                active_track: Some(orange.with_alpha(0.5)),
                idle_knob: Some(blue),
                idle_track: Some(blue.with_alpha(0.5)),
            },
            ..SwitchEntry::new(Variant::Material)
        },
        SwitchEntry {
            size: Some(Size::new(70.0, 50.0)),
            ..SwitchEntry::new(Variant::Material)
        },
        SwitchEntry {
            state: Some(SwitchState::On),
            ..SwitchEntry::new(Variant::Ios)
        },
        SwitchEntry {
            colors: PaletteOverrides {
                idle_knob: Some(Color::WHITE),
                idle_track: Some(Color::TRANSPARENT),
                ..Default::default()
            },
            image: Some(KnobImage::new("grape.png")),
            ..SwitchEntry::new(Variant::IosImage)
        },
        SwitchEntry {
            size: Some(Size::new(150.0, 100.0)),
            corner_radius: Some(20.0),
            ..SwitchEntry::new(Variant::Rounded)
        },
    ]
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e.0)))
    }

    /// Parse configuration from a JSON string.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError(e.to_string()))
    }

    /// Build every configured switch.
    pub fn build_switches(&self) -> Vec<Switch> {
        self.switches
            .iter()
            .map(|entry| entry.build(&self.gestures))
            .collect()
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use std::time::Duration;

    #[test]
    fn deserialize_full_config() {
        let json = r##"{
            "gestures": { "drag_threshold": 12.0, "tap_slop": 4.0 },
            "switches": [
                {
                    "variant": "material",
                    "size": [70, 50],
                    "state": "on",
                    "colors": { "active_knob": "#ffa500", "idle_track": { "r": 0, "g": 0, "b": 255, "a": 0.5 } }
                },
                {
                    "variant": "ios-image",
                    "image": "grape.png",
                    "image_padding": 2.0,
                    "knob_clear": true
                },
                { "variant": "Rounded", "corner_radius": 20.0 }
            ]
        }"##;
        let cfg = Config::parse(json).unwrap();
        assert_eq!(cfg.gestures.drag_threshold, 12.0);
        assert_eq!(cfg.gestures.tap_slop, 4.0);
        assert_eq!(cfg.switches.len(), 3);

        let m = &cfg.switches[0];
        assert_eq!(m.variant, Variant::Material);
        assert_eq!(m.size, Some(Size::new(70.0, 50.0)));
        assert_eq!(m.state, Some(SwitchState::On));
        assert_eq!(m.colors.active_knob, Some(Color::rgb8(255, 165, 0)));
        assert_eq!(m.colors.idle_track, Some(Color::rgba8(0, 0, 255, 0.5)));
        assert_eq!(m.colors.active_track, None);

        let img = &cfg.switches[1];
        assert_eq!(img.image, Some(KnobImage::new("grape.png")));
        assert_eq!(img.image_padding, Some(2.0));
        assert!(img.knob_clear);

        assert_eq!(cfg.switches[2].variant, Variant::Rounded);
        assert_eq!(cfg.switches[2].corner_radius, Some(20.0));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg = Config::parse("{}").unwrap();
        let gd = GestureConfig::default();
        assert_eq!(cfg.gestures.drag_threshold, gd.drag_threshold);
        assert_eq!(cfg.gestures.tap_slop, gd.tap_slop);
        assert_eq!(cfg.switches, demo_switches());
    }

    #[test]
    fn explicit_empty_switch_list_is_kept() {
        let cfg = Config::parse(r#"{ "switches": [] }"#).unwrap();
        assert!(cfg.switches.is_empty());
    }

    #[test]
    fn deserialize_partial_gestures() {
        let cfg = Config::parse(r#"{ "gestures": { "tap_slop": 3.0 } }"#).unwrap();
        assert_eq!(cfg.gestures.tap_slop, 3.0);
        assert_eq!(cfg.gestures.drag_threshold, GestureConfig::default().drag_threshold);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "gestures": {}, "future_section": { "key": 42 } }"#;
        let _cfg = Config::parse(json).unwrap();
    }

    #[test]
    fn switch_without_variant_is_rejected() {
        let err = Config::parse(r#"{ "switches": [ { "state": "on" } ] }"#).unwrap_err();
        assert!(err.to_string().starts_with("config error:"));
    }

    #[test]
    fn bad_colour_is_rejected() {
        let json = r##"{ "switches": [ { "variant": "ios", "colors": { "active_knob": "#12" } } ] }"##;
        assert!(Config::parse(json).is_err());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Config::load(Path::new("/nonexistent/sstswitch/config.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sstswitch/config.json"));
    }

    #[test]
    fn demo_set_has_one_of_each_variant() {
        let variants: Vec<Variant> = demo_switches().iter().map(|s| s.variant).collect();
        assert_eq!(
            variants,
            vec![
                Variant::Material,
                Variant::Material,
                Variant::Ios,
                Variant::IosImage,
                Variant::Rounded
            ]
        );
    }

    #[test]
    fn build_applies_every_option() {
        let entry = SwitchEntry {
            image: Some(KnobImage::new("grape.png")),
            image_padding: Some(3.0),
            knob_clear: true,
            state: Some(SwitchState::On),
            ..SwitchEntry::new(Variant::IosImage)
        };
        let gestures = GestureConfig {
            drag_threshold: 8.0,
            tap_slop: 2.0,
        };
        let sw = entry.build(&gestures);
        assert_eq!(sw.state(), SwitchState::On);
        assert_eq!(sw.image_padding(), 3.0);
        assert!(sw.knob_clear());
        assert_eq!(sw.gesture_config().drag_threshold, 8.0);
        assert_eq!(sw.frame(Duration::ZERO).knob.color, Color::TRANSPARENT);
    }

    #[test]
    fn build_switches_uses_demo_palette() {
        let switches = Config::default().build_switches();
        assert_eq!(switches.len(), 5);
        assert_eq!(switches[1].palette(), Palette::defaults(Variant::Material));
        assert_eq!(switches[2].state(), SwitchState::On);
        assert_eq!(switches[3].palette().idle_track, Color::TRANSPARENT);
        assert_eq!(switches[4].layout().track_radius, 20.0);
    }
}
