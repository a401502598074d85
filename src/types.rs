//! Variant and state vocabulary shared by every part of sstswitch.
//!
//! [`Variant`] picks a skin (geometry ratios plus default palette) and
//! [`SwitchState`] describes where the knob is, or where the user is
//! currently dragging it.
//!
//! Both types parse leniently from config strings (e.g. `"ios-image"`,
//! `"IosImg"`, `"off_pending"`).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Visual skin of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    /// Thin track with an overhanging round knob and a press halo.
    Material,
    /// Capsule track with an inset knob that squeezes while pressed.
    Ios,
    /// Same as [`Ios`](Variant::Ios) with an image inset in the knob.
    IosImage,
    /// Full-height track and knob with a configurable corner radius.
    Rounded,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Variant; 4] = [
        Variant::Material,
        Variant::Ios,
        Variant::IosImage,
        Variant::Rounded,
    ];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Material => "Material Switch",
            Variant::Ios => "iOS Switch",
            Variant::IosImage => "iOS Switch /w Image",
            Variant::Rounded => "Rounded Switch",
        }
    }

    /// Whether this variant uses the iOS knob/fill behaviour.
    pub fn is_ios(self) -> bool {
        matches!(self, Variant::Ios | Variant::IosImage)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Material => write!(f, "material"),
            Variant::Ios => write!(f, "ios"),
            Variant::IosImage => write!(f, "ios-image"),
            Variant::Rounded => write!(f, "rounded"),
        }
    }
}

/// Lowercase and drop separators so `"ios-image"`, `"IosImage"` and
/// `"ios_image"` compare equal.
fn normalise(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Parse a variant name (case-insensitive).
pub fn parse_variant(s: &str) -> Option<Variant> {
    match normalise(s).as_str() {
        "material" => Some(Variant::Material),
        "ios" => Some(Variant::Ios),
        "iosimage" | "iosimg" | "ioswithimage" => Some(Variant::IosImage),
        "rounded" => Some(Variant::Rounded),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_variant(&s).ok_or_else(|| DeError::custom(format!("invalid variant: {:?}", s)))
    }
}

/// Logical state of a switch.
///
/// `OnPending` / `OffPending` only exist while a drag is in progress: the
/// user has pulled the knob past the drag threshold toward that target but
/// has not lifted their finger yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SwitchState {
    On,
    #[default]
    Off,
    OnPending,
    OffPending,
}

impl SwitchState {
    pub fn label(self) -> &'static str {
        match self {
            SwitchState::On => "On State",
            SwitchState::Off => "Off State",
            SwitchState::OnPending => "Suspended On State",
            SwitchState::OffPending => "Suspended Off State",
        }
    }

    /// The state this one settles into on release.
    pub fn committed(self) -> SwitchState {
        match self {
            SwitchState::On | SwitchState::OnPending => SwitchState::On,
            SwitchState::Off | SwitchState::OffPending => SwitchState::Off,
        }
    }

    /// `true` for `On` and `OnPending`: the knob sits (or is heading) right.
    pub fn is_on(self) -> bool {
        self.committed() == SwitchState::On
    }

    pub fn is_pending(self) -> bool {
        matches!(self, SwitchState::OnPending | SwitchState::OffPending)
    }

    /// The opposite committed state.
    pub fn toggled(self) -> SwitchState {
        if self.is_on() {
            SwitchState::Off
        } else {
            SwitchState::On
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchState::On => write!(f, "on"),
            SwitchState::Off => write!(f, "off"),
            SwitchState::OnPending => write!(f, "on-pending"),
            SwitchState::OffPending => write!(f, "off-pending"),
        }
    }
}

/// Parse a state name (case-insensitive; `"on"`, `"off-pending"`, ...).
pub fn parse_state(s: &str) -> Option<SwitchState> {
    match normalise(s).as_str() {
        "on" | "true" => Some(SwitchState::On),
        "off" | "false" => Some(SwitchState::Off),
        "onpending" | "onsuspend" => Some(SwitchState::OnPending),
        "offpending" | "offsuspend" => Some(SwitchState::OffPending),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for SwitchState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_state(&s).ok_or_else(|| DeError::custom(format!("invalid switch state: {:?}", s)))
    }
}

/// Image shown inside the knob of an [`Variant::IosImage`] switch.
///
/// The control never decodes it; it only positions it.  Backends resolve
/// `path` however they like (and may cache the decoded pixels).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnobImage {
    pub path: PathBuf,
}

impl KnobImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The empty image used when an image switch is built without one.
    pub fn is_empty(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}
