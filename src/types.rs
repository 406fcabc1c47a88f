use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CONTROL SURFACES
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlSurface {
    KeyboardStaticZones,
    KeyboardEffect,
    FanSpeed,
    PowerProfile,
    BackLogo,
    BatteryLimiter,
}

impl fmt::Display for ControlSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::KeyboardStaticZones => "keyboard per-zone colors",
            Self::KeyboardEffect => "keyboard effect",
            Self::FanSpeed => "fan speed",
            Self::PowerProfile => "power profile",
            Self::BackLogo => "back logo",
            Self::BatteryLimiter => "battery limiter",
        };
        f.write_str(name)
    }
}

// ==========================================
// COLORS
// ==========================================

/// Six lowercase hex digits, without a leading `#`.
///
/// Only [`crate::validate::validate_color`] builds one, so the text is always
/// well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HexColor(String);

impl HexColor {
    pub(crate) fn new_unchecked(normalized: String) -> Self {
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    pub fn black() -> Self {
        Self("000000".to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneMode {
    /// One color replicated across all four zones.
    Single,
    /// One color per zone, left to right.
    PerZone,
}

pub const ZONE_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneColorSet(pub [HexColor; ZONE_COUNT]);

impl ZoneColorSet {
    pub fn uniform(color: HexColor) -> Self {
        Self([color.clone(), color.clone(), color.clone(), color])
    }

    pub fn zones(&self) -> &[HexColor; ZONE_COUNT] {
        &self.0
    }
}

// ==========================================
// KEYBOARD EFFECTS
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectMode {
    Static,
    Breathing,
    Neon,
    Wave,
    Shifting,
    Zoom,
    Meteor,
    Twinkling,
}

impl EffectMode {
    pub const ALL: [EffectMode; 8] = [
        Self::Static,
        Self::Breathing,
        Self::Neon,
        Self::Wave,
        Self::Shifting,
        Self::Zoom,
        Self::Meteor,
        Self::Twinkling,
    ];

    pub fn id(self) -> u8 {
        match self {
            Self::Static => 0,
            Self::Breathing => 1,
            Self::Neon => 2,
            Self::Wave => 3,
            Self::Shifting => 4,
            Self::Zoom => 5,
            Self::Meteor => 6,
            Self::Twinkling => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Breathing => "breathing",
            Self::Neon => "neon",
            Self::Wave => "wave",
            Self::Shifting => "shifting",
            Self::Zoom => "zoom",
            Self::Meteor => "meteor",
            Self::Twinkling => "twinkling",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectParams {
    pub mode: EffectMode,
    pub speed: u8,
    pub brightness: u8,
    pub direction: u8,
    pub color: Option<HexColor>,
}

// ==========================================
// FANS, LOGO
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FanTarget {
    Auto,
    Manual { cpu: u8, gpu: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoParams {
    pub color: HexColor,
    pub brightness: u8,
    pub enabled: bool,
}

// ==========================================
// REQUESTS (caller -> ControlService)
// ==========================================

/// Raw fan intent before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanRequest {
    Auto,
    Manual { cpu: i64, gpu: i64 },
}

/// One user action against one control surface, still unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    KeyboardStatic {
        mode: ZoneMode,
        colors: Vec<String>,
        brightness: i64,
    },
    KeyboardEffect {
        mode: String,
        speed: i64,
        brightness: i64,
        direction: i64,
        color: Option<String>,
    },
    Fan(FanRequest),
    PowerProfile(String),
    BackLogo {
        color: String,
        brightness: i64,
        enabled: bool,
    },
    BatteryLimiter(bool),
}

impl Request {
    pub fn surface(&self) -> ControlSurface {
        match self {
            Self::KeyboardStatic { .. } => ControlSurface::KeyboardStaticZones,
            Self::KeyboardEffect { .. } => ControlSurface::KeyboardEffect,
            Self::Fan(_) => ControlSurface::FanSpeed,
            Self::PowerProfile(_) => ControlSurface::PowerProfile,
            Self::BackLogo { .. } => ControlSurface::BackLogo,
            Self::BatteryLimiter(_) => ControlSurface::BatteryLimiter,
        }
    }
}
