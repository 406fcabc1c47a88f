//! Resolve → validate → encode → write, one request at a time.
//!
//! The service holds no device state between calls. Two writers racing on the
//! same surface is last-write-wins; callers that allow concurrent actions must
//! serialize them per surface.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::{SenseConfig, DEFAULT_PROFILE_CHOICES};
use crate::error::{ControlError, Result};
use crate::paths::PathResolver;
use crate::sysfs::{Sysfs, SysfsIo};
use crate::types::{
    ControlSurface, EffectParams, FanRequest, FanTarget, LogoParams, Request,
};
use crate::validate::{
    validate_color, validate_effect_mode, validate_profile, validate_range, validate_zone_colors,
};

/// Best-effort snapshot of every surface. `None` means the file is missing or
/// could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Status {
    pub keyboard_zones: Option<String>,
    pub keyboard_effect: Option<String>,
    pub fan: Option<FanTarget>,
    pub power_profile: Option<String>,
    pub profile_choices: Vec<String>,
    pub back_logo: Option<String>,
    pub battery_limiter: Option<bool>,
}

pub struct ControlService<W = Sysfs> {
    resolver: PathResolver,
    io: W,
}

impl ControlService<Sysfs> {
    pub fn system(config: SenseConfig) -> Self {
        Self::new(config, Sysfs)
    }
}

impl<W: SysfsIo> ControlService<W> {
    pub fn new(config: SenseConfig, io: W) -> Self {
        Self {
            resolver: PathResolver::new(config),
            io,
        }
    }

    /// Writes one request to its control file.
    ///
    /// Path and input problems are reported before the file is touched. A failed
    /// write is returned as-is and never retried.
    pub fn apply(&self, request: &Request) -> Result<()> {
        let surface = request.surface();
        let path = self.resolver.resolve(surface)?;
        let payload = self.encode(request)?;

        debug!(%surface, path = %path.display(), payload = payload.trim_end(), "writing");
        self.io
            .write_text(&path, &payload)
            .map_err(|e| ControlError::from_write(surface, path.clone(), e))?;

        info!(%surface, payload = payload.trim_end(), "applied");
        Ok(())
    }

    /// Validates and encodes without touching the control file.
    pub fn encode(&self, request: &Request) -> Result<String> {
        let payload = match request {
            Request::KeyboardStatic {
                mode,
                colors,
                brightness,
            } => {
                let zones = validate_zone_colors(*mode, colors.as_slice())
                    .map_err(|e| ControlError::invalid("colors", e))?;
                let brightness = percent("brightness", *brightness)?;
                codec::encode_keyboard_static(&zones, brightness)
            }
            Request::KeyboardEffect {
                mode,
                speed,
                brightness,
                direction,
                color,
            } => {
                let params = EffectParams {
                    mode: validate_effect_mode(mode)
                        .map_err(|e| ControlError::invalid("mode", e))?,
                    speed: validate_range(*speed, 0, 9)
                        .map_err(|e| ControlError::invalid("speed", e))?,
                    brightness: percent("brightness", *brightness)?,
                    direction: validate_range(*direction, 1, 2)
                        .map_err(|e| ControlError::invalid("direction", e))?,
                    color: color
                        .as_deref()
                        .map(validate_color)
                        .transpose()
                        .map_err(|e| ControlError::invalid("color", e))?,
                };
                codec::encode_keyboard_effect(&params)
            }
            Request::Fan(fan) => codec::encode_fan(fan_target(*fan)?),
            Request::PowerProfile(name) => {
                let choices = self.profile_choices();
                let choice = validate_profile(name.trim(), &choices)
                    .map_err(|e| ControlError::invalid("profile", e))?;
                codec::encode_power_profile(&choice)
            }
            Request::BackLogo {
                color,
                brightness,
                enabled,
            } => {
                let params = LogoParams {
                    color: validate_color(color).map_err(|e| ControlError::invalid("color", e))?,
                    brightness: percent("brightness", *brightness)?,
                    enabled: *enabled,
                };
                codec::encode_back_logo(&params)
            }
            Request::BatteryLimiter(enabled) => codec::encode_battery_limiter(*enabled),
        };
        Ok(payload)
    }

    /// Current contents of a surface's control file, trimmed.
    pub fn read(&self, surface: ControlSurface) -> Result<String> {
        let path = self.resolver.resolve(surface)?;
        self.read_file(surface, &path)
    }

    /// Profiles the firmware offers, or [`DEFAULT_PROFILE_CHOICES`] when it
    /// publishes none.
    pub fn profile_choices(&self) -> Vec<String> {
        let path = self.resolver.choices_path();
        let choices = match self.io.read_text(path) {
            Ok(raw) => codec::decode_choices(&raw),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "profile choices unreadable");
                Vec::new()
            }
        };

        if choices.is_empty() {
            debug!("using default profile choices");
            return DEFAULT_PROFILE_CHOICES.iter().map(|c| c.to_string()).collect();
        }
        choices
    }

    pub fn status(&self) -> Status {
        let read = |surface| self.read(surface).ok();

        Status {
            keyboard_zones: read(ControlSurface::KeyboardStaticZones),
            keyboard_effect: read(ControlSurface::KeyboardEffect),
            fan: read(ControlSurface::FanSpeed).and_then(|raw| codec::decode_fan(&raw)),
            power_profile: read(ControlSurface::PowerProfile),
            profile_choices: self.profile_choices(),
            back_logo: read(ControlSurface::BackLogo),
            battery_limiter: read(ControlSurface::BatteryLimiter).and_then(|raw| {
                match raw.as_str() {
                    "1" => Some(true),
                    "0" => Some(false),
                    _ => None,
                }
            }),
        }
    }

    fn read_file(&self, surface: ControlSurface, path: &Path) -> Result<String> {
        self.io
            .read_text(path)
            .map(|s| s.trim().to_string())
            .map_err(|e| ControlError::from_read(surface, path.to_path_buf(), e))
    }
}

fn percent(field: &'static str, value: i64) -> Result<u8> {
    validate_range(value, 0, 100).map_err(|e| ControlError::invalid(field, e))
}

// A manual 0 is passed through: the driver cannot tell it apart from auto for that fan.
fn fan_target(request: FanRequest) -> Result<FanTarget> {
    match request {
        FanRequest::Auto => Ok(FanTarget::Auto),
        FanRequest::Manual { cpu, gpu } => {
            let cpu = percent("cpu", cpu)?;
            let gpu = percent("gpu", gpu)?;
            if cpu == 0 || gpu == 0 {
                warn!(cpu, gpu, "a fan set to 0% may be treated as automatic control by the driver");
            }
            Ok(FanTarget::Manual { cpu, gpu })
        }
    }
}
