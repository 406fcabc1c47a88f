//! Locates the control file for each surface on the running machine.
//!
//! Nothing is cached: modules can be loaded or unloaded while the process runs,
//! so every call probes again.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::SenseConfig;
use crate::error::NotFound;
use crate::types::ControlSurface;

const KEYBOARD_DIR: &str = "four_zoned_kb";
const PER_ZONE_FILE: &str = "per_zone_mode";
const EFFECT_FILE: &str = "four_zone_mode";
const LOGO_DIR: &str = "back_logo";
const LOGO_FILE: &str = "color";
const FAN_FILE: &str = "fan_speed";
const BATTERY_LIMIT_FILE: &str = "battery_limiter";

/// Vendor directories in probe order; Predator models win when both exist.
pub const SENSE_DIRS: [&str; 2] = ["predator_sense", "nitro_sense"];

#[derive(Debug, Clone)]
pub struct PathResolver {
    config: SenseConfig,
}

impl PathResolver {
    pub fn new(config: SenseConfig) -> Self {
        Self { config }
    }

    pub fn resolve(&self, surface: ControlSurface) -> Result<PathBuf, NotFound> {
        let resolved = match surface {
            ControlSurface::KeyboardStaticZones => self.in_dir(surface, KEYBOARD_DIR, PER_ZONE_FILE),
            ControlSurface::KeyboardEffect => self.in_dir(surface, KEYBOARD_DIR, EFFECT_FILE),
            ControlSurface::BackLogo => self.in_dir(surface, LOGO_DIR, LOGO_FILE),
            ControlSurface::FanSpeed => self.in_sense_dir(surface, FAN_FILE),
            ControlSurface::BatteryLimiter => self.in_sense_dir(surface, BATTERY_LIMIT_FILE),
            ControlSurface::PowerProfile => {
                existing(surface, self.config.platform_profile.clone())
            }
        };

        match &resolved {
            Ok(path) => debug!(%surface, path = %path.display(), "resolved control file"),
            Err(err) => debug!(%surface, path = %err.path.display(), "control file missing"),
        }
        resolved
    }

    /// The choices file is optional, so it is never probed.
    pub fn choices_path(&self) -> &Path {
        &self.config.platform_profile_choices
    }

    // The file itself is not checked: the driver creates the whole directory at once.
    fn in_dir(&self, surface: ControlSurface, dir: &str, file: &str) -> Result<PathBuf, NotFound> {
        let dir = self.config.sysfs_base.join(dir);
        if dir.is_dir() {
            Ok(dir.join(file))
        } else {
            Err(NotFound { surface, path: dir })
        }
    }

    fn in_sense_dir(&self, surface: ControlSurface, file: &str) -> Result<PathBuf, NotFound> {
        let candidates: Vec<PathBuf> = SENSE_DIRS
            .iter()
            .map(|dir| self.config.sysfs_base.join(dir).join(file))
            .collect();

        match candidates.iter().find(|p| p.exists()) {
            Some(found) => Ok(found.clone()),
            None => Err(NotFound {
                surface,
                path: candidates.into_iter().next().unwrap_or_default(),
            }),
        }
    }
}

fn existing(surface: ControlSurface, path: PathBuf) -> Result<PathBuf, NotFound> {
    if path.exists() {
        Ok(path)
    } else {
        Err(NotFound { surface, path })
    }
}
