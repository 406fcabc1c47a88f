use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ═══════════════════════════════════════════════════════════════════════════════
//  Driver Locations
// ═══════════════════════════════════════════════════════════════════════════════

pub const SYSFS_BASE: &str = "/sys/module/linuwu_sense/drivers/platform:acer-wmi/acer-wmi";
pub const ACPI_DIR: &str = "/sys/firmware/acpi";

const PLATFORM_PROFILE: &str = "platform_profile";
const PROFILE_CHOICES: &str = "platform_profile_choices";

/// Power profiles offered when the driver does not publish its own choices.
pub const DEFAULT_PROFILE_CHOICES: [&str; 3] = ["balanced", "performance", "power-saver"];

/// Root locations of the files the driver exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseConfig {
    pub sysfs_base: PathBuf,
    pub platform_profile: PathBuf,
    pub platform_profile_choices: PathBuf,
}

impl Default for SenseConfig {
    fn default() -> Self {
        Self {
            sysfs_base: PathBuf::from(SYSFS_BASE),
            platform_profile: Path::new(ACPI_DIR).join(PLATFORM_PROFILE),
            platform_profile_choices: Path::new(ACPI_DIR).join(PROFILE_CHOICES),
        }
    }
}

impl SenseConfig {
    pub fn with_sysfs_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.sysfs_base = base.into();
        self
    }

    /// Relocates both platform-profile files into `dir`.
    pub fn with_acpi_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.platform_profile = dir.join(PLATFORM_PROFILE);
        self.platform_profile_choices = dir.join(PROFILE_CHOICES);
        self
    }
}
