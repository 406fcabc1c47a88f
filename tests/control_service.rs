use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use linuwu_sense::{
    ControlError, ControlService, ControlSurface, FanRequest, FanTarget, Request, SenseConfig,
    Sysfs, SysfsIo, ValidationError, ZoneMode,
};
use tempfile::TempDir;

/// A driver tree laid out under a temporary directory.
struct FakeDriver {
    root: TempDir,
}

impl FakeDriver {
    fn empty() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    fn predator() -> Self {
        let driver = Self::empty();
        driver.file("acer-wmi/four_zoned_kb/per_zone_mode", "");
        driver.file("acer-wmi/four_zoned_kb/four_zone_mode", "");
        driver.file("acer-wmi/predator_sense/fan_speed", "0,0\n");
        driver.file("acer-wmi/predator_sense/battery_limiter", "1\n");
        driver.file("acer-wmi/back_logo/color", "00ff00,100,1\n");
        driver.file("acpi/platform_profile", "balanced\n");
        driver.file(
            "acpi/platform_profile_choices",
            "quiet balanced balanced-performance performance\n",
        );
        driver
    }

    fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    fn config(&self) -> SenseConfig {
        SenseConfig::default()
            .with_sysfs_base(self.path("acer-wmi"))
            .with_acpi_dir(self.path("acpi"))
    }

    fn service(&self) -> ControlService {
        ControlService::system(self.config())
    }
}

/// Records writes and optionally fails reads or writes with a fixed error kind.
#[derive(Default)]
struct RecordingIo {
    fail_with: Option<io::ErrorKind>,
    fail_reads: Option<io::ErrorKind>,
    writes: RefCell<Vec<(PathBuf, String)>>,
}

impl RecordingIo {
    fn failing(kind: io::ErrorKind) -> Self {
        Self {
            fail_with: Some(kind),
            ..Self::default()
        }
    }

    fn failing_reads(kind: io::ErrorKind) -> Self {
        Self {
            fail_reads: Some(kind),
            ..Self::default()
        }
    }
}

impl SysfsIo for RecordingIo {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        if let Some(kind) = self.fail_reads {
            return Err(io::Error::new(kind, "injected"));
        }
        Sysfs.read_text(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(kind) = self.fail_with {
            return Err(io::Error::new(kind, "injected"));
        }
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}

fn static_request(colors: &[&str], brightness: i64) -> Request {
    Request::KeyboardStatic {
        mode: if colors.len() == 1 {
            ZoneMode::Single
        } else {
            ZoneMode::PerZone
        },
        colors: colors.iter().map(|c| c.to_string()).collect(),
        brightness,
    }
}

#[test]
fn static_colors_reach_per_zone_file() {
    let driver = FakeDriver::predator();
    driver
        .service()
        .apply(&static_request(&["#00AAFF"], 100))
        .unwrap();
    assert_eq!(
        driver.read("acer-wmi/four_zoned_kb/per_zone_mode"),
        "00aaff,00aaff,00aaff,00aaff,100\n"
    );
}

#[test]
fn effect_reaches_four_zone_file() {
    let driver = FakeDriver::predator();
    driver
        .service()
        .apply(&Request::KeyboardEffect {
            mode: "wave".into(),
            speed: 1,
            brightness: 100,
            direction: 2,
            color: Some("ff00aa".into()),
        })
        .unwrap();
    assert_eq!(
        driver.read("acer-wmi/four_zoned_kb/four_zone_mode"),
        "3,1,100,2,255,0,170\n"
    );
}

#[test]
fn fan_auto_and_manual() {
    let driver = FakeDriver::predator();
    let service = driver.service();

    service
        .apply(&Request::Fan(FanRequest::Manual { cpu: 40, gpu: 60 }))
        .unwrap();
    assert_eq!(driver.read("acer-wmi/predator_sense/fan_speed"), "40,60\n");

    service.apply(&Request::Fan(FanRequest::Auto)).unwrap();
    assert_eq!(driver.read("acer-wmi/predator_sense/fan_speed"), "0,0\n");
}

#[test]
fn fan_falls_back_to_nitro() {
    let driver = FakeDriver::empty();
    driver.file("acer-wmi/nitro_sense/fan_speed", "0,0\n");

    driver
        .service()
        .apply(&Request::Fan(FanRequest::Manual { cpu: 25, gpu: 30 }))
        .unwrap();
    assert_eq!(driver.read("acer-wmi/nitro_sense/fan_speed"), "25,30\n");
}

#[test]
fn missing_driver_is_device_not_present() {
    let driver = FakeDriver::empty();
    let err = driver
        .service()
        .apply(&Request::Fan(FanRequest::Auto))
        .unwrap_err();
    match err {
        ControlError::DeviceNotPresent { surface, path } => {
            assert_eq!(surface, ControlSurface::FanSpeed);
            assert_eq!(path, driver.path("acer-wmi/predator_sense/fan_speed"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn invalid_input_never_writes() {
    let driver = FakeDriver::predator();
    let io = RecordingIo::default();
    let service = ControlService::new(driver.config(), &io);

    let err = service
        .apply(&static_request(&["00aaff", "112233"], 100))
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::InvalidInput {
            field: "colors",
            kind: ValidationError::InvalidFormat(_)
        }
    ));

    let err = service
        .apply(&Request::KeyboardEffect {
            mode: "rainbow".into(),
            speed: 1,
            brightness: 100,
            direction: 2,
            color: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::InvalidInput {
            field: "mode",
            kind: ValidationError::UnknownMode { .. }
        }
    ));

    assert!(io.writes.borrow().is_empty());
}

#[test]
fn permission_denied_is_distinct_from_write_failure() {
    let driver = FakeDriver::predator();
    let io = RecordingIo::failing(io::ErrorKind::PermissionDenied);
    let service = ControlService::new(driver.config(), &io);

    let err = service
        .apply(&Request::Fan(FanRequest::Manual { cpu: 40, gpu: 60 }))
        .unwrap_err();
    assert!(matches!(err, ControlError::PermissionDenied { .. }));
    assert!(err.to_string().contains("sudo"));
}

#[test]
fn other_write_errors_are_write_failed() {
    let driver = FakeDriver::predator();
    let io = RecordingIo::failing(io::ErrorKind::InvalidInput);
    let service = ControlService::new(driver.config(), &io);

    let err = service
        .apply(&Request::BatteryLimiter(false))
        .unwrap_err();
    match err {
        ControlError::WriteFailed { path, source } => {
            assert_eq!(path, driver.path("acer-wmi/predator_sense/battery_limiter"));
            assert_eq!(source.to_string(), "injected");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn vanished_file_on_write_is_device_not_present() {
    let driver = FakeDriver::predator();
    let io = RecordingIo::failing(io::ErrorKind::NotFound);
    let service = ControlService::new(driver.config(), &io);

    let err = service
        .apply(&Request::Fan(FanRequest::Manual { cpu: 40, gpu: 60 }))
        .unwrap_err();
    match err {
        ControlError::DeviceNotPresent { surface, path } => {
            assert_eq!(surface, ControlSurface::FanSpeed);
            assert_eq!(path, driver.path("acer-wmi/predator_sense/fan_speed"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn keyboard_dir_without_zone_file_is_device_not_present() {
    let driver = FakeDriver::empty();
    driver.file("acer-wmi/four_zoned_kb/four_zone_mode", "");

    let err = driver
        .service()
        .apply(&static_request(&["00aaff"], 100))
        .unwrap_err();
    match err {
        ControlError::DeviceNotPresent { surface, path } => {
            assert_eq!(surface, ControlSurface::KeyboardStaticZones);
            assert_eq!(path, driver.path("acer-wmi/four_zoned_kb/per_zone_mode"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(!driver.path("acer-wmi/four_zoned_kb/per_zone_mode").exists());
}

#[test]
fn read_errors_are_classified() {
    let driver = FakeDriver::predator();

    let io = RecordingIo::failing_reads(io::ErrorKind::PermissionDenied);
    let err = ControlService::new(driver.config(), &io)
        .read(ControlSurface::PowerProfile)
        .unwrap_err();
    assert!(matches!(err, ControlError::PermissionDenied { .. }));

    let io = RecordingIo::failing_reads(io::ErrorKind::NotFound);
    let err = ControlService::new(driver.config(), &io)
        .read(ControlSurface::BatteryLimiter)
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::DeviceNotPresent {
            surface: ControlSurface::BatteryLimiter,
            ..
        }
    ));

    let io = RecordingIo::failing_reads(io::ErrorKind::InvalidData);
    let err = ControlService::new(driver.config(), &io)
        .read(ControlSurface::BackLogo)
        .unwrap_err();
    match err {
        ControlError::ReadFailed { path, source } => {
            assert_eq!(path, driver.path("acer-wmi/back_logo/color"));
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn same_request_encodes_identically() {
    let driver = FakeDriver::predator();
    let io = RecordingIo::default();
    let service = ControlService::new(driver.config(), &io);
    let request = static_request(&["123456", "abcdef", "ABCDEF", "000000"], 7);

    service.apply(&request).unwrap();
    service.apply(&request).unwrap();

    let writes = io.writes.borrow();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0], writes[1]);
    assert_eq!(writes[0].1, "123456,abcdef,abcdef,000000,7\n");
}

#[test]
fn power_profile_checked_against_driver_choices() {
    let driver = FakeDriver::predator();
    let service = driver.service();

    service
        .apply(&Request::PowerProfile("balanced-performance".into()))
        .unwrap();
    assert_eq!(driver.read("acpi/platform_profile"), "balanced-performance\n");

    let err = service
        .apply(&Request::PowerProfile("power-saver".into()))
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::InvalidInput {
            field: "profile",
            kind: ValidationError::UnknownProfile { .. }
        }
    ));
}

#[test]
fn profile_choices_fall_back_when_absent_or_empty() {
    let driver = FakeDriver::empty();
    driver.file("acpi/platform_profile", "balanced\n");
    let service = driver.service();

    assert_eq!(
        service.profile_choices(),
        vec!["balanced", "performance", "power-saver"]
    );
    service
        .apply(&Request::PowerProfile("power-saver".into()))
        .unwrap();
    assert_eq!(driver.read("acpi/platform_profile"), "power-saver\n");

    driver.file("acpi/platform_profile_choices", "\n");
    assert_eq!(
        service.profile_choices(),
        vec!["balanced", "performance", "power-saver"]
    );
}

#[test]
fn back_logo_and_battery_limiter() {
    let driver = FakeDriver::predator();
    let service = driver.service();

    service
        .apply(&Request::BackLogo {
            color: "#FF8800".into(),
            brightness: 40,
            enabled: true,
        })
        .unwrap();
    assert_eq!(driver.read("acer-wmi/back_logo/color"), "ff8800,40,1\n");

    service.apply(&Request::BatteryLimiter(false)).unwrap();
    assert_eq!(driver.read("acer-wmi/predator_sense/battery_limiter"), "0\n");
}

#[test]
fn read_returns_trimmed_contents() {
    let driver = FakeDriver::predator();
    let service = driver.service();
    assert_eq!(service.read(ControlSurface::PowerProfile).unwrap(), "balanced");
    assert_eq!(service.read(ControlSurface::BackLogo).unwrap(), "00ff00,100,1");
}

#[test]
fn status_snapshot() {
    let driver = FakeDriver::predator();
    driver.file("acer-wmi/predator_sense/fan_speed", "35,50\n");

    let status = driver.service().status();
    assert_eq!(status.fan, Some(FanTarget::Manual { cpu: 35, gpu: 50 }));
    assert_eq!(status.power_profile.as_deref(), Some("balanced"));
    assert_eq!(status.battery_limiter, Some(true));
    assert_eq!(status.back_logo.as_deref(), Some("00ff00,100,1"));
    assert_eq!(status.profile_choices.len(), 4);

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["power_profile"], "balanced");
}

#[test]
fn status_on_machine_without_driver() {
    let status = FakeDriver::empty().service().status();
    assert_eq!(status.keyboard_zones, None);
    assert_eq!(status.keyboard_effect, None);
    assert_eq!(status.fan, None);
    assert_eq!(status.power_profile, None);
    assert_eq!(status.back_logo, None);
    assert_eq!(status.battery_limiter, None);
    assert_eq!(status.profile_choices.len(), 3);
}
