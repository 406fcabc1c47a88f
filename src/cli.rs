//! Command-line front end for `linuwuctl`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use linuwu_sense::{FanRequest, Request, ZoneMode};

#[derive(Parser, Debug)]
#[command(name = "linuwuctl")]
#[command(version)]
#[command(about = "Control Linuwu-Sense features: keyboard RGB, power profile, fan speed")]
#[command(long_about = "Control Linuwu-Sense features: keyboard RGB, power profile, fan speed

Writes go to sysfs files created by the linuwu_sense kernel module and
usually need root.

EXAMPLES:
    sudo linuwuctl rgb per-zone 00aaff -b 80
    sudo linuwuctl rgb effect wave -s 3 -d 1
    sudo linuwuctl fan set 40 60
    sudo linuwuctl fan auto
    sudo linuwuctl power set performance
    linuwuctl status --json

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Override the -v log level")]
pub struct Cli {
    /// Print the payload that would be written instead of writing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Driver sysfs directory (default: the linuwu_sense acer-wmi node)
    #[arg(long, value_name = "PATH", global = true)]
    pub sysfs_base: Option<PathBuf>,

    /// Directory holding platform_profile and platform_profile_choices
    #[arg(long, value_name = "PATH", global = true)]
    pub acpi_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keyboard RGB controls (four-zone)
    #[command(subcommand)]
    Rgb(RgbCommands),

    /// Fan control
    #[command(subcommand)]
    Fan(FanCommands),

    /// Get, list or set the ACPI platform profile
    #[command(subcommand)]
    Power(PowerCommands),

    /// Back logo / lightbar controls
    #[command(subcommand)]
    Logo(LogoCommands),

    /// Battery charge limiter (80%)
    #[command(subcommand)]
    Battery(BatteryCommands),

    /// Show the current state of every available control
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// RGB
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum RgbCommands {
    /// Set static colors: 1 color for all zones, or 4 colors left to right
    PerZone {
        /// RRGGBB colors (1 or 4)
        #[arg(required = true, num_args = 1..)]
        colors: Vec<String>,

        /// Brightness 0-100
        #[arg(short, long, default_value_t = 100, allow_negative_numbers = true)]
        brightness: i64,
    },

    /// Set a four_zone_mode effect
    Effect(EffectArgs),
}

#[derive(Args, Debug)]
pub struct EffectArgs {
    /// Mode name or id: static, breathing, neon, wave, shifting, zoom, meteor, twinkling (0-7)
    pub mode: String,

    /// Speed 0-9
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub speed: i64,

    /// Brightness 0-100
    #[arg(short, long, default_value_t = 100, allow_negative_numbers = true)]
    pub brightness: i64,

    /// Direction 1-2
    #[arg(short, long, default_value_t = 2, allow_negative_numbers = true)]
    pub direction: i64,

    /// Color RRGGBB or #RRGGBB, for modes that use one
    #[arg(short, long)]
    pub color: Option<String>,
}

// ============================================================================
// Fan
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum FanCommands {
    /// Set both fans to automatic control
    Auto,

    /// Set fan percentages: CPU [GPU], each 0-100 or 'auto'
    Set {
        /// One or two values; a single value applies to both fans
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// CPU fan value 0-100 or 'auto'
        #[arg(long, allow_negative_numbers = true)]
        cpu: Option<String>,

        /// GPU fan value 0-100 or 'auto'
        #[arg(long, allow_negative_numbers = true)]
        gpu: Option<String>,
    },
}

// ============================================================================
// Power, logo, battery
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum PowerCommands {
    /// Print the current profile
    Get,
    /// List supported profiles
    List,
    /// Switch to PROFILE
    Set { profile: String },
}

#[derive(Subcommand, Debug)]
pub enum LogoCommands {
    /// Print current color,brightness,enable
    Get,
    /// Set color and optional brightness / on-off state
    Set {
        /// RRGGBB or #RRGGBB
        color: String,

        /// Brightness 0-100
        #[arg(short, long, default_value_t = 100, allow_negative_numbers = true)]
        brightness: i64,

        /// Enable the logo (default)
        #[arg(long, conflicts_with = "off")]
        on: bool,

        /// Disable the logo
        #[arg(long)]
        off: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum BatteryCommands {
    /// Print the limiter state (0/1)
    Get,
    /// Limit charging to 80%
    On,
    /// Charge to 100%
    Off,
    /// Set the limiter from on/off, 1/0, true/false or yes/no
    Set { state: String },
}

/// What a parsed command asks the core to do.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Apply(Request),
    Read(linuwu_sense::ControlSurface),
    ListProfiles,
    Status { json: bool },
}

impl Commands {
    pub fn action(&self) -> Result<Action, String> {
        use linuwu_sense::ControlSurface as S;

        let action = match self {
            Self::Rgb(RgbCommands::PerZone { colors, brightness }) => {
                let mode = if colors.len() == 1 {
                    ZoneMode::Single
                } else {
                    ZoneMode::PerZone
                };
                Action::Apply(Request::KeyboardStatic {
                    mode,
                    colors: colors.clone(),
                    brightness: *brightness,
                })
            }
            Self::Rgb(RgbCommands::Effect(args)) => Action::Apply(Request::KeyboardEffect {
                mode: args.mode.clone(),
                speed: args.speed,
                brightness: args.brightness,
                direction: args.direction,
                color: args.color.clone(),
            }),
            Self::Fan(FanCommands::Auto) => Action::Apply(Request::Fan(FanRequest::Auto)),
            Self::Fan(FanCommands::Set { values, cpu, gpu }) => {
                Action::Apply(Request::Fan(fan_request(values, cpu.as_deref(), gpu.as_deref())?))
            }
            Self::Power(PowerCommands::Get) => Action::Read(S::PowerProfile),
            Self::Power(PowerCommands::List) => Action::ListProfiles,
            Self::Power(PowerCommands::Set { profile }) => {
                Action::Apply(Request::PowerProfile(profile.clone()))
            }
            Self::Logo(LogoCommands::Get) => Action::Read(S::BackLogo),
            Self::Logo(LogoCommands::Set {
                color,
                brightness,
                on,
                off,
            }) => Action::Apply(Request::BackLogo {
                color: color.clone(),
                brightness: *brightness,
                enabled: *on || !*off,
            }),
            Self::Battery(BatteryCommands::Get) => Action::Read(S::BatteryLimiter),
            Self::Battery(BatteryCommands::On) => Action::Apply(Request::BatteryLimiter(true)),
            Self::Battery(BatteryCommands::Off) => Action::Apply(Request::BatteryLimiter(false)),
            Self::Battery(BatteryCommands::Set { state }) => {
                Action::Apply(Request::BatteryLimiter(parse_on_off(state)?))
            }
            Self::Status { json } => Action::Status { json: *json },
        };
        Ok(action)
    }
}

/// `auto` / `a` means 0 for that fan; anything else must be an integer.
/// Range checks happen in the core.
fn parse_fan_value(value: &str) -> Result<i64, String> {
    let value = value.trim().to_ascii_lowercase();
    if value == "auto" || value == "a" {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| format!("expected a fan percentage or 'auto', got '{value}'"))
}

fn fan_request(values: &[String], cpu: Option<&str>, gpu: Option<&str>) -> Result<FanRequest, String> {
    let (cpu, gpu) = match values {
        [both] => (Some(both.as_str()), Some(both.as_str())),
        [c, g] => (Some(c.as_str()), Some(g.as_str())),
        [] => (cpu, gpu),
        _ => return Err("provide one or two percentage values".into()),
    };

    let (cpu, gpu) = match (cpu, gpu) {
        (None, None) => return Err("specify fan percentages via values or --cpu/--gpu".into()),
        (Some(c), None) => (c, c),
        (None, Some(g)) => (g, g),
        (Some(c), Some(g)) => (c, g),
    };

    let cpu = parse_fan_value(cpu)?;
    let gpu = parse_fan_value(gpu)?;
    if cpu == 0 && gpu == 0 {
        return Ok(FanRequest::Auto);
    }
    Ok(FanRequest::Manual { cpu, gpu })
}

fn parse_on_off(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" | "y" | "enable" | "enabled" => Ok(true),
        "0" | "off" | "false" | "no" | "n" | "disable" | "disabled" => Ok(false),
        other => Err(format!(
            "expected on/off (or 1/0, true/false, yes/no), got '{other}'"
        )),
    }
}
