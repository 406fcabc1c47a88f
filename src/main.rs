//! # linuwuctl — Linuwu-Sense control from the shell
//!
//! Sets keyboard RGB, back logo, fan speed, battery limiter and power profile via
//! the linuwu_sense kernel module.
//!
//! ## Usage
//!   sudo linuwuctl rgb per-zone ff0000 00ff00 0000ff ffffff -b 80
//!   sudo linuwuctl fan set 40 60
//!   linuwuctl status

mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Action, Cli};
use linuwu_sense::{ControlError, ControlService, FanTarget, SenseConfig, Status};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("linuwuctl: {err}");
            let code = err
                .downcast_ref::<ControlError>()
                .map_or(1, ControlError::exit_code);
            ExitCode::from(code)
        }
    }
}

// Logs go to stderr; stdout carries command output only.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let service = ControlService::system(config_from(cli));
    let action = cli.command.action().map_err(anyhow::Error::msg)?;

    match action {
        Action::Apply(request) if cli.dry_run => {
            print!("{}", service.encode(&request)?);
        }
        Action::Apply(request) => {
            service.apply(&request)?;
            println!("OK: {} updated", request.surface());
        }
        Action::Read(surface) => println!("{}", service.read(surface)?),
        Action::ListProfiles => println!("{}", service.profile_choices().join(" ")),
        Action::Status { json } => {
            let status = service.status();
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }
    Ok(())
}

fn config_from(cli: &Cli) -> SenseConfig {
    let mut config = SenseConfig::default();
    if let Some(base) = &cli.sysfs_base {
        config = config.with_sysfs_base(base);
    }
    if let Some(dir) = &cli.acpi_dir {
        config = config.with_acpi_dir(dir);
    }
    config
}

fn print_status(status: &Status) {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".into());

    println!("Keyboard zones   {}", show(&status.keyboard_zones));
    println!("Keyboard effect  {}", show(&status.keyboard_effect));
    println!(
        "Fan speed        {}",
        match status.fan {
            Some(FanTarget::Auto) => "Auto".to_string(),
            Some(FanTarget::Manual { cpu, gpu }) => format!("CPU {cpu}% / GPU {gpu}%"),
            None => "N/A".into(),
        }
    );
    println!("Power profile    {}", show(&status.power_profile));
    println!("  choices        {}", status.profile_choices.join(" "));
    println!("Back logo        {}", show(&status.back_logo));
    println!(
        "Battery limiter  {}",
        match status.battery_limiter {
            Some(true) => "80% Limit",
            Some(false) => "Disabled",
            None => "N/A",
        }
    );
}
