//! Text payloads understood by the driver's sysfs files.
//!
//! Encoders take already-validated values and never fail. Every payload is a
//! single comma-separated line terminated by `\n`.

use crate::types::{EffectParams, FanTarget, HexColor, LogoParams, ZoneColorSet};

/// `c1,c2,c3,c4,brightness` for `per_zone_mode`.
pub fn encode_keyboard_static(zones: &ZoneColorSet, brightness: u8) -> String {
    let mut fields: Vec<String> = zones.zones().iter().map(|c| c.to_string()).collect();
    fields.push(brightness.to_string());
    line(fields.as_slice())
}

/// `mode,speed,brightness,direction,r,g,b` for `four_zone_mode`.
pub fn encode_keyboard_effect(params: &EffectParams) -> String {
    let (r, g, b) = params.color.clone().unwrap_or_else(HexColor::black).rgb();
    line(&[
        params.mode.id(),
        params.speed,
        params.brightness,
        params.direction,
        r,
        g,
        b,
    ])
}

/// Writes the target as given; `Manual { cpu: 0, .. }` is not rewritten to auto here.
pub fn encode_fan(target: FanTarget) -> String {
    match target {
        FanTarget::Auto => "0,0\n".to_string(),
        FanTarget::Manual { cpu, gpu } => line(&[cpu, gpu]),
    }
}

pub fn encode_power_profile(choice: &str) -> String {
    format!("{choice}\n")
}

/// `rrggbb,brightness,enable` for `back_logo/color`.
pub fn encode_back_logo(params: &LogoParams) -> String {
    format!(
        "{},{},{}\n",
        params.color,
        params.brightness,
        u8::from(params.enabled)
    )
}

pub fn encode_battery_limiter(enabled: bool) -> String {
    format!("{}\n", u8::from(enabled))
}

pub fn decode_choices(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(String::from).collect()
}

/// Reads `fan_speed` contents back. The driver reports auto as `0,0` (some
/// firmware just `0`).
pub fn decode_fan(raw: &str) -> Option<FanTarget> {
    let raw = raw.trim();
    if raw == "0" {
        return Some(FanTarget::Auto);
    }

    let (cpu, gpu) = raw.split_once(',')?;
    let cpu: u8 = cpu.trim().parse().ok()?;
    let gpu: u8 = gpu.trim().parse().ok()?;
    if cpu > 100 || gpu > 100 {
        return None;
    }

    Some(match (cpu, gpu) {
        (0, 0) => FanTarget::Auto,
        (cpu, gpu) => FanTarget::Manual { cpu, gpu },
    })
}

fn line<T: ToString>(fields: &[T]) -> String {
    let mut out = fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    out
}
