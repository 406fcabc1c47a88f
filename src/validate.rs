//! Input checks that run before anything is encoded or written.

use crate::error::ValidationError;
use crate::types::{EffectMode, HexColor, ZoneColorSet, ZoneMode, ZONE_COUNT};

/// Accepts `RRGGBB` or `#RRGGBB` in either case and returns the lowercase form.
pub fn validate_color(input: &str) -> Result<HexColor, ValidationError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat(format!(
            "invalid color '{input}'; use RRGGBB or #RRGGBB"
        )));
    }

    Ok(HexColor::new_unchecked(digits.to_ascii_lowercase()))
}

pub fn validate_zone_colors<S: AsRef<str>>(
    mode: ZoneMode,
    inputs: &[S],
) -> Result<ZoneColorSet, ValidationError> {
    let expected = match mode {
        ZoneMode::Single => 1,
        ZoneMode::PerZone => ZONE_COUNT,
    };
    if inputs.len() != expected {
        return Err(ValidationError::InvalidFormat(format!(
            "expected {expected} color(s), got {}",
            inputs.len()
        )));
    }

    let colors = inputs
        .iter()
        .map(|c| validate_color(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    match <[HexColor; ZONE_COUNT]>::try_from(colors) {
        Ok(zones) => Ok(ZoneColorSet(zones)),
        Err(mut single) => match single.pop() {
            Some(color) => Ok(ZoneColorSet::uniform(color)),
            None => Err(ValidationError::InvalidFormat("no colors given".into())),
        },
    }
}

/// Inclusive range check. Every range the driver accepts fits in a byte.
pub fn validate_range(value: i64, min: u8, max: u8) -> Result<u8, ValidationError> {
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ValidationError::OutOfRange {
            value,
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(value as u8)
}

/// Looks the mode up by name, or by its numeric driver id (`0`-`7`).
pub fn validate_effect_mode(name: &str) -> Result<EffectMode, ValidationError> {
    let name = name.trim();
    if let Some(mode) = EffectMode::from_name(name) {
        return Ok(mode);
    }

    match name.parse::<i64>() {
        Ok(id) => {
            let id = validate_range(id, 0, 7)?;
            EffectMode::from_id(id).ok_or(ValidationError::UnknownMode {
                name: name.to_string(),
            })
        }
        Err(_) => Err(ValidationError::UnknownMode {
            name: name.to_string(),
        }),
    }
}

pub fn validate_profile(name: &str, choices: &[String]) -> Result<String, ValidationError> {
    if choices.iter().any(|c| c == name) {
        Ok(name.to_string())
    } else {
        Err(ValidationError::UnknownProfile {
            name: name.to_string(),
            choices: choices.to_vec(),
        })
    }
}
