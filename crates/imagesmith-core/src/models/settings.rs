//! Transform settings sent alongside an uploaded image.
//!
//! The settings arrive as a JSON string in the `settings` form field. Every
//! key is optional and gates one pipeline step; absent keys skip the step.
//! Numbers are accepted either as JSON numbers or as numeric strings, since
//! browser forms often serialize them as text.
//!
//! Values are only coerced once their step's gate is open: `width` needs
//! `height` (and the reverse), `crop` needs a truthy `cropEnabled`. A key
//! that is present with a `null` value is still present, so an open gate
//! over a `null` number is an error rather than a skipped step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::AppError;

/// A settings value that could not be turned into the number a step needs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct SettingsError {
    pub field: &'static str,
    pub reason: String,
}

impl SettingsError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        AppError::InvalidSettings(err.to_string())
    }
}

/// Mirror axis for the flip step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipMode {
    /// Mirror left/right
    Horizontal,
    /// Mirror top/bottom
    Vertical,
    /// Mirror on both axes at once
    Both,
}

impl FromStr for FlipMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(FlipMode::Horizontal),
            "vertical" => Ok(FlipMode::Vertical),
            "both" => Ok(FlipMode::Both),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FlipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlipMode::Horizontal => "horizontal",
            FlipMode::Vertical => "vertical",
            FlipMode::Both => "both",
        };
        f.write_str(name)
    }
}

/// Crop rectangle in pixels, before clamping to the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSettings {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformSettings {
    /// Raw value, coerced by [`TransformSettings::resize_target`]
    #[serde(default, deserialize_with = "present")]
    pub width: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub height: Option<Value>,
    /// Degrees; positive values rotate clockwise
    #[serde(default, deserialize_with = "opt_float")]
    pub rotation: Option<f64>,
    /// Unrecognised values (e.g. `"none"`) disable the step
    #[serde(default, deserialize_with = "opt_flip")]
    pub flip: Option<FlipMode>,
    #[serde(default, deserialize_with = "truthy")]
    pub crop_enabled: bool,
    /// Raw value, coerced by [`TransformSettings::crop_rect`]
    #[serde(default, deserialize_with = "present")]
    pub crop: Option<Value>,
}

impl TransformSettings {
    /// Parse the raw `settings` form value.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(AppError::from)
    }

    /// Resize target, present only when both `width` and `height` are set
    pub fn resize_target(&self) -> Result<Option<(i64, i64)>, SettingsError> {
        match (&self.width, &self.height) {
            (Some(width), Some(height)) => Ok(Some((
                coerce_int("width", width)?,
                coerce_int("height", height)?,
            ))),
            _ => Ok(None),
        }
    }

    /// Crop rectangle, present only when cropping is enabled and all four
    /// fields are set
    pub fn crop_rect(&self) -> Result<Option<CropSettings>, SettingsError> {
        if !self.crop_enabled {
            return Ok(None);
        }
        let crop = match &self.crop {
            None => return Ok(None),
            Some(Value::Object(crop)) => crop,
            Some(other) => {
                return Err(SettingsError::new(
                    "crop",
                    format!("expected an object, got {}", other),
                ))
            }
        };

        if !["x", "y", "width", "height"]
            .iter()
            .all(|key| crop.contains_key(*key))
        {
            return Ok(None);
        }

        let field = |key: &str, name: &'static str| coerce_int(name, &crop[key]);
        Ok(Some(CropSettings {
            x: field("x", "crop.x")?,
            y: field("y", "crop.y")?,
            width: field("width", "crop.width")?,
            height: field("height", "crop.height")?,
        }))
    }

    /// True when no step would run
    pub fn is_identity(&self) -> bool {
        (self.width.is_none() || self.height.is_none())
            && self.rotation.is_none()
            && self.flip.is_none()
            && !(self.crop_enabled && self.crop.is_some())
    }
}

fn coerce_int(field: &'static str, value: &Value) -> Result<i64, SettingsError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() => Ok(f.trunc() as i64),
                _ => Err(SettingsError::new(
                    field,
                    format!("cannot convert {} to an integer", n),
                )),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| SettingsError::new(field, format!("invalid integer literal: {:?}", s))),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(SettingsError::new(
            field,
            format!("expected an integer, got {}", other),
        )),
    }
}

fn coerce_float(field: &'static str, value: &Value) -> Result<f64, SettingsError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| SettingsError::new(field, format!("cannot convert {} to a number", n))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            SettingsError::new(field, format!("could not convert string to number: {:?}", s))
        }),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(SettingsError::new(
            field,
            format!("expected a number, got {}", other),
        )),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Keep a present key as `Some`, including an explicit `null`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Rotation has no gate besides its own presence, so it is coerced up front
fn opt_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_float("rotation", &value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

fn opt_flip<'de, D>(deserializer: D) -> Result<Option<FlipMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok()))
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .is_some_and(is_truthy))
}
