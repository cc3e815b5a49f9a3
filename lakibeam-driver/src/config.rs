use crate::constants::{
    DEFAULT_CLEAR_INTERVAL_SECONDS, DEFAULT_LISTEN_PORT, DEFAULT_SCALE, DEFAULT_SENSOR_PORT,
    MAX_SCALE, OFFSET_RANGE, ROTATION_RANGE,
};
use crate::error::LakiBeamError;
use crossbeam_utils::sync::ShardedLock;
use lakibeam_data::TransformParams;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

/// Driver configuration.
///
/// ```toml
/// listen_port = 2346
/// clear_interval = 0.05
///
/// [transform]
/// rotation_degree = 90.0
/// scale = 0.04
/// flip_x = true
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LakiBeamConfig {
    /// Local UDP port the sensor streams to.
    pub listen_port: u16,
    /// Source port the sensor is expected to send from. Only used for logging.
    pub sensor_port_hint: u16,
    /// Seconds between two frame clears.
    pub clear_interval: f64,
    /// Keys missing from the `[transform]` table keep the values of
    /// `sensor_transform()`.
    #[serde(deserialize_with = "deserialize_transform")]
    pub transform: TransformParams,
}

/// Transform applied when nothing is configured: mm scaled down to the
/// sensor tool's screen space.
pub fn sensor_transform() -> TransformParams {
    TransformParams {
        scale: DEFAULT_SCALE,
        ..TransformParams::default()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TransformTable {
    rotation_degree: Option<f64>,
    scale: Option<f64>,
    x_offset: Option<f64>,
    y_offset: Option<f64>,
    flip_x: Option<bool>,
    flip_y: Option<bool>,
    angular_step_degree: Option<f64>,
}

fn deserialize_transform<'de, D>(deserializer: D) -> Result<TransformParams, D::Error>
where
    D: Deserializer<'de>,
{
    let table = TransformTable::deserialize(deserializer)?;
    let base = sensor_transform();
    Ok(TransformParams {
        rotation_degree: table.rotation_degree.unwrap_or(base.rotation_degree),
        scale: table.scale.unwrap_or(base.scale),
        x_offset: table.x_offset.unwrap_or(base.x_offset),
        y_offset: table.y_offset.unwrap_or(base.y_offset),
        flip_x: table.flip_x.unwrap_or(base.flip_x),
        flip_y: table.flip_y.unwrap_or(base.flip_y),
        angular_step_degree: table.angular_step_degree.unwrap_or(base.angular_step_degree),
    })
}

impl Default for LakiBeamConfig {
    fn default() -> Self {
        LakiBeamConfig {
            listen_port: DEFAULT_LISTEN_PORT,
            sensor_port_hint: DEFAULT_SENSOR_PORT,
            clear_interval: DEFAULT_CLEAR_INTERVAL_SECONDS,
            transform: sensor_transform(),
        }
    }
}

impl LakiBeamConfig {
    pub fn from_toml_str(content: &str) -> Result<LakiBeamConfig, LakiBeamError> {
        let config: LakiBeamConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<LakiBeamConfig, LakiBeamError> {
        let content = std::fs::read_to_string(path)?;
        LakiBeamConfig::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), LakiBeamError> {
        validate_clear_interval(self.clear_interval)?;
        validate_transform(&self.transform)
    }
}

fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> Result<(), LakiBeamError> {
    if !(min..=max).contains(&value) {
        return Err(LakiBeamError::InvalidConfig(format!(
            "{name} must be in [{min}, {max}]. Actually {value}."
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<(), LakiBeamError> {
    if !(value > 0. && value.is_finite()) {
        return Err(LakiBeamError::InvalidConfig(format!(
            "{name} must be a positive number. Actually {value}."
        )));
    }
    Ok(())
}

pub(crate) fn validate_transform(params: &TransformParams) -> Result<(), LakiBeamError> {
    check_range("rotation_degree", params.rotation_degree, ROTATION_RANGE)?;
    check_positive("scale", params.scale)?;
    check_range("scale", params.scale, (0., MAX_SCALE))?;
    check_range("x_offset", params.x_offset, OFFSET_RANGE)?;
    check_range("y_offset", params.y_offset, OFFSET_RANGE)?;
    check_positive("angular_step_degree", params.angular_step_degree)
}

fn validate_clear_interval(seconds: f64) -> Result<(), LakiBeamError> {
    check_positive("clear_interval", seconds)?;
    if Duration::try_from_secs_f64(seconds).is_err() {
        return Err(LakiBeamError::InvalidConfig(format!(
            "clear_interval is too large. Actually {seconds}."
        )));
    }
    Ok(())
}

/// Transform parameters shared between the host and the drain cycle.
///
/// Readers take a copy per cycle, so a setter never waits for decoding.
#[derive(Clone, Debug, Default)]
pub struct SharedTransform {
    params: Arc<ShardedLock<TransformParams>>,
}

impl SharedTransform {
    pub fn new(params: TransformParams) -> SharedTransform {
        SharedTransform {
            params: Arc::new(ShardedLock::new(params)),
        }
    }

    pub fn get(&self) -> TransformParams {
        self.params
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, params: TransformParams) -> Result<(), LakiBeamError> {
        validate_transform(&params)?;
        *self.params.write().unwrap_or_else(PoisonError::into_inner) = params;
        Ok(())
    }

    pub fn set_transform(
        &self,
        x_offset: f64,
        y_offset: f64,
        rotation_degree: f64,
        scale: f64,
    ) -> Result<(), LakiBeamError> {
        let params = TransformParams {
            x_offset,
            y_offset,
            rotation_degree,
            scale,
            ..self.get()
        };
        self.replace(params)
    }

    pub fn set_flip(&self, flip_x: bool, flip_y: bool) {
        let mut params = self.params.write().unwrap_or_else(PoisonError::into_inner);
        params.flip_x = flip_x;
        params.flip_y = flip_y;
    }
}

/// Timer period in seconds, adjustable while the timer runs.
#[derive(Clone, Debug)]
pub struct SharedInterval {
    seconds_bits: Arc<AtomicU64>,
}

impl SharedInterval {
    pub fn new(seconds: f64) -> Result<SharedInterval, LakiBeamError> {
        validate_clear_interval(seconds)?;
        Ok(SharedInterval {
            seconds_bits: Arc::new(AtomicU64::new(seconds.to_bits())),
        })
    }

    pub fn seconds(&self) -> f64 {
        f64::from_bits(self.seconds_bits.load(Ordering::Relaxed))
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds())
    }

    pub fn set(&self, seconds: f64) -> Result<(), LakiBeamError> {
        validate_clear_interval(seconds)?;
        self.seconds_bits.store(seconds.to_bits(), Ordering::Relaxed);
        Ok(())
    }
}
