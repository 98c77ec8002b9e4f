//! Recognized engine options.
//!
//! Defaults come from [`crate::constants`]; a front-end may override any field
//! and should call [`EngineConfig::validate`] before handing the config to the
//! engine components.

use crate::constants::*;
use crate::device::DeviceClass;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub mobile_reveal_radius_px: f32,
    pub desktop_reveal_radius_px: f32,
    pub trigger_threshold: f32,
    pub throttle_interval_ms: f64,
    pub ambient_start_offset_sec: f64,
    pub ambient_volume: f64,
    pub autoplay_delay_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mobile_reveal_radius_px: MOBILE_REVEAL_RADIUS_PX,
            desktop_reveal_radius_px: DESKTOP_REVEAL_RADIUS_PX,
            trigger_threshold: REVEAL_TRIGGER_THRESHOLD,
            throttle_interval_ms: THROTTLE_INTERVAL_MS,
            ambient_start_offset_sec: AMBIENT_START_OFFSET_SEC,
            ambient_volume: AMBIENT_VOLUME,
            autoplay_delay_ms: AUTOPLAY_SETTLE_DELAY_MS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mobile_reveal_radius_px", self.mobile_reveal_radius_px as f64)?;
        positive("desktop_reveal_radius_px", self.desktop_reveal_radius_px as f64)?;
        positive("throttle_interval_ms", self.throttle_interval_ms)?;
        if !(self.trigger_threshold > 0.0 && self.trigger_threshold < 1.0) {
            return Err(ConfigError::TriggerThreshold(self.trigger_threshold));
        }
        if !self.ambient_start_offset_sec.is_finite() || self.ambient_start_offset_sec < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "ambient_start_offset_sec",
                value: self.ambient_start_offset_sec,
            });
        }
        if !(0.0..=1.0).contains(&self.ambient_volume) {
            return Err(ConfigError::Volume(self.ambient_volume));
        }
        Ok(())
    }

    /// Reveal radius for the given device class.
    pub fn reveal_radius(&self, device: DeviceClass) -> f32 {
        match device {
            DeviceClass::Touch => self.mobile_reveal_radius_px,
            DeviceClass::Pointer => self.desktop_reveal_radius_px,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_radius_and_bad_threshold() {
        let cfg = EngineConfig {
            desktop_reveal_radius_px: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive {
                name: "desktop_reveal_radius_px",
                ..
            })
        ));

        let cfg = EngineConfig {
            trigger_threshold: 1.0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::TriggerThreshold(1.0)));
    }

    #[test]
    fn radius_follows_device_class() {
        let cfg = EngineConfig::default();
        assert!(cfg.reveal_radius(DeviceClass::Touch) < cfg.reveal_radius(DeviceClass::Pointer));
    }
}
