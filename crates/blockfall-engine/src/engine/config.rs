use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pace at which the session wants to receive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum TickSpeed {
    /// Regular gravity.
    Normal,
    /// Short grace period after the piece lands, before it locks.
    Sliding,
    /// Soft drop while the down key is held.
    Fast,
    /// Paused; the interval is so long that ticks effectively stop.
    Paused,
}

/// Tick intervals for each [`TickSpeed`], in milliseconds.
///
/// Missing fields fall back to the defaults, so a host may override only
/// what it cares about:
///
/// ```
/// use blockfall_engine::{SessionConfig, TickSpeed};
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "normal_ms": 500 }"#).unwrap();
/// assert_eq!(config.interval(TickSpeed::Normal).as_millis(), 500);
/// assert_eq!(config.interval(TickSpeed::Sliding).as_millis(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub normal_ms: u64,
    pub sliding_ms: u64,
    pub fast_ms: u64,
    pub paused_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            normal_ms: 800,
            sliding_ms: 100,
            fast_ms: 50,
            paused_ms: 24 * 60 * 60 * 1000,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn interval(&self, speed: TickSpeed) -> Duration {
        let millis = match speed {
            TickSpeed::Normal => self.normal_ms,
            TickSpeed::Sliding => self.sliding_ms,
            TickSpeed::Fast => self.fast_ms,
            TickSpeed::Paused => self.paused_ms,
        };
        Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let config = SessionConfig::default();
        assert_eq!(config.interval(TickSpeed::Normal), Duration::from_millis(800));
        assert_eq!(config.interval(TickSpeed::Sliding), Duration::from_millis(100));
        assert_eq!(config.interval(TickSpeed::Fast), Duration::from_millis(50));
        assert_eq!(config.interval(TickSpeed::Paused), Duration::from_secs(86_400));
    }

    #[test]
    fn test_sliding_is_faster_than_normal() {
        let config = SessionConfig::default();
        assert!(config.interval(TickSpeed::Sliding) < config.interval(TickSpeed::Normal));
        assert!(config.interval(TickSpeed::Paused) > config.interval(TickSpeed::Normal));
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_serialize_field_names() {
        let value = serde_json::to_value(SessionConfig::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "normal_ms": 800,
                "sliding_ms": 100,
                "fast_ms": 50,
                "paused_ms": 86_400_000,
            })
        );
    }
}
