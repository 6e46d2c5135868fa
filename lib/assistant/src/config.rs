//! Timing configuration for the chat widget.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Assistant timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Minimum simulated typing delay, in milliseconds.
    #[serde(default = "default_typing_delay_min_ms")]
    pub typing_delay_min_ms: u64,

    /// Random extra typing delay added on top of the minimum, in milliseconds.
    #[serde(default = "default_typing_delay_jitter_ms")]
    pub typing_delay_jitter_ms: u64,

    /// Delay between "Redirecting..." and the actual navigation, in milliseconds.
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

fn default_typing_delay_min_ms() -> u64 {
    1000
}

fn default_typing_delay_jitter_ms() -> u64 {
    400
}

fn default_redirect_delay_ms() -> u64 {
    1500
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            typing_delay_min_ms: default_typing_delay_min_ms(),
            typing_delay_jitter_ms: default_typing_delay_jitter_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

impl AssistantConfig {
    /// The typing delay distribution.
    #[must_use]
    pub fn typing_delay(&self) -> TypingDelay {
        TypingDelay {
            min: Duration::from_millis(self.typing_delay_min_ms),
            jitter: Duration::from_millis(self.typing_delay_jitter_ms),
        }
    }

    /// The post-action redirect delay.
    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Uniformly distributed delay in `[min, min + jitter]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    pub min: Duration,
    pub jitter: Duration,
}

impl TypingDelay {
    /// Draws a delay from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return self.min;
        }
        self.min + Duration::from_millis(rng.random_range(0..=jitter_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn assistant_config_has_correct_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.typing_delay_min_ms, 1000);
        assert_eq!(config.typing_delay_jitter_ms, 400);
        assert_eq!(config.redirect_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: AssistantConfig =
            serde_json::from_str(r#"{"redirect_delay_ms": 10}"#).expect("deserialize");
        assert_eq!(config.typing_delay_min_ms, 1000);
        assert_eq!(config.redirect_delay_ms, 10);
    }

    #[test]
    fn typing_delay_stays_in_range() {
        let delay = AssistantConfig::default().typing_delay();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let sampled = delay.sample(&mut rng);
            assert!(sampled >= Duration::from_millis(1000));
            assert!(sampled <= Duration::from_millis(1400));
        }
    }

    #[test]
    fn zero_jitter_is_fixed() {
        let delay = TypingDelay {
            min: Duration::from_millis(5),
            jitter: Duration::ZERO,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(delay.sample(&mut rng), Duration::from_millis(5));
    }
}
