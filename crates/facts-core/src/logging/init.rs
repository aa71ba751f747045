//! Logging initialization.

use std::str::FromStr;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Human-readable output, `facts=debug`
    #[default]
    Development,
    /// JSON structured output, `facts=info`
    Production,
    /// No output; tests install their own subscriber
    Test,
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown log profile '{other}'")),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// Only the first call has an effect. `RUST_LOG` overrides the profile's
/// default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("facts=debug")),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("facts=info")),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_long_and_short_names() {
        assert_eq!("production".parse::<Profile>(), Ok(Profile::Production));
        assert_eq!("DEV".parse::<Profile>(), Ok(Profile::Development));
        assert_eq!(" test ".parse::<Profile>(), Ok(Profile::Test));
        assert!("verbose".parse::<Profile>().is_err());
    }
}
