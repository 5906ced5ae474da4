//! Subscriber installation
//!
//! One global subscriber per process. Output goes to stderr so that command
//! output on stdout stays machine-readable.

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, Roster crates at `debug`
    Development,
    /// One JSON object per event, Roster crates at `info`
    Production,
    /// Bare registry; tests install [`init_test_capture`](super::init_test_capture) instead
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(self) -> &'static str {
        match self {
            Profile::Development => "info,roster=debug",
            Profile::Production => "warn,roster=info",
            Profile::Test => "off",
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "development" | "dev" => Ok(Profile::Development),
            "json" | "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!(
                "unknown log format '{}' (expected pretty or json)",
                other
            )),
        }
    }
}

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_filter()))
}

static INSTALL: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. If another subscriber
/// was installed first (e.g. the test capture layer) it is left in place.
pub fn init(profile: Profile) {
    INSTALL.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!("Global subscriber already set; keeping it");
        }
    });
}
