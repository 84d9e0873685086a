//! Subscriber setup for the `pcbdiff` binary and tests

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output style for log events; all profiles write to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Pretty text, `pcbdiff=debug`
    #[default]
    Development,
    /// One JSON object per line, `pcbdiff=info`
    Production,
    /// Bare registry; `init_test_capture()` supplies the capture layer
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "pcbdiff=debug",
            Profile::Production => "pcbdiff=info",
            Profile::Test => "pcbdiff=trace",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber; only the first call has any effect
///
/// ```
/// use pcbdiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter())
            .init(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter())
            .init(),
        Profile::Test => tracing_subscriber::registry().init(),
    });
}
