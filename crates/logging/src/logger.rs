// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use log::{LevelFilter, SetLoggerError};

/// [`Info`](log::Level::Info) on debug builds and [`Warn`](log::Level::Warn) on release builds.
pub const fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// The filter that would have been set in `RUST_LOG`: `crate=level` pairs separated by commas.
pub fn filter_string(crates: &[&str], level: LevelFilter) -> String {
    let level = level.as_str().to_ascii_lowercase();
    crates
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Captures logs from the crates specified with a minimum [`log::Level`] chosen by
/// [`default_level`] unless overridden.  The `RUST_LOG` environment variable, when set, wins.
pub struct Logger {
    crates: Vec<&'static str>,
    level: LevelFilter,
    test_capture: bool,
}

impl Logger {
    /// Creates a new [`Logger`] for the specified list of crates.
    pub fn new(crates: Vec<&'static str>) -> Self {
        Self {
            crates,
            level: default_level(),
            test_capture: false,
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Route output through the test harness so that it is captured per test.
    pub fn with_test_capture(mut self, test_capture: bool) -> Self {
        self.test_capture = test_capture;
        self
    }

    fn builder(&self) -> env_logger::Builder {
        // Use env_logger's builder API rather than setting RUST_LOG ourselves.
        let filter = filter_string(&self.crates, self.level);
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter));
        builder.is_test(self.test_capture);
        builder
    }

    /// Install the logger.  Panics if a logger is already installed.
    pub fn init(&self) {
        self.builder().init();
    }

    /// Install the logger unless one is already installed.
    pub fn try_init(&self) -> Result<(), SetLoggerError> {
        self.builder().try_init()
    }
}


// End of File
