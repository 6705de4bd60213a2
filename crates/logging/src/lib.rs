// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Zonation Logging
//!
//! Every zonation crate logs through the [`log`] facade.  This crate wires that facade to
//! [`env_logger`] so that hosts (command-line drivers, test binaries) see what the builders are
//! doing.
//!
//! By default, the logging level is set to [`Info`](log::Level::Info) for debug builds, and
//! [`Warn`](log::Level::Warn) for release builds, for the crates named when the [`Logger`] is
//! created.  This can be overridden by setting the `RUST_LOG` environment variable, like so:
//!
//! ```sh
//! $> RUST_LOG=zonation=debug cargo test
//! ```

mod logger;
pub use logger::{Logger, default_level, filter_string};

/// Crates whose logs are captured when nothing else is specified.
pub const ZONATION_CRATES: &[&str] = &["zonation", "zonation_geometry", "zonation_config"];

/// Initialize logging for all zonation crates at the build's default level.  Panics if another
/// logger is already installed; use [`try_init`] where that may happen.
pub fn init() {
    Logger::new(ZONATION_CRATES.to_vec()).init();
}

/// Like [`init`], but does nothing if a logger is already installed.  Meant for test binaries,
/// unit and integration alike: output goes through the harness and is captured per test.
pub fn try_init() {
    let _ = Logger::new(ZONATION_CRATES.to_vec())
        .with_test_capture(true)
        .try_init();
}

// End of File
