// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Process-wide `tracing` output for the client.
//!
//! Events from the `dbhub` target are formatted by a single
//! `tracing-subscriber` fmt layer. The level is taken from the
//! `dbhub.log_level` option, else from `RUST_LOG`, else `warn`. Output goes
//! to `dbhub.log_file` when set and to stderr otherwise; `off` installs
//! nothing.
//!
//! ```bash
//! RUST_LOG=dbhub=debug ./my_app
//! ```

use std::sync::{Mutex, OnceLock};
use tracing_subscriber::{
    fmt::{self, time::SystemTime, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Logging configuration passed via database options.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogConfig {
    /// One of [`LEVELS`], any case. Overrides `RUST_LOG` when set.
    pub level: Option<String>,
    /// Append to this file instead of writing to stderr.
    pub file: Option<String>,
}

/// Where formatted events go, and whether they may carry ANSI colours.
struct LogSink {
    writer: BoxMakeWriter,
    ansi: bool,
}

impl LogConfig {
    pub(crate) fn is_valid_level(level: &str) -> bool {
        LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level))
    }

    fn is_off(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case("off"))
    }

    fn filter(&self) -> EnvFilter {
        match self.level.as_deref() {
            Some(level) => EnvFilter::new(format!("dbhub={}", level.to_lowercase())),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dbhub=warn")),
        }
    }

    fn sink(&self) -> std::io::Result<LogSink> {
        match self.file.as_deref() {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                Ok(LogSink {
                    writer: BoxMakeWriter::new(Mutex::new(file)),
                    ansi: false,
                })
            }
            None => Ok(LogSink {
                writer: BoxMakeWriter::new(std::io::stderr),
                ansi: true,
            }),
        }
    }
}

/// Install the global subscriber on the first call; later calls are no-ops.
///
/// A log file that cannot be opened leaves logging disabled and is reported
/// once on stderr, since there is no subscriber yet to report it through.
pub(crate) fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if config.is_off() {
            return;
        }

        let sink = match config.sink() {
            Ok(sink) => sink,
            Err(e) => {
                eprintln!(
                    "dbhub: failed to open log file {}: {}",
                    config.file.as_deref().unwrap_or_default(),
                    e
                );
                return;
            }
        };

        let layer = fmt::layer()
            .with_writer(sink.writer)
            .with_ansi(sink.ansi)
            .with_target(false)
            .with_timer(SystemTime);

        // An application-installed subscriber wins.
        let _ = tracing_subscriber::registry()
            .with(config.filter())
            .with(layer)
            .try_init();
    });
}
