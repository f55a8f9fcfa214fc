//! Console plus append-mode file logging.
use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt as tfmt, prelude::*};

use crate::error::{RelinkError, Result};

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| RelinkError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            Some(
                tfmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tfmt::layer().without_time().with_target(false))
        .with(file_layer)
        .try_init();
    Ok(())
}

/// Escapes CR and LF so values read from input files cannot forge log lines.
pub struct Sanitized<'a>(pub &'a str);

impl fmt::Display for Sanitized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '\r' => f.write_str("\\r")?,
                '\n' => f.write_str("\\n")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_line_breaks() {
        let forged = "Foo\n2026-01-01 INFO linked everything\r";
        assert_eq!(
            Sanitized(forged).to_string(),
            "Foo\\n2026-01-01 INFO linked everything\\r"
        );
        assert_eq!(Sanitized("plain").to_string(), "plain");
    }

    #[test]
    fn creates_log_file_in_append_mode() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("run.log");
        std::fs::write(&path, "previous run\n").expect("seed log");
        init_logging("info", Some(&path)).expect("logging initializes");
        let content = std::fs::read_to_string(&path).expect("read log");
        assert!(content.starts_with("previous run"));
    }
}
