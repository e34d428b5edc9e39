//! File logging under the data directory
//!
//! Reports go to stdout, so log events are appended to
//! `{data_dir}/paycomp.log` instead. The file is trimmed on startup once it
//! outgrows [`Rotation::DEFAULT`].

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file inside the data directory
pub const LOG_FILE_NAME: &str = "paycomp.log";

const ROTATION_MARKER: &[u8] = b"--- paycomp log trimmed, older entries dropped ---\n";

/// Size-based trimming of the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    /// Size above which the file is trimmed
    pub max_bytes: u64,
    /// Most recent bytes kept after trimming
    pub keep_bytes: u64,
}

impl Rotation {
    /// Trim past 5 MB, keep the last 1 MB
    pub const DEFAULT: Rotation = Rotation {
        max_bytes: 5 * 1024 * 1024,
        keep_bytes: 1024 * 1024,
    };

    /// Trim `path` to its most recent whole lines when it is too large
    ///
    /// Returns whether the file was trimmed. A missing file is not an error.
    pub fn apply(&self, path: &Path) -> std::io::Result<bool> {
        let len = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len <= self.max_bytes {
            return Ok(false);
        }

        let mut tail = Vec::new();
        {
            let mut file = File::open(path)?;
            file.seek(SeekFrom::Start(len.saturating_sub(self.keep_bytes)))?;
            file.read_to_end(&mut tail)?;
        }

        // The cut usually lands mid-line
        let first_whole = tail
            .iter()
            .position(|&b| b == b'\n')
            .map_or(0, |i| i + 1);

        let mut file = File::create(path)?;
        file.write_all(ROTATION_MARKER)?;
        file.write_all(&tail[first_whole..])?;
        Ok(true)
    }
}

/// Append-mode log file handed to the fmt layer
///
/// Each event is formatted into a buffer and written with a single call, so
/// concurrent writers through `&File` do not interleave within a line.
struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.0
    }
}

/// Start logging to `{data_dir}/paycomp.log`
///
/// `RUST_LOG` overrides the filter built from `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE_NAME);

    let trimmed = match Rotation::DEFAULT.apply(&log_path) {
        Ok(trimmed) => trimmed,
        Err(e) => {
            eprintln!("Warning: could not trim {}: {e}", log_path.display());
            false
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("paycomp={level},paycomp_core=warn")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(LogFile(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), trimmed, "logging started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SMALL: Rotation = Rotation {
        max_bytes: 1_000,
        keep_bytes: 250,
    };

    #[test]
    fn test_small_log_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(!SMALL.apply(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_trim_keeps_recent_whole_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);

        let line = "x".repeat(29) + "\n";
        let mut content = line.repeat(40);
        content.push_str("last line\n");
        fs::write(&path, &content).unwrap();

        assert!(SMALL.apply(&path).unwrap());

        let trimmed = fs::read_to_string(&path).unwrap();
        assert!(trimmed.as_bytes().starts_with(ROTATION_MARKER));
        assert!(trimmed.ends_with("last line\n"));
        assert!(trimmed.len() as u64 <= SMALL.keep_bytes + ROTATION_MARKER.len() as u64);
        for l in trimmed.lines().skip(1) {
            assert!(l == "last line" || l.len() == 29, "partial line kept: {l}");
        }
    }

    #[test]
    fn test_missing_log_is_fine() {
        let dir = tempdir().unwrap();
        assert!(!Rotation::DEFAULT
            .apply(&dir.path().join(LOG_FILE_NAME))
            .unwrap());
    }

    #[test]
    fn test_writer_appends_to_shared_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();
        let log = LogFile(file);

        log.make_writer().write_all(b"first\n").unwrap();
        log.make_writer().write_all(b"second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
