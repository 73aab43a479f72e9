//! Rolling Logger
//!
//! Tracing setup that writes to stdout and to `<dir>/<app>.log`. The file
//! keeps only the most recent lines: once it holds twice the capacity it is
//! rewritten from an in-memory ring of the last `capacity` lines.
//! `log` records are bridged into the same subscriber.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Lines kept in the log file
pub const DEFAULT_CAPACITY: usize = 5000;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Log file with a line-based circular buffer
#[derive(Debug)]
pub struct RollingFile {
    path: PathBuf,
    file: File,
    recent: VecDeque<String>,
    capacity: usize,
    /// Lines currently in the file on disk
    file_lines: usize,
    /// Bytes after the last newline
    partial: String,
}

impl RollingFile {
    /// Open `path`, keeping the tail of any existing content.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> io::Result<Self> {
        let path = path.into();
        let capacity = capacity.max(1);

        let existing = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e),
        };
        let mut recent: VecDeque<String> = existing.lines().map(str::to_string).collect();
        while recent.len() > capacity {
            recent.pop_front();
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut rolling = Self {
            path,
            file,
            file_lines: recent.len(),
            recent,
            capacity,
            partial: String::new(),
        };
        rolling.compact()?;
        Ok(rolling)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Most recent complete lines, oldest first
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    /// Append raw output; complete lines are committed.
    pub fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.push_line(line.trim_end_matches(['\r', '\n']).to_string())?;
        }
        Ok(())
    }

    fn push_line(&mut self, line: String) -> io::Result<()> {
        writeln!(self.file, "{}", line)?;
        self.file_lines += 1;
        self.recent.push_back(line);
        if self.recent.len() > self.capacity {
            self.recent.pop_front();
        }
        if self.file_lines >= self.capacity * 2 {
            self.compact()?;
        }
        Ok(())
    }

    /// Rewrite the file from the ring buffer.
    fn compact(&mut self) -> io::Result<()> {
        let mut content = String::new();
        for line in &self.recent {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        self.file = OpenOptions::new().append(true).open(&self.path)?;
        self.file_lines = self.recent.len();
        Ok(())
    }
}

/// Shared handle handed to the fmt layer
#[derive(Debug, Clone)]
pub struct RollingWriter(Arc<Mutex<RollingFile>>);

impl RollingWriter {
    pub fn new(file: RollingFile) -> Self {
        Self(Arc::new(Mutex::new(file)))
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        file.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install the global subscriber. Level comes from `RUST_LOG`, default info.
/// Returns the log file path.
pub fn init_logger(dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.log", app_name));
    let writer = RollingWriter::new(RollingFile::open(&path, DEFAULT_CAPACITY)?);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(move || writer.clone())
                .with_ansi(false),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    LOG_PATH
        .set(path.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!(
        "{} logging to {} (started {})",
        app_name,
        path.display(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(path)
}

/// Log file chosen by [`init_logger`]
pub fn log_path() -> Option<&'static Path> {
    LOG_PATH.get().map(PathBuf::as_path)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    log_path().ok_or(LoggerError::NotInitialized)?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    log_path().ok_or(LoggerError::NotInitialized)?;
    tracing::error!("{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_on_disk(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_partial_writes_join_into_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path().join("app.log"), 10).unwrap();
        file.write_bytes(b"hel").unwrap();
        file.write_bytes(b"lo\nwor").unwrap();
        assert_eq!(file.recent().collect::<Vec<_>>(), vec!["hello"]);
        file.write_bytes(b"ld\n").unwrap();
        assert_eq!(lines_on_disk(file.path()), vec!["hello", "world"]);
    }

    #[test]
    fn test_file_is_compacted_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path().join("app.log"), 3).unwrap();
        for i in 0..6 {
            file.write_bytes(format!("line {}\n", i).as_bytes()).unwrap();
        }
        assert_eq!(lines_on_disk(file.path()), vec!["line 3", "line 4", "line 5"]);
        assert_eq!(file.recent().count(), 3);
    }

    #[test]
    fn test_reopen_keeps_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "a\nb\nc\nd\n").unwrap();
        let file = RollingFile::open(&path, 2).unwrap();
        assert_eq!(lines_on_disk(&path), vec!["c", "d"]);
        assert_eq!(file.recent().collect::<Vec<_>>(), vec!["c", "d"]);
    }

    #[test]
    fn test_init_logger_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_logger(dir.path().join("logs"), "TaskMatrix").unwrap();
        assert!(path.ends_with("TaskMatrix.log"));
        info("server ready").unwrap();
        error("upstream failed").unwrap();
        log::warn!("bridged from log");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("server ready"));
        assert!(content.contains("upstream failed"));
        assert!(content.contains("bridged from log"));
        assert!(matches!(
            init_logger(dir.path(), "Again"),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}
