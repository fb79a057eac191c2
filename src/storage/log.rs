//! Append-only order log
//!
//! Finalized orders are stored as plain text blocks in a single file
//! (`orders.txt` by default). Appends take an exclusive lock and scans take a
//! shared lock, so cooperating processes never observe a half-written block.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::domain::Order;

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "orders.txt";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to open order log {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("Failed to lock order log {path}: {source}")]
    Lock { path: PathBuf, source: io::Error },

    #[error("Failed to write order log {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to read order log {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

impl LogError {
    /// True if the log file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogError::Open { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Handle to the shared order log file
#[derive(Debug, Clone)]
pub struct OrderLog {
    path: PathBuf,
}

impl OrderLog {
    /// Creates a log handle for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the log file within its directory
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }

    /// Directory containing the log file
    pub fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Appends one finalized order block
    pub fn append(&self, order: &Order) -> Result<(), LogError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| LogError::Open {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LogError::Open {
                path: self.path.clone(),
                source,
            })?;

        file.lock_exclusive().map_err(|source| LogError::Lock {
            path: self.path.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(order.to_log_block().as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })?;

        // Lock is released when file is dropped
        Ok(())
    }

    /// Visits every UTF-8 line of the log under a shared lock. Returns the
    /// number of lines visited.
    pub fn for_each_line<F>(&self, mut visit: F) -> Result<usize, LogError>
    where
        F: FnMut(&str),
    {
        let file = File::open(&self.path).map_err(|source| LogError::Open {
            path: self.path.clone(),
            source,
        })?;

        file.lock_shared().map_err(|source| LogError::Lock {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = BufReader::new(&file);
        let mut buf = Vec::new();
        let mut count = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LogError::Read {
                    path: self.path.clone(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

            // Lines written by other tools may not be UTF-8; those are skipped
            if let Ok(line) = std::str::from_utf8(bytes) {
                visit(line);
                count += 1;
            }
        }

        Ok(count)
    }

    /// Reads the whole log into memory
    pub fn read_to_string(&self) -> Result<String, LogError> {
        let mut content = String::new();
        self.for_each_line(|line| {
            content.push_str(line);
            content.push('\n');
        })?;
        Ok(content)
    }
}

impl Default for OrderLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, MenuCatalog};
    use tempfile::TempDir;

    fn sample_order(customer: &str, items: &[(&str, u32)]) -> Order {
        let catalog = MenuCatalog::standard();
        let mut order = Order::new(customer);
        for (id, qty) in items {
            order
                .add_item(catalog.get(&ItemId::new(*id)).unwrap(), *qty)
                .unwrap();
        }
        order
    }

    #[test]
    fn append_creates_file() {
        let dir = TempDir::new().unwrap();
        let log = OrderLog::new(dir.path().join("orders.txt"));

        log.append(&sample_order("Alice", &[("tea", 1)])).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "Order for: Alice\nTea - $4.00\nTotal: $4.00\n");
    }

    #[test]
    fn append_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let log = OrderLog::new(dir.path().join("orders.txt"));
        let order = sample_order("Alice", &[("water", 2)]);

        log.append(&order).unwrap();
        log.append(&order).unwrap();

        let content = log.read_to_string().unwrap();
        assert_eq!(content.matches("Order for: Alice").count(), 2);
        assert_eq!(content, format!("{}{}", order.to_log_block(), order.to_log_block()));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let log = OrderLog::new(dir.path().join("nested").join("dir").join("orders.txt"));

        log.append(&sample_order("Bob", &[("tea", 1)])).unwrap();

        assert!(log.path().exists());
    }

    #[test]
    fn non_utf8_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let log = OrderLog::new(dir.path().join("orders.txt"));
        fs::write(
            log.path(),
            b"Order for: Jos\xe9\r\nTea - $4.00\r\nTotal: $4.00\nWater - $3.50",
        )
        .unwrap();

        let mut lines = Vec::new();
        let visited = log.for_each_line(|line| lines.push(line.to_string())).unwrap();

        assert_eq!(visited, 3);
        assert_eq!(lines, vec!["Tea - $4.00", "Total: $4.00", "Water - $3.50"]);
    }

    #[test]
    fn missing_log_is_not_found() {
        let dir = TempDir::new().unwrap();
        let log = OrderLog::new(dir.path().join("missing.txt"));

        let err = log.for_each_line(|_| {}).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn append_to_directory_path_fails() {
        let dir = TempDir::new().unwrap();
        let log = OrderLog::new(dir.path());

        let err = log.append(&sample_order("Bob", &[("tea", 1)])).unwrap_err();
        assert!(matches!(err, LogError::Open { .. }));
    }

    #[test]
    fn directory_of_bare_file_name_is_cwd() {
        let log = OrderLog::default();
        assert_eq!(log.directory(), PathBuf::from("."));
        assert_eq!(log.file_name().unwrap(), "orders.txt");
    }
}
