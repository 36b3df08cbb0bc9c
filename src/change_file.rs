use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Line-oriented record of what a render pass touched.
///
/// Creating one truncates any previous file. If the file can't be created the error is logged
/// and every later write is a no-op.
pub struct ChangeFile {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl ChangeFile {
    pub fn create(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let writer = match File::create(&path) {
            Ok(f) => Some(BufWriter::new(f)),
            Err(e) => {
                log::error!("couldn't create change file {}: {}", path.display(), e);
                None
            }
        };
        Self {
            path,
            writer: Mutex::new(writer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<BufWriter<File>>> {
        match self.writer.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Appends `line` and a newline. Safe to call from several threads.
    pub fn write_line(&self, line: &str) {
        let mut guard = self.lock();
        if let Some(w) = guard.as_mut() {
            if let Err(e) = writeln!(w, "{line}") {
                log::warn!("change file {}: write failed: {}", self.path.display(), e);
            }
        }
    }

    /// Flushes and closes the file; later writes are dropped.
    pub fn close(&self) {
        if let Some(mut w) = self.lock().take() {
            if let Err(e) = w.flush() {
                log::warn!("change file {}: flush failed: {}", self.path.display(), e);
            }
        }
    }
}
