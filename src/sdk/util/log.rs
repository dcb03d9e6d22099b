use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use env_logger::{Builder, Env, Target};

/// Initializes the global logger, writing to stdout and, when it can be
/// opened, appending to `log_file` as well.
pub fn init_logging(log_file: Option<&Path>) {
    let default = "info";
    let level = env::var("RUST_LOG").unwrap_or_else(|_| default.to_string());

    let mut open_error = None;
    let target = match log_file.map(open_append) {
        Some(Ok(file)) => Target::Pipe(Box::new(TeeWriter::new(file))),
        Some(Err(e)) => {
            open_error = Some(e);
            Target::Stdout
        }
        None => Target::Stdout,
    };

    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .format_module_path(false)
        .target(target)
        .init();

    if let (Some(e), Some(path)) = (open_error, log_file) {
        log::warn!("Could not open log file {}: {}. Logging to stdout only", path.display(), e);
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Duplicates every write to stdout and a file.
pub struct TeeWriter<W: Write> {
    file: W,
}

impl<W: Write> TeeWriter<W> {
    pub fn new(file: W) -> Self {
        Self { file }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_writes_everything_to_the_file() {
        let mut tee = TeeWriter::new(Vec::new());
        tee.write_all(b"routeplan ok\n").unwrap();
        tee.flush().unwrap();
        assert_eq!(tee.file, b"routeplan ok\n");
    }

    #[test]
    fn log_file_is_opened_for_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maplog.txt");
        std::fs::write(&path, "first\n").unwrap();
        let mut file = open_append(&path).unwrap();
        file.write_all(b"second\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
