//! Output management module
//!
//! Writes kept entries to a file or standard output with buffering.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for output writing (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Where the filtered wordlist goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("standard output"),
        }
    }
}

/// Buffered line writer
pub struct OutputWriter<W: Write> {
    writer: BufWriter<W>,
    lines_written: u64,
    bytes_written: u64,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(inner: W, buffer_size: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(buffer_size, inner),
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Write every line in order
    pub fn write_all<'a, I>(&mut self, lines: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.write_line(line)?;
        }
        Ok(())
    }

    /// Flush the buffer
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get number of lines written
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Get bytes written
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

/// Open an output file, truncating existing content
pub fn open_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Open `target` for writing
///
/// An output file that cannot be opened falls back to standard output; the
/// returned target says where the lines will actually go.
pub fn open_target(target: &OutputTarget) -> (Box<dyn Write>, OutputTarget) {
    match target {
        OutputTarget::File(path) => match open_file(path) {
            Ok(file) => (Box::new(file), target.clone()),
            Err(e) => {
                log::debug!("Cannot open {:?} for writing: {}", path, e);
                (Box::new(io::stdout().lock()), OutputTarget::Stdout)
            }
        },
        OutputTarget::Stdout => (Box::new(io::stdout().lock()), OutputTarget::Stdout),
    }
}

/// Write `lines` to `target`, returning where they went and how many were written
pub fn write_entries<'a, I>(target: &OutputTarget, lines: I) -> anyhow::Result<(OutputTarget, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let (inner, actual) = open_target(target);
    let mut writer = OutputWriter::new(inner, DEFAULT_BUFFER_SIZE);

    writer.write_all(lines)?;
    writer.flush()?;
    log::debug!(
        "Wrote {} lines ({}) to {}",
        writer.lines_written(),
        bytesize::ByteSize(writer.bytes_written()),
        actual
    );

    Ok((actual, writer.lines_written()))
}
