//! Wordlist input
//!
//! Reads the whole wordlist into memory before filtering starts. Files are
//! decoded with automatic encoding detection; standard input is read as UTF-8.
//! Lines keep their content as-is: only the line terminator is removed.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Bytes sampled for encoding detection
const DETECTION_SAMPLE: usize = 64 * 1024;

/// Where the wordlist comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("standard input"),
        }
    }
}

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of raw wordlist content from its first bytes
pub fn detect_encoding(content: &[u8]) -> EncodingInfo {
    let sample = &content[..content.len().min(DETECTION_SAMPLE)];

    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return EncodingInfo {
            name: encoding.name(),
            encoding,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == content.len());
    let encoding = detector.guess(None, true);

    EncodingInfo {
        name: encoding.name(),
        encoding,
    }
}

/// Decode raw content and split it into lines
///
/// Accepts `\n` and `\r\n` terminators. A trailing terminator does not
/// produce an extra empty line; empty lines elsewhere are kept.
pub fn decode_lines(content: &[u8], encoding: &'static Encoding) -> Vec<String> {
    let (decoded, used, had_errors) = encoding.decode(content);
    if had_errors {
        log::warn!("Input is not valid {}, malformed sequences were replaced", used.name());
    }

    decoded.lines().map(str::to_string).collect()
}

/// Read a wordlist file into memory
pub fn read_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut content = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut content))
        .map_err(|e| anyhow::anyhow!("Error reading file {:?}: {}", path, e))?;

    let info = detect_encoding(&content);
    log::debug!("Detected encoding {} for {:?}", info.name, path);

    Ok(decode_lines(&content, info.encoding))
}

/// Read a wordlist from standard input
pub fn read_stdin() -> anyhow::Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No data provided via standard input");
    }

    let mut content = Vec::new();
    stdin.lock().read_to_end(&mut content)?;

    Ok(decode_lines(&content, encoding_rs::UTF_8))
}

/// Read the whole wordlist from `source`
pub fn read_source(source: &InputSource) -> anyhow::Result<Vec<String>> {
    match source {
        InputSource::File(path) => read_file(path),
        InputSource::Stdin => read_stdin(),
    }
}

/// Check that a wordlist file exists and can be opened for reading
pub fn check_readable(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() || File::open(path).is_err() {
        anyhow::bail!("The provided 'path' must be a valid and readable file: {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_utf8_detection() {
        let content = "Hello, World!\nПривет мир!\n".as_bytes();

        let info = detect_encoding(content);
        assert_eq!(info.name, "UTF-8");
    }

    #[test]
    fn test_bom_detection() {
        let info = detect_encoding(&[0xFF, 0xFE, b'a', 0x00]);
        assert_eq!(info.name, "UTF-16LE");
    }

    #[test]
    fn test_lines_are_not_trimmed() {
        let lines = decode_lines(b"  padded \r\n\nlast", encoding_rs::UTF_8);
        assert_eq!(lines, vec!["  padded ", "", "last"]);
    }

    #[test]
    fn test_trailing_newline() {
        let lines = decode_lines(b"a\nb\n", encoding_rs::UTF_8);
        assert_eq!(lines, vec!["a", "b"]);
        assert!(decode_lines(b"", encoding_rs::UTF_8).is_empty());
    }

    #[test]
    fn test_read_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "line1").unwrap();
        writeln!(file, "Pässword1!").unwrap();
        writeln!(file, "line3").unwrap();

        let lines = read_file(file.path()).unwrap();

        assert_eq!(lines, vec!["line1", "Pässword1!", "line3"]);
    }

    #[test]
    fn test_read_utf16_file() {
        let mut file = NamedTempFile::new().unwrap();
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "abc\r\nxyz\r\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        file.write_all(&bytes).unwrap();

        let lines = read_file(file.path()).unwrap();

        assert_eq!(lines, vec!["abc", "xyz"]);
    }

    #[test]
    fn test_check_readable() {
        let file = NamedTempFile::new().unwrap();
        assert!(check_readable(file.path()).is_ok());
        assert!(check_readable(Path::new("/definitely/not/here.txt")).is_err());
    }
}
