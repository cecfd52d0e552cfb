use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

/// Largest vocabulary export accepted, in bytes.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

pub struct InputReader;

impl InputReader {
    /// Reads the export from `file_path`, or from stdin when `None`.
    ///
    /// A leading UTF-8 byte order mark (common in Windows exports) is dropped.
    pub fn read(file_path: Option<&str>) -> Result<String> {
        let text = file_path.map_or_else(Self::read_stdin, Self::read_file)?;
        Ok(text
            .strip_prefix('\u{feff}')
            .map(str::to_string)
            .unwrap_or(text))
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access vocabulary file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Vocabulary file ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                 Export a smaller deck or split the file.",
                size as f64 / 1024.0 / 1024.0
            );
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read vocabulary file: {path}"))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(
                    "Vocabulary input exceeds maximum allowed size (1 MB).\n\n\
                     Export a smaller deck or split the input."
                );
            }
        }

        String::from_utf8(buffer).context("Vocabulary input is not valid UTF-8")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "gato\tcat\nperro\tdog").unwrap();

        let content = InputReader::read(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(content, "gato\tcat\nperro\tdog");
    }

    #[test]
    fn test_read_strips_byte_order_mark() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "\u{feff}gato - cat").unwrap();

        let content = InputReader::read(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(content, "gato - cat");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = InputReader::read(Some("/nonexistent/path/to/deck.txt"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("vocabulary file"));
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("huge_deck.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let result = InputReader::read(Some(file_path.to_str().unwrap()));
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_file_at_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("max_deck.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE)).unwrap();

        let result = InputReader::read(Some(file_path.to_str().unwrap())).unwrap();
        assert_eq!(result.len(), MAX_INPUT_SIZE);
    }
}
