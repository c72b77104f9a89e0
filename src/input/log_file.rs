use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::AnalyzerError;
use crate::input::parse_log_line;
use crate::models::LogEvent;

/// An authentication log opened for a single forward pass
pub struct LogFile {
    file_path: PathBuf,
    reader: BufReader<File>,
}

impl LogFile {
    /// Open the log, classifying a missing file apart from other I/O errors
    pub fn open<P: AsRef<Path>>(file_path: P) -> Result<Self, AnalyzerError> {
        let file_path = file_path.as_ref().to_path_buf();
        let file = File::open(&file_path)
            .map_err(|e| AnalyzerError::from_input_io(file_path.clone(), e))?;

        Ok(LogFile {
            file_path,
            reader: BufReader::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Hand over the buffered reader, keeping the path for error reports
    pub fn into_parts(self) -> (PathBuf, BufReader<File>) {
        (self.file_path, self.reader)
    }
}

/// Parse each line of `reader` in order, returning the number of lines read
pub fn for_each_event<R, F>(reader: R, mut f: F) -> std::io::Result<usize>
where
    R: BufRead,
    F: FnMut(LogEvent),
{
    let mut lines = 0;
    for line in reader.lines() {
        let line = line?;
        lines += 1;
        f(parse_log_line(&line));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let result = LogFile::open(dir.path().join("auth.log"));
        assert!(matches!(result, Err(AnalyzerError::InputNotFound { .. })));
    }

    #[test]
    fn test_open_directory_is_not_a_log() {
        let dir = tempdir().unwrap();
        // Opening a directory succeeds on Unix but reading from it fails.
        let (_, reader) = LogFile::open(dir.path()).unwrap().into_parts();
        assert!(for_each_event(reader, |_| {}).is_err());
    }

    #[test]
    fn test_events_in_line_order() {
        let mut users = Vec::new();
        let lines = for_each_event(Cursor::new("user=a\n\nuser=b\nuser=c"), |event| {
            users.push(event.get("user").map(str::to_string));
        })
        .unwrap();

        assert_eq!(lines, 4);
        assert_eq!(
            users,
            vec![
                Some("a".to_string()),
                None,
                Some("b".to_string()),
                Some("c".to_string())
            ]
        );
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = b"user=a\n\xff\xfe\n";
        assert!(for_each_event(Cursor::new(bytes), |_| {}).is_err());
    }
}
