//! Output sink: delimited text writer with atomic tmp→rename

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Field delimiter
pub const DELIMITER: char = ',';

/// Record terminator (RFC 4180)
pub const LINE_TERMINATOR: &str = "\r\n";

fn needs_quotes(field: &str) -> bool {
    field.contains(DELIMITER) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Append one record (without terminator) to `out`.
fn encode_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    // A lone empty field would otherwise read back as a blank line
    if let [only] = fields {
        if only.as_ref().is_empty() {
            out.push_str("\"\"");
            return;
        }
    }
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        let field = field.as_ref();
        if needs_quotes(field) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
}

/// Buffered CSV writer with atomic tmp→rename
pub struct CsvSink {
    writer: BufWriter<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    columns: usize,
    row_count: usize,
    line: String,
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl CsvSink {
    /// Create a sink writing to `<path>.tmp`, header row first
    pub fn create<S: AsRef<str>>(path: &Path, header: &[S]) -> io::Result<Self> {
        let final_path = path.to_path_buf();
        let mut tmp_name = final_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        let mut sink = Self {
            writer: BufWriter::new(file),
            tmp_path,
            final_path,
            columns: header.len(),
            row_count: 0,
            line: String::with_capacity(256),
        };
        sink.write_line(header)?;
        Ok(sink)
    }

    /// Write one data row. Field count must match the header.
    pub fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> io::Result<()> {
        if fields.len() != self.columns {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{}: row has {} fields, header has {}",
                    self.final_path.display(),
                    fields.len(),
                    self.columns
                ),
            ));
        }
        self.write_line(fields)?;
        self.row_count += 1;
        Ok(())
    }

    fn write_line<S: AsRef<str>>(&mut self, fields: &[S]) -> io::Result<()> {
        self.line.clear();
        encode_record(&mut self.line, fields);
        self.line.push_str(LINE_TERMINATOR);
        self.writer.write_all(self.line.as_bytes())
    }

    /// Data rows written so far (header excluded)
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Finalize: flush and atomically rename tmp → final, replacing any existing file
    pub fn finalize(self) -> io::Result<usize> {
        let row_count = self.row_count;
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(row_count)
    }
}

/// Write a whole table: header, then every row. Returns data rows written.
pub fn write_table<S, R, I>(path: &Path, header: &[S], rows: I) -> io::Result<usize>
where
    S: AsRef<str>,
    R: AsRef<[String]>,
    I: IntoIterator<Item = R>,
{
    let mut sink = CsvSink::create(path, header)?;
    for row in rows {
        sink.write_row(row.as_ref())?;
    }
    sink.finalize()
}

/// Remove stale `<name>.tmp` files left by an interrupted write of the
/// given outputs. Other files in `output_dir` are never touched.
pub fn cleanup_tmp_files(output_dir: &Path, file_names: &[&str]) -> io::Result<()> {
    for name in file_names {
        let path = output_dir.join(format!("{name}.tmp"));
        if path.is_file() {
            log::warn!("Removing stale tmp file: {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn encode(fields: &[&str]) -> String {
        let mut out = String::new();
        encode_record(&mut out, fields);
        out
    }

    #[test]
    fn plain_fields_unquoted() {
        assert_eq!(encode(&["T1", "2024-01-01", "90"]), "T1,2024-01-01,90");
    }

    #[test]
    fn delimiter_forces_quotes() {
        assert_eq!(encode(&["a,b", "c"]), "\"a,b\",c");
    }

    #[test]
    fn embedded_quotes_doubled() {
        assert_eq!(encode(&["ТОВ \"Альфа\""]), "\"ТОВ \"\"Альфа\"\"\"");
    }

    #[test]
    fn line_breaks_force_quotes() {
        assert_eq!(encode(&["line1\nline2", "x\ry"]), "\"line1\nline2\",\"x\ry\"");
    }

    #[test]
    fn lone_empty_field_quoted() {
        assert_eq!(encode(&[""]), "\"\"");
        assert_eq!(encode(&["", ""]), ",");
    }

    #[test]
    fn write_table_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            vec!["1".to_string(), "one".to_string()],
            vec!["2".to_string(), "two, too".to_string()],
        ];
        let n = write_table(&path, &["ID", "Name"], &rows).unwrap();
        assert_eq!(n, 2);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ID,Name\r\n1,one\r\n2,\"two, too\"\r\n");
        assert!(!dir.path().join("out.csv.tmp").exists());
    }

    #[test]
    fn write_table_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents").unwrap();
        write_table(&path, &["Region"], Vec::<Vec<String>>::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Region\r\n");
    }

    #[test]
    fn row_width_mismatch_rejected() {
        let dir = TempDir::new().unwrap();
        let mut sink = CsvSink::create(&dir.path().join("bad.csv"), &["A", "B"]).unwrap();
        let err = sink.write_row(&["only one"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(sink.row_count(), 0);
    }

    #[test]
    fn unwritable_path_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing_dir").join("out.csv");
        assert!(write_table(&path, &["A"], Vec::<Vec<String>>::new()).is_err());
    }

    #[test]
    fn cleanup_tmp_files_removes_only_named_outputs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv.tmp"), b"stale").unwrap();
        std::fs::write(dir.path().join("b.csv"), b"keep").unwrap();
        std::fs::write(dir.path().join("notes.tmp"), b"user file").unwrap();

        cleanup_tmp_files(dir.path(), &["a.csv", "b.csv", "c.csv"]).unwrap();

        assert!(!dir.path().join("a.csv.tmp").exists());
        assert!(dir.path().join("b.csv").exists());
        assert!(dir.path().join("notes.tmp").exists());
    }
}
