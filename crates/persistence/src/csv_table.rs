//! Typed CSV reading and writing
//!
//! Rows that fail to deserialize are skipped with a warning so one bad line
//! does not hide the rest of a table.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::PersistenceError;

/// Read every well-formed row of a headed CSV file
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PersistenceError> {
    read_rows_with(path, |h| h.to_string())
}

/// Read rows after rewriting each header cell with `normalize`
pub fn read_rows_with<T, F>(path: &Path, normalize: F) -> Result<Vec<T>, PersistenceError>
where
    T: DeserializeOwned,
    F: Fn(&str) -> String,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: csv::StringRecord = reader.headers()?.iter().map(&normalize).collect();
    reader.set_headers(headers);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    path = %path.display(),
                    row = line + 1,
                    error = %e,
                    "Skipping malformed row"
                );
            }
        }
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), skipped, "Loaded table");
    Ok(rows)
}

/// Write rows with a header, replacing the file
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a table, or fall back to built-in rows when the file is absent
///
/// When `write_defaults` is set, the built-in rows are also written to
/// `path`; a failed write is logged and otherwise ignored. A file that exists
/// but cannot be read also yields the built-in rows.
pub fn load_or_default<T, F>(
    path: &Path,
    defaults: F,
    write_defaults: bool,
    read: impl Fn(&Path) -> Result<Vec<T>, PersistenceError>,
) -> Vec<T>
where
    T: Serialize,
    F: Fn() -> Vec<T>,
{
    if path.exists() {
        match read(path) {
            Ok(rows) => return rows,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read table, using built-in rows");
                return defaults();
            }
        }
    }

    let rows = defaults();
    tracing::info!(path = %path.display(), rows = rows.len(), "Table missing, using built-in rows");

    if write_defaults {
        if let Err(e) = write_rows(path, &rows) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write default table");
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        count: u32,
    }

    #[test]
    fn test_skips_malformed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "name,count\na,1\nb,not-a-number\nc,3\n").unwrap();

        let rows: Vec<Row> = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "c");
    }

    #[test]
    fn test_header_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "NAME,COUNT\na,1\n").unwrap();

        let rows: Vec<Row> = read_rows_with(&path, |h| h.to_lowercase()).unwrap();
        assert_eq!(rows, vec![Row { name: "a".into(), count: 1 }]);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/rows.csv");
        let defaults = || vec![Row { name: "x".into(), count: 7 }];

        let rows = load_or_default(&path, defaults, true, |p| read_rows(p));
        assert_eq!(rows.len(), 1);
        assert!(path.exists());

        let reread: Vec<Row> = read_rows(&path).unwrap();
        assert_eq!(reread, rows);
    }

    #[test]
    fn test_missing_file_without_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let rows = load_or_default(&path, || vec![Row { name: "x".into(), count: 7 }], false, |p| {
            read_rows(p)
        });
        assert_eq!(rows.len(), 1);
        assert!(!path.exists());
    }
}
