use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::ExportError;

/// Header of the first column; the rest are "Job 1", "Job 2", ...
const NAME_COLUMN: &str = "Name";

/// One submission in the results log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub name: String,
    pub careers: Vec<String>,
}

/// Read every submission from a results log.
///
/// A missing file is an empty log. Rows may be shorter than the header;
/// trailing empty cells are dropped.
pub fn read_results(path: &Path) -> Result<Vec<ResultRow>, ExportError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let read_err = |source: csv::Error| ExportError::ReadLog {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        let mut cells = record.iter().map(str::to_string);
        let name = cells.next().unwrap_or_default();
        let mut careers: Vec<String> = cells.collect();
        while careers.last().is_some_and(|c| c.is_empty()) {
            careers.pop();
        }
        rows.push(ResultRow { name, careers });
    }

    Ok(rows)
}

/// Append a submission to the results log and rewrite it atomically.
///
/// The header grows when this submission has more careers than any earlier
/// one; shorter rows are padded with empty cells. Creates the file (and its
/// directory) if needed.
pub fn append_result(path: &Path, name: &str, careers: &[String]) -> Result<(), ExportError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ExportError::EmptyName);
    }

    let mut rows = read_results(path)?;
    rows.push(ResultRow {
        name: name.to_string(),
        careers: careers.to_vec(),
    });

    write_results(path, &rows)?;
    info!(path = %path.display(), respondent = name, "appended result");
    Ok(())
}

fn write_results(path: &Path, rows: &[ResultRow]) -> Result<(), ExportError> {
    let write_err = |source: std::io::Error| ExportError::WriteLog {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let width = rows.iter().map(|r| r.careers.len()).max().unwrap_or(0);

    let mut file = AtomicWriteFile::open(path).map_err(write_err)?;

    {
        let mut writer = csv::Writer::from_writer(&mut file);

        let mut header = vec![NAME_COLUMN.to_string()];
        header.extend((1..=width).map(|i| format!("Job {}", i)));
        writer
            .write_record(&header)
            .map_err(|e| write_err(e.into()))?;

        for row in rows {
            let mut record = Vec::with_capacity(width + 1);
            record.push(row.name.as_str());
            record.extend(row.careers.iter().map(String::as_str));
            record.resize(width + 1, "");
            writer
                .write_record(&record)
                .map_err(|e| write_err(e.into()))?;
        }

        writer.flush().map_err(write_err)?;
    }

    file.flush().map_err(write_err)?;
    file.commit().map_err(write_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn careers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rows = read_results(&dir.path().join("results.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        append_result(
            &path,
            "Lan",
            &careers(&["Software Engineer", "Tester", "Frontend Developer"]),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Name,Job 1,Job 2,Job 3\nLan,Software Engineer,Tester,Frontend Developer\n"
        );
    }

    #[test]
    fn test_append_keeps_earlier_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        append_result(&path, "Lan", &careers(&["A", "B", "C"])).unwrap();
        append_result(&path, "Minh", &careers(&["C", "A", "B"])).unwrap();

        let rows = read_results(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Lan");
        assert_eq!(rows[1].careers, careers(&["C", "A", "B"]));
    }

    #[test]
    fn test_append_widens_header_and_pads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        append_result(&path, "Lan", &careers(&["A"])).unwrap();
        append_result(&path, "Minh", &careers(&["B", "C"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Name,Job 1,Job 2\nLan,A,\nMinh,B,C\n");

        let rows = read_results(&path).unwrap();
        assert_eq!(rows[0].careers, careers(&["A"]));
    }

    #[test]
    fn test_append_quotes_names_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        append_result(&path, "Nguyen, Lan", &careers(&["Project Manager/BA/PO"])).unwrap();

        let rows = read_results(&path).unwrap();
        assert_eq!(rows[0].name, "Nguyen, Lan");
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.csv");

        append_result(&path, "Lan", &careers(&["A"])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        assert!(matches!(
            append_result(&path, "  ", &careers(&["A"])),
            Err(ExportError::EmptyName)
        ));
        assert!(!path.exists());
    }
}
