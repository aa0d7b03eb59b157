use crate::present::ResultRow;
use anyhow::Result;
use std::path::Path;

/// Export the current result rows to CSV with headers:
/// rank,label,confidence
pub fn export_csv(rows: &[ResultRow], path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["rank", "label", "confidence"])?;

    for (idx, row) in rows.iter().enumerate() {
        wtr.write_record([
            (idx + 1).to_string().as_str(),
            row.label.as_str(),
            format!("{:.6}", row.confidence).as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn export_csv_writes_expected_headers_and_rows() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let rows = vec![
            ResultRow {
                label: "Rose".into(),
                confidence: 0.5,
            },
            ResultRow {
                label: "Tulip".into(),
                confidence: 0.3,
            },
            ResultRow {
                label: "Daisy".into(),
                confidence: 0.2,
            },
        ];

        export_csv(&rows, &path)?;

        let mut rdr = csv::Reader::from_path(&path)?;
        let headers = rdr.headers()?.clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["rank", "label", "confidence"]
        );

        let mut recs = rdr.records();
        let r1 = recs.next().unwrap()?;
        assert_eq!(&r1[0], "1");
        assert_eq!(&r1[1], "Rose");
        assert_eq!(&r1[2], "0.500000");

        let r2 = recs.next().unwrap()?;
        assert_eq!(&r2[0], "2");
        assert_eq!(&r2[1], "Tulip");

        let r3 = recs.next().unwrap()?;
        assert_eq!(&r3[0], "3");
        assert_eq!(&r3[1], "Daisy");

        assert!(recs.next().is_none());
        Ok(())
    }

    #[test]
    fn export_csv_with_no_rows_writes_only_headers() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        export_csv(&[], &path)?;

        let mut rdr = csv::Reader::from_path(&path)?;
        assert_eq!(rdr.headers()?.len(), 3);
        assert!(rdr.records().next().is_none());
        Ok(())
    }
}
