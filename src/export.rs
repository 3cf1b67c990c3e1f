use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, StringArray, UInt16Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use crate::data::model::{Gender, NameRecord, NameTotal};

// ---------------------------------------------------------------------------
// Row shape shared by every export format
// ---------------------------------------------------------------------------

/// Flat row written to disk. Per-year records and summed totals both map
/// onto it, so all views export with the same columns.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Year")]
    pub year: u16,
}

impl From<&NameRecord> for ExportRow {
    fn from(r: &NameRecord) -> Self {
        ExportRow {
            name: r.name.clone(),
            gender: r.gender,
            count: u64::from(r.count),
            year: r.year,
        }
    }
}

impl From<&NameTotal> for ExportRow {
    fn from(t: &NameTotal) -> Self {
        ExportRow {
            name: t.name.clone(),
            gender: t.gender,
            count: t.count,
            year: t.year,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write rows to `path`.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header `Name,Gender,Count,Year`
/// * `.json`    – `[{ "Name": ..., "Gender": ..., "Count": ..., "Year": ... }, ...]`
/// * `.parquet` – columns Name/Gender (Utf8), Count (UInt64), Year (UInt16)
pub fn export_rows(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(path, rows),
        "json" => write_json(path, rows),
        "parquet" | "pq" => write_parquet(path, rows),
        other => bail!("Unsupported export extension: .{other}"),
    }?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_csv(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    // An empty export still gets its header.
    if rows.is_empty() {
        writer
            .write_record(["Name", "Gender", "Count", "Year"])
            .context("writing CSV header")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_json(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Count", DataType::UInt64, false),
        Field::new("Year", DataType::UInt16, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.gender.code()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from(
            rows.iter().map(|r| r.count).collect::<Vec<_>>(),
        )),
        Arc::new(UInt16Array::from(
            rows.iter().map(|r| r.year).collect::<Vec<_>>(),
        )),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn rows() -> Vec<ExportRow> {
        vec![
            ExportRow::from(&NameRecord::new("Ava", Gender::Female, 100, 2000)),
            ExportRow::from(&NameTotal {
                name: "Noah".to_string(),
                gender: Gender::Male,
                count: 5_000_000_000,
                year: 2000,
            }),
        ]
    }

    #[test]
    fn csv_has_ssa_style_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.csv");
        export_rows(&path, &rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Name,Gender,Count,Year"));
        assert_eq!(lines.next(), Some("Ava,F,100,2000"));
        assert_eq!(lines.next(), Some("Noah,M,5000000000,2000"));
    }

    #[test]
    fn empty_csv_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        export_rows(&path, &[]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap().trim_end(),
            "Name,Gender,Count,Year"
        );
    }

    #[test]
    fn json_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detail.JSON");
        export_rows(&path, &rows()).unwrap();

        let back: Vec<ExportRow> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, rows());
    }

    #[test]
    fn parquet_has_expected_schema_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wonders.parquet");
        export_rows(&path, &rows()).unwrap();

        let file = File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 2);

        let batch = &batches[0];
        let names = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(names.value(1), "Noah");
        let counts = batch
            .column(2)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(counts.value(1), 5_000_000_000);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_rows(&dir.path().join("rows.xlsx"), &rows()).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
