use std::collections::BTreeSet;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Int64Type};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{AwardDataset, AwardRecord, RawAward, Rejection, REQUIRED_COLUMNS};
use super::source::{DataFormat, DataSource};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the source and run load-and-derive over it.
pub fn load_dataset(source: &DataSource) -> Result<AwardDataset, LoadError> {
    let format = source.format()?;
    let payload = source.fetch()?;
    let dataset = parse_dataset(format, payload)?;
    if dataset.is_empty() {
        log::warn!("No usable award records in {source}");
    } else {
        log::info!("Loaded {} award records from {source}", dataset.len());
    }
    Ok(dataset)
}

/// Parse an in-memory payload. Rows without a usable birth date are dropped.
pub fn parse_dataset(format: DataFormat, payload: Bytes) -> Result<AwardDataset, LoadError> {
    let rows = match format {
        DataFormat::Csv => parse_csv(&payload)?,
        DataFormat::Json => parse_json(&payload)?,
        DataFormat::Parquet => parse_parquet(payload)?,
    };
    Ok(derive_all(rows))
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

fn derive_all(rows: Vec<RawAward>) -> AwardDataset {
    let total = rows.len();
    let mut records = Vec::with_capacity(total);
    let mut no_birth_date = 0usize;

    for (row_no, raw) in rows.into_iter().enumerate() {
        match AwardRecord::derive(raw) {
            Ok(rec) => records.push(rec),
            Err(Rejection::MissingBirthDate) => no_birth_date += 1,
            Err(Rejection::InvalidBirthDate(s)) => {
                log::debug!("Row {row_no}: unparseable birth date '{s}', dropped");
                no_birth_date += 1;
            }
            Err(Rejection::UnknownCategory(c)) => {
                log::warn!("Row {row_no}: unknown category '{c}', dropped");
            }
        }
    }

    if records.len() < total {
        log::info!(
            "Kept {} of {total} rows ({no_birth_date} without a birth date)",
            records.len()
        );
    }
    AwardDataset::from_records(records)
}

fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), LoadError> {
    let present: BTreeSet<&str> = present.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::Schema { missing })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one award per line.
/// Only the columns in [`RawAward`] are read.
fn parse_csv(data: &[u8]) -> Result<Vec<RawAward>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(data);
    let headers = reader
        .headers()
        .map_err(|e| LoadError::malformed(DataFormat::Csv, e))?
        .clone();
    check_columns(headers.iter())?;

    reader
        .deserialize::<RawAward>()
        .map(|row| row.map_err(|e| LoadError::malformed(DataFormat::Csv, e)))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "year": 1901, "category": "Physics", "birth_date": "1845-03-27", ... },
///   ...
/// ]
/// ```
fn parse_json(data: &[u8]) -> Result<Vec<RawAward>, LoadError> {
    let root: JsonValue =
        serde_json::from_slice(data).map_err(|e| LoadError::malformed(DataFormat::Json, e))?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::malformed(DataFormat::Json, "expected top-level JSON array"))?;

    if !records.is_empty() {
        check_columns(
            records
                .iter()
                .filter_map(JsonValue::as_object)
                .flat_map(|obj| obj.keys().map(String::as_str)),
        )?;
    }

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            RawAward::deserialize(rec)
                .map_err(|e| LoadError::malformed(DataFormat::Json, format!("row {i}: {e}")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the award columns.
///
/// `year` may be any integer type; the text columns may be Utf8, LargeUtf8,
/// dictionary-encoded, or (for `birth_date`) Date32/Timestamp. Works with
/// files written by both Pandas and Polars.
fn parse_parquet(data: Bytes) -> Result<Vec<RawAward>, LoadError> {
    let malformed = |e| LoadError::malformed(DataFormat::Parquet, e);

    let builder = ParquetRecordBatchReaderBuilder::try_new(data).map_err(malformed)?;
    check_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().map_err(malformed)?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| LoadError::malformed(DataFormat::Parquet, e))?;

        let column = |name: &str, ty: &DataType| -> Result<Option<ArrayRef>, LoadError> {
            match batch.column_by_name(name) {
                Some(col) => cast(col.as_ref(), ty)
                    .map(Some)
                    .map_err(|e| LoadError::malformed(DataFormat::Parquet, e)),
                None => Ok(None),
            }
        };

        let years = column("year", &DataType::Int64)?
            .ok_or_else(|| LoadError::Schema { missing: vec!["year".into()] })?;
        let years = years.as_primitive::<Int64Type>();
        let category = column("category", &DataType::Utf8)?;
        let country = column("birth_country", &DataType::Utf8)?;
        let birth_date = column("birth_date", &DataType::Utf8)?;
        let sex = column("sex", &DataType::Utf8)?;
        let full_name = column("full_name", &DataType::Utf8)?;

        let text = |col: &Option<ArrayRef>, row: usize| -> Option<String> {
            let col = col.as_ref()?;
            if col.is_null(row) {
                return None;
            }
            Some(col.as_string::<i32>().value(row).to_string())
        };

        for row in 0..batch.num_rows() {
            if years.is_null(row) {
                return Err(LoadError::malformed(
                    DataFormat::Parquet,
                    format!("row {}: null year", rows.len()),
                ));
            }
            let year = i32::try_from(years.value(row)).map_err(|e| {
                LoadError::malformed(DataFormat::Parquet, format!("row {}: {e}", rows.len()))
            })?;

            rows.push(RawAward {
                year,
                category: text(&category, row).unwrap_or_default(),
                birth_country: text(&country, row),
                birth_date: text(&birth_date, row),
                sex: text(&sex, row),
                full_name: text(&full_name, row),
            });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Int64Array, RecordBatch, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::{Category, Sex, USA};

    const CSV: &str = "\
year,category,prize,full_name,birth_date,birth_country,sex
1901,Chemistry,The Nobel Prize in Chemistry 1901,Jacobus Henricus van 't Hoff,1852-08-30,Netherlands,Male
1901,Peace,The Nobel Peace Prize 1901,Institut de droit international,,Belgium,
1911,Chemistry,The Nobel Prize in Chemistry 1911,Marie Curie,1867-11-07,Russian Empire (Poland),Female
1972,Economics,The Sveriges Riksbank Prize 1972,Kenneth J. Arrow,1921-08-23,United States of America,Male
";

    #[test]
    fn csv_drops_rows_without_birth_date_and_keeps_order() {
        let ds = parse_dataset(DataFormat::Csv, Bytes::from_static(CSV.as_bytes())).unwrap();
        assert_eq!(ds.len(), 3);

        let years: Vec<i32> = ds.records().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1901, 1911, 1972]);
        assert!(ds.records().iter().all(|r| r.decade % 10 == 0 && r.decade <= r.year));

        let curie = &ds.records()[1];
        assert_eq!(curie.category, Category::Chemistry);
        assert_eq!(curie.sex, Some(Sex::Female));
        assert_eq!(curie.age, 44);
        assert_eq!(curie.full_name.as_deref(), Some("Marie Curie"));

        assert!(ds.records()[2].usa_born_winner);
        assert_eq!(ds.records()[2].birth_country.as_deref(), Some(USA));
    }

    #[test]
    fn csv_missing_columns_is_a_schema_error() {
        let data = "year,category,birth_date\n1901,Physics,1845-03-27\n";
        match parse_dataset(DataFormat::Csv, Bytes::from_static(data.as_bytes())) {
            Err(LoadError::Schema { missing }) => assert_eq!(missing, vec!["birth_country", "sex"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn csv_bad_year_is_malformed() {
        let data = "year,category,birth_date,birth_country,sex\nnineteen,Physics,1845-03-27,Germany,Male\n";
        assert!(matches!(
            parse_dataset(DataFormat::Csv, Bytes::from_static(data.as_bytes())),
            Err(LoadError::Malformed { format: DataFormat::Csv, .. })
        ));
    }

    #[test]
    fn json_records() {
        let data = r#"[
            {"year": 1903, "category": "Physics", "birth_date": "1867-11-07",
             "birth_country": "Russian Empire (Poland)", "sex": "Female", "laureate_id": 6},
            {"year": 1917, "category": "Peace", "birth_date": null,
             "birth_country": null, "sex": null}
        ]"#;
        let ds = parse_dataset(DataFormat::Json, Bytes::from_static(data.as_bytes())).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].decade, 1900);
    }

    #[test]
    fn json_rejects_non_array_and_missing_columns() {
        assert!(matches!(
            parse_dataset(DataFormat::Json, Bytes::from_static(b"{\"year\": 1901}")),
            Err(LoadError::Malformed { .. })
        ));
        assert!(matches!(
            parse_dataset(DataFormat::Json, Bytes::from_static(b"[{\"year\": 1901}]")),
            Err(LoadError::Schema { .. })
        ));
    }

    #[test]
    fn parquet_round_trip_through_arrow_writer() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("year", DataType::Int64, false),
            Field::new("category", DataType::Utf8, false),
            Field::new("birth_date", DataType::Utf8, true),
            Field::new("birth_country", DataType::Utf8, true),
            Field::new("sex", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2009, 2014])),
                Arc::new(StringArray::from(vec!["Economics", "Peace"])),
                Arc::new(StringArray::from(vec![Some("1933-08-07"), Some("1997-07-12")])),
                Arc::new(StringArray::from(vec![Some(USA), Some("Pakistan")])),
                Arc::new(StringArray::from(vec![Some("Female"), Some("Female")])),
            ],
        )
        .unwrap();

        let mut buf = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buf, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = parse_dataset(DataFormat::Parquet, Bytes::from(buf)).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].age, 76);
        assert_eq!(ds.records()[1].age, 17);
        assert_eq!(ds.records()[1].decade, 2010);
        assert_eq!(ds.age_bounds(), Some((17, 76)));
    }

    #[test]
    fn load_dataset_reads_local_files() {
        let path = std::env::temp_dir().join(format!("nobel-explorer-{}.csv", std::process::id()));
        std::fs::write(&path, CSV).unwrap();
        let ds = load_dataset(&DataSource::File(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 3);
    }
}
