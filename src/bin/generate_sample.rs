use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CATEGORIES: [&str; 6] = ["Chemistry", "Physics", "Medicine", "Peace", "Literature", "Economics"];

/// Birth countries with a rough weight each.
const COUNTRIES: [(&str, u32); 10] = [
    ("United States of America", 30),
    ("United Kingdom", 10),
    ("Germany", 9),
    ("France", 6),
    ("Sweden", 3),
    ("Japan", 3),
    ("Russia", 3),
    ("Netherlands", 2),
    ("Italy", 2),
    ("Switzerland", 2),
];

struct Row {
    year: i64,
    category: &'static str,
    full_name: String,
    birth_date: Option<String>,
    birth_country: Option<&'static str>,
    sex: Option<&'static str>,
}

fn pick_country(rng: &mut StdRng, year: i64) -> &'static str {
    // US share grows over the century, like the real data.
    let us_boost = ((year - 1900) as f64 / 116.0 * 40.0) as u32;
    let total: u32 = COUNTRIES.iter().map(|(_, w)| w).sum::<u32>() + us_boost;
    let mut ticket = rng.random_range(0..total);
    if ticket < us_boost {
        return COUNTRIES[0].0;
    }
    ticket -= us_boost;
    for (name, weight) in COUNTRIES {
        if ticket < weight {
            return name;
        }
        ticket -= weight;
    }
    COUNTRIES[0].0
}

fn generate(rng: &mut StdRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in 1901..=2016i64 {
        for &category in &CATEGORIES {
            if category == "Economics" && year < 1969 {
                continue;
            }
            let laureates = rng.random_range(1..=3);
            for n in 0..laureates {
                // A few Peace prizes go to organisations: no birth date, no sex.
                if category == "Peace" && rng.random_bool(0.1) {
                    rows.push(Row {
                        year,
                        category,
                        full_name: format!("Organisation {year}-{n}"),
                        birth_date: None,
                        birth_country: None,
                        sex: None,
                    });
                    continue;
                }
                let age = rng.random_range(30..=85);
                let birth_date = format!(
                    "{}-{:02}-{:02}",
                    year - age,
                    rng.random_range(1..=12),
                    rng.random_range(1..=28)
                );
                let sex = if rng.random_bool(0.06) { "Female" } else { "Male" };
                rows.push(Row {
                    year,
                    category,
                    full_name: format!("Laureate {year}-{category}-{n}"),
                    birth_date: Some(birth_date),
                    birth_country: Some(pick_country(rng, year)),
                    sex: Some(sex),
                });
            }
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["year", "category", "full_name", "birth_date", "birth_country", "sex"])?;
    for r in rows {
        writer.write_record([
            r.year.to_string().as_str(),
            r.category,
            r.full_name.as_str(),
            r.birth_date.as_deref().unwrap_or(""),
            r.birth_country.unwrap_or(""),
            r.sex.unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int64, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("full_name", DataType::Utf8, false),
        Field::new("birth_date", DataType::Utf8, true),
        Field::new("birth_country", DataType::Utf8, true),
        Field::new("sex", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.category))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.full_name.as_str()))),
            Arc::new(StringArray::from(rows.iter().map(|r| r.birth_date.as_deref()).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.birth_country).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.sex).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_nobel.csv")?;
    write_parquet(&rows, "sample_nobel.parquet")?;

    println!(
        "Wrote {} award rows to sample_nobel.csv and sample_nobel.parquet",
        rows.len()
    );
    Ok(())
}
