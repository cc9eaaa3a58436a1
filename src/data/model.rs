use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Country string that marks a US-born laureate.
pub const USA: &str = "United States of America";

// ---------------------------------------------------------------------------
// Category / Sex – the two closed vocabularies in the dataset
// ---------------------------------------------------------------------------

/// Prize category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Chemistry,
    Physics,
    Medicine,
    Peace,
    Literature,
    Economics,
}

impl Category {
    /// Every category, in the order the dashboard lists its counters.
    pub const ALL: [Category; 6] = [
        Category::Chemistry,
        Category::Physics,
        Category::Medicine,
        Category::Peace,
        Category::Literature,
        Category::Economics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Chemistry => "Chemistry",
            Category::Physics => "Physics",
            Category::Medicine => "Medicine",
            Category::Peace => "Peace",
            Category::Literature => "Literature",
            Category::Economics => "Economics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sex::ALL
            .into_iter()
            .find(|x| x.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sex '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// RawAward – one row as read from the source, before derivation
// ---------------------------------------------------------------------------

/// A source row restricted to the columns the pipeline reads.
/// Every loader produces these; unused columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAward {
    pub year: i32,
    pub category: String,
    pub birth_country: Option<String>,
    pub birth_date: Option<String>,
    pub sex: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Columns a source must carry for the pipeline to run.
pub const REQUIRED_COLUMNS: [&str; 5] = ["year", "category", "birth_country", "birth_date", "sex"];

/// Why a raw row did not make it into the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingBirthDate,
    InvalidBirthDate(String),
    UnknownCategory(String),
}

// ---------------------------------------------------------------------------
// AwardRecord – one derived row
// ---------------------------------------------------------------------------

/// One award with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardRecord {
    pub year: i32,
    pub category: Category,
    pub birth_country: Option<String>,
    pub birth_date: NaiveDate,
    pub sex: Option<Sex>,
    pub full_name: Option<String>,
    /// `floor(year / 10) * 10`.
    pub decade: i32,
    /// Award year minus birth year. Not validated to be non-negative.
    pub age: i32,
    pub usa_born_winner: bool,
}

impl AwardRecord {
    /// Validate a raw row and compute the derived columns.
    pub fn derive(raw: RawAward) -> Result<Self, Rejection> {
        let birth_date = match raw.birth_date.as_deref().map(str::trim) {
            None | Some("") => return Err(Rejection::MissingBirthDate),
            Some(s) => parse_birth_date(s).ok_or_else(|| Rejection::InvalidBirthDate(s.to_string()))?,
        };
        let category = raw
            .category
            .parse::<Category>()
            .map_err(|_| Rejection::UnknownCategory(raw.category.clone()))?;

        let birth_country = raw
            .birth_country
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let usa_born_winner = birth_country.as_deref() == Some(USA);

        Ok(AwardRecord {
            year: raw.year,
            category,
            birth_country,
            birth_date,
            sex: raw.sex.as_deref().and_then(|s| s.parse().ok()),
            full_name: raw.full_name.filter(|n| !n.trim().is_empty()),
            decade: raw.year.div_euclid(10) * 10,
            age: raw.year - birth_date.year(),
            usa_born_winner,
        })
    }
}

/// Accepts plain ISO dates plus the datetime and slash forms found in exports.
fn parse_birth_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

// ---------------------------------------------------------------------------
// AwardDataset – the complete derived dataset
// ---------------------------------------------------------------------------

/// The full derived dataset. Never mutated once built.
#[derive(Debug, Clone, Default)]
pub struct AwardDataset {
    records: Vec<AwardRecord>,
}

impl AwardDataset {
    pub fn from_records(records: Vec<AwardRecord>) -> Self {
        AwardDataset { records }
    }

    pub fn records(&self) -> &[AwardRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` award year, `None` when empty.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        bounds(self.records.iter().map(|r| r.year))
    }

    /// `(min, max)` age at award, `None` when empty.
    pub fn age_bounds(&self) -> Option<(i32, i32)> {
        bounds(self.records.iter().map(|r| r.age))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|r| r.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Number of distinct birth countries.
    pub fn country_count(&self) -> usize {
        self.records
            .iter()
            .filter_map(|r| r.birth_country.as_deref())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

fn bounds(values: impl Iterator<Item = i32>) -> Option<(i32, i32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn raw(year: i32, category: &str, country: Option<&str>, birth: Option<&str>, sex: &str) -> RawAward {
        RawAward {
            year,
            category: category.to_string(),
            birth_country: country.map(str::to_string),
            birth_date: birth.map(str::to_string),
            sex: Some(sex.to_string()),
            full_name: None,
        }
    }

    #[test]
    fn derive_computes_decade_age_and_usa_flag() {
        let rec = AwardRecord::derive(raw(1987, "Physics", Some(USA), Some("1931-05-02"), "Male")).unwrap();
        assert_eq!(rec.decade, 1980);
        assert_eq!(rec.age, 56);
        assert!(rec.usa_born_winner);
        assert_eq!(rec.category, Category::Physics);
        assert_eq!(rec.sex, Some(Sex::Male));
    }

    #[test]
    fn derive_rejects_missing_or_garbled_birth_date() {
        assert_eq!(
            AwardRecord::derive(raw(1901, "Peace", None, None, "Male")),
            Err(Rejection::MissingBirthDate)
        );
        assert_eq!(
            AwardRecord::derive(raw(1901, "Peace", None, Some("  "), "Male")),
            Err(Rejection::MissingBirthDate)
        );
        assert!(matches!(
            AwardRecord::derive(raw(1901, "Peace", None, Some("1850-00-00"), "Male")),
            Err(Rejection::InvalidBirthDate(_))
        ));
    }

    #[test]
    fn derive_rejects_unknown_category() {
        assert!(matches!(
            AwardRecord::derive(raw(1901, "Astronomy", None, Some("1850-01-01"), "Male")),
            Err(Rejection::UnknownCategory(c)) if c == "Astronomy"
        ));
    }

    #[test]
    fn birth_date_formats() {
        for s in ["1852-08-30", "1852-08-30 00:00:00", "1852-08-30T00:00:00", "1852/08/30", "08/30/1852"] {
            assert_eq!(parse_birth_date(s), NaiveDate::from_ymd_opt(1852, 8, 30), "{s}");
        }
    }

    #[test]
    fn missing_sex_and_blank_country_become_none() {
        let mut r = raw(1950, "Chemistry", Some(""), Some("1900-01-01"), "");
        r.sex = None;
        let rec = AwardRecord::derive(r).unwrap();
        assert_eq!(rec.birth_country, None);
        assert_eq!(rec.sex, None);
        assert!(!rec.usa_born_winner);
    }

    #[test]
    fn dataset_bounds_and_categories() {
        let ds = AwardDataset::from_records(
            [
                raw(1905, "Peace", Some("France"), Some("1850-01-01"), "Female"),
                raw(2001, "Physics", Some(USA), Some("1950-01-01"), "Male"),
                raw(1950, "Peace", Some("France"), Some("1920-01-01"), "Male"),
            ]
            .into_iter()
            .map(|r| AwardRecord::derive(r).unwrap())
            .collect(),
        );
        assert_eq!(ds.year_bounds(), Some((1905, 2001)));
        assert_eq!(ds.age_bounds(), Some((30, 55)));
        assert_eq!(ds.categories(), vec![Category::Peace, Category::Physics]);
        assert_eq!(ds.country_count(), 2);
        assert_eq!(AwardDataset::default().year_bounds(), None);
    }
}
