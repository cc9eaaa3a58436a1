use clap::{Parser, ValueEnum};

use crate::data::aggregate::{DEFAULT_AGE_BINS, DEFAULT_TOP_K};
use crate::data::filter::FilterSet;
use crate::data::model::{AwardDataset, Category, Sex};
use crate::data::source::DEFAULT_SOURCE;

// ---------------------------------------------------------------------------
// Gender selector shared by the CLI and the age page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Gender {
    Female,
    Male,
    #[default]
    Both,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Both];

    /// The sex predicate, `None` for both.
    pub fn sex(self) -> Option<Sex> {
        match self {
            Gender::Female => Some(Sex::Female),
            Gender::Male => Some(Sex::Male),
            Gender::Both => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Both => "Both",
        }
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Clone)]
#[command(name = "nobel-explorer")]
#[command(about = "Explore Nobel Prize laureates by country, category, age and gender")]
#[command(version)]
pub struct Args {
    /// Dataset location: http(s) URL or local .csv / .json / .parquet path
    #[arg(short, long, env = "NOBEL_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Number of bins in the age histogram
    #[arg(long, default_value_t = DEFAULT_AGE_BINS)]
    pub bins: usize,

    /// Number of countries in the country charts
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top: usize,

    /// Print a JSON report to stdout instead of opening the window
    #[arg(long)]
    pub report: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Report filters
    // ─────────────────────────────────────────────────────────────────────────
    /// First award year (inclusive)
    #[arg(long, requires = "report")]
    pub from_year: Option<i32>,

    /// Last award year (inclusive)
    #[arg(long, requires = "report")]
    pub to_year: Option<i32>,

    /// Prize category, e.g. "Physics"
    #[arg(long, requires = "report")]
    pub category: Option<Category>,

    /// Youngest age at award (inclusive)
    #[arg(long, requires = "report")]
    pub min_age: Option<i32>,

    /// Oldest age at award (inclusive)
    #[arg(long, requires = "report")]
    pub max_age: Option<i32>,

    /// Restrict to one sex; "both" also splits the age histogram by sex
    #[arg(long, value_enum, default_value_t = Gender::Both, requires = "report")]
    pub gender: Gender,
}

impl Args {
    /// Turn the report flags into predicates. A half-open range is closed
    /// with the dataset's own bound.
    pub fn filters(&self, dataset: &AwardDataset) -> FilterSet {
        let mut filters = FilterSet::default();

        if self.from_year.is_some() || self.to_year.is_some() {
            let (lo, hi) = dataset.year_bounds().unwrap_or((i32::MIN, i32::MAX));
            filters = filters.years(self.from_year.unwrap_or(lo), self.to_year.unwrap_or(hi));
        }
        if self.min_age.is_some() || self.max_age.is_some() {
            let (lo, hi) = dataset.age_bounds().unwrap_or((i32::MIN, i32::MAX));
            filters = filters.ages(self.min_age.unwrap_or(lo), self.max_age.unwrap_or(hi));
        }
        if let Some(category) = self.category {
            filters = filters.category(category);
        }
        if let Some(sex) = self.gender.sex() {
            filters = filters.sex(sex);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::raw;
    use crate::data::model::AwardRecord;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["nobel-explorer"]).unwrap();
        assert_eq!(args.source, DEFAULT_SOURCE);
        assert_eq!(args.bins, DEFAULT_AGE_BINS);
        assert_eq!(args.top, DEFAULT_TOP_K);
        assert!(!args.report);
        assert_eq!(args.gender, Gender::Both);
        assert_eq!(args.filters(&AwardDataset::default()), FilterSet::default());
    }

    #[test]
    fn report_flags_become_filters() {
        let ds = AwardDataset::from_records(vec![
            AwardRecord::derive(raw(1901, "Physics", None, Some("1845-03-27"), "Male")).unwrap(),
            AwardRecord::derive(raw(2016, "Peace", None, Some("1951-02-01"), "Male")).unwrap(),
        ]);
        let args = Args::try_parse_from([
            "nobel-explorer",
            "--report",
            "--from-year",
            "1950",
            "--category",
            "peace",
            "--gender",
            "female",
        ])
        .unwrap();

        let filters = args.filters(&ds);
        assert_eq!(filters.years, Some(1950..=2016));
        assert_eq!(filters.category, Some(Category::Peace));
        assert_eq!(filters.sex, Some(Sex::Female));
        assert_eq!(filters.ages, None);
    }

    #[test]
    fn filter_flags_require_report() {
        assert!(Args::try_parse_from(["nobel-explorer", "--from-year", "1950"]).is_err());
        assert!(Args::try_parse_from(["nobel-explorer", "--gender", "female"]).is_err());
        assert!(Args::try_parse_from(["nobel-explorer", "--report", "--category", "Astronomy"]).is_err());
    }
}
