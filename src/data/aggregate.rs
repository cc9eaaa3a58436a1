//! Grouped counts, means and histograms over a [`View`].
//!
//! Every aggregate first builds an explicit key → members grouping and then
//! reduces each group on its own. None of them fail: absent keys count zero and
//! an empty view yields empty or all-zero output.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::View;
use super::model::{AwardDataset, AwardRecord, Category, Sex};

/// How many countries the country charts show.
pub const DEFAULT_TOP_K: usize = 10;
/// Bin count of the age histogram.
pub const DEFAULT_AGE_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Top-K by country
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Count records per birth country and keep the `k` largest groups.
///
/// Ties keep the order in which the countries first appear in the view.
/// Records without a birth country are not grouped.
pub fn top_countries(view: &View<'_>, k: usize) -> Vec<CountryCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&AwardRecord>> = HashMap::new();

    for rec in view.iter() {
        let Some(country) = rec.birth_country.as_deref() else {
            continue;
        };
        groups
            .entry(country)
            .or_insert_with(|| {
                order.push(country);
                Vec::new()
            })
            .push(rec);
    }

    let mut counts: Vec<CountryCount> = order
        .into_iter()
        .map(|country| CountryCount {
            country: country.to_string(),
            count: groups.get(country).map_or(0, Vec::len),
        })
        .collect();

    // `sort_by` is stable, so equal counts stay in encounter order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    counts
}

// ---------------------------------------------------------------------------
// Decade trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeShare {
    pub decade: i32,
    /// Share of US-born laureates in this decade, in `[0, 1]`.
    pub usa_share: f64,
    pub total: usize,
}

/// Mean of `usa_born_winner` per decade over the whole dataset, ascending.
///
/// Takes the dataset rather than a view: the long-run trend is shown
/// regardless of the year range selected on the page.
pub fn decade_trend(dataset: &AwardDataset) -> Vec<DecadeShare> {
    let mut groups: BTreeMap<i32, Vec<&AwardRecord>> = BTreeMap::new();
    for rec in dataset.records() {
        groups.entry(rec.decade).or_default().push(rec);
    }

    groups
        .into_iter()
        .map(|(decade, members)| {
            let usa = members.iter().filter(|r| r.usa_born_winner).count();
            DecadeShare {
                decade,
                usa_share: usa as f64 / members.len() as f64,
                total: members.len(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// Per-category counts; every category in [`Category::ALL`] is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts(BTreeMap<Category, usize>);

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// `(category, count)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

pub fn category_counts(view: &View<'_>) -> CategoryCounts {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.into_iter().map(|c| (c, 0)).collect();
    for rec in view.iter() {
        *counts.entry(rec.category).or_insert(0) += 1;
    }
    CategoryCounts(counts)
}

// ---------------------------------------------------------------------------
// Sex counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SexCounts {
    pub female: usize,
    pub male: usize,
}

impl SexCounts {
    pub fn get(&self, sex: Sex) -> usize {
        match sex {
            Sex::Female => self.female,
            Sex::Male => self.male,
        }
    }
}

pub fn sex_counts(view: &View<'_>) -> SexCounts {
    view.iter().fold(SexCounts::default(), |mut acc, rec| {
        match rec.sex {
            Some(Sex::Female) => acc.female += 1,
            Some(Sex::Male) => acc.male += 1,
            None => {}
        }
        acc
    })
}

// ---------------------------------------------------------------------------
// Age histogram
// ---------------------------------------------------------------------------

/// One bar series of an [`AgeHistogram`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramSeries {
    /// `None` for the unsplit series.
    pub sex: Option<Sex>,
    pub counts: Vec<usize>,
}

impl HistogramSeries {
    pub fn label(&self) -> &'static str {
        self.sex.map_or("All", Sex::as_str)
    }
}

/// Equal-width age bins shared by every series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeHistogram {
    /// Lower edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub series: Vec<HistogramSeries>,
}

impl AgeHistogram {
    pub fn bin_count(&self) -> usize {
        self.series.first().map_or(0, |s| s.counts.len())
    }

    /// Lower edge of bin `i`.
    pub fn bin_start(&self, i: usize) -> f64 {
        self.start + i as f64 * self.bin_width
    }

    pub fn total(&self) -> usize {
        self.series.iter().flat_map(|s| s.counts.iter()).sum()
    }
}

/// Partition the view's ages into `bins` equal-width bins spanning
/// `[min_age, max_age]`; the last bin is closed on the right.
///
/// With `split_by_sex` there is one series per sex and records without a sex
/// are left out; otherwise a single series counts every record.
/// An empty view (or `bins == 0`) gives a histogram with no bins.
pub fn age_histogram(view: &View<'_>, bins: usize, split_by_sex: bool) -> AgeHistogram {
    let members: Vec<&AwardRecord> = view
        .iter()
        .filter(|r| !split_by_sex || r.sex.is_some())
        .collect();

    let bounds = members.iter().fold(None, |acc: Option<(i32, i32)>, r| match acc {
        None => Some((r.age, r.age)),
        Some((lo, hi)) => Some((lo.min(r.age), hi.max(r.age))),
    });
    let Some((lo, hi)) = bounds.filter(|_| bins > 0) else {
        return AgeHistogram {
            start: 0.0,
            bin_width: 0.0,
            series: Vec::new(),
        };
    };

    let span = i64::from(hi) - i64::from(lo);
    let bin_width = if span > 0 { span as f64 / bins as f64 } else { 1.0 };
    // Integer arithmetic keeps ages on a bin edge in the upper bin.
    let bin_of = |age: i32| {
        if span == 0 {
            return 0;
        }
        let offset = i64::from(age) - i64::from(lo);
        ((offset * bins as i64 / span) as usize).min(bins - 1)
    };

    let mut groups: BTreeMap<Option<Sex>, Vec<&AwardRecord>> = BTreeMap::new();
    if split_by_sex {
        for sex in Sex::ALL {
            groups.insert(Some(sex), Vec::new());
        }
    }
    for rec in members {
        let key = if split_by_sex { rec.sex } else { None };
        groups.entry(key).or_default().push(rec);
    }

    let series = groups
        .into_iter()
        .map(|(sex, members)| {
            let mut counts = vec![0usize; bins];
            for rec in members {
                counts[bin_of(rec.age)] += 1;
            }
            HistogramSeries { sex, counts }
        })
        .collect();

    AgeHistogram {
        start: f64::from(lo),
        bin_width,
        series,
    }
}

// ---------------------------------------------------------------------------
// Youngest / oldest laureate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeExtremes<'a> {
    pub youngest: &'a AwardRecord,
    pub oldest: &'a AwardRecord,
}

/// Youngest and oldest record in the view; the first one wins on ties.
pub fn age_extremes<'a>(view: &View<'a>) -> Option<AgeExtremes<'a>> {
    let mut iter = view.iter();
    let first = iter.next()?;
    let (youngest, oldest) = iter.fold((first, first), |(young, old), rec| {
        (
            if rec.age < young.age { rec } else { young },
            if rec.age > old.age { rec } else { old },
        )
    });
    Some(AgeExtremes { youngest, oldest })
}
