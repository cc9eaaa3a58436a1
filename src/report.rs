use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::{
    age_extremes, age_histogram, category_counts, decade_trend, sex_counts, top_countries,
    AgeExtremes, AgeHistogram, CategoryCounts, CountryCount, DecadeShare, SexCounts,
};
use crate::data::filter::{filter_by, FilterSet};
use crate::data::model::AwardDataset;

/// Every aggregate for one filter set, ready to serialise.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub dataset_records: usize,
    pub year_bounds: Option<(i32, i32)>,
    pub age_bounds: Option<(i32, i32)>,
    pub matching_records: usize,
    pub top_countries: Vec<CountryCount>,
    /// Always over the whole dataset.
    pub decade_trend: Vec<DecadeShare>,
    pub category_counts: CategoryCounts,
    pub sex_counts: SexCounts,
    pub age_histogram: AgeHistogram,
    pub age_extremes: Option<AgeExtremes<'a>>,
}

impl<'a> Report<'a> {
    pub fn build(dataset: &'a AwardDataset, filters: &FilterSet, top: usize, bins: usize) -> Self {
        let view = filter_by(dataset, filters);
        if view.is_empty() {
            log::warn!("No records match the report filters");
        }
        Report {
            dataset_records: dataset.len(),
            year_bounds: dataset.year_bounds(),
            age_bounds: dataset.age_bounds(),
            matching_records: view.len(),
            top_countries: top_countries(&view, top),
            decade_trend: decade_trend(dataset),
            category_counts: category_counts(&view),
            sex_counts: sex_counts(&view),
            age_histogram: age_histogram(&view, bins, filters.sex.is_none()),
            age_extremes: age_extremes(&view),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialising report")
    }
}
