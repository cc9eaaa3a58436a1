use std::ops::RangeInclusive;

use super::model::{AwardDataset, AwardRecord, Category, Sex};

// ---------------------------------------------------------------------------
// FilterSet – the predicates a page can activate
// ---------------------------------------------------------------------------

/// Active predicates for one view. `None` means "no constraint".
/// A record is kept when it satisfies every active predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub years: Option<RangeInclusive<i32>>,
    pub category: Option<Category>,
    pub ages: Option<RangeInclusive<i32>>,
    pub sex: Option<Sex>,
}

impl FilterSet {
    pub fn years(mut self, lo: i32, hi: i32) -> Self {
        self.years = Some(lo..=hi);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn ages(mut self, lo: i32, hi: i32) -> Self {
        self.ages = Some(lo..=hi);
        self
    }

    pub fn sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn matches(&self, rec: &AwardRecord) -> bool {
        self.years.as_ref().map_or(true, |r| r.contains(&rec.year))
            && self.category.map_or(true, |c| c == rec.category)
            && self.ages.as_ref().map_or(true, |r| r.contains(&rec.age))
            && self.sex.map_or(true, |s| Some(s) == rec.sex)
    }
}

// ---------------------------------------------------------------------------
// View – a filtered subsequence of the dataset
// ---------------------------------------------------------------------------

/// Borrowed subsequence of a dataset, in dataset order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a AwardDataset,
    indices: Vec<usize>,
}

impl<'a> View<'a> {
    /// A view over every record.
    pub fn all(dataset: &'a AwardDataset) -> Self {
        View {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a AwardRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}

/// Return the records that pass every active predicate in `filters`.
pub fn filter_by<'a>(dataset: &'a AwardDataset, filters: &FilterSet) -> View<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.matches(rec))
        .map(|(i, _)| i)
        .collect();

    View { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::raw;

    fn dataset() -> AwardDataset {
        AwardDataset::from_records(
            [
                raw(1901, "Physics", Some("Germany"), Some("1845-03-27"), "Male"),
                raw(1911, "Chemistry", Some("Poland"), Some("1867-11-07"), "Female"),
                raw(1964, "Peace", Some("United States of America"), Some("1929-01-15"), "Male"),
                raw(2014, "Peace", Some("Pakistan"), Some("1997-07-12"), "Female"),
            ]
            .into_iter()
            .map(|r| crate::data::model::AwardRecord::derive(r).unwrap())
            .collect(),
        )
    }

    #[test]
    fn no_predicates_keeps_everything() {
        let ds = dataset();
        assert_eq!(filter_by(&ds, &FilterSet::default()).len(), 4);
        assert_eq!(View::all(&ds).len(), 4);
    }

    #[test]
    fn year_range_is_inclusive_and_bounds_hold() {
        let ds = dataset();
        let view = filter_by(&ds, &FilterSet::default().years(1911, 1964));
        assert_eq!(view.indices(), &[1, 2]);
        assert!(view.iter().all(|r| (1911..=1964).contains(&r.year)));
    }

    #[test]
    fn predicates_combine_with_and() {
        let ds = dataset();
        let view = filter_by(&ds, &FilterSet::default().category(Category::Peace).sex(Sex::Female));
        assert_eq!(view.indices(), &[3]);

        let view = filter_by(&ds, &FilterSet::default().ages(30, 50).sex(Sex::Male));
        assert_eq!(view.indices(), &[2]);
    }

    #[test]
    fn empty_result_is_valid() {
        let ds = dataset();
        let view = filter_by(&ds, &FilterSet::default().years(1800, 1850));
        assert!(view.is_empty());
        assert_eq!(ds.len(), 4);
    }
}
