use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::Gender;
use crate::data::aggregate::{
    age_extremes, age_histogram, category_counts, decade_trend, sex_counts, top_countries,
    AgeHistogram, CategoryCounts, CountryCount, DecadeShare, SexCounts,
};
use crate::data::filter::{filter_by, FilterSet, View};
use crate::data::model::{AwardDataset, AwardRecord, Category};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Introduction,
    ByCountry,
    ByCategory,
    ByAgeAndGender,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Introduction,
        Page::ByCountry,
        Page::ByCategory,
        Page::ByAgeAndGender,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Introduction => "Introduction",
            Page::ByCountry => "By Country",
            Page::ByCategory => "By Category",
            Page::ByAgeAndGender => "By Age and Gender",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-page controls and their cached aggregates
// ---------------------------------------------------------------------------

/// Year slider + top birth countries.
#[derive(Debug, Clone)]
pub struct CountryPage {
    pub years: (i32, i32),
    pub top: Vec<CountryCount>,
    pub colors: ColorMap<String>,
}

/// Year slider + category selector.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub years: (i32, i32),
    pub category: Category,
    pub counts: CategoryCounts,
    pub top: Vec<CountryCount>,
}

/// Age slider + gender selector.
#[derive(Debug, Clone)]
pub struct AgePage {
    pub ages: (i32, i32),
    pub gender: Gender,
    pub histogram: AgeHistogram,
    pub sex_counts: SexCounts,
    /// `(youngest, oldest)` in the selected age range.
    pub extremes: Option<(AwardRecord, AwardRecord)>,
}

/// Everything derived from the dataset once it is loaded.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Arc<AwardDataset>,
    pub year_bounds: (i32, i32),
    pub age_bounds: (i32, i32),
    /// Categories offered by the selector, in first-seen order.
    pub categories: Vec<Category>,
    pub decade_trend: Vec<DecadeShare>,
    pub country: CountryPage,
    pub category: CategoryPage,
    pub age: AgePage,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub page: Page,

    /// `None` until the dataset has loaded.
    pub loaded: Option<Loaded>,

    pub top_k: usize,
    pub age_bins: usize,

    /// Where the data comes from, for the sidebar.
    pub source: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: String, top_k: usize, age_bins: usize) -> Self {
        Self {
            page: Page::default(),
            loaded: None,
            top_k,
            age_bins,
            source,
            status_message: None,
        }
    }

    /// Ingest the loaded dataset, reset every control to its full range and
    /// compute the initial aggregates.
    pub fn set_dataset(&mut self, dataset: Arc<AwardDataset>) {
        let year_bounds = dataset.year_bounds().unwrap_or((0, 0));
        let age_bounds = dataset.age_bounds().unwrap_or((0, 0));
        let mut categories = dataset.categories();
        if categories.is_empty() {
            categories = Category::ALL.to_vec();
        }

        let mut loaded = Loaded {
            decade_trend: decade_trend(&dataset),
            country: CountryPage {
                years: year_bounds,
                top: Vec::new(),
                colors: ColorMap::new(std::iter::empty()),
            },
            category: CategoryPage {
                years: year_bounds,
                category: categories[0],
                counts: category_counts(&View::all(&dataset)),
                top: Vec::new(),
            },
            age: AgePage {
                ages: age_bounds,
                gender: Gender::Both,
                histogram: AgeHistogram {
                    start: 0.0,
                    bin_width: 0.0,
                    series: Vec::new(),
                },
                sex_counts: SexCounts::default(),
                extremes: None,
            },
            dataset,
            year_bounds,
            age_bounds,
            categories,
        };
        loaded.refresh_country(self.top_k);
        loaded.refresh_category(self.top_k);
        loaded.refresh_age(self.age_bins);

        self.loaded = Some(loaded);
        self.status_message = None;
    }
}

impl Loaded {
    /// Re-run filter → aggregate for the country page.
    pub fn refresh_country(&mut self, top_k: usize) {
        let (lo, hi) = self.country.years;
        let view = filter_by(&self.dataset, &FilterSet::default().years(lo, hi));
        self.country.top = top_countries(&view, top_k);
        let keys: Vec<String> = self.country.top.iter().map(|c| c.country.clone()).collect();
        self.country.colors = ColorMap::new(&keys);
    }

    pub fn refresh_category(&mut self, top_k: usize) {
        let (lo, hi) = self.category.years;
        let years = FilterSet::default().years(lo, hi);
        self.category.counts = category_counts(&filter_by(&self.dataset, &years));

        let in_field = filter_by(&self.dataset, &years.category(self.category.category));
        self.category.top = top_countries(&in_field, top_k);
    }

    pub fn refresh_age(&mut self, bins: usize) {
        let (lo, hi) = self.age.ages;
        let ages = FilterSet::default().ages(lo, hi);

        // Counters and extremes cover both sexes; the histogram follows the selector.
        let both = filter_by(&self.dataset, &ages);
        self.age.sex_counts = sex_counts(&both);
        self.age.extremes = age_extremes(&both).map(|e| (e.youngest.clone(), e.oldest.clone()));

        let gender = self.age.gender;
        let selected = match gender.sex() {
            Some(sex) => filter_by(&self.dataset, &ages.sex(sex)),
            None => both,
        };
        self.age.histogram = age_histogram(&selected, bins, gender.sex().is_none());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::raw;
    use crate::data::model::Sex;

    fn state() -> AppState {
        let ds = AwardDataset::from_records(
            [
                raw(1903, "Physics", Some("France"), Some("1867-11-07"), "Female"),
                raw(1911, "Chemistry", Some("France"), Some("1867-11-07"), "Female"),
                raw(1921, "Physics", Some("Germany"), Some("1879-03-14"), "Male"),
                raw(2014, "Peace", Some("Pakistan"), Some("1997-07-12"), "Female"),
            ]
            .into_iter()
            .map(|r| AwardRecord::derive(r).unwrap())
            .collect(),
        );
        let mut state = AppState::new("test".into(), 10, 5);
        state.set_dataset(Arc::new(ds));
        state
    }

    #[test]
    fn set_dataset_opens_every_control_fully() {
        let state = state();
        let loaded = state.loaded.as_ref().unwrap();
        assert_eq!(loaded.year_bounds, (1903, 2014));
        assert_eq!(loaded.country.years, (1903, 2014));
        assert_eq!(loaded.age_bounds, (17, 44));
        assert_eq!(loaded.categories[0], Category::Physics);
        assert_eq!(loaded.country.top[0].country, "France");
        assert_eq!(loaded.category.top.len(), 2);
        assert_eq!(loaded.age.sex_counts.get(Sex::Female), 3);
        assert_eq!(loaded.age.histogram.series.len(), 2);
        assert_eq!(loaded.decade_trend.len(), 4);
    }

    #[test]
    fn refresh_follows_controls() {
        let mut state = state();
        let loaded = state.loaded.as_mut().unwrap();

        loaded.category.years = (1900, 1915);
        loaded.category.category = Category::Chemistry;
        loaded.refresh_category(10);
        assert_eq!(loaded.category.counts.get(Category::Physics), 1);
        assert_eq!(loaded.category.counts.get(Category::Peace), 0);
        assert_eq!(loaded.category.top, vec![CountryCount { country: "France".into(), count: 1 }]);

        loaded.age.gender = Gender::Male;
        loaded.refresh_age(5);
        assert_eq!(loaded.age.histogram.series.len(), 1);
        assert_eq!(loaded.age.histogram.total(), 1);
        let (youngest, oldest) = loaded.age.extremes.clone().unwrap();
        assert_eq!(youngest.age, 17);
        assert_eq!(oldest.age, 44);

        let trend_before = loaded.decade_trend.clone();
        loaded.country.years = (2000, 2020);
        loaded.refresh_country(10);
        assert_eq!(loaded.country.top.len(), 1);
        assert_eq!(loaded.decade_trend, trend_before);
    }
}
