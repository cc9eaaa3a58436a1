use std::cell::OnceCell;
use std::sync::Arc;

use super::error::LoadError;
use super::loader::load_dataset;
use super::model::AwardDataset;
use super::source::DataSource;

/// Something that can produce the award dataset from scratch.
pub trait DatasetProvider {
    fn provide(&self) -> Result<AwardDataset, LoadError>;

    /// Human-readable origin, used in log and status messages.
    fn describe(&self) -> String;
}

impl DatasetProvider for DataSource {
    fn provide(&self) -> Result<AwardDataset, LoadError> {
        load_dataset(self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Single-entry memo around a [`DatasetProvider`].
///
/// The first successful [`get`](Self::get) loads the dataset; every later call
/// hands out the same `Arc` without touching the provider again. Failures are
/// not memoized, so a later call retries.
pub struct DatasetCache<P = DataSource> {
    provider: P,
    slot: OnceCell<Arc<AwardDataset>>,
}

impl<P: DatasetProvider> DatasetCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            slot: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<Arc<AwardDataset>, LoadError> {
        if let Some(dataset) = self.slot.get() {
            log::debug!("Dataset cache hit ({} records)", dataset.len());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(self.provider.provide()?);
        Ok(Arc::clone(self.slot.get_or_init(|| dataset)))
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn source(&self) -> String {
        self.provider.describe()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::data::model::tests::raw;
    use crate::data::model::AwardRecord;

    struct Counting {
        calls: Cell<usize>,
        fail_first: bool,
    }

    impl DatasetProvider for Counting {
        fn provide(&self) -> Result<AwardDataset, LoadError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_first && self.calls.get() == 1 {
                return Err(LoadError::Schema {
                    missing: vec!["sex".into()],
                });
            }
            let rec = AwardRecord::derive(raw(1901, "Physics", Some("Germany"), Some("1845-03-27"), "Male"))
                .map_err(|_| LoadError::Schema { missing: vec![] })?;
            Ok(AwardDataset::from_records(vec![rec]))
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    #[test]
    fn loads_once_and_shares_the_dataset() {
        let cache = DatasetCache::new(Counting {
            calls: Cell::new(0),
            fail_first: false,
        });
        assert!(!cache.is_loaded());

        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.provider.calls.get(), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = DatasetCache::new(Counting {
            calls: Cell::new(0),
            fail_first: true,
        });
        assert!(matches!(cache.get(), Err(LoadError::Schema { .. })));
        assert!(!cache.is_loaded());
        assert_eq!(cache.get().unwrap().len(), 1);
        assert_eq!(cache.provider.calls.get(), 2);
    }
}
