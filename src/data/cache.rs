use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::NavSeries;

use super::store::{SchemeSource, StoreError, validate_scheme_code};
use super::types::{SchemeMetadata, SchemeSummary};

/// A scheme ready for simulation: upstream metadata plus its normalized NAV
/// series.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedScheme {
    pub metadata: SchemeMetadata,
    pub series: NavSeries,
}

/// Read-through cache over a [`SchemeSource`], keyed by scheme code.
///
/// Entries stay until explicitly invalidated. Locks are only held for map
/// access; loading and normalization happen outside them, so two concurrent
/// misses for the same code may both load and the first insert wins.
pub struct SchemeCache<S> {
    source: S,
    schemes: RwLock<HashMap<String, Arc<CachedScheme>>>,
    catalog: RwLock<Option<Arc<Vec<SchemeSummary>>>>,
}

impl<S: SchemeSource> SchemeCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            schemes: RwLock::new(HashMap::new()),
            catalog: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn scheme(&self, code: &str) -> Result<Arc<CachedScheme>, StoreError> {
        validate_scheme_code(code)?;
        if let Some(hit) = self
            .schemes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
        {
            return Ok(Arc::clone(hit));
        }

        let record = self.source.load_scheme(code)?;
        let loaded = Arc::new(CachedScheme {
            series: NavSeries::normalize(&record.nav_history),
            metadata: record.metadata,
        });
        tracing::debug!(
            scheme_code = code,
            raw_points = record.nav_history.len(),
            kept_points = loaded.series.len(),
            "loaded scheme into cache"
        );

        let mut schemes = self.schemes.write().unwrap_or_else(PoisonError::into_inner);
        let entry = schemes.entry(code.to_string()).or_insert(loaded);
        Ok(Arc::clone(entry))
    }

    pub fn catalog(&self) -> Result<Arc<Vec<SchemeSummary>>, StoreError> {
        if let Some(hit) = self
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(hit));
        }

        let loaded = Arc::new(self.source.list_schemes()?);
        tracing::debug!(schemes = loaded.len(), "loaded scheme catalog");
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(catalog.get_or_insert(loaded)))
    }

    /// Returns whether an entry was present.
    pub fn invalidate(&self, code: &str) -> bool {
        let removed = self
            .schemes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(code)
            .is_some();
        if removed {
            tracing::info!(scheme_code = code, "invalidated cached scheme");
        }
        removed
    }

    pub fn invalidate_catalog(&self) {
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn clear(&self) {
        self.schemes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.invalidate_catalog();
    }

    pub fn cached_schemes(&self) -> usize {
        self.schemes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RawNav, RawNavRecord};
    use crate::data::types::SchemeRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        loads: AtomicUsize,
        catalog_loads: AtomicUsize,
        nav: f64,
    }

    impl CountingSource {
        fn new(nav: f64) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                catalog_loads: AtomicUsize::new(0),
                nav,
            }
        }
    }

    impl SchemeSource for CountingSource {
        fn list_schemes(&self) -> Result<Vec<SchemeSummary>, StoreError> {
            self.catalog_loads.fetch_add(1, Ordering::SeqCst);
            Ok(vec![SchemeSummary {
                scheme_code: "1".to_string(),
                scheme_name: "One".to_string(),
                fund_house: None,
                scheme_category: None,
            }])
        }

        fn load_scheme(&self, code: &str) -> Result<SchemeRecord, StoreError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if code == "404" {
                return Err(StoreError::NotFound(code.to_string()));
            }
            Ok(SchemeRecord {
                metadata: SchemeMetadata {
                    scheme_code: code.to_string(),
                    scheme_name: format!("Scheme {code}"),
                    fund_house: "House".to_string(),
                    scheme_type: "Open Ended".to_string(),
                    scheme_category: "Equity".to_string(),
                    isin_growth: None,
                    isin_dividend: None,
                },
                nav_history: vec![
                    RawNavRecord {
                        date: "2023-01-03".to_string(),
                        nav: Some(RawNav::Number(self.nav)),
                    },
                    RawNavRecord {
                        date: "2023-01-02".to_string(),
                        nav: Some(RawNav::Text("0".to_string())),
                    },
                ],
            })
        }
    }

    #[test]
    fn scheme_is_loaded_once_and_normalized() {
        let cache = SchemeCache::new(CountingSource::new(12.5));
        let first = cache.scheme("42").expect("loads");
        let second = cache.scheme("42").expect("cached");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 1);
        assert_eq!(first.series.len(), 1, "zero NAV record is dropped");
        assert_eq!(first.metadata.scheme_name, "Scheme 42");
        assert_eq!(cache.cached_schemes(), 1);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let cache = SchemeCache::new(CountingSource::new(10.0));
        let before = cache.scheme("7").expect("loads");
        assert!(cache.invalidate("7"));
        assert!(!cache.invalidate("7"));
        let after = cache.scheme("7").expect("reloads");

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = SchemeCache::new(CountingSource::new(10.0));
        assert!(matches!(cache.scheme("404"), Err(StoreError::NotFound(_))));
        assert!(matches!(cache.scheme("404"), Err(StoreError::NotFound(_))));
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 2);
        assert_eq!(cache.cached_schemes(), 0);
    }

    #[test]
    fn invalid_codes_never_reach_the_source() {
        let cache = SchemeCache::new(CountingSource::new(10.0));
        assert!(matches!(
            cache.scheme("../secrets"),
            Err(StoreError::InvalidCode(_))
        ));
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn catalog_is_cached_until_cleared() {
        let cache = SchemeCache::new(CountingSource::new(10.0));
        cache.catalog().expect("loads");
        cache.catalog().expect("cached");
        assert_eq!(cache.source().catalog_loads.load(Ordering::SeqCst), 1);

        cache.scheme("1").expect("loads");
        cache.clear();
        assert_eq!(cache.cached_schemes(), 0);
        cache.catalog().expect("reloads");
        assert_eq!(cache.source().catalog_loads.load(Ordering::SeqCst), 2);
    }
}
