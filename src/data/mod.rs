mod cache;
mod catalog;
mod returns;
mod store;
mod types;

pub use cache::{CachedScheme, SchemeCache};
pub use catalog::{CatalogPage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, search_schemes};
pub use returns::{PeriodReturn, ReturnPeriod, trailing_return};
pub use store::{JsonDirSource, SchemeSource, StoreError, validate_scheme_code};
pub use types::{SchemeMetadata, SchemeRecord, SchemeSummary};
