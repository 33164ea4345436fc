use serde::Serialize;

use super::types::SchemeSummary;

pub const DEFAULT_PAGE_SIZE: usize = 30;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub query: String,
    pub page: usize,
    pub page_size: usize,
    pub total_matches: usize,
    pub total_pages: usize,
    pub schemes: Vec<SchemeSummary>,
}

/// Case-insensitive substring search on scheme name followed by 1-based
/// pagination. Pages past the end are empty rather than an error.
pub fn search_schemes(
    schemes: &[SchemeSummary],
    query: &str,
    page: usize,
    page_size: usize,
) -> CatalogPage {
    let page = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let needle = query.trim().to_lowercase();

    let matches: Vec<&SchemeSummary> = schemes
        .iter()
        .filter(|s| needle.is_empty() || s.scheme_name.to_lowercase().contains(&needle))
        .collect();

    let total_matches = matches.len();
    let rows = matches
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    CatalogPage {
        query: query.trim().to_string(),
        page,
        page_size,
        total_matches,
        total_pages: total_matches.div_ceil(page_size),
        schemes: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(code: u32, name: &str) -> SchemeSummary {
        SchemeSummary {
            scheme_code: code.to_string(),
            scheme_name: name.to_string(),
            fund_house: None,
            scheme_category: None,
        }
    }

    fn catalog() -> Vec<SchemeSummary> {
        let mut schemes: Vec<SchemeSummary> = (0..65)
            .map(|i| scheme(1000 + i, &format!("Index Fund {i}")))
            .collect();
        schemes.push(scheme(1, "Bluechip EQUITY Fund"));
        schemes.push(scheme(2, "Liquid Fund"));
        schemes
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let page = search_schemes(&catalog(), "  equity ", 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.schemes[0].scheme_code, "1");
        assert_eq!(page.query, "equity");
    }

    #[test]
    fn empty_query_matches_everything_and_paginates() {
        let schemes = catalog();
        let first = search_schemes(&schemes, "", 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.total_matches, 67);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.schemes.len(), 30);

        let last = search_schemes(&schemes, "", 3, DEFAULT_PAGE_SIZE);
        assert_eq!(last.schemes.len(), 7);
        assert_eq!(last.schemes[6].scheme_code, "2");

        let beyond = search_schemes(&schemes, "", 9, DEFAULT_PAGE_SIZE);
        assert!(beyond.schemes.is_empty());
    }

    #[test]
    fn page_and_size_are_clamped() {
        let schemes = catalog();
        let page = search_schemes(&schemes, "index", 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 65);

        let page = search_schemes(&schemes, "", 1, 10_000);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
        assert_eq!(page.schemes.len(), 67);
    }

    #[test]
    fn no_match_yields_zero_pages() {
        let page = search_schemes(&catalog(), "gilt", 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_matches, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.schemes.is_empty());
    }
}
