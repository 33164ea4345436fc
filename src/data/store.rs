use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{SchemeRecord, SchemeSummary};

const CATALOG_FILE: &str = "schemes.json";
const SCHEME_DIR: &str = "schemes";
const MAX_SCHEME_CODE_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("scheme {0} not found")]
    NotFound(String),
    #[error("invalid scheme code {0:?}")]
    InvalidCode(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only access to scheme listings and per-scheme NAV history.
pub trait SchemeSource: Send + Sync {
    fn list_schemes(&self) -> Result<Vec<SchemeSummary>, StoreError>;
    fn load_scheme(&self, code: &str) -> Result<SchemeRecord, StoreError>;
}

/// Scheme codes are short numeric identifiers; anything else is rejected
/// before it can be used to build a file path.
pub fn validate_scheme_code(code: &str) -> Result<(), StoreError> {
    let valid = !code.is_empty()
        && code.len() <= MAX_SCHEME_CODE_LEN
        && code.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCode(code.to_string()))
    }
}

/// Directory layout:
///
/// ```text
/// <root>/schemes.json          catalog (array of scheme summaries)
/// <root>/schemes/<code>.json   metadata + NAV history per scheme
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn scheme_path(&self, code: &str) -> PathBuf {
        self.root.join(SCHEME_DIR).join(format!("{code}.json"))
    }
}

impl SchemeSource for JsonDirSource {
    fn list_schemes(&self) -> Result<Vec<SchemeSummary>, StoreError> {
        read_json(&self.root.join(CATALOG_FILE))
    }

    fn load_scheme(&self, code: &str) -> Result<SchemeRecord, StoreError> {
        validate_scheme_code(code)?;
        match read_json(&self.scheme_path(code)) {
            Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(code.to_string()))
            }
            other => other,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create directory");
        }
        fs::write(path, contents).expect("failed to write fixture");
    }

    #[test]
    fn validate_scheme_code_only_allows_digits() {
        assert!(validate_scheme_code("119551").is_ok());
        for bad in ["", "../etc", "12a", "1 2", "12345678901234567"] {
            assert!(
                matches!(validate_scheme_code(bad), Err(StoreError::InvalidCode(_))),
                "{bad:?} must be rejected"
            );
        }
    }

    #[test]
    fn json_dir_source_reads_catalog_and_scheme() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "schemes.json",
            r#"[{"schemeCode": 100, "schemeName": "Alpha Fund"}]"#,
        );
        write(
            dir.path(),
            "schemes/100.json",
            r#"{
              "metadata": {"schemeCode": "100", "schemeName": "Alpha Fund", "fundHouse": "Alpha"},
              "navHistory": [{"date": "2023-01-02", "nav": 10.5}]
            }"#,
        );

        let source = JsonDirSource::new(dir.path());
        let catalog = source.list_schemes().expect("catalog loads");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].scheme_code, "100");

        let record = source.load_scheme("100").expect("scheme loads");
        assert_eq!(record.metadata.fund_house, "Alpha");
        assert_eq!(record.nav_history.len(), 1);
    }

    #[test]
    fn json_dir_source_maps_missing_file_to_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = JsonDirSource::new(dir.path());
        assert!(matches!(
            source.load_scheme("999"),
            Err(StoreError::NotFound(code)) if code == "999"
        ));
        assert!(matches!(
            source.list_schemes(),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn json_dir_source_reports_malformed_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "schemes/101.json", "{ not json");
        let err = JsonDirSource::new(dir.path())
            .load_scheme("101")
            .expect_err("must fail to decode");
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().contains("101.json"));
    }
}
