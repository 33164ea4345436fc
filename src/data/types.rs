use serde::{Deserialize, Deserializer, Serialize};

use crate::core::RawNavRecord;

/// One row of the scheme catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeSummary {
    #[serde(alias = "scheme_code", deserialize_with = "scheme_code_from_any")]
    pub scheme_code: String,
    #[serde(alias = "scheme_name")]
    pub scheme_name: String,
    #[serde(default, alias = "fund_house", skip_serializing_if = "Option::is_none")]
    pub fund_house: Option<String>,
    #[serde(default, alias = "scheme_category", skip_serializing_if = "Option::is_none")]
    pub scheme_category: Option<String>,
}

/// Scheme metadata as published upstream. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeMetadata {
    #[serde(alias = "scheme_code", deserialize_with = "scheme_code_from_any")]
    pub scheme_code: String,
    #[serde(alias = "scheme_name")]
    pub scheme_name: String,
    #[serde(default, alias = "fund_house")]
    pub fund_house: String,
    #[serde(default, alias = "scheme_type")]
    pub scheme_type: String,
    #[serde(default, alias = "scheme_category")]
    pub scheme_category: String,
    #[serde(default, alias = "isin_growth", skip_serializing_if = "Option::is_none")]
    pub isin_growth: Option<String>,
    #[serde(
        default,
        alias = "isin_div_reinvestment",
        skip_serializing_if = "Option::is_none"
    )]
    pub isin_dividend: Option<String>,
}

/// On-disk shape of a single scheme: metadata plus raw NAV history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeRecord {
    #[serde(alias = "meta")]
    pub metadata: SchemeMetadata,
    #[serde(default, alias = "data", alias = "nav_history")]
    pub nav_history: Vec<RawNavRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyCode {
    Number(u64),
    Text(String),
}

fn scheme_code_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AnyCode::deserialize(deserializer)? {
        AnyCode::Number(n) => n.to_string(),
        AnyCode::Text(s) => s.trim().to_string(),
    })
}
