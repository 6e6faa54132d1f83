use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One query specification expanded to a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDay {
    pub query_alias: String,
    pub search_terms: String,
    pub language_results: Option<String>,
    pub language_interface: Option<String>,
    pub country_results: Option<String>,
    pub sort_by_date: bool,
    pub geo_uule: Option<String>,
    pub geo_tci: Option<String>,
    pub google_domain: String,
    pub query_date: NaiveDate,
}

impl QueryDay {
    /// Minimal record with only the required fields set.
    pub fn new(
        query_alias: impl Into<String>,
        search_terms: impl Into<String>,
        google_domain: impl Into<String>,
        query_date: NaiveDate,
    ) -> Self {
        Self {
            query_alias: query_alias.into(),
            search_terms: search_terms.into(),
            language_results: None,
            language_interface: None,
            country_results: None,
            sort_by_date: false,
            geo_uule: None,
            geo_tci: None,
            google_domain: google_domain.into(),
            query_date,
        }
    }

    /// Geo targeting is only applied when both halves are present.
    pub fn geo(&self) -> Option<(&str, &str)> {
        match (self.geo_uule.as_deref(), self.geo_tci.as_deref()) {
            (Some(uule), Some(tci)) => Some((uule, tci)),
            _ => None,
        }
    }
}

/// A built, dated search URL keyed by `(query_alias, query_date)`.
///
/// Serializes as the queue message body; `query_date` is rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subquery {
    pub query_alias: String,
    pub query_date: NaiveDate,
    pub query_url: String,
}
