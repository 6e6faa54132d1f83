use chrono::NaiveDate;

use crate::encode::encode_form_pairs;
use crate::record::{QueryDay, Subquery};

/// Results per page.
const RESULTS_PER_PAGE: &str = "100";
/// `filter=0` keeps results the engine would otherwise fold together.
const SHOW_OMITTED: &str = "0";
/// `nfpr=1` disables autocorrection of the search terms.
const NO_AUTOCORRECT: &str = "1";

/// Custom date range restricted to a single day, formatted `M/D/YYYY` without padding.
pub fn date_window(date: NaiveDate, sort_by_date: bool) -> String {
    let day = date.format("%-m/%-d/%Y");
    let mut tbs = format!("cdr:1,cd_min:{day},cd_max:{day}");
    if sort_by_date {
        tbs.push_str(",sbd:1");
    }
    tbs
}

/// Ordered search parameters for a record, before encoding.
///
/// Every rule is evaluated in a fixed order and rules without a value are dropped,
/// so optional keys are absent rather than empty.
pub fn search_parameters(record: &QueryDay) -> Vec<(&'static str, String)> {
    let rules: [(&'static str, Option<String>); 8] = [
        ("q", Some(record.search_terms.clone())),
        ("lr", record.language_results.clone()),
        ("hl", record.language_interface.clone()),
        ("cr", record.country_results.clone()),
        (
            "tbs",
            Some(date_window(record.query_date, record.sort_by_date)),
        ),
        ("num", Some(RESULTS_PER_PAGE.to_string())),
        ("filter", Some(SHOW_OMITTED.to_string())),
        ("nfpr", Some(NO_AUTOCORRECT.to_string())),
    ];

    rules
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}

/// Build the search URL for one query-day.
///
/// Geo parameters (`uule`, `tci`) are appended verbatim after the encoded block;
/// they are expected to already be in their wire form.
pub fn build_url(record: &QueryDay) -> Subquery {
    let parameters = search_parameters(record);
    let mut query = encode_form_pairs(parameters.iter().map(|(k, v)| (*k, v.as_str())));

    if let Some((uule, tci)) = record.geo() {
        query.push_str(&format!("&uule={uule}&tci={tci}"));
    }

    Subquery {
        query_alias: record.query_alias.clone(),
        query_date: record.query_date,
        query_url: format!("http://{}/search?{}", record.google_domain, query),
    }
}
