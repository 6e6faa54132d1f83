//! Queue message bodies

use crate::Result;
use search_url::Subquery;

/// Serialize a subquery into the message body workers expect:
/// `{"query_alias": ..., "query_date": "YYYY-MM-DD", "query_url": ...}`.
pub fn encode_message(subquery: &Subquery) -> Result<String> {
    Ok(serde_json::to_string(subquery)?)
}

pub fn decode_message(body: &str) -> Result<Subquery> {
    Ok(serde_json::from_str(body)?)
}
