//! Search URL construction for dated subqueries.
//!
//! A [`QueryDay`] pairs one recurring search definition with one calendar day.
//! [`build_url`] turns it into a [`Subquery`]: the identifying key
//! `(query_alias, query_date)` plus a fully encoded search URL.
//!
//! The parameter block is form-encoded (spaces become `+`, everything outside
//! `A-Z a-z 0-9 - _ . ~` is percent-encoded) and always emitted in the order
//! `q, lr, hl, cr, tbs, num, filter, nfpr`, with optional keys omitted when unset.

#![forbid(unsafe_code)]

mod builder;
mod encode;
mod record;

pub use builder::{build_url, date_window, search_parameters};
pub use encode::{encode_form_component, encode_form_pairs};
pub use record::{QueryDay, Subquery};
