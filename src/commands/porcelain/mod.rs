//! Porcelain commands (user-facing browser views)
//!
//! - `tree`: directory listing with the commit that last touched each entry
//! - `log`: commit history of a revision
//! - `summary`: repository description, last update, branches and tags
//!
//! Every command writes through `Repository::writer()`.

use chrono::{DateTime, Utc};

pub mod log;
pub mod summary;
pub mod tree;

/// `2024-01-31 02:05:09 PM`, always in UTC
pub const LISTING_DATE_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

pub fn format_listing_date(date: &DateTime<Utc>) -> String {
    date.format(LISTING_DATE_FORMAT).to_string()
}
