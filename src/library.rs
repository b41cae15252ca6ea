//! Track library: metadata extraction, folder scanning and filtering.
//!
//! The library is rebuilt wholesale on every scan; the filtered view is a
//! derived index list recomputed on every query change.

mod extract;
mod filter;
mod model;
mod scan;

pub use extract::{Extracted, extract, format_duration};
pub use filter::filter_indices;
pub use model::Track;
pub use scan::scan;
