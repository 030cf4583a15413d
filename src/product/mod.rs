//! Product record model and filtered-export selection

mod filter;
mod record;

pub use filter::FilterCriteria;
pub use record::{ProductRecord, EXPORT_COLUMNS};
