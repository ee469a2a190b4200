// Letter Layout
// Implements: font-metric word wrap and pagination onto fixed-size pages.
// Pure computation; the PDF writer in render/ only draws what this produces.

pub mod font_metrics;
pub mod paginate;
pub mod wrap;

// Re-export the public API consumed by other modules (render, state).
pub use font_metrics::{default_page_config, FontFamily, PageConfig};
pub use paginate::{paginate, PaginatedDocument};
