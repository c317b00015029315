//! Built-in pipeline phases.
//!
//! - [`NormalizePhase`] - filters registry rows and projects them into records
//! - [`SortPhase`] - orders records by display name
//! - [`RenderPhase`] - binds records to the template
//! - [`FormatPhase`] - canonicalizes the rendered source

mod format;
mod normalize;
mod render;
mod sort;

pub use format::FormatPhase;
pub use normalize::{NormalizePhase, Skip, normalize_row};
pub use render::RenderPhase;
pub use sort::{SortPhase, sort_records};
