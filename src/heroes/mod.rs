//! Hero records for uifilter
//!
//! A concrete record type wired through the registry, the compilers, and the
//! query facade. The CLI serves it from a JSON dataset or the built-in
//! roster.

mod hero;
mod service;

pub use hero::{Hero, DEFAULT_SORT_FIELD};
pub use service::{HeroFilterResult, HeroService};
