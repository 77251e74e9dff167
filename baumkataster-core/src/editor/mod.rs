//! Drafts for creating and editing records.
//!
//! A draft holds raw user input. `build()` validates it and returns a full
//! record ready for the coordinator; invalid input never reaches storage.

mod error;
mod meadow;
mod tree;

pub use error::ValidationError;
pub use meadow::{parse_area, MeadowDraft};
pub use tree::TreeDraft;
