//! Entity structs for all edushare domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `edu-db/migrations`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`; JSON field
//! names are camelCase to match the public API.

mod document;
mod post;

pub use document::{EducationalDocument, NewDocument};
pub use post::{NewPost, Post};
