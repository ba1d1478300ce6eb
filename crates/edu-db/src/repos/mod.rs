//! Repository modules implementing queries for all edushare entities.
//!
//! Each module adds methods to `EduDb` via `impl EduDb` blocks.

pub mod document;
pub mod post;
