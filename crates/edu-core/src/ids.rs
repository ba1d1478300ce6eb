//! ID prefix constants.
//!
//! Every stored entity gets an ID of the form `{prefix}-{8 hex chars}`,
//! generated by the database layer.

pub const PREFIX_PAPER: &str = "ppr";
pub const PREFIX_SYLLABUS: &str = "syl";
pub const PREFIX_STUDY_MATERIAL: &str = "stm";
pub const PREFIX_POST: &str = "pst";

/// Check whether `id` looks like `{prefix}-{8 hex}`.
///
/// Lookups use this to answer "not found" for malformed ids without a query.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
