//! Hierarchical filter resolution for document listings.
//!
//! `GET /getPdfs/{stream}/{branch}/{branchYear}` and its syllabus and
//! study-material siblings all go through [`DocumentFilter::resolve`]. The
//! resolver builds an equality predicate over `stream` and `branchYear`, and
//! adds `branch` unless the request is for first-year B.Tech: first-year
//! students are not yet split into branches, so those documents are stored
//! once and must match every branch.
//!
//! The exception is an exact, case-sensitive match on both labels. It does not
//! generalize to other streams.

use std::fmt;

use crate::enums::BranchYear;
use crate::errors::CoreError;

/// Stream whose first year is shared across all branches.
pub const COMMON_FIRST_YEAR_STREAM: &str = "B.Tech";

/// A field the predicate constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Stream,
    Branch,
    BranchYear,
}

impl FilterField {
    /// Key as it appears in the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Branch => "branch",
            Self::BranchYear => "branchYear",
        }
    }

    /// SQL column holding this field.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Branch => "branch",
            Self::BranchYear => "branch_year",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved query predicate over one document collection.
///
/// `branch_year` is kept as the raw request string: an unknown label is not
/// an error, it simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    stream: String,
    branch: Option<String>,
    branch_year: String,
}

impl DocumentFilter {
    /// Resolve path parameters into a predicate.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRequest` if any parameter is empty or
    /// whitespace-only. No query should be issued in that case.
    pub fn resolve(stream: &str, branch: &str, branch_year: &str) -> Result<Self, CoreError> {
        require(FilterField::Stream, stream)?;
        require(FilterField::Branch, branch)?;
        require(FilterField::BranchYear, branch_year)?;

        let branch = if is_common_first_year(stream, branch_year) {
            None
        } else {
            Some(branch.to_string())
        };

        Ok(Self {
            stream: stream.to_string(),
            branch,
            branch_year: branch_year.to_string(),
        })
    }

    #[must_use]
    pub fn stream(&self) -> &str {
        &self.stream
    }

    /// `None` when the branch constraint was dropped.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    #[must_use]
    pub fn branch_year(&self) -> &str {
        &self.branch_year
    }

    /// Equality constraints in a stable order: stream, branch (if any), branch year.
    #[must_use]
    pub fn predicate(&self) -> Vec<(FilterField, &str)> {
        let mut predicate = vec![(FilterField::Stream, self.stream.as_str())];
        if let Some(branch) = &self.branch {
            predicate.push((FilterField::Branch, branch.as_str()));
        }
        predicate.push((FilterField::BranchYear, self.branch_year.as_str()));
        predicate
    }

    /// The predicate as a JSON object keyed by API field names.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.predicate()
            .into_iter()
            .map(|(field, value)| (field.as_str().to_string(), value.into()))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

impl fmt::Display for DocumentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

fn require(field: FilterField, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

fn is_common_first_year(stream: &str, branch_year: &str) -> bool {
    stream == COMMON_FIRST_YEAR_STREAM && branch_year == BranchYear::First.as_str()
}
