//! Academic metadata enums, document kinds, and post reactions.
//!
//! `BranchYear` and `University` serialize to the exact labels stored by the
//! site ("First Year", "Btu", ...). `DocumentKind` and `Reaction` are never
//! serialized; they are parsed from path and CLI arguments via `FromStr`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::ids::{PREFIX_PAPER, PREFIX_STUDY_MATERIAL, PREFIX_SYLLABUS};

// ---------------------------------------------------------------------------
// BranchYear
// ---------------------------------------------------------------------------

/// Year of study. No other value is ever stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum BranchYear {
    #[serde(rename = "First Year")]
    First,
    #[serde(rename = "Second Year")]
    Second,
    #[serde(rename = "Third Year")]
    Third,
    #[serde(rename = "Fourth Year")]
    Fourth,
}

impl BranchYear {
    pub const ALL: [Self; 4] = [Self::First, Self::Second, Self::Third, Self::Fourth];

    /// Return the label used in storage and in request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "First Year",
            Self::Second => "Second Year",
            Self::Third => "Third Year",
            Self::Fourth => "Fourth Year",
        }
    }
}

impl fmt::Display for BranchYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchYear {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|year| year.as_str() == s)
            .ok_or_else(|| CoreError::InvalidRequest(format!("unknown branch year '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// University
// ---------------------------------------------------------------------------

/// Issuing university.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum University {
    Btu,
    Rtu,
}

impl University {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Btu => "Btu",
            Self::Rtu => "Rtu",
        }
    }
}

impl fmt::Display for University {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// The three document collections. They share one schema and one resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Paper,
    Syllabus,
    StudyMaterial,
}

impl DocumentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Syllabus => "syllabus",
            Self::StudyMaterial => "study_material",
        }
    }

    /// SQL table backing this collection.
    ///
    /// Exhaustive match; a new kind needs a new table.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Paper => "papers",
            Self::Syllabus => "syllabi",
            Self::StudyMaterial => "study_materials",
        }
    }

    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Paper => PREFIX_PAPER,
            Self::Syllabus => PREFIX_SYLLABUS,
            Self::StudyMaterial => PREFIX_STUDY_MATERIAL,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = CoreError;

    /// Accepts `snake_case` and `kebab-case` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paper" => Ok(Self::Paper),
            "syllabus" => Ok(Self::Syllabus),
            "study_material" | "study-material" => Ok(Self::StudyMaterial),
            other => Err(CoreError::InvalidRequest(format!(
                "unknown document kind '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Reaction
// ---------------------------------------------------------------------------

/// Counter bumped by `POST /posts/{id}/{type}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// Post column incremented by this reaction.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Like => "likes",
            Self::Dislike => "dislikes",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reaction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            _ => Err(CoreError::InvalidRequest(
                "Invalid type. Use 'like' or 'dislike'.".to_string(),
            )),
        }
    }
}
