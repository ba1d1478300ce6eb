//! # edu-core
//!
//! Core types, filter resolution, and error types for edushare.
//!
//! This crate provides the foundational types shared across all edushare crates:
//! - Entity structs for educational documents and blog posts
//! - Academic metadata enums (branch year, university, document kind)
//! - The hierarchical filter resolver used by every document listing
//! - ID prefix constants
//! - Cross-cutting error types
//! - The JSON response envelope returned by the HTTP API

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod ids;
pub mod responses;
