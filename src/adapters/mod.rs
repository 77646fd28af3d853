//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (file I/O, HTTP). Each sub-module groups
//! adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `api`: axum HTTP surface for data entry and exposure viewing
//! - `catalog`: race-card file catalog (JSON)
//! - `persistence`: JSONL ledger storage, one file per partition

pub mod api;
pub mod catalog;
pub mod persistence;
