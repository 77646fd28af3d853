//! Persistence Adapters — JSONL Ledger Storage
//!
//! Implements the `Ledger` port with append-mostly JSONL files, one per
//! partition. The domain/usecases layer only knows the `Ledger` trait,
//! never about files or JSON.

pub mod ledger_file;

pub use ledger_file::JsonlLedger;
