//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `Ledger`: bet-transaction persistence (append-mostly, partitioned)
//! - `RaceCatalog`: race cards and horse data, including scratch cutoffs

pub mod catalog;
pub mod ledger;
