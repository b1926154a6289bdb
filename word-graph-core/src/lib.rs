//! Word-adjacency frequency graph library.
//!
//! This crate ingests streams of text and builds a directed, weighted
//! graph over the distinct words encountered: an edge A -> B records
//! that B immediately followed A, weighted by how many times that
//! adjacency occurred. The finished graph is the basis for simple
//! Markov-chain text generation or co-occurrence analysis.
//!
//! Only the high-level API is exposed publicly. Low-level utilities
//! are kept internal to ensure consistency and prevent misuse.

/// Core graph ADT, builder, and generation logic.
///
/// This module exposes the graph model and its consumers while keeping
/// internal helpers private.
pub mod model;

/// I/O utilities (file loading).
///
/// Not exposed
pub(crate) mod io;
