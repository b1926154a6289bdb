//! Top-level module for the word-adjacency graph system.
//!
//! This module provides the word-adjacency frequency model, including:
//! - A generic directed weighted graph ADT (`WeightedGraph`)
//! - An incremental builder feeding words into it (`GraphBuilder`)
//! - A random-walk generation consumer (`Generator`)

/// Generic directed weighted graph ADT keyed by vertex label.
///
/// Handles vertex deduplication, edge existence and weight queries,
/// occurrence counting, and merging.
pub mod weighted_graph;

/// Incremental word-adjacency builder.
///
/// Sanitizes raw tokens, maintains the last-word cursor, and drives the
/// graph mutations that keep edge weights equal to adjacency counts.
/// Supports line, source, and (parallel) file ingestion.
pub mod graph_builder;

/// Random-walk text generator over a finished word graph.
///
/// Picks successors with probability proportional to edge weight.
pub mod generator;
