use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by direct manipulation of a [`WeightedGraph`].
///
/// Both variants are programmer-error class: the builder's
/// vertex-then-edge call ordering never triggers them, they only occur
/// when a caller drives the ADT directly out of sequence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
	/// An edge operation referenced a label that is not in the vertex set.
	#[error("edge endpoint is not a vertex of the graph")]
	InvalidVertex,

	/// A weight operation referenced an edge that does not exist.
	#[error("no edge exists between the given vertices")]
	NoSuchEdge,
}

/// A directed graph with integer-weighted edges, keyed by vertex label.
///
/// Vertices are labels of type `T`; an edge is an ordered pair of labels
/// with a non-negative weight. At most one edge exists per ordered pair,
/// multiplicity is represented purely by the weight.
///
/// # Responsibilities
/// - Store the vertex set, deduplicated by label
/// - Store directed edges and their weights
/// - Answer existence and weight queries
/// - Merge with another graph of the same label type (occurrence counts are summed)
///
/// # Invariants
/// - Every edge's endpoints are members of the vertex set
/// - At most one edge per ordered `(from, to)` pair
/// - Self-loops are legal (a vertex may have an edge to itself)
///
/// # Notes
/// - Vertex-set mutation happens only through [`add_vertex`](Self::add_vertex);
///   edge operations never create vertices implicitly.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct WeightedGraph<T: Eq + Hash> {
	/// Adjacency map: vertex -> (successor -> edge weight).
	/// The outer key set IS the vertex set, a vertex with no outgoing
	/// edges maps to an empty successor map.
	adjacency: HashMap<T, HashMap<T, usize>>,
}

impl<T: Eq + Hash + Clone> WeightedGraph<T> {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self { adjacency: HashMap::new() }
	}

	/// Inserts `label` into the vertex set.
	///
	/// No-op (not an error) if the vertex is already present.
	pub fn add_vertex(&mut self, label: T) {
		self.adjacency.entry(label).or_default();
	}

	/// Returns whether `label` is a known vertex.
	pub fn contains_vertex(&self, label: &T) -> bool {
		self.adjacency.contains_key(label)
	}

	/// Returns whether an edge `from -> to` currently exists.
	///
	/// Returns `false` (rather than an error) when either label is not a
	/// known vertex: absence of the vertex implies absence of the edge.
	pub fn has_edge(&self, from: &T, to: &T) -> bool {
		self.adjacency
			.get(from)
			.is_some_and(|successors| successors.contains_key(to))
	}

	/// Creates the edge `from -> to` with an initial weight of 0.
	///
	/// No-op if the edge already exists (the current weight is kept).
	///
	/// # Errors
	/// Returns [`GraphError::InvalidVertex`] if either endpoint is not
	/// already a vertex. Vertices are never created implicitly here.
	pub fn add_edge(&mut self, from: &T, to: &T) -> Result<(), GraphError> {
		if !self.adjacency.contains_key(to) {
			return Err(GraphError::InvalidVertex);
		}
		let successors = self.adjacency.get_mut(from).ok_or(GraphError::InvalidVertex)?;
		successors.entry(to.clone()).or_insert(0);
		Ok(())
	}

	/// Returns the weight of the edge `from -> to`.
	///
	/// # Errors
	/// Returns [`GraphError::NoSuchEdge`] if the edge does not exist
	/// (including when either endpoint is not a vertex).
	pub fn get_weight(&self, from: &T, to: &T) -> Result<usize, GraphError> {
		self.adjacency
			.get(from)
			.and_then(|successors| successors.get(to))
			.copied()
			.ok_or(GraphError::NoSuchEdge)
	}

	/// Overwrites the weight of the existing edge `from -> to`.
	///
	/// # Errors
	/// Returns [`GraphError::NoSuchEdge`] if the edge does not exist.
	pub fn set_weight(&mut self, from: &T, to: &T, weight: usize) -> Result<(), GraphError> {
		let stored = self
			.adjacency
			.get_mut(from)
			.and_then(|successors| successors.get_mut(to))
			.ok_or(GraphError::NoSuchEdge)?;
		*stored = weight;
		Ok(())
	}

	/// Records one observation of the adjacency `from -> to`.
	///
	/// - If the edge already exists, its weight is increased by 1.
	/// - Otherwise, the edge is created with a weight of 1.
	///
	/// This is the preferred mutation primitive for occurrence counting:
	/// unlike a get-then-set sequence it cannot lose an increment, since
	/// it runs as a single call on an exclusively borrowed graph.
	///
	/// Returns the new weight.
	///
	/// # Errors
	/// Returns [`GraphError::InvalidVertex`] if either endpoint is not
	/// already a vertex.
	pub fn increment_weight(&mut self, from: &T, to: &T) -> Result<usize, GraphError> {
		if !self.adjacency.contains_key(to) {
			return Err(GraphError::InvalidVertex);
		}
		let successors = self.adjacency.get_mut(from).ok_or(GraphError::InvalidVertex)?;
		let weight = successors.entry(to.clone()).or_insert(0);
		*weight += 1;
		Ok(*weight)
	}

	/// Returns the number of vertices.
	pub fn vertex_count(&self) -> usize {
		self.adjacency.len()
	}

	/// Returns the number of edges (ordered pairs with a stored weight).
	pub fn edge_count(&self) -> usize {
		self.adjacency.values().map(HashMap::len).sum()
	}

	/// Iterates over all vertex labels, in no particular order.
	pub fn vertices(&self) -> impl Iterator<Item = &T> {
		self.adjacency.keys()
	}

	/// Iterates over the successors of `from` as `(label, weight)` pairs.
	///
	/// Yields nothing if `from` is not a vertex or has no outgoing edges.
	pub fn successors(&self, from: &T) -> impl Iterator<Item = (&T, usize)> {
		self.adjacency
			.get(from)
			.into_iter()
			.flat_map(|successors| successors.iter().map(|(to, weight)| (to, *weight)))
	}

	/// Merges another graph into this one.
	///
	/// Vertices are unioned; weights of edges present in both graphs are
	/// summed, so merging partial graphs built from disjoint slices of a
	/// corpus yields the same counts as one sequential pass (boundary
	/// adjacencies aside, which the builder re-adds when absorbing).
	pub fn merge(&mut self, other: &Self) {
		for (from, successors) in &other.adjacency {
			let own = self.adjacency.entry(from.clone()).or_default();
			for (to, weight) in successors {
				*own.entry(to.clone()).or_insert(0) += *weight;
			}
		}
	}
}
