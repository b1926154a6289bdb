use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use super::weighted_graph::WeightedGraph;
use crate::io::read_file;

/// Incremental builder turning a stream of raw word tokens into a
/// word-adjacency frequency graph.
///
/// An edge between words (A -> B) means that B came after A at least once,
/// and the weight of the edge tells how many times B came after A.
///
/// # Responsibilities
/// - Sanitize raw tokens (trim surrounding whitespace, drop empty results)
/// - Deduplicate vertices and accumulate adjacency weights
/// - Track the most recently accepted word (the cursor) so the next
///   accepted word gets an incoming edge from it
/// - Compose with other builders built from earlier/later slices of the
///   same corpus ([`absorb`](Self::absorb))
///
/// # Invariants
/// - The vertex count equals the number of distinct accepted words
/// - Each edge weight equals the number of times that ordered adjacency
///   was observed in the accepted word sequence
/// - Rejected (empty after trimming) tokens never disturb the cursor
///
/// # Notes
/// - The cursor is never reset implicitly: the last word of one line is
///   the predecessor of the first word of the next, and the same holds
///   across documents unless [`reset`](Self::reset) is called in between.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GraphBuilder {
	/// The graph built so far. Grows monotonically, vertices and edges
	/// are only ever added within this builder.
	graph: WeightedGraph<String>,

	/// First accepted word, the stitch point when this builder is
	/// absorbed after another one.
	first_word: Option<String>,

	/// Most recently accepted word, `None` before the first one.
	/// Determines where the next edge originates.
	last_word: Option<String>,
}

impl GraphBuilder {
	/// Creates a builder with an empty graph and no cursor.
	pub fn new() -> Self {
		Self {
			graph: WeightedGraph::new(),
			first_word: None,
			last_word: None,
		}
	}

	/// Feeds one raw token into the graph.
	///
	/// # Behavior
	/// - Trims surrounding whitespace from `raw`.
	/// - If the result is empty, the token is discarded silently: it is
	///   not a word, not an error, and the cursor is left untouched.
	/// - Otherwise the word is inserted as a vertex (idempotent), the
	///   adjacency from the previous word is counted (weight 1 on first
	///   occurrence, incremented afterwards), and the cursor moves to
	///   the new word. The cursor moves even on the very first call,
	///   establishing the origin for the next one.
	pub fn add_word(&mut self, raw: &str) {
		let word = raw.trim();
		if word.is_empty() {
			return;
		}
		let word = word.to_owned();

		self.graph.add_vertex(word.clone());

		if let Some(previous) = &self.last_word {
			// Impossible to fail, both endpoints are vertices at this point
			self.graph.increment_weight(previous, &word).unwrap();
		}

		if self.first_word.is_none() {
			self.first_word = Some(word.clone());
		}
		self.last_word = Some(word);
	}

	/// Feeds one line of text, split on runs of whitespace.
	///
	/// Consecutive whitespace acts as a single delimiter and surrounding
	/// whitespace produces no empty tokens, so intra-line adjacency is
	/// preserved exactly.
	pub fn process_line(&mut self, raw: &str) {
		for token in raw.split_whitespace() {
			self.add_word(token);
		}
	}

	/// Feeds a sequence of lines in order.
	///
	/// The cursor is not reset between lines: the last word of one line
	/// becomes the predecessor of the first word of the next, so
	/// cross-line adjacency is preserved.
	pub fn process_source<I>(&mut self, lines: I)
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		for line in lines {
			self.process_line(line.as_ref());
		}
	}

	/// Builds a graph from a text file, one chunk of lines per thread.
	///
	/// # Behavior
	/// - Splits the file's lines into chunks (CPU cores * factor).
	/// - Spawns a thread per chunk building a partial builder.
	/// - Re-orders the partials by chunk index and absorbs them in
	///   sequence, so adjacency across chunk boundaries is counted and
	///   the result is weight-identical to one sequential pass.
	///
	/// # Errors
	/// Returns the underlying I/O error if the file cannot be read.
	pub fn from_file<P: AsRef<Path>>(filename: P) -> io::Result<Self> {
		let lines = read_file(&filename)?;
		if lines.is_empty() {
			return Ok(Self::new());
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial = GraphBuilder::new();
				partial.process_source(&chunk);
				tx.send((index, partial)).expect("Failed to send from thread");
			});
		}
		drop(tx);

		// Partials arrive in completion order, restore corpus order
		// before stitching
		let mut partials: Vec<(usize, GraphBuilder)> = rx.iter().collect();
		partials.sort_by_key(|(index, _)| *index);

		let mut builder = Self::new();
		for (_, partial) in partials {
			builder.absorb(partial);
		}
		Ok(builder)
	}

	/// Merges a builder fed with the next slice of the same corpus into
	/// this one.
	///
	/// Graphs are merged (vertices unioned, matching edge weights
	/// summed) and the single boundary adjacency, from this builder's
	/// last word to the absorbed builder's first word, is counted, so
	/// absorbing in slice order reproduces sequential ingestion exactly.
	/// Absorbing a builder that accepted no words is a no-op.
	pub fn absorb(&mut self, other: Self) {
		self.graph.merge(&other.graph);

		if let (Some(last), Some(first)) = (&self.last_word, &other.first_word) {
			// Impossible to fail, both graphs were just merged in
			self.graph.increment_weight(last, first).unwrap();
		}

		if other.first_word.is_some() {
			if self.first_word.is_none() {
				self.first_word = other.first_word;
			}
			self.last_word = other.last_word;
		}
	}

	/// Clears the cursor, decoupling the next accepted word from the
	/// previous one.
	///
	/// The graph itself is untouched. Use this at a logical document
	/// boundary when the last word of one document should not be
	/// counted as the predecessor of the first word of the next.
	pub fn reset(&mut self) {
		self.last_word = None;
	}

	/// Returns the graph built so far, by reference (no copy).
	pub fn graph(&self) -> &WeightedGraph<String> {
		&self.graph
	}

	/// Consumes the builder and releases the graph for downstream use.
	pub fn into_graph(self) -> WeightedGraph<String> {
		self.graph
	}

	/// Returns the most recently accepted word, if any.
	pub fn last_word(&self) -> Option<&str> {
		self.last_word.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn weight(builder: &GraphBuilder, from: &str, to: &str) -> usize {
		builder
			.graph()
			.get_weight(&from.to_owned(), &to.to_owned())
			.unwrap_or_else(|_| panic!("expected edge {from} -> {to}"))
	}

	#[test]
	fn vertices_are_distinct_accepted_words() {
		let mut builder = GraphBuilder::new();
		for word in ["the", "cat", "the", "dog", "the"] {
			builder.add_word(word);
		}

		assert_eq!(builder.graph().vertex_count(), 3);
	}

	#[test]
	fn weights_count_ordered_adjacencies() {
		let mut builder = GraphBuilder::new();
		for word in ["a", "b", "a", "b", "c"] {
			builder.add_word(word);
		}

		assert_eq!(weight(&builder, "a", "b"), 2);
		assert_eq!(weight(&builder, "b", "a"), 1);
		assert_eq!(weight(&builder, "b", "c"), 1);
		assert!(!builder.graph().has_edge(&"c".to_owned(), &"a".to_owned()));
	}

	#[test]
	fn sanitization_maps_to_the_same_vertex() {
		let mut builder = GraphBuilder::new();
		builder.add_word("  cat  ");
		builder.add_word("cat");

		assert_eq!(builder.graph().vertex_count(), 1);
		// Second occurrence is a self-adjacency of the one vertex
		assert_eq!(weight(&builder, "cat", "cat"), 1);
	}

	#[test]
	fn blank_tokens_are_discarded_and_leave_the_cursor_alone() {
		let mut builder = GraphBuilder::new();
		builder.add_word("a");
		builder.add_word("");
		builder.add_word("   \t ");
		builder.add_word("b");

		assert_eq!(builder.graph().vertex_count(), 2);
		// The blanks in between must not break the a -> b adjacency
		assert_eq!(weight(&builder, "a", "b"), 1);
	}

	#[test]
	fn first_call_only_sets_the_cursor() {
		let mut builder = GraphBuilder::new();
		assert_eq!(builder.last_word(), None);

		builder.add_word("solo");

		assert_eq!(builder.last_word(), Some("solo"));
		assert_eq!(builder.graph().vertex_count(), 1);
		assert_eq!(builder.graph().edge_count(), 0);
	}

	#[test]
	fn repeated_word_builds_a_self_loop() {
		let mut builder = GraphBuilder::new();
		builder.add_word("a");
		builder.add_word("a");

		assert_eq!(builder.graph().vertex_count(), 1);
		assert_eq!(weight(&builder, "a", "a"), 1);
	}

	#[test]
	fn process_line_splits_on_whitespace_runs() {
		let mut builder = GraphBuilder::new();
		builder.process_line("  the \t quick   fox ");

		assert_eq!(builder.graph().vertex_count(), 3);
		assert_eq!(weight(&builder, "the", "quick"), 1);
		assert_eq!(weight(&builder, "quick", "fox"), 1);
		assert_eq!(builder.last_word(), Some("fox"));
	}

	#[test]
	fn adjacency_crosses_line_boundaries() {
		let mut builder = GraphBuilder::new();
		builder.process_source(["hello world", "world ends"]);

		assert_eq!(builder.graph().vertex_count(), 3);
		assert_eq!(weight(&builder, "hello", "world"), 1);
		// "world" repeats across the line boundary
		assert_eq!(weight(&builder, "world", "world"), 1);
		assert_eq!(weight(&builder, "world", "ends"), 1);
	}

	#[test]
	fn two_line_corpus_scenario() {
		let mut builder = GraphBuilder::new();
		builder.process_source(["the cat sat", "the cat ran"]);

		assert_eq!(builder.graph().vertex_count(), 4);
		assert_eq!(weight(&builder, "the", "cat"), 2);
		assert_eq!(weight(&builder, "cat", "sat"), 1);
		assert_eq!(weight(&builder, "sat", "the"), 1);
		assert_eq!(weight(&builder, "cat", "ran"), 1);
	}

	#[test]
	fn reset_decouples_the_next_word() {
		let mut builder = GraphBuilder::new();
		builder.process_line("end of document");
		builder.reset();
		builder.process_line("fresh start");

		assert_eq!(builder.last_word(), Some("start"));
		assert!(!builder.graph().has_edge(&"document".to_owned(), &"fresh".to_owned()));
		assert_eq!(weight(&builder, "fresh", "start"), 1);
	}

	#[test]
	fn absorb_matches_sequential_ingestion() {
		let lines = ["the cat sat", "the cat ran", "ran the mile"];

		let mut sequential = GraphBuilder::new();
		sequential.process_source(lines);

		let mut first = GraphBuilder::new();
		first.process_source(&lines[..1]);
		let mut second = GraphBuilder::new();
		second.process_source(&lines[1..]);
		first.absorb(second);

		assert_eq!(first.graph().vertex_count(), sequential.graph().vertex_count());
		assert_eq!(first.graph().edge_count(), sequential.graph().edge_count());
		for from in sequential.graph().vertices() {
			for (to, expected) in sequential.graph().successors(from) {
				assert_eq!(first.graph().get_weight(from, to), Ok(expected));
			}
		}
		// Includes the boundary adjacency sat -> the
		assert_eq!(weight(&first, "sat", "the"), 1);
		assert_eq!(first.last_word(), Some("mile"));
	}

	#[test]
	fn absorb_of_an_empty_builder_is_a_no_op() {
		let mut builder = GraphBuilder::new();
		builder.process_line("a b");

		let mut empty = GraphBuilder::new();
		empty.add_word("   ");
		builder.absorb(empty);

		assert_eq!(builder.graph().vertex_count(), 2);
		assert_eq!(builder.graph().edge_count(), 1);
		assert_eq!(builder.last_word(), Some("b"));
	}

	#[test]
	fn from_file_matches_in_memory_ingestion() {
		let lines: Vec<String> = (0..200)
			.map(|i| format!("word{} word{} and word{}", i % 7, (i + 1) % 7, i % 3))
			.collect();

		let path = std::env::temp_dir().join(format!("word-graph-builder-{}.txt", std::process::id()));
		std::fs::write(&path, lines.join("\n")).unwrap();
		let from_file = GraphBuilder::from_file(&path).unwrap();
		std::fs::remove_file(&path).unwrap();

		let mut expected = GraphBuilder::new();
		expected.process_source(&lines);

		assert_eq!(from_file.graph().vertex_count(), expected.graph().vertex_count());
		assert_eq!(from_file.graph().edge_count(), expected.graph().edge_count());
		for from in expected.graph().vertices() {
			for (to, weight) in expected.graph().successors(from) {
				assert_eq!(from_file.graph().get_weight(from, to), Ok(weight));
			}
		}
		assert_eq!(from_file.last_word(), expected.last_word());
	}

	#[test]
	fn from_file_on_an_empty_file_yields_an_empty_builder() {
		let path = std::env::temp_dir().join(format!("word-graph-empty-{}.txt", std::process::id()));
		std::fs::write(&path, "").unwrap();
		let builder = GraphBuilder::from_file(&path).unwrap();
		std::fs::remove_file(&path).unwrap();

		assert_eq!(builder.graph().vertex_count(), 0);
		assert_eq!(builder.last_word(), None);
	}
}
