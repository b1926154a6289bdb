use rand::Rng;
use rand::prelude::IteratorRandom;
use thiserror::Error;

use super::weighted_graph::WeightedGraph;

/// Strategy used to select the first word of a generated sequence.
///
/// # Variants
/// - `Random`: pick a uniformly random vertex from the graph.
/// - `Custom(String)`: start from the provided word, which must be a
///   vertex of the graph.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum StartWord {
	Random,
	Custom(String),
}

/// Errors raised during sequence generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
	#[error("the graph has no vertices to generate from")]
	EmptyGraph,

	#[error("start word {0:?} is not a vertex of the graph")]
	UnknownStartWord(String),

	#[error("max_words must be at least 1")]
	InvalidMaxWords,
}

/// Input parameters for generating a sequence from a word graph.
///
/// # Notes
/// - `max_words` bounds the sequence length (start word included).
/// - Generation may stop earlier when it reaches a word with no
///   successors.
#[derive(Clone, Debug)]
pub struct GenerationInput {
	/// Maximum number of words in the generated sequence, must be >= 1.
	pub max_words: usize,

	/// Strategy for the first word of the sequence.
	pub start_word: StartWord,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self { max_words: 20, start_word: StartWord::Random }
	}
}

/// Random-walk text generator over a finished word-adjacency graph.
///
/// At each step the next word is chosen among the successors of the
/// current one, with probability proportional to the edge weight, so the
/// walk reproduces the adjacency frequencies observed during ingestion.
///
/// # Responsibilities
/// - Own the finished graph handed over by the builder
/// - Select a start word according to the input strategy
/// - Perform the weighted random walk and assemble the sequence
#[derive(Clone, Debug)]
pub struct Generator {
	graph: WeightedGraph<String>,
}

impl Generator {
	/// Creates a generator over a finished graph.
	pub fn new(graph: WeightedGraph<String>) -> Self {
		Self { graph }
	}

	/// Returns the underlying graph.
	pub fn graph(&self) -> &WeightedGraph<String> {
		&self.graph
	}

	/// Generates a sequence of words, joined by single spaces.
	///
	/// The walk starts from the word selected by `input.start_word` and
	/// ends after `input.max_words` words, or earlier at a word with no
	/// successors.
	///
	/// # Errors
	/// - [`GenerateError::EmptyGraph`] if the graph has no vertices.
	/// - [`GenerateError::UnknownStartWord`] if a custom start word is
	///   not a vertex.
	/// - [`GenerateError::InvalidMaxWords`] if `max_words` is 0.
	pub fn generate(&self, input: &GenerationInput) -> Result<String, GenerateError> {
		if input.max_words == 0 {
			return Err(GenerateError::InvalidMaxWords);
		}

		let mut current = match &input.start_word {
			StartWord::Random => self
				.graph
				.vertices()
				.choose(&mut rand::rng())
				.ok_or(GenerateError::EmptyGraph)?
				.clone(),
			StartWord::Custom(word) => {
				if self.graph.vertex_count() == 0 {
					return Err(GenerateError::EmptyGraph);
				}
				if !self.graph.contains_vertex(word) {
					return Err(GenerateError::UnknownStartWord(word.clone()));
				}
				word.clone()
			}
		};

		let mut words = vec![current.clone()];
		while words.len() < input.max_words {
			match self.next_word(&current) {
				Some(word) => {
					words.push(word.clone());
					current = word;
				}
				// Sink word, nothing ever followed it
				None => break,
			}
		}

		Ok(words.join(" "))
	}

	/// Picks the next word after `current` by weighted random sampling.
	///
	/// The probability of each successor is proportional to its edge
	/// weight. Returns `None` if `current` has no successors.
	fn next_word(&self, current: &String) -> Option<String> {
		let total: usize = self.graph.successors(current).map(|(_, weight)| weight).sum();
		if total == 0 {
			return None;
		}

		// Randomly select a successor by cumulative subtraction
		let mut r = rand::rng().random_range(0..total);

		let mut fallback: Option<&String> = None;
		for (word, weight) in self.graph.successors(current) {
			if r < weight {
				return Some(word.clone());
			}
			r -= weight;
			fallback = Some(word);
		}

		// Should not happen, but kept for safety
		fallback.cloned()
	}
}
