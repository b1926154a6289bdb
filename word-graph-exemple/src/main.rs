use word_graph_core::model::generator::{GenerateError, GenerationInput, Generator, StartWord};
use word_graph_core::model::graph_builder::GraphBuilder;
use word_graph_core::model::weighted_graph::GraphError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a word-adjacency graph from a small in-memory corpus.
    // The cursor is not reset between lines, so the last word of a line
    // is counted as the predecessor of the first word of the next.
    let mut builder = GraphBuilder::new();
    builder.process_source([
        "the cat sat",
        "the cat ran",
        "the dog sat and the dog slept",
    ]);

    // Raw tokens are trimmed; blank tokens are discarded silently
    builder.add_word("  quietly  ");
    builder.add_word("   ");

    println!("Vertices: {}", builder.graph().vertex_count());
    println!("Edges: {}", builder.graph().edge_count());
    println!("Cursor: {:?}", builder.last_word());

    // "the cat" occurred twice, so the edge carries weight 2
    let the = "the".to_owned();
    let cat = "cat".to_owned();
    println!("Weight the -> cat: {}", builder.graph().get_weight(&the, &cat)?);

    // Asking for an edge that was never observed is an error
    match builder.graph().get_weight(&cat, &the) {
        Ok(_) => println!("Should not happen"),
        Err(GraphError::NoSuchEdge) => println!("No edge cat -> the, as expected"),
        Err(e) => return Err(e.into()),
    }

    // Clearing the cursor decouples the next document from this one
    builder.reset();
    builder.process_line("a completely separate document");

    // Hand the finished graph to the random-walk generator
    let generator = Generator::new(builder.into_graph());

    let mut input = GenerationInput::default();
    input.max_words = 8;
    input.start_word = StartWord::Custom("the".to_owned());

    // Attempting to start from a word that was never ingested
    match generator.generate(&GenerationInput {
        max_words: 8,
        start_word: StartWord::Custom("unknown".to_owned()),
    }) {
        Ok(_) => println!("Should not happen"),
        Err(GenerateError::UnknownStartWord(_)) => println!("'unknown' is not in the graph"),
        Err(e) => return Err(e.into()),
    }

    // Generate a few sequences, weighted by observed adjacency counts
    for i in 0..5 {
        println!("Generated sentence {}: {}", i + 1, generator.generate(&input)?);
    }

    Ok(())
}
