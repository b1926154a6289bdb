use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, delete, get, middleware, post, put, web};

use serde::{Deserialize, Serialize};
use word_graph_core::model::generator::{GenerationInput, Generator, StartWord};
use word_graph_core::model::graph_builder::GraphBuilder;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_words: Option<usize>,
	start: Option<String>, // -> "random", "custom:<word>" or absent
}

/// Struct representing query parameters for the `/v1/weight` endpoint
#[derive(Deserialize)]
struct WeightParams {
	from: String,
	to: String,
}

/// Graph counters returned by `/v1/stats` and after ingestion
#[derive(Serialize)]
struct Stats {
	vertices: usize,
	edges: usize,
	last_word: Option<String>,
}

struct SharedData {
	builder: GraphBuilder,
}

impl SharedData {
	fn stats(&self) -> Stats {
		Stats {
			vertices: self.builder.graph().vertex_count(),
			edges: self.builder.graph().edge_count(),
			last_word: self.builder.last_word().map(str::to_owned),
		}
	}
}

impl GenerateParams {
	/// Determines the start-word strategy for sequence generation.
	fn start_word(&self) -> Result<StartWord, String> {
		match &self.start {
			None => Ok(StartWord::Random),
			Some(s) if s.to_lowercase() == "random" => Ok(StartWord::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = s["custom:".len()..].trim();
				if value.is_empty() {
					Err("Custom start word cannot be empty".into())
				} else {
					Ok(StartWord::Custom(value.to_owned()))
				}
			}
			Some(_) => Err("Start must be 'random' or 'custom:<word>'".into()),
		}
	}
}

/// HTTP PUT endpoint `/v1/ingest`
///
/// Feeds the request body, line by line, into the shared graph builder.
/// Cross-line adjacency is preserved, including with previously ingested
/// text (the cursor is not reset between requests).
/// Returns the updated graph counters.
#[put("/v1/ingest")]
async fn put_ingest(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Builder lock failed"),
	};

	shared_data.builder.process_source(body.lines());
	HttpResponse::Ok().json(shared_data.stats())
}

/// HTTP POST endpoint `/v1/reset-cursor`
///
/// Clears the builder's last-word cursor so the next ingested word is not
/// linked to the previous one. The graph itself is untouched. Use this at
/// a logical document boundary.
#[post("/v1/reset-cursor")]
async fn post_reset_cursor(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Builder lock failed"),
	};

	shared_data.builder.reset();
	HttpResponse::Ok().body("Cursor cleared")
}

/// HTTP DELETE endpoint `/v1/graph`
///
/// Replaces the shared builder with a fresh, empty one.
#[delete("/v1/graph")]
async fn delete_graph(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Builder lock failed"),
	};

	shared_data.builder = GraphBuilder::new();
	HttpResponse::Ok().body("Graph cleared")
}

/// HTTP GET endpoint `/v1/stats`
///
/// Returns the current vertex and edge counts and the cursor position.
#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Builder lock failed"),
	};

	HttpResponse::Ok().json(shared_data.stats())
}

/// HTTP GET endpoint `/v1/weight`
///
/// Returns the weight of the edge `from -> to`, or 404 if no such edge
/// has been observed.
#[get("/v1/weight")]
async fn get_weight(data: web::Data<Mutex<SharedData>>, query: web::Query<WeightParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Builder lock failed"),
	};

	match shared_data.builder.graph().get_weight(&query.from, &query.to) {
		Ok(weight) => HttpResponse::Ok().body(weight.to_string()),
		Err(e) => HttpResponse::NotFound().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Runs a weighted random walk over a snapshot of the current graph and
/// returns the generated sequence as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = GenerationInput {
		max_words: query.max_words.unwrap_or(20),
		start_word: match query.start_word() {
			Ok(s) => s,
			Err(e) => return HttpResponse::BadRequest().body(e),
		},
	};

	let generator = {
		let shared_data = match data.lock() {
			Ok(m) => m,
			Err(_) => return HttpResponse::InternalServerError().body("Builder lock failed"),
		};
		Generator::new(shared_data.builder.graph().clone())
	};

	match generator.generate(&input) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::UnprocessableEntity().body(e.to_string()),
	}
}

/// Main entry point for the server.
///
/// Wraps an empty graph builder in a `Mutex` for thread safety and
/// starts an Actix-web HTTP server exposing ingestion, inspection, and
/// generation endpoints.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - CORS is permissive so browser front-ends can talk to it directly.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let shared_data = SharedData {
		builder: GraphBuilder::new(),
	};
	let shared_builder = web::Data::new(Mutex::new(shared_data));

	log::info!("Word graph server listening on 127.0.0.1:5000");

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_builder.clone())
			.service(put_ingest)
			.service(post_reset_cursor)
			.service(delete_graph)
			.service(get_stats)
			.service(get_weight)
			.service(get_generated)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
