use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use clap::Parser;
use log::{error, info};
use serde::Deserialize;

use babbler_core::{Babbler, BabblerError, LoadReport, PredictionInput, StartSeed};

/// HTTP service that trains a Markov babbler and generates sentences.
#[derive(Parser, Debug)]
#[command(name = "babbler-server")]
#[command(author, version, about, long_about = None)]
struct Config {
	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to listen on
	#[arg(short, long, default_value_t = 5000)]
	port: u16,

	/// Number of words in an n-gram
	#[arg(short = 'n', long, default_value_t = 2)]
	order: usize,

	/// Seed for reproducible output
	#[arg(short, long)]
	seed: Option<u64>,

	/// Corpus files loaded at startup, one sentence per line
	#[arg(short, long)]
	corpus: Vec<PathBuf>,
}

/// Struct representing query parameters for the `/v1/babble` endpoint
#[derive(Deserialize)]
struct BabbleParams {
	nb_try: Option<usize>,
	seed: Option<String>, // starter (default) or custom:<n-gram>
}

#[derive(Deserialize)]
struct SuccessorQuery {
	ngram: String,
}

struct SharedData {
	babbler: Babbler,
}

impl BabbleParams {
	fn prediction_input(&self) -> Result<PredictionInput, BabblerError> {
		let start_seed = match &self.seed {
			Some(s) => StartSeed::parse(s)?,
			None => StartSeed::Starter,
		};
		Ok(PredictionInput::new(start_seed, self.nb_try.unwrap_or(0)))
	}
}

/// Maps a model error onto an HTTP response.
fn error_response(err: BabblerError) -> HttpResponse {
	match &err {
		BabblerError::UntrainedModel => HttpResponse::Conflict().body(err.to_string()),
		BabblerError::EmptyState { .. } | BabblerError::InvalidSeed(_) | BabblerError::InvalidOrder(_) => {
			HttpResponse::BadRequest().body(err.to_string())
		}
		BabblerError::Io(_) => {
			error!("{err}");
			HttpResponse::InternalServerError().body(err.to_string())
		}
	}
}

fn lock_failed() -> HttpResponse {
	HttpResponse::InternalServerError().body("Model lock failed")
}

/// HTTP GET endpoint `/v1/babble`
///
/// Generates one sentence. Query parameters:
/// - `nb_try`: retries when the sentence already exists in the corpus
/// - `seed`: `starter` or `custom:<n-gram>`
#[get("/v1/babble")]
async fn get_babble(data: web::Data<Mutex<SharedData>>, query: web::Query<BabbleParams>) -> impl Responder {
	let input = match query.prediction_input() {
		Ok(input) => input,
		Err(e) => return error_response(e),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};

	match shared_data.babbler.predict(&input) {
		Ok(sentence) => HttpResponse::Ok().body(sentence),
		Err(e) => error_response(e),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	match data.lock() {
		Ok(shared_data) => HttpResponse::Ok().json(shared_data.babbler.stats()),
		Err(_) => lock_failed(),
	}
}

/// HTTP GET endpoint `/v1/successors`
///
/// Returns every recorded successor of `ngram`, duplicates included.
#[get("/v1/successors")]
async fn get_successors(data: web::Data<Mutex<SharedData>>, query: web::Query<SuccessorQuery>) -> impl Responder {
	match data.lock() {
		Ok(shared_data) => HttpResponse::Ok().json(shared_data.babbler.get_successors(&query.ngram)),
		Err(_) => lock_failed(),
	}
}

/// HTTP PUT endpoint `/v1/sentences`
///
/// Trains the model on a plain-text body holding one sentence per line.
#[put("/v1/sentences")]
async fn put_sentences(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};

	let mut report = LoadReport::default();
	for line in body.lines() {
		report.push(shared_data.babbler.add_sentence(line));
	}
	info!("trained on {} lines ({} skipped)", report.lines, report.skipped);
	HttpResponse::Ok().json(report)
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_babble)
		.service(get_stats)
		.service(get_successors)
		.service(put_sentences);
}

/// Builds the shared model and trains it on the configured corpus files.
fn load_shared_data(config: &Config) -> Result<SharedData, BabblerError> {
	let mut babbler = Babbler::new(config.order, config.seed)?;
	for path in &config.corpus {
		babbler.add_file(path)?;
	}
	Ok(SharedData { babbler })
}

/// Main entry point for the server.
///
/// Loads the corpus, wraps the model in a `Mutex` and starts an Actix-web
/// HTTP server.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = Config::parse();
	let shared_model = web::Data::new(Mutex::new(load_shared_data(&config)?));

	info!("listening on {}:{} (order {})", config.host, config.port, config.order);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.configure(configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use babbler_core::ModelStats;

	fn shared(order: usize) -> web::Data<Mutex<SharedData>> {
		let babbler = Babbler::new(order, Some(42)).unwrap();
		web::Data::new(Mutex::new(SharedData { babbler }))
	}

	#[actix_web::test]
	async fn test_train_then_babble() {
		let data = shared(2);
		let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

		let req = test::TestRequest::put()
			.uri("/v1/sentences")
			.set_payload("a b c d\nshort\n")
			.to_request();
		let report: LoadReport = test::call_and_read_body_json(&app, req).await;
		assert_eq!(report, LoadReport { lines: 2, recorded: 1, skipped: 1 });

		let req = test::TestRequest::get().uri("/v1/babble").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "a b c d");

		let req = test::TestRequest::get().uri("/v1/babble?seed=custom:b%20c").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "b c d");
	}

	#[actix_web::test]
	async fn test_babble_untrained_conflicts() {
		let app = test::init_service(App::new().app_data(shared(2)).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/babble").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CONFLICT);
	}

	#[actix_web::test]
	async fn test_bad_seed_is_rejected() {
		let app = test::init_service(App::new().app_data(shared(2)).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/babble?seed=random:3").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn test_successors_and_stats() {
		let data = shared(3);
		{
			let mut guard = data.lock().unwrap();
			guard.babbler.add_sentence("the dog dances quickly");
			guard.babbler.add_sentence("the dog dances with me");
		}
		let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

		let req = test::TestRequest::get()
			.uri("/v1/successors?ngram=the%20dog%20dances")
			.to_request();
		let successors: Vec<String> = test::call_and_read_body_json(&app, req).await;
		assert_eq!(successors, vec!["quickly", "with"]);

		let req = test::TestRequest::get().uri("/v1/stats").to_request();
		let stats: ModelStats = test::call_and_read_body_json(&app, req).await;
		assert_eq!(stats.ngrams, 4);
		assert_eq!(stats.starters, 2);
		assert_eq!(stats.stoppers, 2);
	}
}
