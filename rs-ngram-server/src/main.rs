use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use rs_ngram_core::io::{get_filename, list_files, read_corpus};
use rs_ngram_core::{GenerationConfig, NGramModel, NgramError};

/// Extension of corpus files in the data directory.
const CORPUS_EXTENSION: &str = "txt";

/// Most sentences a single `/v1/generate` request may ask for.
const MAX_GENERATE_COUNT: usize = 1000;

/// Serves sentences generated from n-gram models of local corpora.
#[derive(Parser, Debug, Clone)]
#[command(name = "rs-ngram-server")]
#[command(version)]
struct Args {
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Directory holding the `.txt` corpora
	#[arg(long, default_value = "./data")]
	data_dir: PathBuf,

	/// Default n-gram order used when loading corpora
	#[arg(long, default_value_t = 2)]
	order: usize,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	seed: Option<u64>,
}

/// Query parameters for the `/v1/load_corpora` endpoint
#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
	n: Option<usize>,
}

struct SharedData {
	data_dir: PathBuf,
	default_order: usize,
	model: Option<NGramModel>,
	corpus_names: Vec<String>,
}

/// Maps core errors onto HTTP responses.
fn error_response(e: &NgramError) -> HttpResponse {
	match e {
		NgramError::InvalidParameter { .. } => HttpResponse::BadRequest().body(e.to_string()),
		NgramError::InsufficientData { .. } => HttpResponse::UnprocessableEntity().body(e.to_string()),
		NgramError::Io { .. } => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// Splits `a, b,,c` into `["a", "b", "c"]`.
fn parse_names(names: &str) -> Vec<&str> {
	names
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.collect()
}

/// Rejects names that would escape the data directory.
fn corpus_path(data_dir: &Path, name: &str) -> Option<PathBuf> {
	if name.contains(['/', '\\']) || name == ".." {
		return None;
	}
	Some(data_dir.join(format!("{name}.{CORPUS_EXTENSION}")))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates up to `count` sentences (default 1, at most
/// `MAX_GENERATE_COUNT`) from the loaded model, one per line. A `seed`
/// makes the answer reproducible.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let count = query.count.unwrap_or(1);
	if count > MAX_GENERATE_COUNT {
		return HttpResponse::BadRequest().body(format!("count must be <= {MAX_GENERATE_COUNT}, got {count}"));
	}
	let config = match GenerationConfig::new(count) {
		Ok(c) => c,
		Err(e) => return error_response(&e),
	};
	let mut rng = match query.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(model) = &shared_data.model else {
		return HttpResponse::Conflict().body("No corpus loaded");
	};

	HttpResponse::Ok().body(model.generate(&config, &mut rng).join("\n"))
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data_dir = match data.lock() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&data_dir, CORPUS_EXTENSION) {
		Ok(files) => {
			let names: Vec<String> = files.iter().filter_map(|f| get_filename(f).ok()).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(e) => {
			log::error!("Failed to list corpora: {e}");
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpus_names.join("\n"))
}

/// HTTP PUT endpoint `/v1/load_corpora`
///
/// Rebuilds the model from the named corpora, concatenated in order.
/// The previous model is kept if loading fails.
#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let names = match &query.names {
		Some(s) if !s.trim().is_empty() => parse_names(s),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	let n = query.n.unwrap_or(shared_data.default_order);

	let mut paths = Vec::with_capacity(names.len());
	for name in &names {
		match corpus_path(&shared_data.data_dir, name) {
			Some(path) => paths.push(path),
			None => return HttpResponse::BadRequest().body(format!("Invalid corpus name: {name}")),
		}
	}

	let model = match read_corpus(&paths).and_then(|text| NGramModel::from_text(&text, n)) {
		Ok(m) => m,
		Err(e) => {
			log::warn!("Failed to load corpora {names:?}: {e}");
			return error_response(&e);
		}
	};

	log::info!(
		"Loaded {}-gram model from {:?}: {} sentence(s), {} context(s)",
		n,
		names,
		model.sentence_count(),
		model.table().len()
	);
	shared_data.model = Some(model);
	shared_data.corpus_names = names.iter().map(|s| (*s).to_owned()).collect();

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with no model loaded; corpora are loaded through
/// `PUT /v1/load_corpora`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	if let Err(e) = NGramModel::validate_order(args.order) {
		return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
	}

	let shared_data = SharedData {
		data_dir: args.data_dir.clone(),
		default_order: args.order,
		model: None,
		corpus_names: Vec::new(),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	log::info!("Serving corpora from {} on {}:{}", args.data_dir.display(), args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(put_corpora)
			.service(get_loaded_corpora)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test::{TestRequest, call_and_read_body, call_service, init_service};
	use tempfile::TempDir;

	fn app_data(dir: &Path) -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData {
			data_dir: dir.to_path_buf(),
			default_order: 2,
			model: None,
			corpus_names: Vec::new(),
		}))
	}

	#[test]
	fn names_are_trimmed_and_filtered() {
		assert_eq!(parse_names(" a, b,,c "), vec!["a", "b", "c"]);
	}

	#[test]
	fn path_traversal_is_rejected() {
		let dir = Path::new("data");
		assert_eq!(corpus_path(dir, "oceans"), Some(dir.join("oceans.txt")));
		assert_eq!(corpus_path(dir, "../secret"), None);
		assert_eq!(corpus_path(dir, ".."), None);
	}

	#[actix_web::test]
	async fn generate_without_model_conflicts() {
		let app = init_service(App::new().app_data(app_data(Path::new("."))).service(get_generated)).await;
		let req = TestRequest::get().uri("/v1/generate").to_request();
		let resp = call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CONFLICT);
	}

	#[actix_web::test]
	async fn load_then_generate() {
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("tiny.txt"), "Hello big world.").unwrap();

		let app = init_service(
			App::new()
				.app_data(app_data(dir.path()))
				.service(get_generated)
				.service(get_corpora)
				.service(put_corpora)
				.service(get_loaded_corpora),
		)
		.await;

		let req = TestRequest::get().uri("/v1/corpora").to_request();
		assert_eq!(call_and_read_body(&app, req).await, "tiny");

		let req = TestRequest::put().uri("/v1/load_corpora?names=tiny").to_request();
		assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

		let req = TestRequest::get().uri("/v1/loaded_corpora").to_request();
		assert_eq!(call_and_read_body(&app, req).await, "tiny");

		let req = TestRequest::get().uri("/v1/generate?count=2&seed=1").to_request();
		assert_eq!(call_and_read_body(&app, req).await, "hello big world.\nhello big world.");

		let req = TestRequest::put().uri("/v1/load_corpora?names=tiny&n=9").to_request();
		assert_eq!(call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

		let req = TestRequest::get().uri("/v1/generate?count=0").to_request();
		assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn oversized_count_is_rejected_and_server_keeps_serving() {
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("tiny.txt"), "Hello big world.").unwrap();
		let app = init_service(
			App::new()
				.app_data(app_data(dir.path()))
				.service(get_generated)
				.service(put_corpora),
		)
		.await;

		let req = TestRequest::put().uri("/v1/load_corpora?names=tiny").to_request();
		assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

		let req = TestRequest::get().uri("/v1/generate?count=18446744073709551615").to_request();
		assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		let req = TestRequest::get().uri(&format!("/v1/generate?count={}", MAX_GENERATE_COUNT + 1)).to_request();
		assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		let req = TestRequest::get().uri("/v1/generate?count=1&seed=4").to_request();
		assert_eq!(call_and_read_body(&app, req).await, "hello big world.");
	}
}
