use crate::application::{ChangePointUseCase, EventFeedUseCase, PriceFeedUseCase};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub price_feed: Arc<PriceFeedUseCase>,
    pub event_feed: Arc<EventFeedUseCase>,
    pub change_point: ChangePointUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    pub fn new(config: &ServerConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> Self {
        Self {
            price_feed: Arc::new(PriceFeedUseCase::new(config.prices_path.clone())),
            event_feed: Arc::new(EventFeedUseCase::new(config.events_path.clone())),
            change_point: ChangePointUseCase::new(),
            logs,
        }
    }
}

#[get("/prices")]
async fn prices(data: web::Data<HttpState>) -> impl Responder {
    add_log(&data.logs, "INFO", "HttpApi", "Serving price feed");

    let use_case = data.price_feed.clone();
    match run_blocking(move || use_case.execute()).await {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => error_response(&data.logs, "Price feed failed", e),
    }
}

#[get("/events")]
async fn events(data: web::Data<HttpState>) -> impl Responder {
    add_log(&data.logs, "INFO", "HttpApi", "Serving event feed");

    let use_case = data.event_feed.clone();
    match run_blocking(move || use_case.execute()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&data.logs, "Event feed failed", e),
    }
}

#[get("/change-point")]
async fn change_point(data: web::Data<HttpState>) -> impl Responder {
    add_log(&data.logs, "INFO", "HttpApi", "Serving change-point estimate");
    HttpResponse::Ok().json(data.change_point.execute())
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(PoisonError::into_inner);
    HttpResponse::Ok().json(&*logs)
}

/// File reads and CSV parsing run on the blocking pool, off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}

fn error_response(logs: &Mutex<Vec<LogEntry>>, context: &str, err: AppError) -> HttpResponse {
    tracing::error!(error = %err, "{}", context);
    add_log(logs, "ERROR", "HttpApi", &format!("{}: {}", context, err));
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": err.to_string()
    }))
}

/// Append to the bounded in-memory request log, dropping the oldest entry when full.
pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(PoisonError::into_inner);
    logs.push(entry);
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
}

/// Registers every route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(prices)
            .service(events)
            .service(change_point)
            .service(health)
            .service(get_logs),
    );
}

pub fn start_server(config: &ServerConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState::new(config, logs));

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Any origin may read the feeds

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(config.bind_address())?
    .run();

    Ok(server)
}
