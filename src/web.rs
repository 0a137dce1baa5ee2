use std::sync::{Mutex, MutexGuard};

use actix_web::{http::StatusCode, middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::{Duration, NaiveDate};
use log::{info, warn};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::league::{Court, ErrorKind, LeagueError, LeagueId, MatchId, OperatingHours, Team};
use crate::schedule::ScheduleRequest;
use crate::standings::league_standings;
use crate::store::{LeagueStore, MatchScore};

pub struct AppState {
    pub store: Mutex<LeagueStore>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            store: Mutex::new(LeagueStore::new()),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, LeagueStore>> {
        self.store
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("League store is unavailable"))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
pub struct CreateLeagueRequest {
    pub league_id: LeagueId,
    pub teams: Vec<Team>,
    pub courts: Vec<Court>,
    pub hours: OperatingHours,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub match_minutes: i64,
}

impl From<CreateLeagueRequest> for ScheduleRequest {
    fn from(req: CreateLeagueRequest) -> Self {
        ScheduleRequest {
            league_id: req.league_id,
            teams: req.teams,
            start_date: req.start_date,
            end_date: req.end_date,
            courts: req.courts,
            hours: req.hours,
            match_duration: Duration::try_minutes(req.match_minutes).unwrap_or_else(Duration::zero),
        }
    }
}

#[derive(Deserialize)]
pub struct ResultRequest {
    pub home_score: i32,
    pub away_score: i32,
}

/// HTTP status used for each kind of league error
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument | ErrorKind::Format => StatusCode::BAD_REQUEST,
        ErrorKind::Capacity | ErrorKind::DomainRule => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::DataConsistency => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
    }
}

fn error_response(err: &LeagueError) -> HttpResponse {
    let kind = err.kind();
    if kind == ErrorKind::DataConsistency {
        warn!("Inconsistent league data: {}", err);
    }
    HttpResponse::build(status_for(kind)).json(serde_json::json!({
        "success": false,
        "error": err.to_string(),
        "kind": kind,
    }))
}

// Create league endpoint
async fn create_league(
    req: web::Json<CreateLeagueRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let request = ScheduleRequest::from(req.into_inner());
    let mut store = state.store()?;

    match store.create_league(&request) {
        Ok(record) => Ok(HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "league_id": record.league_id,
            "matches": record.matches,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

// Schedule endpoint
async fn get_schedule(
    path: web::Path<LeagueId>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    let store = state.store()?;

    match store.league(league_id) {
        Ok(record) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "league_id": league_id,
            "matches": record.matches,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

// Result submission endpoint
async fn record_result(
    path: web::Path<(LeagueId, MatchId)>,
    req: web::Json<ResultRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (league_id, match_id) = path.into_inner();
    let score = MatchScore {
        home: req.home_score,
        away: req.away_score,
    };
    let mut store = state.store()?;

    match store.record_result(league_id, match_id, score) {
        Ok(stored) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "match": stored,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

// Standings endpoint
async fn get_standings(
    path: web::Path<LeagueId>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    let store = state.store()?;

    match league_standings(&*store, league_id) {
        Ok(standings) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "league_id": league_id,
            "standings": standings,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Registers the league API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/leagues", web::post().to(create_league))
        .route("/api/leagues/{league_id}/schedule", web::get().to(get_schedule))
        .route(
            "/api/leagues/{league_id}/matches/{match_id}/result",
            web::post().to(record_result),
        )
        .route("/api/leagues/{league_id}/standings", web::get().to(get_standings));
}

pub async fn start_server(config: &AppConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new());

    info!("Listening on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
