//! Single binary web server exposing the tournament engine as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//!
//! Tournaments live in an in-memory store. Every mutation holds the write
//! lock for the whole read-modify-write, which serializes concurrent
//! result reports (two matches advancing into the same next-round slot,
//! and full standings recomputes for the same tournament).

use actix_web::{
    get, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use trivia_tournament_engine::{
    cancel_tournament, open_registration, register_team, report_match_result, seeding_order,
    start_tournament, ErrorKind, MatchId, TeamId, Tournament, TournamentError, TournamentFormat,
    TournamentId, TournamentSettings, UserId,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after long inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    host_id: UserId,
    #[serde(default)]
    format: TournamentFormat,
    max_teams: usize,
    min_teams: usize,
    #[serde(default)]
    settings: TournamentSettings,
}

#[derive(Deserialize)]
struct ActingUserBody {
    acting_user_id: UserId,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    team_id: TeamId,
    #[serde(default)]
    seed: Option<u32>,
}

#[derive(Deserialize)]
struct ReportResultBody {
    team1_score: i64,
    team2_score: i64,
    #[serde(default)]
    winner_id: Option<TeamId>,
    #[serde(default)]
    loser_id: Option<TeamId>,
}

#[derive(Deserialize)]
struct MatchesQuery {
    #[serde(default)]
    round: Option<u32>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// Map an engine error onto an HTTP response by its classification.
/// Configuration errors indicate a generation defect and are logged as
/// integrity violations before being surfaced.
fn engine_error(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::Conflict | ErrorKind::Capacity => HttpResponse::Conflict().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Permission => HttpResponse::Forbidden().json(body),
        ErrorKind::Configuration => {
            log::error!("integrity violation: {e}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "trivia-tournament-engine",
    })
}

/// Create a new tournament in Draft (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let tournament = match Tournament::new(
        body.host_id,
        body.format,
        body.max_teams,
        body.min_teams,
        body.settings,
    ) {
        Ok(t) => t,
        Err(e) => return engine_error(e),
    };
    let id = tournament.id;
    // Serialize the response before the value moves into the store, so no
    // lookup is needed after insertion.
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::debug!("tournament {id} changed (created)");
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => no_tournament(),
    }
}

/// Open registration (host only, Draft -> RegistrationOpen).
#[post("/api/tournaments/{id}/open")]
async fn api_open_registration(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ActingUserBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match open_registration(t, body.acting_user_id) {
        Ok(()) => {
            log::debug!("tournament {} changed (registration open)", t.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => engine_error(e),
    }
}

/// Register a team (RegistrationOpen only).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match register_team(t, body.team_id, body.seed) {
        Ok(_) => {
            log::debug!("tournament {} changed (team registered)", t.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => engine_error(e),
    }
}

/// List participants in seeding order (seeded first, then registration order).
#[get("/api/tournaments/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    HttpResponse::Ok().json(seeding_order(&entry.tournament))
}

/// Start the tournament: generate the bracket/schedule (host only).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ActingUserBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match start_tournament(t, body.acting_user_id) {
        Ok(()) => {
            log::debug!("tournament {} changed (started, {} matches)", t.id, t.matches.len());
            HttpResponse::Ok().json(t)
        }
        Err(e) => engine_error(e),
    }
}

/// Cancel the tournament (host only, any non-terminal state).
#[post("/api/tournaments/{id}/cancel")]
async fn api_cancel_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ActingUserBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match cancel_tournament(t, body.acting_user_id) {
        Ok(()) => {
            log::debug!("tournament {} changed (cancelled)", t.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => engine_error(e),
    }
}

/// Report a result for one match.
#[post("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_report_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match report_match_result(
        t,
        path.match_id,
        body.team1_score,
        body.team2_score,
        body.winner_id,
        body.loser_id,
    ) {
        Ok(()) => {
            log::debug!("tournament {} changed (result for match {})", t.id, path.match_id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => engine_error(e),
    }
}

/// List matches, optionally filtered to one round (?round=N).
#[get("/api/tournaments/{id}/matches")]
async fn api_get_matches(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<MatchesQuery>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &entry.tournament;
    match query.round {
        Some(round) => {
            let matches: Vec<_> = t.matches_in_round(round).collect();
            HttpResponse::Ok().json(matches)
        }
        None => HttpResponse::Ok().json(&t.matches),
    }
}

/// Current standings (round robin; empty for elimination formats).
#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    HttpResponse::Ok().json(&entry.tournament.standings)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_open_registration)
            .service(api_register_team)
            .service(api_list_teams)
            .service(api_start_tournament)
            .service(api_cancel_tournament)
            .service(api_report_result)
            .service(api_get_matches)
            .service(api_get_standings)
    })
    .bind(bind)?
    .run()
    .await
}
