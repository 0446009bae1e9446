// src/web/app.rs
use actix_web::{web, HttpRequest, HttpResponse, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{AuctionEngine, CategoryPricing, Errors, PlayerRepository, TeamRepository, User};
use crate::persistence::{InMemoryPlayers, InMemoryTeams, Roster};
use super::types::{ApiError, AppState, BidRequest, SessionView};

// Initialize application state from a roster snapshot
pub fn init_app_state(roster: Roster) -> AppState {
    Arc::new(Mutex::new(AuctionEngine::new(
        InMemoryTeams::new(roster.teams),
        InMemoryPlayers::new(roster.players),
        CategoryPricing::default(),
    )))
}

// Read x-jwt-payload header and extract user information
fn get_auth_user(req: &HttpRequest) -> Option<User> {
    let auth_header = req.headers().get("x-jwt-payload")?;
    let auth_str = auth_header.to_str().ok()?;

    // Decode base64
    let decoded = general_purpose::STANDARD.decode(auth_str).ok()?;
    let json_str = String::from_utf8(decoded).ok()?;

    // Parse JSON
    let json: Value = serde_json::from_str(&json_str).ok()?;

    // Extract user fields
    let sub = json.get("sub")?.as_str()?;
    let role = json.get("role")?.as_str()?;

    match role {
        "admin" => Some(User::Admin {
            user_id: sub.to_string(),
        }),
        "team" => {
            let team = json.get("team")?.as_str()?;
            Some(User::TeamOwner {
                user_id: sub.to_string(),
                team: team.to_string(),
            })
        }
        _ => Some(User::Viewer {
            user_id: sub.to_string(),
        }),
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().body("Unauthorized")
}

fn error_response(err: Errors) -> HttpResponse {
    let body = ApiError {
        message: err.to_string(),
    };
    match err {
        Errors::Unauthorized(_) => HttpResponse::Forbidden().json(body),
        Errors::Repository(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

// Current session snapshot for the live auction page
async fn get_auction(data: web::Data<AppState>) -> Result<HttpResponse> {
    let engine = data.lock().await;

    let teams = match engine.teams().get_all().await {
        Ok(teams) => teams,
        Err(err) => return Ok(error_response(Errors::Repository(err))),
    };

    let view = SessionView::build(engine.state(), engine.queue(), engine.history(), &teams);
    Ok(HttpResponse::Ok().json(view))
}

// Select a category: rebuilds the shuffled queue and loads the first player
async fn select_category(
    req: HttpRequest,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    if get_auth_user(&req).is_none() {
        return Ok(unauthorized());
    }
    let category = path.into_inner();
    let mut rng = StdRng::from_entropy();

    let mut engine = data.lock().await;
    match engine.select_category(&category, &mut rng).await {
        Ok(player) => Ok(HttpResponse::Ok().json(player.cloned())),
        Err(err) => Ok(error_response(err)),
    }
}

// Open bidding on the loaded player
async fn start_auction(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse> {
    let user = match get_auth_user(&req) {
        Some(user) => user,
        None => return Ok(unauthorized()),
    };

    let mut engine = data.lock().await;
    match engine.start(&user) {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(err) => Ok(error_response(err)),
    }
}

// Place a bid for a team on the current player
async fn place_bid(
    req: HttpRequest,
    bid_req: web::Json<BidRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user = match get_auth_user(&req) {
        Some(user) => user,
        None => return Ok(unauthorized()),
    };

    let mut engine = data.lock().await;
    match engine
        .place_bid(&user, bid_req.team, bid_req.amount, Utc::now())
        .await
    {
        Ok(bid) => Ok(HttpResponse::Ok().json(bid)),
        Err(err) => Ok(error_response(err)),
    }
}

// Settle the current player on the highest bidder
async fn confirm(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse> {
    let user = match get_auth_user(&req) {
        Some(user) => user,
        None => return Ok(unauthorized()),
    };

    let mut engine = data.lock().await;
    match engine.confirm(&user).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        Err(err) => Ok(error_response(err)),
    }
}

// Abandon the current player; charged fees are forfeited
async fn skip(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse> {
    if get_auth_user(&req).is_none() {
        return Ok(unauthorized());
    }

    let mut engine = data.lock().await;
    match engine.skip() {
        Ok(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        Err(err) => Ok(error_response(err)),
    }
}

// Move on to the next queued player
async fn advance(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse> {
    if get_auth_user(&req).is_none() {
        return Ok(unauthorized());
    }

    let mut engine = data.lock().await;
    match engine.advance() {
        Ok(player) => Ok(HttpResponse::Ok().json(player.cloned())),
        Err(err) => Ok(error_response(err)),
    }
}

// Get all teams with their budget totals
async fn get_teams(data: web::Data<AppState>) -> Result<HttpResponse> {
    let engine = data.lock().await;
    match engine.teams().get_all().await {
        Ok(teams) => Ok(HttpResponse::Ok().json(teams)),
        Err(err) => Ok(error_response(Errors::Repository(err))),
    }
}

// Get all players
async fn get_players(data: web::Data<AppState>) -> Result<HttpResponse> {
    let engine = data.lock().await;
    match engine.players().get_all().await {
        Ok(players) => Ok(HttpResponse::Ok().json(players)),
        Err(err) => Ok(error_response(Errors::Repository(err))),
    }
}

// Configure routes
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/auction", web::get().to(get_auction))
            .route("/auction/category/{category}", web::post().to(select_category))
            .route("/auction/start", web::post().to(start_auction))
            .route("/auction/bids", web::post().to(place_bid))
            .route("/auction/confirm", web::post().to(confirm))
            .route("/auction/skip", web::post().to(skip))
            .route("/auction/advance", web::post().to(advance))
            .route("/teams", web::get().to(get_teams))
            .route("/players", web::get().to(get_players)),
    );
}
