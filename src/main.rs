use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::{info, warn};
use player_auction::persistence::{read_roster, Roster};
use player_auction::web::app::{configure_app, init_app_state};

// Main application
pub async fn run_app(port: u16) -> std::io::Result<()> {
    std::env::set_var("RUST_LOG", "actix_web=info,player_auction=info");
    env_logger::init();

    let roster = match std::env::args().nth(1) {
        Some(path) => match read_roster(&path) {
            Ok(roster) => {
                info!(
                    "loaded roster from {}: {} teams, {} players",
                    path,
                    roster.teams.len(),
                    roster.players.len()
                );
                roster
            }
            Err(err) => {
                warn!("could not load roster from {}: {}", path, err);
                Roster::default()
            }
        },
        None => Roster::default(),
    };

    let app_state = init_app_state(roster);

    // 1 Hz tick source driving the auction clock
    let ticker = app_state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            interval.tick().await;
            ticker.lock().await.tick();
        }
    });

    info!("Starting server on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Logger::default())
            .configure(configure_app)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    run_app(8080).await
}
