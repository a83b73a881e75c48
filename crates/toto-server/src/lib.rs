//! Betting Backend Server
//!
//! Combines launch authentication and the betting book API
//! into a single actix-web server.
//!
//! ## Submodules
//!
//! - [`admin`] — Tournament, team, and fixture management plus entry approval
//! - [`book`] — Listings, participation, and bet placement

pub mod admin;
pub mod book;

mod dto;
pub use dto::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

/// Unexpected internal failure: logged with context, generic to the caller.
pub(crate) fn fault(context: &str, e: toto_pg::PgErr) -> HttpResponse {
    log::error!("{}: {}", context, e);
    HttpResponse::InternalServerError().body(e.to_string())
}

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let client = toto_pg::db().await;
    toto_records::migrate(&client).await.expect("schema migration");
    let verifier = web::Data::new(toto_auth::Verifier::from_env());
    let crypto = web::Data::new(toto_auth::Crypto::from_env());
    let roster = web::Data::new(toto_auth::Roster::from_env());
    let client = web::Data::new(client);
    log::info!("starting betting server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(verifier.clone())
            .app_data(crypto.clone())
            .app_data(roster.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .route("/init", web::post().to(toto_auth::launch))
            .route("/tournaments", web::get().to(book::handlers::tournaments))
            .route("/teams", web::get().to(book::handlers::teams))
            .route("/available-tournaments", web::get().to(book::handlers::available))
            .route("/participate", web::post().to(book::handlers::participate))
            .route("/user-matches", web::get().to(book::handlers::mine))
            .route("/pending-matches", web::get().to(book::handlers::slate))
            .route("/place-bet", web::post().to(book::handlers::place))
            .route("/add_tournament", web::post().to(admin::handlers::add_tournament))
            .route("/add_team", web::post().to(admin::handlers::add_team))
            .route("/add_match", web::post().to(admin::handlers::add_fixture))
            .route("/pending-participations", web::get().to(admin::handlers::pending))
            .route("/approve-participation", web::post().to(admin::handlers::approve))
    })
    .workers(6)
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
