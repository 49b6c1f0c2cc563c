use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use tokio::net::TcpListener;

use classroom_quiz_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware, relay,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let relay_handle = relay::RelayHandle::spawn();
    let relay_listener =
        TcpListener::bind((config.web_server_host.as_str(), config.relay_port)).await?;
    tokio::spawn(relay::serve(relay_listener, relay_handle.clone()));

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config, relay_handle).await.map_err(|e| {
        log::error!("Failed to initialise application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let state = Arc::new(state);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure(Arc::clone(&state)))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
