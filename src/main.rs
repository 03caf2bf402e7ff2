use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};

use lunchpick::clients::{AuthClient, PlacesClient, RoutingClient};
use lunchpick::config::AppConfig;
use lunchpick::state::AppState;
use lunchpick::store::PgStore;
use lunchpick::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    let pool = db::init_pool(&config.database_url).await;
    db::run_migrations(&pool).await;

    if config.routing_api_key.is_none() {
        log::warn!("No ROUTING_API_KEY set, walk times will use the haversine estimate");
    }

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        verifier: Arc::new(AuthClient::new(
            config.auth_base_url.clone(),
            config.auth_api_key.clone(),
        )),
        walk_times: Arc::new(RoutingClient::new(
            config.routing_api_key.clone(),
            config.routing_base_url.clone(),
        )),
        places: Arc::new(PlacesClient::new(
            config.places_api_key.clone(),
            config.places_base_url.clone(),
        )),
    };

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .service(web::scope("/api").configure(handlers::configure))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
