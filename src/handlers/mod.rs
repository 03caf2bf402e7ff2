pub mod result_handlers;
pub mod suggestion_handlers;
pub mod vote_handlers;

use actix_web::web;

/// Configure the /api routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sessions/{session_id}")
            .route("/suggestions", web::get().to(suggestion_handlers::list))
            .route("/suggestions", web::post().to(suggestion_handlers::create))
            .route("/votes", web::get().to(vote_handlers::list))
            .route("/votes", web::post().to(vote_handlers::cast))
            .route("/results", web::get().to(result_handlers::results)),
    );
}
