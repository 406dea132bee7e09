use actix_web::web;

pub mod health;
pub mod poll;

/// Configure application routes for the server and for tests.
///
/// The polling routes keep their historical top-level paths
/// (`/getEstimations`, `/getTask`) because the host and player pages
/// hardcode them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Banner route: /
    cfg.route("/", web::get().to(health::root));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Polling facade: /getEstimations, /getTask
    cfg.configure(poll::configure_routes);

    // Push channel: /ws
    cfg.route("/ws", web::get().to(crate::ws::session::upgrade));
}
