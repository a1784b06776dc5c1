// Route exports
pub mod matches;
pub mod profiles;
pub mod rooms;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(profiles::configure)
            .configure(rooms::configure),
    );
}
