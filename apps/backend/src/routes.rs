use actix_web::web;

pub mod auth;
pub mod contacts;
pub mod directory;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .configure(auth::configure_routes)
        .configure(contacts::configure_routes)
        .configure(directory::configure_routes);
}
