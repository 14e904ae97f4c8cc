use actix_web::web;

pub mod flight;
pub mod health;
pub mod itinerary;

/// Register every route. Handlers expect `web::Data<AppConfig>` and
/// `web::Data<TripPlanner>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .route("/itinerary", web::post().to(itinerary::create))
            .route("/flight-estimate", web::post().to(flight::estimate)),
    );
}
