use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use tastetrip_api::config::AppConfig;
use tastetrip_api::routes;
use tastetrip_api::services::trip_planner::TripPlanner;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        info!("Release mode");
    }

    let config = AppConfig::from_env();
    for (service, configured) in config.credential_status() {
        if !configured {
            warn!("{} credentials not set, falling back where needed", service);
        }
    }

    let planner = match TripPlanner::new(&config) {
        Ok(planner) => web::Data::new(planner),
        Err(e) => {
            error!("Failed to build trip planner: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let host = config.host.clone();
    let port = config.port;
    let config = web::Data::new(config);
    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(config.clone())
            .app_data(planner.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
