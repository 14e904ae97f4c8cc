use actix_web::{web, HttpResponse, Responder};
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::AppConfig;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    services: IndexMap<&'static str, &'static str>,
    version: &'static str,
}

/*
    /health
*/
pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let services: IndexMap<&'static str, &'static str> = config
        .credential_status()
        .into_iter()
        .map(|(service, configured)| (service, if configured { "configured" } else { "missing" }))
        .collect();

    let status = if services.values().all(|s| *s == "configured") {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status,
        services,
        version: env!("CARGO_PKG_VERSION"),
    })
}
