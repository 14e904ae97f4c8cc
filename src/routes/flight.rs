use actix_web::{web, HttpResponse, Responder};

use crate::models::trip::FlightEstimateRequest;
use crate::services::trip_planner::TripPlanner;

/*
    /api/flight-estimate
*/
pub async fn estimate(
    planner: web::Data<TripPlanner>,
    body: web::Json<FlightEstimateRequest>,
) -> impl Responder {
    let estimate = planner.flight_estimate(&body).await;
    HttpResponse::Ok().json(estimate)
}
