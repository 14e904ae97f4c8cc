use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use log::info;

use crate::models::preferences::TripRequest;
use crate::services::trip_planner::TripPlanner;

/*
    /api/itinerary
*/
pub async fn create(planner: web::Data<TripPlanner>, body: web::Json<TripRequest>) -> impl Responder {
    let request = body.into_inner();
    info!(
        "Itinerary requested from '{}' for {} to {}",
        request.departure_city, request.start_date, request.end_date
    );

    let today = Local::now().date_naive();
    let plan = planner.plan(&request, today).await;
    HttpResponse::Ok().json(plan)
}
