pub mod city_info;
pub mod completion;
pub mod flight_estimate;
pub mod image_service;
pub mod itinerary_content;
pub mod json_repair;
pub mod keyword_rules;
pub mod preference_extractor;
pub mod recommendation;
pub mod taste_graph;
pub mod trip_planner;
pub mod venue_categorizer;
pub mod weather_service;
