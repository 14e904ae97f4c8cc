pub mod itinerary;
pub mod preferences;
pub mod recommendation;
pub mod trip;
pub mod weather;
