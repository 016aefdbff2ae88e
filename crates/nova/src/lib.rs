pub mod assistant;
pub mod auth;
pub mod capabilities;
pub mod configs;
pub mod errors;
pub mod geolocation;
pub mod models;
pub mod renderer;
pub mod router;
pub mod transcript;
pub mod transport;
