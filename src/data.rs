pub mod geolocation;
pub mod weatherapi;
