pub mod constants;
pub mod crs;
pub mod geo;
pub mod map;
