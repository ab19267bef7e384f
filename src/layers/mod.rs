pub mod base;
pub mod imaging;
pub mod macros;
pub mod manager;
pub mod tile;
