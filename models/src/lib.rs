// models/src/lib.rs
// Plain domain types shared by the graph client and the REST layer.

pub mod city;
pub mod road;
pub mod route;

pub use city::City;
pub use road::Road;
pub use route::Route;
