//! Wire model shared by the tandem relay and its clients.

pub mod model;

pub use model::*;
