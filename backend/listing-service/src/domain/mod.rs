pub mod ids;
pub mod input;
pub mod inquiry;
pub mod models;
pub mod stats;
