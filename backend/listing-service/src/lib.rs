pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod query;
pub mod repository;
pub mod services;
pub mod workers;
