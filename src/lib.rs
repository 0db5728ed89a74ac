pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod i18n;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod pricing;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::build_app;
