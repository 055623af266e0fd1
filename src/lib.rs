pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod persistence;
pub mod routes;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod types;
pub mod view;
