pub mod calendar;
pub mod error;
pub mod models;
pub mod remote;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
