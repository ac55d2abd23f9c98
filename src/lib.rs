#![doc = "The `tasklog` library crate."]
#![doc = ""]
#![doc = "Accounts, sessions, form validation, task storage, mail and page rendering"]
#![doc = "for the Tasklog web application. The binary (`main.rs`) reads the configuration,"]
#![doc = "builds an `AppContext` and serves `routes::config`."]

pub mod auth;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod forms;
pub mod mail;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod views;

pub use context::AppContext;
pub use error::AppError;
