//! Imhotep Login
//!
//! A terminal login window that checks a unique code and password against
//! the `users` table of a SQLite database.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod input;
pub mod telemetry;
pub mod ui;
