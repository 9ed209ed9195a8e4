//! Greenhouse irrigation scheduler.
//!
//! Drones bound to greenhouse rows water plants in the order set by an
//! irrigation plan, one watering per tick across the whole greenhouse.
//! [`logic::simulator`] holds the tick engine, [`logic::loader`] turns
//! configuration documents into [`models::configuration::Configuration`]
//! values and [`api`] exposes both over HTTP.

pub mod api;
pub mod error;
pub mod logic;
pub mod models;
pub mod settings;

pub use error::{Error, Result};
