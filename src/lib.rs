pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, Result};
