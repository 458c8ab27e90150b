pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod histogram;
pub mod imdb;
pub mod index;
mod metrics;
pub mod score;
pub mod searcher;
mod server;
pub mod utils;

pub use config::Opts;
pub use error::{Error, Result};
pub use imdb::IMDB;
