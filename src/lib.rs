pub mod analyzer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod tracker;
pub mod ui;
pub mod warning;

pub use error::{Result, TrackerError};
