pub mod boundary;
pub mod branches;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod resolver;
pub mod tags;
pub mod ui;

pub use error::{ReleaseError, Result};
