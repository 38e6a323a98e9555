pub mod api;
pub mod cache;
pub mod cli;
pub mod commits;
pub mod config;
pub mod error;
pub mod merges;
pub mod model;
pub mod projects;
pub mod util;
