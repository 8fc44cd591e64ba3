//! CLI module graph.

pub mod command;
pub mod compare;
pub mod config;
pub mod diagnostic;
pub mod insight;
pub mod output;
pub mod paths;
pub mod peers;
pub mod profile;
pub mod run;
pub mod stores;
