//! Infrastructure configuration modules.

pub mod analysis;
pub mod data;
pub mod llm;
pub mod logging;
pub mod settings;
