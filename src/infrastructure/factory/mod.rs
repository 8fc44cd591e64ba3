//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured components
//! from application configuration.
//!
//! # Submodules
//!
//! - [`dataset`] - Dataset loading and analysis service construction
//! - [`llm`] - LLM client and insight service construction

pub mod dataset;
pub mod llm;
