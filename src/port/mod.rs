//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`outbound::dataset::DatasetSource`] - Loading the store collections
//! - [`outbound::llm::Llm`] - Text completion backends
//! - [`outbound::narrative::NarrativeRenderer`] - Turning a comparison into prose

pub mod outbound;
