//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: dataset loading,
//! LLM completion, and narrative rendering.

pub mod dataset;
pub mod llm;
pub mod narrative;
