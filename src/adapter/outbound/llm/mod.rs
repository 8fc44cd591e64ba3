//! LLM adapter modules.
//!
//! Provides implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait.

pub mod gemini;

#[cfg(any(test, feature = "testkit"))]
pub mod mock;
