//! Dataset adapters.

pub mod dto;
pub mod json;
