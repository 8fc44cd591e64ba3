//! Narrative insights over a store analysis.

pub mod local;
pub mod narrator;
pub mod service;
