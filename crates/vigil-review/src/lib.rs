//! The two-stage review pipeline for vigil.
//!
//! Provides the LLM client, prompt construction and triage parsing,
//! the orchestrator driving the triage and critical-review calls,
//! report composition with file links, and webhook delivery.

pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod webhook;
