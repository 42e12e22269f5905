//! LLM-powered page layout generation
//!
//! This crate asks a chat model for a page layout: an ordered list of page
//! components with field values, described in the model's own loose JSON.
//! It has no persistence or schema dependencies - turning the layout into
//! typed content stays in `genpage`.
//!
//! ## Architecture
//!
//! ```text
//! SitePrompt (site name + component catalogue) → LlmClient → raw layout text
//! ```
//!
//! ## Backend Selection
//!
//! Set `AGENT_BACKEND` environment variable:
//! - `anthropic` (default): Anthropic Claude API
//! - `openai`: OpenAI API

// LLM client abstraction
pub mod anthropic_client;
pub mod client_factory;
pub mod llm_client;
pub mod openai_client;

// Layout generation
pub mod generator;
pub mod prompt;

// Re-exports for convenience
pub use client_factory::{create_llm_client, ChatProvider};
pub use generator::PageLayoutGenerator;
pub use llm_client::LlmClient;
pub use prompt::SitePrompt;
