//! `selly-agent` — reply generation over the Gemini `generateContent` API.
//!
//! # Architecture
//!
//! ```text
//! ReplyRequest (selly-core)
//!     │
//!     ▼
//! prompt          ← persona prompt + JSON response schema
//!     │
//!     ▼
//! GeminiClient    ← POST {api_base}/v1beta/models/{model}:generateContent
//!     │              parses candidates[0] text as the reply JSON
//!     ▼
//! ReplyPayload    ← wrapped in WithFallback unless disabled in config
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use selly_agent::build_generator;
//! use selly_core::config::Config;
//!
//! let config = Config::load(root)?;
//! let generator = build_generator(&config.reply)?;
//! let payload = generator.generate(&request).await?;
//! ```

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{ClientSettings, GeminiClient};
pub use error::AgentError;

use selly_core::config::ReplyConfig;
use selly_core::generator::{ReplyGenerator, WithFallback};
use std::sync::Arc;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Build the generator described by `config`.
///
/// A missing API key is not an error here: the client fails each call
/// instead, which the fallback wrapper turns into the offline reply.
pub fn build_generator(config: &ReplyConfig) -> Result<Arc<dyn ReplyGenerator>> {
    let client = GeminiClient::new(ClientSettings::from_config(config))?;
    if config.fallback {
        Ok(Arc::new(WithFallback::new(client)))
    } else {
        Ok(Arc::new(client))
    }
}
