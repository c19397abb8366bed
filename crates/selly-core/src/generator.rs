//! Reply generator seam.
//!
//! The orchestrator only knows [`ReplyGenerator`]. Concrete generators (the
//! Gemini client in `selly-agent`, test doubles) live elsewhere.
//! [`WithFallback`] turns any generator into one that never fails.

use crate::letter::Letter;
use crate::types::{Context, Emotion, PlantType, Status};
use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

/// Everything a generator gets to see about a letter.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyRequest {
    pub user_name: String,
    pub content: String,
    pub emotion: Emotion,
    pub intensity: u8,
    pub contexts: BTreeSet<Context>,
    pub statuses: BTreeSet<Status>,
}

impl ReplyRequest {
    pub fn for_letter(user_name: &str, letter: &Letter) -> Self {
        Self {
            user_name: user_name.to_string(),
            content: letter.content.clone(),
            emotion: letter.emotion,
            intensity: letter.intensity,
            contexts: letter.contexts.clone(),
            statuses: letter.statuses.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyPayload {
    pub reply: String,
    pub summary: String,
    pub plant_type: PlantType,
    pub advice: String,
    pub fallback: bool,
}

impl ReplyPayload {
    /// The fixed reply used when nothing better is available.
    pub fn fallback() -> Self {
        Self {
            reply: "I heard every word of your letter. The clouds are in the way \
                    tonight, but what you feel matters just as it is. Try taking \
                    one slow, deep breath with me."
                .to_string(),
            summary: "A quiet hour of reflection".to_string(),
            plant_type: PlantType::Unknown,
            advice: "Close your eyes for a moment and slowly drink a glass of water."
                .to_string(),
            fallback: true,
        }
    }
}

/// The generator could not produce a reply.
#[derive(Debug, Clone, Error)]
#[error("reply generation failed: {0}")]
pub struct GenerationFailure(pub String);

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, request: &ReplyRequest) -> Result<ReplyPayload, GenerationFailure>;
}

/// Wraps a generator so every failure becomes [`ReplyPayload::fallback`].
pub struct WithFallback<G> {
    inner: G,
}

impl<G> WithFallback<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: ReplyGenerator> ReplyGenerator for WithFallback<G> {
    async fn generate(&self, request: &ReplyRequest) -> Result<ReplyPayload, GenerationFailure> {
        match self.inner.generate(request).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                tracing::warn!(error = %e, "reply generation failed, using fallback reply");
                Ok(ReplyPayload::fallback())
            }
        }
    }
}

#[async_trait]
impl<G: ReplyGenerator + ?Sized> ReplyGenerator for std::sync::Arc<G> {
    async fn generate(&self, request: &ReplyRequest) -> Result<ReplyPayload, GenerationFailure> {
        (**self).generate(request).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
