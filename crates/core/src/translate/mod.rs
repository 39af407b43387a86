//! Translation seam.
//! The batch runner only sees [`Translator`], so tests swap in a stub.

use anyhow::Result;
use async_trait::async_trait;

pub mod google;

/// Translates one piece of text between two language codes.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target`, e.g. `en` to `pt`.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}
