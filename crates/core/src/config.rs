//! Compiled-in settings for the translator.

use crate::session::EmptySelectionPolicy;

/// Public endpoint used by the Google translator.
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Settings shared by the session, the batch runner and the translator.
/// None of these are exposed to the user; tests build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Language code of the input subtitles.
    pub source_lang: String,
    /// Language code we translate into.
    pub target_lang: String,
    /// Filename suffix replaced on output, e.g. `_en.srt`.
    pub source_suffix: String,
    /// Filename suffix written instead, e.g. `_pt.srt`.
    pub target_suffix: String,
    /// Extension accepted by the file picker, without the dot.
    pub extension: String,
    /// Appended to a list entry once its file has been written.
    pub translated_marker: String,
    pub empty_selection: EmptySelectionPolicy,
    /// Base URL of the translation service.
    pub endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_lang: "en".into(),
            target_lang: "pt".into(),
            source_suffix: "_en.srt".into(),
            target_suffix: "_pt.srt".into(),
            extension: "srt".into(),
            translated_marker: " >>>> [Traduzido]".into(),
            empty_selection: EmptySelectionPolicy::default(),
            endpoint: DEFAULT_ENDPOINT.into(),
        }
    }
}
