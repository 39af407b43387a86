//! Everything the window shows, updated only on the UI thread.
//! User actions and worker events come in here and may produce a [`Notice`]
//! for the window to display.

use srt_translator_core::batch::{BatchEvent, Precondition};
use srt_translator_core::config::Settings;
use srt_translator_core::session::Session;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A message for the user, shown as a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn new(level: Level, title: &str, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            text: text.into(),
        }
    }
}

impl From<Precondition> for Notice {
    fn from(p: Precondition) -> Self {
        let text = match p {
            Precondition::NoFiles => "Nenhum arquivo selecionado.",
            Precondition::NoOutputDir => "Nenhum diretório selecionado.",
        };
        Notice::new(Level::Warning, "Aviso", text)
    }
}

#[derive(Debug, Default)]
pub struct View {
    pub session: Session,
    /// Current file progress, 0.0..=1.0.
    pub progress: f32,
    pub status: String,
}

impl View {
    /// Apply the result of the file dialog.
    pub fn files_selected(&mut self, paths: Vec<PathBuf>, settings: &Settings) -> Option<Notice> {
        if !self.session.select_files(paths, settings.empty_selection) || self.session.files().is_empty() {
            return None;
        }
        Some(Notice::new(
            Level::Info,
            "Arquivos Selecionados",
            format!("{} arquivos selecionados.", self.session.files().len()),
        ))
    }

    /// Apply the result of the folder dialog.
    pub fn output_selected(&mut self, dir: Option<PathBuf>) -> Option<Notice> {
        let dir = dir?;
        let text = format!("Arquivos traduzidos serão salvos em: {}", dir.display());
        self.session.set_output_dir(Some(dir));
        Some(Notice::new(Level::Info, "Diretório Selecionado", text))
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.session.source_dir()
    }

    /// Fold one worker event into the visible state.
    pub fn apply(&mut self, event: BatchEvent) -> Option<Notice> {
        match event {
            BatchEvent::FileStarted { .. } => {
                self.progress = 0.0;
                self.status.clear();
                None
            }
            BatchEvent::Progress { name, percent, .. } => {
                self.progress = f32::from(percent) / 100.0;
                self.status = format!("Traduzindo {name}: {percent}%");
                None
            }
            BatchEvent::FileTranslated { index, .. } => {
                self.session.mark_translated(index);
                self.status.clear();
                None
            }
            BatchEvent::FileFailed { path, error, .. } => {
                self.status.clear();
                Some(Notice::new(
                    Level::Error,
                    "Erro",
                    format!("Erro ao traduzir {}: {error}", path.display()),
                ))
            }
            BatchEvent::Finished(_) => {
                self.session.finish_translation();
                self.status.clear();
                Some(Notice::new(Level::Info, "Sucesso", "Tradução concluída!"))
            }
        }
    }
}
