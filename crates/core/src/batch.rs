//! Batch translation of the selected files.
//! This module wires subtitle loading, per-cue translation and output writing,
//! reporting everything it does as [`BatchEvent`]s.

use crate::config::Settings;
use crate::session::Session;
use crate::srt;
use crate::translate::Translator;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, trace, warn};

/// Why a batch cannot start. Nothing is written in either case.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    #[error("no files selected")]
    NoFiles,
    #[error("no output directory selected")]
    NoOutputDir,
}

/// Progress and results sent from the worker to the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// Work on file `index` began; progress is back at 0.
    FileStarted { index: usize, path: PathBuf },
    /// Cue progress for file `index`, 0..=100.
    Progress {
        index: usize,
        name: String,
        percent: u8,
    },
    FileTranslated { index: usize, output: PathBuf },
    FileFailed {
        index: usize,
        path: PathBuf,
        error: String,
    },
    /// Always the last event of a batch.
    Finished(BatchSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Everything the runner needs, detached from the window's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub source_lang: String,
    pub target_lang: String,
    pub source_suffix: String,
    pub target_suffix: String,
}

impl BatchJob {
    /// Snapshot `session`, checking there is something to do and somewhere
    /// to put it.
    pub fn from_session(session: &Session, settings: &Settings) -> Result<Self, Precondition> {
        if session.files().is_empty() {
            return Err(Precondition::NoFiles);
        }
        let output_dir = session.output_dir().ok_or(Precondition::NoOutputDir)?;
        Ok(Self {
            files: session.files().iter().map(|f| f.path.clone()).collect(),
            output_dir: output_dir.to_path_buf(),
            source_lang: settings.source_lang.clone(),
            target_lang: settings.target_lang.clone(),
            source_suffix: settings.source_suffix.clone(),
            target_suffix: settings.target_suffix.clone(),
        })
    }
}

/// Swap a trailing `source_suffix` for `target_suffix`; other names are kept.
pub fn output_file_name(name: &str, source_suffix: &str, target_suffix: &str) -> String {
    match name.strip_suffix(source_suffix) {
        Some(stem) if !source_suffix.is_empty() => format!("{stem}{target_suffix}"),
        _ => name.to_string(),
    }
}

/// Percentage of `done` out of `total`, truncated.
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (done * 100 / total).min(100) as u8
}

/// Translate every file of `job` in order.
/// A failing file is reported and skipped; the batch always runs to the end
/// and finishes with [`BatchEvent::Finished`].
pub async fn run<T>(job: &BatchJob, translator: &T, events: &UnboundedSender<BatchEvent>) -> BatchSummary
where
    T: Translator + ?Sized,
{
    info!(
        "translating {} files into {}",
        job.files.len(),
        job.output_dir.display()
    );
    let mut summary = BatchSummary::default();
    for (index, path) in job.files.iter().enumerate() {
        let _ = events.send(BatchEvent::FileStarted {
            index,
            path: path.clone(),
        });
        match translate_file(job, index, path, translator, events).await {
            Ok(output) => {
                info!("wrote {}", output.display());
                summary.succeeded += 1;
                let _ = events.send(BatchEvent::FileTranslated { index, output });
            }
            Err(err) => {
                error!("failed to translate {}: {err:#}", path.display());
                summary.failed += 1;
                let _ = events.send(BatchEvent::FileFailed {
                    index,
                    path: path.clone(),
                    error: format!("{err:#}"),
                });
            }
        }
    }
    info!(
        "batch done: {} translated, {} failed",
        summary.succeeded, summary.failed
    );
    let _ = events.send(BatchEvent::Finished(summary));
    summary
}

/// Load, translate and write a single file, returning the output path.
/// Nothing is written unless every cue translated.
async fn translate_file<T>(
    job: &BatchJob,
    index: usize,
    path: &Path,
    translator: &T,
    events: &UnboundedSender<BatchEvent>,
) -> Result<PathBuf>
where
    T: Translator + ?Sized,
{
    trace!("translate_file index={index} path={}", path.display());
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} has no file name", path.display()))?;
    let mut doc = srt::load(path)?;
    let total = doc.cues.len();
    if total == 0 {
        warn!("{} has no cues", path.display());
    }
    for (i, cue) in doc.cues.iter_mut().enumerate() {
        let translated = translator
            .translate(&cue.joined_text(), &job.source_lang, &job.target_lang)
            .await
            .with_context(|| format!("translating cue {}", cue.index))?;
        cue.set_text(&translated);
        let _ = events.send(BatchEvent::Progress {
            index,
            name: name.clone(),
            percent: percent(i + 1, total),
        });
    }
    let output = job
        .output_dir
        .join(output_file_name(&name, &job.source_suffix, &job.target_suffix));
    if output == path {
        warn!("overwriting input {}", path.display());
    }
    doc.save(&output)?;
    Ok(output)
}
