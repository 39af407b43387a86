//! Session state shared between the window and the batch runner.
//! The window owns a [`Session`]; the runner gets an immutable snapshot of it.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What an empty file selection (a cancelled dialog) does to the current list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptySelectionPolicy {
    /// Leave the previous selection in place.
    #[default]
    KeepPrevious,
    /// Discard the previous selection.
    ClearPrevious,
}

/// One selected subtitle file as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub translated: bool,
}

impl FileEntry {
    /// Text shown in the list, with `marker` appended once translated.
    pub fn label(&self, marker: &str) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        if self.translated {
            format!("{name}{marker}")
        } else {
            name
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Translating,
    Done,
}

/// Coarse state of the window, derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    FilesSelected,
    OutputChosen,
    /// Both files and an output directory are set.
    Ready,
    Translating,
    Done,
}

/// Files, output directory and batch phase of one run of the program.
#[derive(Debug, Clone, Default)]
pub struct Session {
    files: Vec<FileEntry>,
    output_dir: Option<PathBuf>,
    phase: Phase,
}

impl Session {
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Apply a file selection. A non-empty one replaces the list wholesale.
    /// Returns true when the list changed.
    pub fn select_files(&mut self, paths: Vec<PathBuf>, policy: EmptySelectionPolicy) -> bool {
        if paths.is_empty() {
            debug!("empty selection, policy {policy:?}");
            return match policy {
                EmptySelectionPolicy::KeepPrevious => false,
                EmptySelectionPolicy::ClearPrevious => {
                    let changed = !self.files.is_empty();
                    self.files.clear();
                    changed
                }
            };
        }
        info!("selected {} files", paths.len());
        if self.phase == Phase::Done {
            self.phase = Phase::Idle;
        }
        self.files = paths
            .into_iter()
            .map(|path| FileEntry {
                path,
                translated: false,
            })
            .collect();
        true
    }

    /// Choose the output directory; `None` (cancelled) keeps the previous one.
    pub fn set_output_dir(&mut self, dir: Option<PathBuf>) -> bool {
        match dir {
            Some(dir) => {
                info!("output directory {}", dir.display());
                self.output_dir = Some(dir);
                true
            }
            None => false,
        }
    }

    /// Parent directory of the first selected file.
    pub fn source_dir(&self) -> Option<&Path> {
        self.files.first().and_then(|f| f.path.parent())
    }

    /// Flag the entry at `index` as translated. Out of range is ignored.
    pub fn mark_translated(&mut self, index: usize) {
        if let Some(entry) = self.files.get_mut(index) {
            entry.translated = true;
        }
    }

    pub fn is_translating(&self) -> bool {
        self.phase == Phase::Translating
    }

    pub fn begin_translation(&mut self) {
        self.phase = Phase::Translating;
    }

    pub fn finish_translation(&mut self) {
        self.phase = Phase::Done;
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Translating => SessionState::Translating,
            Phase::Done => SessionState::Done,
            Phase::Idle => match (self.files.is_empty(), self.output_dir.is_some()) {
                (true, false) => SessionState::Idle,
                (false, false) => SessionState::FilesSelected,
                (true, true) => SessionState::OutputChosen,
                (false, true) => SessionState::Ready,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(format!("/subs/{n}"))).collect()
    }

    #[test]
    fn selection_keeps_order() {
        let mut s = Session::default();
        assert!(s.select_files(paths(&["b_en.srt", "a_en.srt", "c.srt"]), Default::default()));
        let labels: Vec<String> = s.files().iter().map(|f| f.label("")).collect();
        assert_eq!(labels, vec!["b_en.srt", "a_en.srt", "c.srt"]);
        assert_eq!(s.source_dir(), Some(Path::new("/subs")));
    }

    #[test]
    fn reselecting_replaces_the_list() {
        let mut s = Session::default();
        s.select_files(paths(&["a.srt", "b.srt", "c.srt"]), Default::default());
        s.mark_translated(0);
        s.select_files(paths(&["d.srt"]), Default::default());
        assert_eq!(
            s.files(),
            &[FileEntry {
                path: "/subs/d.srt".into(),
                translated: false
            }]
        );
    }

    #[test]
    fn empty_selection_policies() {
        let mut s = Session::default();
        s.select_files(paths(&["a.srt"]), Default::default());
        assert!(!s.select_files(Vec::new(), EmptySelectionPolicy::KeepPrevious));
        assert_eq!(s.files().len(), 1);
        assert!(s.select_files(Vec::new(), EmptySelectionPolicy::ClearPrevious));
        assert!(s.files().is_empty());
        assert!(!s.select_files(Vec::new(), EmptySelectionPolicy::ClearPrevious));
    }

    #[test]
    fn marker_is_appended_once_translated() {
        let mut s = Session::default();
        s.select_files(paths(&["movie_en.srt"]), Default::default());
        s.mark_translated(0);
        s.mark_translated(7);
        assert_eq!(s.files()[0].label(" >>>> [Traduzido]"), "movie_en.srt >>>> [Traduzido]");
    }

    #[test]
    fn state_transitions() {
        let mut s = Session::default();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(!s.set_output_dir(None));
        assert!(s.set_output_dir(Some("/out".into())));
        assert_eq!(s.state(), SessionState::OutputChosen);
        s.select_files(paths(&["a.srt"]), Default::default());
        assert_eq!(s.state(), SessionState::Ready);
        s.begin_translation();
        assert!(s.is_translating());
        assert_eq!(s.state(), SessionState::Translating);
        s.finish_translation();
        assert_eq!(s.state(), SessionState::Done);
        assert_eq!(s.output_dir(), Some(Path::new("/out")));

        let mut f = Session::default();
        f.select_files(paths(&["a.srt"]), Default::default());
        assert_eq!(f.state(), SessionState::FilesSelected);
    }
}
