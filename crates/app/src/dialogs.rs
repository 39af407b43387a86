//! Native dialogs. Only ever called from the UI thread.

use crate::view::{Level, Notice};
use std::path::PathBuf;

/// Ask for one or more subtitle files with the given extension.
/// A cancelled dialog yields an empty list.
pub fn pick_subtitle_files(extension: &str) -> Vec<PathBuf> {
    rfd::FileDialog::new()
        .set_title(format!("Selecionar arquivos .{extension}"))
        .add_filter("SRT files", &[extension])
        .pick_files()
        .unwrap_or_default()
}

pub fn pick_output_dir() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Selecionar Diretório de Saída")
        .pick_folder()
}

/// Show `notice` as a blocking message box.
pub fn show(notice: &Notice) {
    let level = match notice.level {
        Level::Info => rfd::MessageLevel::Info,
        Level::Warning => rfd::MessageLevel::Warning,
        Level::Error => rfd::MessageLevel::Error,
    };
    let _ = rfd::MessageDialog::new()
        .set_level(level)
        .set_title(notice.title.as_str())
        .set_description(notice.text.as_str())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
