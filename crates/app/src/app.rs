//! The main window.

use crate::dialogs;
use crate::view::{Level, Notice, View};
use crate::worker::{self, Worker};
use eframe::egui;
use srt_translator_core::batch::BatchJob;
use srt_translator_core::config::Settings;
use srt_translator_core::translate::google::GoogleTranslator;
use std::time::Duration;
use tracing::{error, info};

const BUTTON_WIDTH: f32 = 160.0;

pub struct TranslatorApp {
    settings: Settings,
    translator: GoogleTranslator,
    view: View,
    worker: Option<Worker>,
}

impl TranslatorApp {
    pub fn new(settings: Settings) -> Self {
        let translator = GoogleTranslator::new(settings.endpoint.clone());
        Self {
            settings,
            translator,
            view: View::default(),
            worker: None,
        }
    }

    fn select_files(&mut self) {
        let paths = dialogs::pick_subtitle_files(&self.settings.extension);
        if let Some(notice) = self.view.files_selected(paths, &self.settings) {
            dialogs::show(&notice);
        }
    }

    fn select_output_dir(&mut self) {
        if let Some(notice) = self.view.output_selected(dialogs::pick_output_dir()) {
            dialogs::show(&notice);
        }
    }

    fn start_translation(&mut self, ctx: &egui::Context) {
        let job = match BatchJob::from_session(&self.view.session, &self.settings) {
            Ok(job) => job,
            Err(precondition) => {
                info!("not translating: {precondition}");
                dialogs::show(&Notice::from(precondition));
                return;
            }
        };
        match worker::spawn(job, self.translator.clone(), ctx.clone()) {
            Ok(worker) => {
                self.view.session.begin_translation();
                self.worker = Some(worker);
            }
            Err(err) => {
                error!("could not start the batch: {err:#}");
                dialogs::show(&Notice::new(Level::Error, "Erro", format!("{err:#}")));
            }
        }
    }

    /// Apply worker events and show any dialogs they ask for.
    fn drain_events(&mut self) {
        let Some(worker) = self.worker.as_mut() else {
            return;
        };
        for event in worker.poll() {
            if let Some(notice) = self.view.apply(event) {
                dialogs::show(&notice);
            }
        }
        if worker.is_finished() {
            if let Some(worker) = self.worker.take() {
                worker.join();
            }
        }
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        let busy = self.view.session.is_translating();
        if busy {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let button = |text: &str| egui::Button::new(text).min_size(egui::vec2(BUTTON_WIDTH, 0.0));
                ui.add_space(10.0);
                if ui.add_enabled(!busy, button("Selecionar")).clicked() {
                    self.select_files();
                }
                ui.add_space(10.0);
                if ui.add_enabled(!busy, button("Salvar em...")).clicked() {
                    self.select_output_dir();
                }
                ui.add_space(10.0);
                if let Some(dir) = self.view.source_dir() {
                    ui.label(format!("Pasta: {}", dir.display()));
                }
                if let Some(dir) = self.view.session.output_dir() {
                    ui.label(format!("Saída: {}", dir.display()));
                }

                egui::ScrollArea::vertical()
                    .max_height(ui.available_height() * 0.6)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for entry in self.view.session.files() {
                            ui.label(entry.label(&self.settings.translated_marker));
                        }
                    });

                ui.add_space(10.0);
                if ui.add_enabled(!busy, button("Traduzir")).clicked() {
                    self.start_translation(ctx);
                }
                ui.add_space(10.0);
                ui.add(egui::ProgressBar::new(self.view.progress).desired_width(600.0));
                ui.label(&self.view.status);
                ui.add_space(10.0);
                if ui.add(button("Sair")).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}
