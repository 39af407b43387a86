//! Background batch worker.
//! The batch runs on its own thread with a current-thread tokio runtime; the
//! only way back to the window is the event channel.

use anyhow::{Context, Result};
use eframe::egui;
use srt_translator_core::batch::{self, BatchEvent, BatchJob, BatchSummary};
use srt_translator_core::translate::Translator;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc::{error::TryRecvError, unbounded_channel, UnboundedReceiver};
use tracing::{error, info, warn};

pub struct Worker {
    events: UnboundedReceiver<BatchEvent>,
    thread: Option<JoinHandle<()>>,
    finished: bool,
}

/// Start translating `job` in the background.
pub fn spawn<T>(job: BatchJob, translator: T, ctx: egui::Context) -> Result<Worker>
where
    T: Translator + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting the batch runtime")?;
    let (tx, rx) = unbounded_channel();
    info!("starting batch of {} files", job.files.len());
    let thread = thread::Builder::new()
        .name("batch".into())
        .spawn(move || {
            runtime.block_on(batch::run(&job, &translator, &tx));
            ctx.request_repaint();
        })
        .context("spawning the batch worker")?;
    Ok(Worker {
        events: rx,
        thread: Some(thread),
        finished: false,
    })
}

impl Worker {
    /// Take every event sent since the last call, without blocking.
    /// A worker that died early still ends with `Finished`.
    pub fn poll(&mut self) -> Vec<BatchEvent> {
        let mut out = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if matches!(event, BatchEvent::Finished(_)) {
                        self.finished = true;
                    }
                    out.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.finished {
                        error!("batch worker stopped without finishing");
                        self.finished = true;
                        out.push(BatchEvent::Finished(BatchSummary::default()));
                    }
                    break;
                }
            }
        }
        out
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Wait for the thread to exit once the batch reported `Finished`.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("batch worker panicked");
            }
        }
    }
}
