use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2};

use crate::engine::resize::ResizeDebouncer;
use crate::engine::{Engine, Viewport};
use crate::keywords::{KeywordRecord, load_keywords};

mod panels;
mod view;

const RESIZE_SETTLE_SECS: f64 = 0.2;
const INITIAL_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 860.0,
};

pub struct BubbleApp {
    input_path: PathBuf,
    seed: u64,
    state: AppState,
    reload_rx: Option<Receiver<Result<Vec<KeywordRecord>, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<KeywordRecord>, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    engine: Engine,
    resize: ResizeDebouncer,
    seen_revision: u64,
    hovered: Option<usize>,
    focused: Option<usize>,
    pointer: Option<Pos2>,
    search: String,
    copied_keyword: Option<(usize, f64)>,
    transcript_copied_until: Option<f64>,
    export_status: Option<(String, f64)>,
}

impl ViewModel {
    fn new(records: Vec<KeywordRecord>, seed: u64) -> Self {
        Self {
            engine: Engine::new(records, INITIAL_VIEWPORT, seed),
            resize: ResizeDebouncer::new(RESIZE_SETTLE_SECS),
            seen_revision: 0,
            hovered: None,
            focused: None,
            pointer: None,
            search: String::new(),
            copied_keyword: None,
            transcript_copied_until: None,
            export_status: None,
        }
    }

    fn replace_records(&mut self, records: Vec<KeywordRecord>) {
        self.engine.set_records(records);
        self.resize.cancel();
        self.copied_keyword = None;
    }

    fn show(
        &mut self,
        ctx: &Context,
        input_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("keyword-bubbles");
                    ui.separator();
                    ui.label(format!("source: {input_path}"));
                    ui.label(format!("keywords: {}", self.engine.records().len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload keywords"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading keyword set...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_bubbles(ui);
            }
        });
    }
}

impl BubbleApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, input_path: PathBuf, seed: u64) -> Self {
        let state = Self::start_load(input_path.clone());
        Self {
            input_path,
            seed,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(input_path: PathBuf) -> Receiver<Result<Vec<KeywordRecord>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_keywords(&input_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(input_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(input_path),
        }
    }
}

impl eframe::App for BubbleApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(records) => {
                            AppState::Ready(Box::new(ViewModel::new(records, self.seed)))
                        }
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading keyword set...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load keywords");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.input_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    &self.input_path.display().to_string(),
                    &mut reload_requested,
                    is_reloading,
                );

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.input_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => match result {
                            Ok(records) => model.replace_records(records),
                            Err(error) => transition = Some(AppState::Error(error)),
                        },
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let AppState::Ready(model) = &mut self.state {
            model.engine.stop_observing();
        }
    }
}
