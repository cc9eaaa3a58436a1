use eframe::egui;

use crate::data::cache::{DatasetCache, DatasetProvider};
use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp<P: DatasetProvider> {
    pub state: AppState,
    cache: DatasetCache<P>,
    /// The load runs after the first frame so the loading message shows.
    frames_drawn: u64,
}

impl<P: DatasetProvider> ExplorerApp<P> {
    pub fn new(cache: DatasetCache<P>, top_k: usize, age_bins: usize) -> Self {
        Self {
            state: AppState::new(cache.source(), top_k, age_bins),
            cache,
            frames_drawn: 0,
        }
    }

    /// Pull the dataset from the cache. On failure no data page is rendered.
    fn ensure_loaded(&mut self) {
        if self.state.loaded.is_some() || self.state.status_message.is_some() {
            return;
        }
        if !self.cache.is_loaded() {
            log::info!("Loading dataset from {}", self.cache.source());
        }
        match self.cache.get() {
            Ok(dataset) => self.state.set_dataset(dataset),
            Err(e) => {
                let err = anyhow::Error::new(e);
                log::error!("Failed to load dataset: {err:#}");
                self.state.status_message = Some(format!("Error: {err:#}"));
            }
        }
    }
}

impl<P: DatasetProvider> eframe::App for ExplorerApp<P> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.frames_drawn > 0 {
            self.ensure_loaded();
        }

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            pages::central_panel(ui, &mut self.state);
        });

        if self.frames_drawn == 0 {
            ctx.request_repaint();
        }
        self.frames_drawn += 1;
    }
}
