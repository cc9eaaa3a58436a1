use eframe::egui::{Color32, RichText, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – page navigation
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Explore");
    ui.separator();

    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label())
            .on_hover_text("Explore Nobel Prize winners");
    }

    ui.add_space(16.0);
    ui.strong("Sources:");
    ui.hyperlink_to("Kaggle", "https://www.kaggle.com/nobelfoundation/nobel-laureates");
    ui.hyperlink_to("Nobel Prize", "https://www.nobelprize.org/");

    ui.add_space(16.0);
    ui.strong("Data:");
    ui.label(RichText::new(&state.source).small());
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Nobel Prize Explorer");
        ui.separator();

        if let Some(loaded) = &state.loaded {
            ui.label(format!(
                "{} laureates, {} – {}",
                loaded.dataset.len(),
                loaded.year_bounds.0,
                loaded.year_bounds.1
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
