use eframe::egui::{self, Grid, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::Gender;
use crate::data::aggregate::CountryCount;
use crate::data::model::{AwardRecord, Sex};
use crate::state::{AppState, Loaded, Page};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel – dispatch to the selected page
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(loaded) = state.loaded.as_mut() else {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => ui.heading(RichText::new(msg).color(egui::Color32::RED)),
            None => ui.heading("Loading Nobel Prize data…"),
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Introduction => introduction(ui, loaded),
            Page::ByCountry => by_country(ui, loaded, state.top_k),
            Page::ByCategory => by_category(ui, loaded, state.top_k),
            Page::ByAgeAndGender => by_age_and_gender(ui, loaded, state.age_bins),
        });
}

// ---------------------------------------------------------------------------
// Introduction
// ---------------------------------------------------------------------------

fn introduction(ui: &mut Ui, loaded: &Loaded) {
    ui.heading("Nobel Prizes");
    ui.label(format!(
        "This dashboard explores the Nobel Prize laureates dataset by the Nobel \
         Prize Foundation, listing the prize winners from {} until {}.",
        loaded.year_bounds.0, loaded.year_bounds.1
    ));
    ui.add_space(12.0);

    Grid::new("intro_stats")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Laureates with a known birth date");
            ui.strong(loaded.dataset.len().to_string());
            ui.end_row();

            ui.label("Years covered");
            ui.strong(format!("{} – {}", loaded.year_bounds.0, loaded.year_bounds.1));
            ui.end_row();

            ui.label("Age at award");
            ui.strong(format!("{} – {}", loaded.age_bounds.0, loaded.age_bounds.1));
            ui.end_row();

            ui.label("Countries of birth");
            ui.strong(loaded.dataset.country_count().to_string());
            ui.end_row();

            ui.label("Categories");
            let names: Vec<&str> = loaded.categories.iter().map(|c| c.as_str()).collect();
            ui.strong(names.join(", "));
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// By country
// ---------------------------------------------------------------------------

fn by_country(ui: &mut Ui, loaded: &mut Loaded, top_k: usize) {
    ui.heading("Nobel Prize Winners By Country of Birth");
    ui.label("Use the slider to filter the range of years.");

    if range_sliders(ui, "Select Time Period", &mut loaded.country.years, loaded.year_bounds) {
        loaded.refresh_country(top_k);
    }
    ui.add_space(8.0);

    let (lo, hi) = loaded.country.years;
    ui.strong(format!(
        "Top {top_k} countries of birth of the prize winners from {lo} to {hi}"
    ));

    ui.columns(2, |cols| {
        plot::country_bar_chart(&mut cols[0], "country_bars", &loaded.country.top, &loaded.country.colors);
        cols[1].strong("Number of Prizes Per Country");
        country_table(&mut cols[1], &loaded.country.top);
    });

    ui.add_space(12.0);
    ui.heading("US Laureates Domination");
    ui.label("Percentage of US born Nobel Prize winners per decade, over all years.");
    plot::decade_trend_chart(ui, &loaded.decade_trend);
}

fn country_table(ui: &mut Ui, top: &[CountryCount]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong("Prizes");
            });
        })
        .body(|mut body| {
            for c in top {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&c.country);
                    });
                    row.col(|ui| {
                        ui.label(c.count.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// By category
// ---------------------------------------------------------------------------

fn by_category(ui: &mut Ui, loaded: &mut Loaded, top_k: usize) {
    ui.heading("Nobel Prize Winners by Category");
    ui.label("Use the slider and selectbox to filter by year and category respectively.");

    let mut changed = false;
    ui.columns(2, |cols| {
        changed |= range_sliders(&mut cols[0], "Select Time Period", &mut loaded.category.years, loaded.year_bounds);

        let current = loaded.category.category;
        egui::ComboBox::from_label("Select Category")
            .selected_text(current.as_str())
            .show_ui(&mut cols[1], |ui: &mut Ui| {
                for &cat in &loaded.categories {
                    changed |= ui
                        .selectable_value(&mut loaded.category.category, cat, cat.as_str())
                        .changed();
                }
            });
    });
    if changed {
        loaded.refresh_category(top_k);
    }

    ui.add_space(8.0);
    ui.heading("Nobel Prize Winners By Category");
    let (lo, hi) = loaded.category.years;
    ui.label(format!("{} prizes from {lo} to {hi}", loaded.category.counts.total()));
    Grid::new("category_counters")
        .num_columns(2)
        .spacing([48.0, 12.0])
        .show(ui, |ui: &mut Ui| {
            for (i, (cat, count)) in loaded.category.counts.iter().enumerate() {
                counter(ui, cat.as_str(), count);
                if i % 2 == 1 {
                    ui.end_row();
                }
            }
        });

    ui.add_space(12.0);
    ui.heading(format!(
        "Number of Winners in {} by Birth Country",
        loaded.category.category
    ));
    plot::country_column_chart(ui, "category_country_bars", &loaded.category.top);
}

// ---------------------------------------------------------------------------
// By age and gender
// ---------------------------------------------------------------------------

fn by_age_and_gender(ui: &mut Ui, loaded: &mut Loaded, bins: usize) {
    ui.heading("Nobel Prize By Age Group and Gender");
    ui.label("Use the slider and selection box to filter by age and gender respectively.");

    let mut changed = false;
    ui.columns(2, |cols| {
        changed |= range_sliders(&mut cols[0], "Select Age Range", &mut loaded.age.ages, loaded.age_bounds);

        egui::ComboBox::from_label("Select Gender")
            .selected_text(loaded.age.gender.label())
            .show_ui(&mut cols[1], |ui: &mut Ui| {
                for g in Gender::ALL {
                    changed |= ui.selectable_value(&mut loaded.age.gender, g, g.label()).changed();
                }
            });
    });
    if changed {
        loaded.refresh_age(bins);
    }

    ui.add_space(8.0);
    match loaded.age.gender.sex() {
        Some(sex) => ui.strong(format!("Age Distribution For {sex} Nobel Prize Winners")),
        None => ui.strong("Age Distribution For Female and Male Nobel Prize Winners"),
    };
    if loaded.age.histogram.bin_count() == 0 {
        ui.label("No laureates in this age range.");
    } else {
        ui.label(format!("{} laureates", loaded.age.histogram.total()));
        plot::age_histogram_chart(ui, &loaded.age.histogram);
    }

    ui.add_space(12.0);
    ui.heading("Number of Female and Male Nobel Prize Based on Age Range");
    ui.columns(2, |cols| {
        counter(&mut cols[0], "Females", loaded.age.sex_counts.get(Sex::Female));
        counter(&mut cols[1], "Males", loaded.age.sex_counts.get(Sex::Male));
    });

    if let Some((youngest, oldest)) = &loaded.age.extremes {
        ui.add_space(12.0);
        ui.columns(2, |cols| {
            laureate_card(&mut cols[0], "Youngest Nobel Laureate", youngest);
            laureate_card(&mut cols[1], "Oldest Nobel Laureate", oldest);
        });
    }
}

fn laureate_card(ui: &mut Ui, title: &str, rec: &AwardRecord) {
    egui::CollapsingHeader::new(RichText::new(title).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(rec.full_name.as_deref().unwrap_or("Unknown laureate"));
            ui.label(format!(
                "{} {} at age {}",
                rec.category, rec.year, rec.age
            ));
            if let Some(country) = &rec.birth_country {
                ui.label(format!("Born {} in {country}", rec.birth_date));
            }
        });
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Two sliders bounding an inclusive range. Returns whether either moved.
fn range_sliders(ui: &mut Ui, label: &str, range: &mut (i32, i32), bounds: (i32, i32)) -> bool {
    let (min, max) = bounds;
    ui.label(label);
    let lo = ui.add(egui::Slider::new(&mut range.0, min..=max).text("from"));
    let hi = ui.add(egui::Slider::new(&mut range.1, min..=max).text("to"));

    if lo.changed() && range.0 > range.1 {
        range.1 = range.0;
    }
    if hi.changed() && range.1 < range.0 {
        range.0 = range.1;
    }
    lo.changed() || hi.changed()
}

fn counter(ui: &mut Ui, label: &str, count: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).size(18.0));
        ui.label(RichText::new(count.to_string()).size(28.0).strong());
    });
}
