use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::{generate_palette, ColorMap};
use crate::data::aggregate::{AgeHistogram, CountryCount, DecadeShare};

// ---------------------------------------------------------------------------
// Country bar charts
// ---------------------------------------------------------------------------

/// Horizontal bars, largest country on top, one colour per country.
pub fn country_bar_chart(ui: &mut Ui, id: &str, top: &[CountryCount], colors: &ColorMap<String>) {
    let n = top.len();
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new((n - 1 - i) as f64, c.count as f64)
                .name(&c.country)
                .fill(colors.color_for(&c.country))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = top.iter().rev().map(|c| c.country.clone()).collect();

    Plot::new(id)
        .height(ui.available_height().min(480.0))
        .x_axis_label("Number of Prizes")
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Vertical bars in a single colour, countries along the x axis.
pub fn country_column_chart(ui: &mut Ui, id: &str, top: &[CountryCount]) {
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, c)| Bar::new(i as f64, c.count as f64).name(&c.country).width(0.6))
        .collect();
    let labels: Vec<String> = top.iter().map(|c| c.country.clone()).collect();

    Plot::new(id)
        .height(ui.available_height().min(420.0))
        .x_axis_label("Country")
        .y_axis_label("Number of Prizes")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(228, 26, 28)));
        });
}

/// Label integer grid marks with the matching category name.
fn category_label(labels: &[String], value: f64) -> String {
    if value.fract().abs() > f64::EPSILON || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Decade trend
// ---------------------------------------------------------------------------

pub fn decade_trend_chart(ui: &mut Ui, trend: &[DecadeShare]) {
    let points: PlotPoints = trend
        .iter()
        .map(|d| [d.decade as f64, d.usa_share])
        .collect();

    Plot::new("decade_trend")
        .height(ui.available_height().min(360.0))
        .x_axis_label("Decade")
        .y_axis_label("Percentage of US Born Winners")
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value * 100.0))
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("US born share").width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Age histogram
// ---------------------------------------------------------------------------

pub fn age_histogram_chart(ui: &mut Ui, hist: &AgeHistogram) {
    let palette = generate_palette(hist.series.len().max(2));

    Plot::new("age_histogram")
        .legend(Legend::default())
        .height(ui.available_height().min(360.0))
        .x_axis_label("Age")
        .y_axis_label("Number of Prizes")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let mut stacked: Vec<BarChart> = Vec::new();
            for (series, &color) in hist.series.iter().zip(palette.iter()) {
                let bars = series
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| {
                        Bar::new(hist.bin_start(i) + hist.bin_width / 2.0, count as f64)
                            .width(hist.bin_width * 0.95)
                    })
                    .collect();
                // Sex series are stacked, one on top of the other.
                let below: Vec<&BarChart> = stacked.iter().collect();
                let chart = BarChart::new(bars)
                    .name(series.label())
                    .color(color)
                    .stack_on(&below);
                stacked.push(chart);
            }
            for chart in stacked {
                plot_ui.bar_chart(chart);
            }
        });
}
