mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use anyhow::{bail, Context};
use app::ExplorerApp;
use clap::Parser;
use config::Args;
use data::cache::DatasetCache;
use data::source::DataSource;
use eframe::egui;
use report::Report;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    if args.bins == 0 {
        bail!("--bins must be at least 1");
    }

    let source = DataSource::parse(&args.source).context("parsing --source")?;
    let cache = DatasetCache::new(source);

    if args.report {
        let dataset = cache.get().context("loading dataset")?;
        let report = Report::build(&dataset, &args.filters(&dataset), args.top, args.bins);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nobel Prize Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(ExplorerApp::new(cache, args.top, args.bins)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
