use std::path::PathBuf;

mod controller;
mod ui;

use anyhow::Context as _;
use clap::Parser;
use shared::PageId;
use site_core::load_settings;
use tracing_subscriber::EnvFilter;

use crate::ui::SiteGuiApp;

#[derive(Parser, Debug)]
#[command(about = "Qasly Labs site in a native window")]
struct Args {
    /// Page to open after startup (home, blog, blog-post, contact).
    #[arg(long)]
    route: Option<String>,
    /// JSON content file to use instead of the bundled posts.
    #[arg(long)]
    content: Option<PathBuf>,
    /// Seed for the background particle field.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    no_background: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(path) = args.content {
        settings.content_path = Some(path);
    }
    if let Some(seed) = args.seed {
        settings.background.seed = Some(seed);
    }
    if args.no_background {
        settings.background.enabled = false;
    }

    let library = settings
        .load_content()
        .context("failed to load site content")?;
    let initial_page = args.route.as_deref().map(PageId::from_route);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Qasly Labs")
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Qasly Labs",
        options,
        Box::new(move |cc| {
            let app = SiteGuiApp::new(cc, &settings, library, initial_page)
                .context("failed to mount site")?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("site window exited with an error: {err}"))
}
