mod app;
mod engine;
mod keywords;
mod util;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "keywords.json")]
    input: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    export_png: Option<PathBuf>,

    #[arg(long)]
    export_text: bool,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    if args.export_png.is_some() || args.export_text {
        let records = keywords::load_keywords(&args.input)?;

        if args.export_text {
            println!("{}", engine::export::keyword_transcript(&records));
        }

        if let Some(path) = &args.export_png {
            let viewport = engine::Viewport::new(args.width, args.height);
            let scene = engine::build_scene(&records, viewport, seed);
            engine::export::save_png(&scene, path)?;
            log::info!("wrote {}", path.display());
        }

        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "keyword-bubbles",
        options,
        Box::new(move |cc| Ok(Box::new(app::BubbleApp::new(cc, args.input.clone(), seed)))),
    )
    .map_err(|error| anyhow::anyhow!("failed to start ui shell: {error}"))
}
