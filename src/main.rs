use anyhow::Result;
use clap::{Parser, ValueEnum};
use cyber_snake::game::MapSize;
use cyber_snake::logging;
use cyber_snake::modes::HumanMode;
use cyber_snake::settings::Settings;
use cyber_snake::storage::JsonFileStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cyber_snake")]
#[command(version, about = "Snake on a wraparound grid")]
struct Cli {
    /// Board size
    #[arg(long)]
    map_size: Option<MapSizeArg>,

    /// Starting speed; the tick interval is 400 minus this, in ms
    #[arg(long)]
    speed: Option<u32>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to keep the high score
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MapSizeArg {
    /// 20x20 cells
    Small,
    /// 30x30 cells
    Medium,
    /// 40x40 cells
    Large,
}

impl From<MapSizeArg> for MapSize {
    fn from(arg: MapSizeArg) -> Self {
        match arg {
            MapSizeArg::Small => MapSize::Small,
            MapSizeArg::Medium => MapSize::Medium,
            MapSizeArg::Large => MapSize::Large,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    // CLI flags win over the settings file
    if let Some(map_size) = cli.map_size {
        settings.game.map_size = map_size.into();
    }
    if let Some(speed) = cli.speed {
        settings.game.speed.default = speed;
    }
    if let Some(path) = cli.high_score_file {
        settings.high_score_file = path;
    }
    if let Some(path) = cli.log_file {
        settings.log_file = Some(path);
    }

    if let Some(path) = &settings.log_file {
        logging::init(path)?;
    }

    let store = JsonFileStore::new(&settings.high_score_file);
    let mut human_mode = HumanMode::new(settings.game, store);
    human_mode.run().await?;

    Ok(())
}
