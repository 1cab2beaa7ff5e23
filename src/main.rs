//! Veneer - Static Site Page Enhancer
//!
//! Enhances one page of a static site and prints the resulting markup.

use clap::Parser;
use std::path::PathBuf;
use url::Url;
use veneer::{EnhancerConfig, NAME, Page, PageEnhancer, VERSION, VeneerError};

#[derive(Parser)]
#[command(name = "veneer", version, about = "Enhance a static site page")]
struct Cli {
    /// HTML page to enhance
    page: PathBuf,

    /// URL the page is served at; defaults to its file:// URL
    #[arg(long)]
    url: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in px
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in px
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Id of a container to fill with particles
    #[arg(long)]
    particles: Option<String>,

    /// Particle count; defaults to the configured count
    #[arg(long, requires = "particles")]
    count: Option<usize>,

    /// Print the run report as JSON instead of the page markup
    #[arg(long)]
    report: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} v{}: {}", NAME, VERSION, e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> veneer::Result<()> {
    let html = tokio::fs::read_to_string(&cli.page).await?;
    let url = match cli.url {
        Some(url) => url,
        None => {
            let path = tokio::fs::canonicalize(&cli.page).await?;
            Url::from_file_path(&path)
                .map_err(|_| VeneerError::Config(format!("no file URL for {}", path.display())))?
                .to_string()
        }
    };
    let config = match &cli.config {
        Some(path) => EnhancerConfig::from_json(&tokio::fs::read_to_string(path).await?)?,
        None => EnhancerConfig::default(),
    };

    let mut page = Page::from_html(&url, &html)?;
    page.set_viewport_size(cli.width, cli.height);

    let enhancer = PageEnhancer::with_network(config)?;
    let report = enhancer.boot(&mut page).await.unwrap_or_default();
    let particles = match &cli.particles {
        Some(id) => enhancer.create_particles(&mut page, id, cli.count),
        None => 0,
    };
    log::debug!("{} particles created", particles);

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", page.document().to_html());
    }
    Ok(())
}
