use std::{env, fs};

use anyhow::Context;
use loggen_tools::{generate, inliner::ImageInliner, storage, Theme, ThemeConfig};

const SAMPLE: &str = r#"The tavern was nearly empty when Mira came in.

"Anyone seen the courier?" she asked, shaking the rain off her coat.

The barkeep only shrugged. 'Of course nobody has,' she thought.

"Fine. I'll wait.""#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    // Reads RUST_LOG for overrides, defaults to Info
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Usage: render_log [config.json] [output-dir]
    let args: Vec<String> = env::args().collect();
    let mut config = match args.get(1) {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<ThemeConfig>(&json).context("parsing config")?
        }
        None => {
            let store = storage::ConfigStore::new(storage::FileStore::new(".loggen"));
            store.load()
        }
    };
    if config.content.trim().is_empty() {
        log::info!("No content configured, using the sample log.");
        config.content = SAMPLE.to_string();
    }
    let out_dir = args.get(2).map(String::as_str).unwrap_or(".");

    let inliner = ImageInliner::new();
    for theme in Theme::ALL {
        let html = generate(theme, &config)?;
        let html = inliner.inline(&html).await;
        let output_path = format!("{out_dir}/log_{theme}.html");
        fs::write(&output_path, &html).with_context(|| format!("writing {output_path}"))?;
        log::info!("{} theme written to {} ({} bytes)", theme, output_path, html.len());
    }

    Ok(())
}
