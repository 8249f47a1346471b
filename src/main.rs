use std::path::PathBuf;

use boxmark::{init_logging, run, Config, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("boxmark {} ({})", VERSION, BUILD_DATE);

    let folder = std::env::args_os().nth(1).map(PathBuf::from);
    let config_path = Config::default_path()?;

    let summary = run(folder, &config_path)?;
    let total: usize = summary.iter().map(|s| s.boxes).sum();
    println!("{} image(s), {} box(es)", summary.len(), total);

    Ok(())
}
