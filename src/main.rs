// src/main.rs
use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    cal_scrape::cli::run()?;
    Ok(())
}
