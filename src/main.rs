use anyhow::Result;

use icongen::{config::IconConfig, generator};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = IconConfig::from_env();
    generator::generate_with(&config, |icon| println!("Created {}", icon.file_name()))?;

    println!("\nAll icons created successfully!");
    Ok(())
}
