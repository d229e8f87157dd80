//! Manual check that the stored refresh token still works: exchanges it for
//! an access token and prints the vehicle list.

use std::sync::Arc;

use shawsite::core::config::TeslaConfig;
use shawsite::features::tesla::{TeslaFleetClient, TeslaTokenManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = TeslaConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    println!("Verifying Tesla connection...");
    println!(
        "Refresh token length: {}",
        config.refresh_token.as_deref().map_or(0, |t| t.len())
    );

    let token_manager = Arc::new(TeslaTokenManager::new(config.clone()));
    let client = TeslaFleetClient::new(config.fleet_base_url.clone(), token_manager);

    match client.list_vehicles().await {
        Ok(vehicles) => {
            println!("\nToken refresh successful!");
            println!("\nFound {} vehicles:", vehicles.len());
            for v in &vehicles {
                println!(
                    "- {}: {}",
                    v.display_name.as_deref().unwrap_or("(unnamed)"),
                    v.state.as_deref().unwrap_or("unknown")
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("\nError: {}", e);
            std::process::exit(1);
        }
    }
}
