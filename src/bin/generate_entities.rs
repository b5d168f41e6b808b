//! Generate typed entity modules from a workspace's object metadata.
//!
//! ```sh
//! export TWENTY_API_URL='https://api.twenty.com'
//! export TWENTY_API_KEY='...'
//! cargo run --bin generate-entities -- src/generated person company
//! ```
//!
//! The first argument is the output directory (default `generated`). Any
//! further arguments restrict generation to those object names.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use twenty_api::client::{ClientConfig, TwentyClient, TwentyCredentials};
use twenty_api::codegen::EntityGenerator;
use twenty_api::metadata::SchemaDiscovery;

const DEFAULT_OUTPUT_DIR: &str = "generated";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()));
    let only: Vec<String> = args.collect();

    let creds = TwentyCredentials::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("  Set TWENTY_API_URL and TWENTY_API_KEY for the target workspace.");
        std::process::exit(1);
    });

    let client = TwentyClient::from_credentials(&creds, ClientConfig::default())
        .unwrap_or_else(|e| {
            eprintln!("Error: Failed to create client: {e}");
            std::process::exit(1);
        });

    let discovery = SchemaDiscovery::new(client);
    let mut definitions = discovery.try_discover_all().await.unwrap_or_else(|e| {
        eprintln!("Error: Schema discovery failed: {e}");
        std::process::exit(1);
    });
    if !only.is_empty() {
        definitions.retain(|d| only.iter().any(|name| name == d.object_name()));
    }
    definitions.sort_by(|a, b| a.object_name().cmp(b.object_name()));

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        eprintln!("Error: Cannot create {}: {e}", output_dir.display());
        std::process::exit(1);
    }

    let generator = EntityGenerator::new();
    let mut generated = Vec::with_capacity(definitions.len());
    for definition in &definitions {
        match generator.generate(definition) {
            Ok(entity) => generated.push(entity),
            Err(e) => {
                tracing::warn!(object = definition.object_name(), error = %e, "Skipping object");
            }
        }
    }

    for entity in &generated {
        let path = output_dir.join(entity.file_name());
        if let Err(e) = std::fs::write(&path, entity.to_source()) {
            eprintln!("Error: Cannot write {}: {e}", path.display());
            std::process::exit(1);
        }
        println!("  wrote {}", path.display());
    }

    let mod_file = generator.render_mod_file(&generated).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let mod_path = output_dir.join("mod.rs");
    if let Err(e) = std::fs::write(&mod_path, mod_file) {
        eprintln!("Error: Cannot write {}: {e}", mod_path.display());
        std::process::exit(1);
    }

    println!("\nGenerated {} entity modules in {}.", generated.len(), output_dir.display());
}
