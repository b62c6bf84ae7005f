//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the local copy generator API.
//!
//! Usage: `openapi [OUTPUT]`. The document goes to `openapi.json` when no
//! output path is given.

use api_lib::web::ApiDoc;
use std::path::PathBuf;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let document = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&output, document)?;
    println!("Wrote the copy generator API description to {}", output.display());
    Ok(())
}
