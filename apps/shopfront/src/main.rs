//! # Shopfront Entry Point
//!
//! Starts one storefront session in the terminal.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (defaults, `shopfront.toml`, `SHOPFRONT_*` env)
//! 3. Create the session's `CartManager` and `CatalogLoader`
//! 4. Load the product list
//! 5. Read commands from stdin until `quit` or end of input

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match shopfront_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shopfront: {}", e);
            ExitCode::FAILURE
        }
    }
}
