//! # Shopfront Library
//!
//! Session bootstrap for the storefront: logging, configuration, one cart
//! and one catalog per session, and the terminal shell.
//!
//! ## Module Organization
//! ```text
//! shopfront_lib/
//! ├── lib.rs          ◄─── You are here (setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Product source selection, CatalogState
//! │   └── config.rs   ◄─── Configuration state (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Product list and "add to cart"
//! │   └── cart.rs     ◄─── Cart overlay and line-item commands
//! ├── shell.rs        ◄─── stdin line parser and renderer
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ApiError;
use crate::shell::{Reply, Shell, HELP, PROMPT};
use crate::state::{CartManager, CatalogState, ConfigState, StoreSource};

/// Runs one storefront session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,shopfront=debug, override with RUST_LOG             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults < shopfront.toml < SHOPFRONT_* env                       │
/// │                                                                         │
/// │  3. Build Session State ──────────────────────────────────────────────► │
/// │     • CartManager: closed, empty                                        │
/// │     • CatalogState: HTTP source, or demo list when offline              │
/// │                                                                         │
/// │  4. Load Products ────────────────────────────────────────────────────► │
/// │     • one GET; failure leaves the cart usable                           │
/// │                                                                         │
/// │  5. Shell Loop ───────────────────────────────────────────────────────► │
/// │     • one command per stdin line until quit / EOF                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Shopfront");

    let config = ConfigState::load()?;
    info!(
        store = %config.store_name,
        offline = config.catalog.offline,
        "Configuration loaded"
    );

    let cart = CartManager::new();
    let catalog = CatalogState::new(StoreSource::from_config(&config.catalog)?);

    if let Err(e) = catalog.load().await {
        warn!(error = %e, "Continuing without a product list");
    }

    let badge = spawn_badge_watcher(&cart);
    let shell = Shell::new(cart, catalog, config.store_name.clone());

    let result = run_shell(&shell).await;

    badge.abort();
    info!("Session ended");
    Ok(result?)
}

/// Reads stdin line by line and prints each reply.
async fn run_shell(shell: &Shell) -> Result<(), ApiError> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(HELP.as_bytes()).await?;
    stdout.write_all(b"\n").await?;

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match shell.handle_line(&line) {
            Reply::Quit => break,
            Reply::Text(text) if text.is_empty() => {}
            Reply::Text(text) => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
        }
    }

    Ok(())
}

/// Logs the cart badge (total item count) whenever the cart changes.
///
/// Ends once every `CartManager` handle is dropped and returns how many
/// updates it saw. No-op mutations do not wake it.
pub fn spawn_badge_watcher(cart: &CartManager) -> JoinHandle<usize> {
    let mut rx = cart.subscribe();

    tokio::spawn(async move {
        let mut updates = 0;
        while rx.changed().await.is_ok() {
            let (total, open) = {
                let state = rx.borrow_and_update();
                (state.total_items(), state.is_open())
            };
            updates += 1;
            info!(items = total, open, "Cart badge updated");
        }
        updates
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_core=trace` - Trace cart mutations
/// - Default: `info,shopfront=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    // Logs go to stderr so they do not interleave with shell output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{Money, Product, ProductId};

    #[tokio::test]
    async fn test_badge_watcher_counts_updates_and_stops() {
        let cart = CartManager::new();
        let mut rx = cart.subscribe();
        let watcher = spawn_badge_watcher(&cart);
        let id = ProductId::new("1");

        cart.add_product(&Product::new("1", "Pretty watch", Money::from_cents(2233)));
        tokio::task::yield_now().await;
        assert_eq!(rx.borrow_and_update().total_items(), 1);

        cart.increase_quantity(&id);
        tokio::task::yield_now().await;
        assert_eq!(rx.borrow_and_update().total_items(), 2);

        drop(cart);
        assert_eq!(watcher.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_badge_watcher_ignores_no_ops() {
        let cart = CartManager::new();
        let watcher = spawn_badge_watcher(&cart);

        cart.close();
        cart.remove_product(&ProductId::new("missing"));
        cart.clear_products();
        drop(cart);

        assert_eq!(watcher.await.unwrap(), 0);
    }
}
