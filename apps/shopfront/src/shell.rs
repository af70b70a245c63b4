//! # Shell
//!
//! Line-oriented front end over the commands.
//!
//! ```text
//! shopfront> products watch
//! Brand: 2 Products
//!   [1] Pretty watch          $22.33
//!   [2] My loved watch        $45.90
//! shopfront> add 1
//! Cart (open): 1 item
//!   [1] Pretty watch          $22.33  x1
//! ```

use thiserror::Error;

use crate::commands::cart::{self, CartResponse};
use crate::commands::product::{self, ProductListResponse};
use crate::error::ApiError;
use crate::state::{CartManager, CatalogState};

pub const PROMPT: &str = "shopfront> ";

pub const HELP: &str = "\
Commands:
  products [term]   list products, optionally filtered by title
  add <id>          add a product to the cart (opens the cart)
  inc <id>          increase a cart item's quantity
  dec <id>          decrease a cart item's quantity (stops at 0)
  rm <id>           remove a cart item
  clear             remove every cart item
  toggle            open or close the cart
  open | close      open or close the cart
  cart              show the cart
  help              show this text
  quit              leave";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products(String),
    Add(String),
    Increase(String),
    Decrease(String),
    Remove(String),
    Clear,
    Toggle,
    Open,
    Close,
    Cart,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),

    #[error("'{0}' needs a product id")]
    MissingId(&'static str),
}

impl Command {
    /// Parses one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Command, ParseError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let with_id = |name: &'static str, make: fn(String) -> Command| {
            if rest.is_empty() {
                Err(ParseError::MissingId(name))
            } else {
                Ok(make(rest.to_string()))
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "products" | "ls" => Ok(Command::Products(rest.to_string())),
            "add" => with_id("add", Command::Add),
            "inc" | "+" => with_id("inc", Command::Increase),
            "dec" | "-" => with_id("dec", Command::Decrease),
            "rm" | "remove" => with_id("rm", Command::Remove),
            "clear" => Ok(Command::Clear),
            "toggle" => Ok(Command::Toggle),
            "open" => Ok(Command::Open),
            "close" => Ok(Command::Close),
            "cart" => Ok(Command::Cart),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        };

        Some(command)
    }
}

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Dispatches parsed commands against the session state.
pub struct Shell {
    cart: CartManager,
    catalog: CatalogState,
    store_name: String,
}

impl Shell {
    pub fn new(cart: CartManager, catalog: CatalogState, store_name: impl Into<String>) -> Self {
        Shell {
            cart,
            catalog,
            store_name: store_name.into(),
        }
    }

    pub fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// Parses and runs one line. Blank lines reply with empty text.
    pub fn handle_line(&self, line: &str) -> Reply {
        match Command::parse(line) {
            None => Reply::Text(String::new()),
            Some(Err(e)) => Reply::Text(format!("error: {}", e)),
            Some(Ok(command)) => self.execute(command),
        }
    }

    pub fn execute(&self, command: Command) -> Reply {
        let result: Result<String, ApiError> = match command {
            Command::Quit => return Reply::Quit,
            Command::Help => Ok(HELP.to_string()),
            Command::Products(term) => product::list_products(&self.catalog, &term)
                .map(|r| render_products(&self.store_name, &r)),
            Command::Add(id) => {
                product::add_to_cart(&self.cart, &self.catalog, &id).map(|r| render_cart(&r))
            }
            Command::Increase(id) => {
                cart::increase_quantity(&self.cart, &id).map(|r| render_cart(&r))
            }
            Command::Decrease(id) => {
                cart::decrease_quantity(&self.cart, &id).map(|r| render_cart(&r))
            }
            Command::Remove(id) => {
                cart::remove_from_cart(&self.cart, &id).map(|r| render_cart(&r))
            }
            Command::Clear => Ok(render_cart(&cart::clear_cart(&self.cart))),
            Command::Toggle => Ok(render_cart(&cart::toggle_cart(&self.cart))),
            Command::Open => Ok(render_cart(&cart::open_cart(&self.cart))),
            Command::Close => Ok(render_cart(&cart::close_cart(&self.cart))),
            Command::Cart => Ok(render_cart(&cart::get_cart(&self.cart))),
        };

        match result {
            Ok(text) => Reply::Text(text),
            Err(e) => Reply::Text(format!("error: {}", e.message)),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn item_label(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

pub fn render_cart(response: &CartResponse) -> String {
    let state = if response.is_open { "open" } else { "closed" };
    let mut out = format!("Cart ({}): {}", state, item_label(response.total_items));

    if let Some(message) = &response.empty_message {
        out.push_str("\n  ");
        out.push_str(message);
        return out;
    }

    for item in &response.items {
        out.push_str(&format!(
            "\n  [{}] {:<20}  {:>8}  x{}",
            item.product_id, item.title, item.price, item.quantity
        ));
    }
    if response.show_clear_button {
        out.push_str("\n  (clear to empty the cart)");
    }
    out
}

pub fn render_products(store_name: &str, response: &ProductListResponse) -> String {
    let mut out = format!("{}: {}", store_name, response.count_label);
    for p in &response.products {
        out.push_str(&format!("\n  [{}] {:<20}  {:>8}", p.id, p.title, p.price));
    }
    out
}
