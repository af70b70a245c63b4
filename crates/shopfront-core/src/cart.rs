//! # Cart Manager
//!
//! The shopping-cart state machine shared by every storefront component.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                CartManager               State Change        │
//! │  ─────────                ───────────               ────────────        │
//! │                                                                         │
//! │  Add to cart ───────────► open() + add_product() ─► entry qty 1 / +1    │
//! │                                                                         │
//! │  Click "+" ─────────────► increase_quantity() ────► qty += 1            │
//! │                                                                         │
//! │  Click "-" ─────────────► decrease_quantity() ────► qty -= 1 (floor 0)  │
//! │                                                                         │
//! │  Click remove ──────────► remove_product() ───────► entry removed       │
//! │                                                                         │
//! │  Click clear cart ──────► clear_products() ───────► entries emptied     │
//! │                                                                         │
//! │  Toggle / close button ─► toggle() / close() ─────► Open ⇄ Closed       │
//! │                                                                         │
//! │  Every effective change: update snapshot ──► wake watch receivers ──►   │
//! │                          broadcast CartEvent                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one entry per product id
//! - Quantities never go below zero; an entry at zero stays until removed
//! - Visibility only changes through `open`, `close` and `toggle`
//! - Unknown product ids are silent no-ops, never errors
//!
//! ## Sharing
//! `CartManager` is a handle. Cloning it is cheap and every clone sees the
//! same cart, so one instance built at session start can be handed to each
//! component that needs it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::types::{Product, ProductId};
use crate::EVENT_CHANNEL_CAPACITY;

// =============================================================================
// Visibility
// =============================================================================

/// Open/closed state of the cart overlay.
///
/// ```text
///            open() / toggle()
///   ┌────────┐ ──────────────► ┌────────┐
///   │ Closed │                 │  Open  │
///   └────────┘ ◄────────────── └────────┘
///     initial   close() / toggle()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

impl Visibility {
    /// Returns true for [`Visibility::Open`].
    pub const fn is_open(self) -> bool {
        matches!(self, Visibility::Open)
    }

    /// The other state.
    pub const fn toggled(self) -> Self {
        match self {
            Visibility::Open => Visibility::Closed,
            Visibility::Closed => Visibility::Open,
        }
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// A product in the cart together with its selected quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    /// Copy of the product taken when it was first added.
    pub product: Product,

    /// Selected quantity, zero allowed.
    pub quantity: u32,

    /// When the product entered the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    fn new(product: Product) -> Self {
        CartEntry {
            product,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Id of the product this entry holds.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

// =============================================================================
// Cart State (snapshot)
// =============================================================================

/// Immutable view of the cart handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    /// Whether the overlay is shown.
    pub visibility: Visibility,

    /// Entries in insertion order, unique by product id.
    pub entries: Vec<CartEntry>,
}

impl CartState {
    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// Sum of all entry quantities.
    pub fn total_items(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Entry for `id`, if present.
    pub fn entry(&self, id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id() == id)
    }

    /// Quantity for `id`, `None` when the product is not in the cart.
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.entry(id).map(|e| e.quantity)
    }

    /// Whether `id` has an entry (at any quantity, zero included).
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entry(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: &ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product_id() == id)
    }
}

// =============================================================================
// Cart Events
// =============================================================================

/// A single effective change, broadcast after the snapshot is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartEvent {
    /// Overlay went from closed to open.
    Opened,

    /// Overlay went from open to closed.
    Closed,

    /// A product got its first entry.
    ProductAdded { product_id: ProductId },

    /// An existing entry's quantity changed.
    QuantityChanged { product_id: ProductId, quantity: u32 },

    /// An entry was removed.
    ProductRemoved { product_id: ProductId },

    /// Every entry was removed at once.
    Cleared { removed: usize },
}

// =============================================================================
// Cart Manager
// =============================================================================

/// Observable in-memory cart shared by the whole session.
///
/// ## Notification
/// Each mutating method updates the snapshot inside
/// [`watch::Sender::send_if_modified`], so receivers are woken only after the
/// mutation is complete and only if it changed something. The matching
/// [`CartEvent`] is broadcast right after.
///
/// ## Usage
/// ```rust
/// use shopfront_core::{CartManager, Money, Product, ProductId};
///
/// let cart = CartManager::new();
/// let mut updates = cart.subscribe();
///
/// cart.add_product(&Product::new("1", "Watch", Money::from_cents(2200)));
/// assert!(updates.has_changed().unwrap());
///
/// let snapshot = updates.borrow_and_update().clone();
/// assert_eq!(snapshot.quantity_of(&ProductId::new("1")), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct CartManager {
    state: Arc<watch::Sender<CartState>>,
    events: broadcast::Sender<CartEvent>,
}

impl CartManager {
    /// Creates an empty, closed cart.
    pub fn new() -> Self {
        let (state, _) = watch::channel(CartState::default());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        CartManager {
            state: Arc::new(state),
            events,
        }
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Shows the overlay. Idempotent.
    pub fn open(&self) -> bool {
        self.set_visibility(Visibility::Open)
    }

    /// Hides the overlay. Idempotent.
    pub fn close(&self) -> bool {
        self.set_visibility(Visibility::Closed)
    }

    /// Flips the overlay between open and closed.
    pub fn toggle(&self) -> Visibility {
        let mut now = Visibility::Closed;
        self.mutate(|state| {
            state.visibility = state.visibility.toggled();
            now = state.visibility;
            Some(visibility_event(now))
        });
        debug!(visibility = ?now, "cart toggled");
        now
    }

    fn set_visibility(&self, target: Visibility) -> bool {
        let changed = self.mutate(|state| {
            if state.visibility == target {
                return None;
            }
            state.visibility = target;
            Some(visibility_event(target))
        });
        if changed {
            debug!(visibility = ?target, "cart visibility changed");
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Entries
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Not in cart: appended with quantity 1
    /// - Already in cart: quantity += 1
    ///
    /// Visibility is left alone; callers that want the overlay to pop up call
    /// [`CartManager::open`] themselves.
    pub fn add_product(&self, product: &Product) -> bool {
        self.mutate(|state| match state.entry_mut(&product.id) {
            Some(entry) => {
                let quantity = entry.quantity.checked_add(1)?;
                entry.quantity = quantity;
                debug!(
                    product_id = %product.id,
                    quantity,
                    "product already in cart, quantity increased"
                );
                Some(CartEvent::QuantityChanged {
                    product_id: product.id.clone(),
                    quantity,
                })
            }
            None => {
                state.entries.push(CartEntry::new(product.clone()));
                debug!(product_id = %product.id, "product added to cart");
                Some(CartEvent::ProductAdded {
                    product_id: product.id.clone(),
                })
            }
        })
    }

    /// Removes the entry for `id`. Absent ids are ignored.
    pub fn remove_product(&self, id: &ProductId) -> bool {
        let removed = self.mutate(|state| {
            let position = state.entries.iter().position(|e| e.product_id() == id)?;
            state.entries.remove(position);
            Some(CartEvent::ProductRemoved {
                product_id: id.clone(),
            })
        });
        if removed {
            debug!(product_id = %id, "product removed from cart");
        } else {
            trace!(product_id = %id, "remove ignored, product not in cart");
        }
        removed
    }

    /// Empties the cart. Visibility is unchanged.
    pub fn clear_products(&self) -> bool {
        self.mutate(|state| {
            if state.entries.is_empty() {
                return None;
            }
            let removed = state.entries.len();
            state.entries.clear();
            debug!(removed, "cart cleared");
            Some(CartEvent::Cleared { removed })
        })
    }

    /// Adds one to the quantity of `id`. Absent ids are ignored.
    pub fn increase_quantity(&self, id: &ProductId) -> bool {
        self.adjust_quantity(id, |q| q.checked_add(1))
    }

    /// Subtracts one from the quantity of `id`, stopping at zero.
    ///
    /// The entry stays in the cart at zero. Returns false when `id` is absent
    /// or already at zero.
    pub fn decrease_quantity(&self, id: &ProductId) -> bool {
        self.adjust_quantity(id, |q| q.checked_sub(1))
    }

    fn adjust_quantity(&self, id: &ProductId, step: impl FnOnce(u32) -> Option<u32>) -> bool {
        let changed = self.mutate(|state| {
            let entry = state.entry_mut(id)?;
            entry.quantity = step(entry.quantity)?;
            Some(CartEvent::QuantityChanged {
                product_id: id.clone(),
                quantity: entry.quantity,
            })
        });
        if changed {
            debug!(product_id = %id, quantity = ?self.quantity_of(id), "cart quantity changed");
        } else {
            trace!(product_id = %id, "quantity change ignored");
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Executes a function with read access to the current state.
    ///
    /// The state is locked for the duration of `f`; do not call mutating
    /// methods from inside it.
    ///
    /// ## Usage
    /// ```rust
    /// # use shopfront_core::CartManager;
    /// let cart = CartManager::new();
    /// let count = cart.with_state(|s| s.len());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        f(&*self.state.borrow())
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        self.with_state(CartState::is_open)
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.with_state(|s| s.visibility)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> Vec<CartEntry> {
        self.with_state(|s| s.entries.clone())
    }

    /// Entry for `id`, if present.
    pub fn entry(&self, id: &ProductId) -> Option<CartEntry> {
        self.with_state(|s| s.entry(id).cloned())
    }

    /// Quantity for `id`, if present.
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.with_state(|s| s.quantity_of(id))
    }

    /// Whether `id` has an entry.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.with_state(|s| s.contains(id))
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.with_state(CartState::total_items)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.with_state(CartState::len)
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.with_state(CartState::is_empty)
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Latest-snapshot subscription.
    ///
    /// The receiver starts out having seen the current state; `changed()`
    /// resolves after the next effective mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Stream of discrete change events from now on.
    pub fn events(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Applies `f` to the state. `f` returns the event describing what it
    /// changed, or `None` for a no-op, in which case nobody is notified.
    fn mutate<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut CartState) -> Option<CartEvent>,
    {
        let mut event = None;
        self.state.send_if_modified(|state| {
            event = f(state);
            event.is_some()
        });

        match event {
            Some(event) => {
                // No event subscribers is fine
                let _ = self.events.send(event);
                true
            }
            None => false,
        }
    }
}

impl Default for CartManager {
    fn default() -> Self {
        Self::new()
    }
}

fn visibility_event(visibility: Visibility) -> CartEvent {
    match visibility {
        Visibility::Open => CartEvent::Opened,
        Visibility::Closed => CartEvent::Closed,
    }
}
