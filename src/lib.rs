//! # Bistro Admin
//!
//! Client library and terminal front end for a restaurant's administrative
//! dashboard: menu management, availability toggling, and order tracking on
//! top of a remote REST API.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a CLI** - Run the `bistro-admin` binary
//! 2. **As a library** - Embed the API client and page state in your own front end
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use bistro::{ApiClient, MenuApi, pages::InventoryPage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:5000/api");
//!
//!     let mut inventory = InventoryPage::new();
//!     inventory.load(&client).await;
//!
//!     if let Some(item) = inventory.items().first() {
//!         let id = item.id.clone();
//!         inventory.toggle(&client, &id).await?;
//!     }
//!     println!("{:?}", inventory.counts());
//!     Ok(())
//! }
//! ```
//!
//! ### URL-driven filters
//!
//! ```rust,ignore
//! use bistro::{Navigator, router::Location, pages::OrdersPage};
//!
//! let navigator = Navigator::new(Location::parse("/orders?status=pending")?);
//! let mut orders = OrdersPage::new(navigator.clone());
//! orders.mount(&client).await;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST client and resource wrappers
//! - [`pages`] - Dashboard, Menu, Inventory, and Orders view-state
//! - [`widgets`] - Modal and menu item form
//! - [`router`] - Client-side routes and navigation state
//! - [`events`] - In-process resource change feed
//! - [`types`] - Resource types and error handling
//! - [`utils`] - Configuration

#![warn(rustdoc::missing_crate_level_docs)]

/// REST API client and resource endpoints.
pub mod api;
/// Command-line interface for the admin binary.
pub mod cli;
/// Resource change notifications.
pub mod events;
/// Page state machines and derived views.
pub mod pages;
/// Client-side routing.
pub mod router;
/// Core types (resources, inputs, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Modal and form widgets.
pub mod widgets;

// Re-export commonly used types
pub use api::{ApiClient, MenuApi, OrdersApi, RequestOptions};
pub use events::{ChangeFeed, ResourceChange, ResourceKind};
pub use router::{Location, Navigator, Route};
pub use types::{AppError, MenuItem, MenuItemInput, Order, OrderStatus, Price, Result};
pub use utils::config::BistroConfig;
