//! REST API client
//!
//! All HTTP access goes through [`ApiClient::request`], which attaches JSON
//! headers, parses the response body, and folds failures into
//! [`AppError`](crate::types::AppError). The resource wrappers fix path, method,
//! and query for each endpoint.
//!
//! # Endpoints
//!
//! ## Menu (`/menu`)
//! - `GET /menu[?category=]` - List menu items
//! - `GET /menu/{id}` - Get one item
//! - `POST /menu` - Create an item
//! - `PUT /menu/{id}` - Replace an item
//! - `PATCH /menu/{id}/availability` - Flip availability
//! - `DELETE /menu/{id}` - Remove an item
//!
//! ## Orders (`/orders`)
//! - `GET /orders[?status=]` - List orders
//! - `GET /orders/{id}` - Get one order
//! - `POST /orders` - Create an order
//! - `PATCH /orders/{id}/status` - Set status
//! - `DELETE /orders/{id}` - Remove an order

pub mod client;
pub mod menu;
pub mod orders;

pub use client::{ApiClient, RequestOptions, DEFAULT_BASE_URL};
pub use menu::MenuApi;
pub use orders::OrdersApi;
