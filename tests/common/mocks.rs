//! In-memory restaurant backend for page tests.
//!
//! Implements [`MenuApi`] and [`OrdersApi`] over plain vectors so page
//! handlers can be exercised without a server. Failures are injected per
//! operation and surface exactly like [`ApiClient`](bistro::ApiClient) errors.

#![allow(dead_code)]

use async_trait::async_trait;
use bistro::api::{MenuApi, OrdersApi};
use bistro::types::{AppError, MenuItem, MenuItemInput, NewOrder, Order, OrderStatus, Price, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Operations that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListMenu,
    CreateMenu,
    UpdateMenu,
    ToggleMenu,
    DeleteMenu,
    ListOrders,
    UpdateOrder,
}

#[derive(Default)]
struct State {
    menu: Vec<MenuItem>,
    orders: Vec<Order>,
    failures: HashMap<Op, (u16, String)>,
    next_id: usize,
}

/// Mock backend with configurable data and failures.
///
/// # Examples
///
/// ```ignore
/// let backend = InMemoryBackend::new()
///     .with_menu(vec![dish("1", "Soup", "Starters", true)])
///     .failing(Op::CreateMenu, 400, "Name required");
/// ```
#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
    list_calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menu(self, menu: Vec<MenuItem>) -> Self {
        self.state.lock().unwrap().menu = menu;
        self
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.state.lock().unwrap().orders = orders;
        self
    }

    /// Make `op` fail with `status` and the server's `error` text.
    pub fn failing(self, op: Op, status: u16, message: &str) -> Self {
        self.fail(op, status, message);
        self
    }

    pub fn fail(&self, op: Op, status: u16, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, (status, message.to_string()));
    }

    pub fn recover(&self, op: Op) {
        self.state.lock().unwrap().failures.remove(&op);
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        self.state.lock().unwrap().menu.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().orders.clone()
    }

    /// Number of list requests (menu or orders) served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check(&self, op: Op) -> Result<()> {
        match self.state.lock().unwrap().failures.get(&op) {
            Some((status, message)) => Err(AppError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> AppError {
    AppError::Api {
        status: 404,
        message: format!("{} not found", what),
    }
}

#[async_trait]
impl MenuApi for InMemoryBackend {
    async fn list_menu(&self, category: Option<&str>) -> Result<Vec<MenuItem>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Op::ListMenu)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .menu
            .iter()
            .filter(|item| category.map_or(true, |c| item.category() == Some(c)))
            .cloned()
            .collect())
    }

    async fn get_menu_item(&self, id: &str) -> Result<MenuItem> {
        let state = self.state.lock().unwrap();
        state
            .menu
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| not_found("Menu item"))
    }

    async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem> {
        self.check(Op::CreateMenu)?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let item = MenuItem {
            id: format!("new-{}", state.next_id),
            name: input.name.clone(),
            price: input.price,
            category: Some(input.category.clone()),
            description: input.description.clone(),
            available: input.available.unwrap_or(true),
        };
        state.menu.push(item.clone());
        Ok(item)
    }

    async fn update_menu_item(&self, id: &str, input: &MenuItemInput) -> Result<MenuItem> {
        self.check(Op::UpdateMenu)?;
        let mut state = self.state.lock().unwrap();
        let item = state
            .menu
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Menu item"))?;
        item.name = input.name.clone();
        item.price = input.price;
        item.category = Some(input.category.clone());
        Ok(item.clone())
    }

    async fn toggle_availability(&self, id: &str) -> Result<MenuItem> {
        self.check(Op::ToggleMenu)?;
        let mut state = self.state.lock().unwrap();
        let item = state
            .menu
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Menu item"))?;
        item.available = !item.available;
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: &str) -> Result<Value> {
        self.check(Op::DeleteMenu)?;
        let mut state = self.state.lock().unwrap();
        let before = state.menu.len();
        state.menu.retain(|i| i.id != id);
        if state.menu.len() == before {
            return Err(not_found("Menu item"));
        }
        Ok(json!({ "message": "Menu item deleted" }))
    }
}

#[async_trait]
impl OrdersApi for InMemoryBackend {
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Op::ListOrders)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect())
    }

    async fn get_order(&self, id: &str) -> Result<Order> {
        let state = self.state.lock().unwrap();
        state
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| not_found("Order"))
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Order {
            id: format!("order-{}", state.next_id),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            created_at: Utc::now(),
            status: OrderStatus::Pending,
            total: order.total,
            items: order.items.clone(),
            notes: order.notes.clone(),
        };
        state.orders.push(created.clone());
        Ok(created)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order> {
        self.check(Op::UpdateOrder)?;
        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found("Order"))?;
        order.status = status;
        Ok(order.clone())
    }

    async fn delete_order(&self, id: &str) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        let before = state.orders.len();
        state.orders.retain(|o| o.id != id);
        if state.orders.len() == before {
            return Err(not_found("Order"));
        }
        Ok(json!({ "message": "Order deleted" }))
    }
}

// ============= Fixtures =============

pub fn dish(id: &str, name: &str, category: &str, available: bool) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        price: Price::from_cents(1250),
        category: Some(category.to_string()),
        description: None,
        available,
    }
}

pub fn order(id: &str, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    Order {
        id: id.to_string(),
        customer_name: format!("Guest {}", id),
        customer_phone: None,
        created_at,
        status,
        total: Price::from_cents(2400),
        items: Vec::new(),
        notes: None,
    }
}

/// A small menu across three categories, one item sold out.
pub fn sample_menu() -> Vec<MenuItem> {
    vec![
        dish("m1", "Margherita", "Pizza", true),
        dish("m2", "Diavola", "Pizza", false),
        dish("m3", "Tiramisu", "Dessert", true),
        dish("m4", "Espresso", "Drinks", true),
    ]
}
