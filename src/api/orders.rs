use super::client::{ApiClient, RequestOptions};
use crate::events::{ChangeAction, ResourceChange, ResourceKind};
use crate::types::{AppError, NewOrder, Order, OrderStatus, Result, StatusUpdate};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// Order endpoints (`/orders`).
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `GET /orders[?status=]`
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>>;

    /// `GET /orders/:id`
    async fn get_order(&self, id: &str) -> Result<Order>;

    /// `POST /orders`
    async fn create_order(&self, order: &NewOrder) -> Result<Order>;

    /// `PATCH /orders/:id/status` with `{status}`
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order>;

    /// `DELETE /orders/:id`
    async fn delete_order(&self, id: &str) -> Result<Value>;
}

#[async_trait]
impl OrdersApi for ApiClient {
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>> {
        let mut options = RequestOptions::new(Method::GET);
        if let Some(status) = status {
            options = options.query("status", status.as_str());
        }
        self.request_list("/orders", options).await
    }

    async fn get_order(&self, id: &str) -> Result<Order> {
        self.request_as(&format!("/orders/{}", id), RequestOptions::new(Method::GET))
            .await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let body =
            serde_json::to_value(order).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let created: Order = self
            .request_as("/orders", RequestOptions::new(Method::POST).json(body))
            .await?;
        self.publish(ResourceChange::new(
            ResourceKind::Orders,
            ChangeAction::Created,
            &created.id,
        ));
        Ok(created)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order> {
        let body = serde_json::to_value(StatusUpdate { status })
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let order: Order = self
            .request_as(
                &format!("/orders/{}/status", id),
                RequestOptions::new(Method::PATCH).json(body),
            )
            .await?;
        self.publish(ResourceChange::new(
            ResourceKind::Orders,
            ChangeAction::Updated,
            id,
        ));
        Ok(order)
    }

    async fn delete_order(&self, id: &str) -> Result<Value> {
        let data = self
            .request(&format!("/orders/{}", id), RequestOptions::new(Method::DELETE))
            .await?;
        self.publish(ResourceChange::new(
            ResourceKind::Orders,
            ChangeAction::Deleted,
            id,
        ));
        Ok(data)
    }
}
