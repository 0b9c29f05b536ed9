use super::client::{ApiClient, RequestOptions};
use crate::events::{ChangeAction, ResourceChange, ResourceKind};
use crate::types::{MenuItem, MenuItemInput, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// Menu endpoints (`/menu`).
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// `GET /menu[?category=]`
    async fn list_menu(&self, category: Option<&str>) -> Result<Vec<MenuItem>>;

    /// `GET /menu/:id`
    async fn get_menu_item(&self, id: &str) -> Result<MenuItem>;

    /// `POST /menu`
    async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem>;

    /// `PUT /menu/:id` with the full record
    async fn update_menu_item(&self, id: &str, input: &MenuItemInput) -> Result<MenuItem>;

    /// `PATCH /menu/:id/availability`, no body
    async fn toggle_availability(&self, id: &str) -> Result<MenuItem>;

    /// `DELETE /menu/:id`; returns whatever the server sent back
    async fn delete_menu_item(&self, id: &str) -> Result<Value>;
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| crate::types::AppError::InvalidInput(e.to_string()))
}

#[async_trait]
impl MenuApi for ApiClient {
    async fn list_menu(&self, category: Option<&str>) -> Result<Vec<MenuItem>> {
        let mut options = RequestOptions::new(Method::GET);
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            options = options.query("category", category);
        }
        self.request_list("/menu", options).await
    }

    async fn get_menu_item(&self, id: &str) -> Result<MenuItem> {
        self.request_as(&format!("/menu/{}", id), RequestOptions::new(Method::GET))
            .await
    }

    async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem> {
        let options = RequestOptions::new(Method::POST).json(to_body(input)?);
        let item: MenuItem = self.request_as("/menu", options).await?;
        self.publish(ResourceChange::new(
            ResourceKind::Menu,
            ChangeAction::Created,
            &item.id,
        ));
        Ok(item)
    }

    async fn update_menu_item(&self, id: &str, input: &MenuItemInput) -> Result<MenuItem> {
        let options = RequestOptions::new(Method::PUT).json(to_body(input)?);
        let item: MenuItem = self.request_as(&format!("/menu/{}", id), options).await?;
        self.publish(ResourceChange::new(ResourceKind::Menu, ChangeAction::Updated, id));
        Ok(item)
    }

    async fn toggle_availability(&self, id: &str) -> Result<MenuItem> {
        let item: MenuItem = self
            .request_as(
                &format!("/menu/{}/availability", id),
                RequestOptions::new(Method::PATCH),
            )
            .await?;
        self.publish(ResourceChange::new(ResourceKind::Menu, ChangeAction::Updated, id));
        Ok(item)
    }

    async fn delete_menu_item(&self, id: &str) -> Result<Value> {
        let data = self
            .request(&format!("/menu/{}", id), RequestOptions::new(Method::DELETE))
            .await?;
        self.publish(ResourceChange::new(ResourceKind::Menu, ChangeAction::Deleted, id));
        Ok(data)
    }
}
