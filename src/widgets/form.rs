use crate::types::{AppError, MenuItem, MenuItemInput, Price};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,

    #[error("Price must be a non-negative amount with at most two decimals (got '{0}')")]
    InvalidPrice(String),
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Editor for one menu item: name, price, category.
///
/// Fields hold raw text exactly as typed. The price is only interpreted on
/// [`submit`](Self::submit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemForm {
    pub name: String,
    pub price: String,
    pub category: String,
    editing: bool,
}

impl MenuItemForm {
    /// Blank when `initial` is `None`, otherwise seeded from the item.
    pub fn new(initial: Option<&MenuItem>) -> Self {
        match initial {
            Some(item) => Self {
                name: item.name.clone(),
                price: item.price.to_string(),
                category: item.category.clone().unwrap_or_default(),
                editing: true,
            },
            None => Self::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn title(&self) -> &'static str {
        if self.editing {
            "Edit Item"
        } else {
            "Add Item"
        }
    }

    pub fn submit(&self) -> Result<MenuItemInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let price: Price = self
            .price
            .parse()
            .map_err(|_| FormError::InvalidPrice(self.price.clone()))?;

        Ok(MenuItemInput {
            name: name.to_string(),
            price,
            category: self.category.trim().to_string(),
            description: None,
            available: None,
        })
    }
}
