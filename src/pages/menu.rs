use super::{unique_categories, LoadState, RequestSequence, StaleTracker, Ticket};
use crate::api::MenuApi;
use crate::events::{ChangeFeed, ResourceKind};
use crate::types::{AppError, MenuItem, Result};
use crate::widgets::{MenuItemForm, Modal, Viewport};
use tracing::{debug, info};

/// Menu management: list, create, edit, delete.
///
/// Unlike the other pages every failure lands in a visible error banner, and
/// structural changes reload the whole list instead of merging.
#[derive(Debug)]
pub struct MenuPage {
    items: Vec<MenuItem>,
    state: LoadState,
    sequence: RequestSequence,
    pub category_filter: Option<String>,
    editing: Option<MenuItem>,
    form: MenuItemForm,
    modal: Modal,
    error: Option<String>,
    stale: StaleTracker,
}

impl Default for MenuPage {
    fn default() -> Self {
        Self::new(Viewport::new())
    }
}

impl MenuPage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::default(),
            sequence: RequestSequence::default(),
            category_filter: None,
            editing: None,
            form: MenuItemForm::default(),
            modal: Modal::new(viewport),
            error: None,
            stale: StaleTracker::default(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading() || self.sequence.in_flight()
    }

    /// Banner text, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub fn form(&self) -> &MenuItemForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MenuItemForm {
        &mut self.form
    }

    pub fn editing(&self) -> Option<&MenuItem> {
        self.editing.as_ref()
    }

    pub async fn load<A: MenuApi + ?Sized>(&mut self, api: &A) {
        let ticket = self.begin_load();
        let result = api.list_menu(None).await;
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = LoadState::Loading;
        self.sequence.issue()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<MenuItem>>) {
        if !self.sequence.accept(ticket) {
            debug!(?ticket, "Discarding stale menu response");
            return;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                self.state = LoadState::Failed(message);
            }
        }
    }

    pub fn categories(&self) -> Vec<String> {
        unique_categories(self.items.iter().map(MenuItem::category))
    }

    pub fn visible_items(&self) -> Vec<&MenuItem> {
        match self.category_filter.as_deref().filter(|c| !c.is_empty()) {
            Some(category) => self
                .items
                .iter()
                .filter(|item| item.category() == Some(category))
                .collect(),
            None => self.items.iter().collect(),
        }
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = MenuItemForm::new(None);
        self.modal.open(self.form.title());
    }

    /// Open the editor for a loaded item. Returns false for an unknown id.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter().find(|i| i.id == id).cloned() else {
            return false;
        };
        self.form = MenuItemForm::new(Some(&item));
        self.editing = Some(item);
        self.modal.open(self.form.title());
        true
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Submit the form: update when editing, create otherwise. On success the
    /// modal closes and the list reloads; on failure the banner shows why and
    /// the list is untouched.
    pub async fn submit<A: MenuApi + ?Sized>(&mut self, api: &A) -> Result<MenuItem> {
        self.error = None;

        let outcome = match self.form.submit() {
            Ok(input) => match &self.editing {
                Some(item) => api.update_menu_item(&item.id, &input).await,
                None => api.create_menu_item(&input).await,
            },
            Err(e) => Err(AppError::from(e)),
        };

        match outcome {
            Ok(saved) => {
                info!(id = %saved.id, name = %saved.name, "Saved menu item");
                self.modal.close();
                self.editing = None;
                self.load(api).await;
                Ok(saved)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete an item and reload. Confirmation is the caller's job.
    pub async fn delete<A: MenuApi + ?Sized>(&mut self, api: &A, id: &str) -> Result<()> {
        self.error = None;
        match api.delete_menu_item(id).await {
            Ok(_) => {
                info!(id = %id, "Deleted menu item");
                self.load(api).await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn watch_changes(&mut self, feed: &ChangeFeed) {
        self.stale.watch(feed, &[ResourceKind::Menu]);
    }

    pub async fn refresh_if_stale<A: MenuApi + ?Sized>(&mut self, api: &A) -> bool {
        if !self.stale.take_stale() {
            return false;
        }
        self.load(api).await;
        true
    }
}
