use super::{unique_categories, LoadState, RequestSequence, StaleTracker, Ticket};
use crate::api::MenuApi;
use crate::events::{ChangeFeed, ResourceKind};
use crate::types::{MenuItem, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl AvailabilityFilter {
    pub fn matches(self, item: &MenuItem) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => item.available,
            AvailabilityFilter::Unavailable => !item.available,
        }
    }
}

impl fmt::Display for AvailabilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AvailabilityFilter::All => "all",
            AvailabilityFilter::Available => "available",
            AvailabilityFilter::Unavailable => "unavailable",
        })
    }
}

impl FromStr for AvailabilityFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(AvailabilityFilter::All),
            "available" => Ok(AvailabilityFilter::Available),
            "unavailable" => Ok(AvailabilityFilter::Unavailable),
            other => Err(format!(
                "unknown availability '{}' (expected all, available, or unavailable)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryCounts {
    pub available: usize,
    pub unavailable: usize,
}

/// Availability toggling over the whole menu.
#[derive(Debug, Default)]
pub struct InventoryPage {
    items: Vec<MenuItem>,
    state: LoadState,
    sequence: RequestSequence,
    toggling: Option<String>,
    pub category_filter: Option<String>,
    pub availability_filter: AvailabilityFilter,
    stale: StaleTracker,
}

impl InventoryPage {
    pub fn new() -> Self {
        Self::default()
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

    /// Id of the item whose toggle is in flight.
    pub fn toggling(&self) -> Option<&str> {
        self.toggling.as_deref()
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

    /// Apply a list response unless a newer one was already applied. Failures
    /// are logged and the current list is kept.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<MenuItem>>) {
        if !self.sequence.accept(ticket) {
            debug!(?ticket, "Discarding stale inventory response");
            return;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                error!(error = %e, "Failed to load inventory");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Flip availability of `id` and merge the server's copy by id.
    pub async fn toggle<A: MenuApi + ?Sized>(&mut self, api: &A, id: &str) -> Result<MenuItem> {
        self.toggling = Some(id.to_string());
        let result = api.toggle_availability(id).await;
        self.toggling = None;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|i| i.id == updated.id) {
                    *slot = updated.clone();
                }
                Ok(updated)
            }
            Err(e) => {
                error!(id = %id, error = %e, "Failed to toggle availability");
                Err(e)
            }
        }
    }

    pub fn categories(&self) -> Vec<String> {
        unique_categories(self.items.iter().map(MenuItem::category))
    }

    pub fn filtered(&self) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| match self.category_filter.as_deref() {
                Some(category) if !category.is_empty() => item.category() == Some(category),
                _ => true,
            })
            .filter(|item| self.availability_filter.matches(item))
            .collect()
    }

    /// Counts over the full list, ignoring filters.
    pub fn counts(&self) -> InventoryCounts {
        let available = self.items.iter().filter(|i| i.available).count();
        InventoryCounts {
            available,
            unavailable: self.items.len() - available,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppError, Price};
    use rstest::rstest;

    fn item(id: &str, category: &str, available: bool) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            price: Price::from_cents(800),
            category: Some(category.to_string()),
            description: None,
            available,
        }
    }

    fn loaded_page() -> InventoryPage {
        let mut page = InventoryPage::new();
        let ticket = page.begin_load();
        page.finish_load(
            ticket,
            Ok(vec![
                item("1", "Pizza", true),
                item("2", "Pizza", false),
                item("3", "Drinks", true),
                item("4", "Dessert", false),
            ]),
        );
        page
    }

    #[rstest]
    #[case(None, AvailabilityFilter::All, &["1", "2", "3", "4"])]
    #[case(Some("Pizza"), AvailabilityFilter::All, &["1", "2"])]
    #[case(Some("Pizza"), AvailabilityFilter::Available, &["1"])]
    #[case(None, AvailabilityFilter::Unavailable, &["2", "4"])]
    #[case(Some("Soup"), AvailabilityFilter::All, &[])]
    fn test_filtered(
        #[case] category: Option<&str>,
        #[case] availability: AvailabilityFilter,
        #[case] expected: &[&str],
    ) {
        let mut page = loaded_page();
        page.category_filter = category.map(str::to_string);
        page.availability_filter = availability;

        let ids: Vec<&str> = page.filtered().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_counts_and_categories() {
        let page = loaded_page();
        assert_eq!(
            page.counts(),
            InventoryCounts {
                available: 2,
                unavailable: 2
            }
        );
        assert_eq!(page.categories(), vec!["Dessert", "Drinks", "Pizza"]);
    }

    #[test]
    fn test_failed_reload_keeps_items() {
        let mut page = loaded_page();
        let ticket = page.begin_load();
        page.finish_load(
            ticket,
            Err(AppError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        );

        assert_eq!(page.items().len(), 4);
        assert_eq!(page.state().error(), Some("Internal Server Error"));
        assert!(!page.is_loading());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut page = InventoryPage::new();
        let old = page.begin_load();
        let new = page.begin_load();

        page.finish_load(new, Ok(vec![item("new", "Pizza", true)]));
        page.finish_load(old, Ok(vec![item("old", "Pizza", true)]));

        assert_eq!(page.items().len(), 1);
        assert_eq!(page.items()[0].id, "new");
    }

    #[test]
    fn test_availability_filter_parse() {
        assert_eq!("".parse::<AvailabilityFilter>().unwrap(), AvailabilityFilter::All);
        assert_eq!(
            "Unavailable".parse::<AvailabilityFilter>().unwrap(),
            AvailabilityFilter::Unavailable
        );
        assert!("maybe".parse::<AvailabilityFilter>().is_err());
    }
}
