//! Command handlers
//!
//! Each handler mounts the matching page against the API client, applies the
//! requested action through the page, and renders the resulting view state.

use super::output::Output;
use super::{money, Commands, InventoryCommands, MenuCommands, OrderCommands};
use crate::api::{ApiClient, MenuApi, OrdersApi};
use crate::pages::{
    orders::format_created_at, AvailabilityFilter, DashboardPage, InventoryPage, MenuPage,
    OrdersPage,
};
use crate::router::{Location, Navigator, Route};
use crate::types::{AppError, Order, OrderStatus, Result};
use crate::widgets::Viewport;

/// Everything a command needs to run.
pub struct App {
    pub client: ApiClient,
    pub output: Output,
    pub navigator: Navigator,
    pub viewport: Viewport,
}

impl App {
    pub fn new(client: ApiClient, output: Output) -> Self {
        Self {
            client,
            output,
            navigator: Navigator::default(),
            viewport: Viewport::new(),
        }
    }

    /// Dispatch a parsed subcommand. `None` shows the dashboard.
    pub async fn run(&self, command: Option<Commands>) -> Result<()> {
        match command {
            None | Some(Commands::Dashboard) => self.dashboard().await,
            Some(Commands::Menu(cmd)) => self.menu(cmd).await,
            Some(Commands::Inventory {
                command,
                category,
                availability,
            }) => match command {
                Some(InventoryCommands::Toggle { id }) => self.toggle(&id).await,
                None => self.inventory(category, availability).await,
            },
            Some(Commands::Orders(cmd)) => self.orders(cmd).await,
            Some(Commands::Open { route }) => self.open(&route).await,
            // handled before an API client exists
            Some(Commands::Init { .. }) => Ok(()),
        }
    }

    /// Render whichever page `route` points at.
    pub async fn open(&self, route: &str) -> Result<()> {
        let location = Location::parse(route)?;
        match location.route() {
            Route::Dashboard => self.dashboard().await,
            Route::Menu => self.menu_list(location.query_param("category").map(str::to_owned)).await,
            Route::Inventory => {
                let availability = location
                    .query_param("availability")
                    .unwrap_or_default()
                    .parse()
                    .map_err(AppError::InvalidInput)?;
                self.inventory(location.query_param("category").map(str::to_owned), availability)
                    .await
            }
            Route::Orders { .. } => {
                self.navigator.navigate(location);
                self.orders_page().await
            }
            Route::NotFound(path) => Err(AppError::InvalidInput(format!(
                "no page at '{}' (try /, /menu, /inventory, /orders)",
                path
            ))),
        }
    }

    // ============= Dashboard =============

    async fn dashboard(&self) -> Result<()> {
        let out = &self.output;
        let mut page = DashboardPage::new();
        page.load(&self.client).await;

        out.banner(Route::Dashboard.title(), "Overview of your restaurant");
        if let Some(error) = page.state().error() {
            out.warning(&format!("Could not load dashboard: {}", error));
        }
        for card in page.cards() {
            out.kv(card.label, &card.value.to_string());
            out.command(&format!(
                "bistro-admin open '{}'   # {}",
                card.route.location(),
                card.link_label
            ));
        }
        Ok(())
    }

    // ============= Menu =============

    async fn menu(&self, cmd: MenuCommands) -> Result<()> {
        match cmd {
            MenuCommands::List { category } => self.menu_list(category).await,
            MenuCommands::Show { id } => {
                let item = self.client.get_menu_item(&id).await?;
                let out = &self.output;
                out.header(&item.name);
                out.kv("id", &item.id);
                out.kv("category", item.category().unwrap_or("-"));
                out.kv("price", &money(item.price));
                out.kv("status", &out.availability(item.available));
                if let Some(description) = &item.description {
                    out.kv("description", description);
                }
                Ok(())
            }
            MenuCommands::Add {
                name,
                price,
                category,
            } => {
                let mut page = MenuPage::new(self.viewport.clone());
                page.open_create();
                let form = page.form_mut();
                form.name = name;
                form.price = price;
                form.category = category;
                self.submit_menu(&mut page).await
            }
            MenuCommands::Edit {
                id,
                name,
                price,
                category,
            } => {
                let items = self.client.list_menu(None).await?;
                let mut page = MenuPage::new(self.viewport.clone());
                let ticket = page.begin_load();
                page.finish_load(ticket, Ok(items));
                if !page.open_edit(&id) {
                    return Err(AppError::InvalidInput(format!(
                        "menu item '{}' not found",
                        id
                    )));
                }
                let form = page.form_mut();
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(price) = price {
                    form.price = price;
                }
                if let Some(category) = category {
                    form.category = category;
                }
                self.submit_menu(&mut page).await
            }
            MenuCommands::Delete { id, yes } => {
                if !yes && !self.output.confirm("Delete this menu item?") {
                    self.output.info("Cancelled");
                    return Ok(());
                }
                let mut page = MenuPage::new(self.viewport.clone());
                // on failure the banner text is the error message, printed by main
                page.delete(&self.client, &id).await?;
                self.output.success(&format!("Deleted menu item {}", id));
                self.render_menu(&page);
                Ok(())
            }
        }
    }

    async fn submit_menu(&self, page: &mut MenuPage) -> Result<()> {
        let saved = page.submit(&self.client).await?;
        self.output
            .success(&format!("Saved {} ({})", saved.name, saved.id));
        self.render_menu(page);
        Ok(())
    }

    async fn menu_list(&self, category: Option<String>) -> Result<()> {
        let mut page = MenuPage::new(self.viewport.clone());
        page.category_filter = category;
        page.load(&self.client).await;
        self.render_menu(&page);
        Ok(())
    }

    fn render_banner(&self, page: &MenuPage) {
        if let Some(error) = page.error() {
            self.output.error(error);
        }
    }

    fn render_menu(&self, page: &MenuPage) {
        let out = &self.output;
        out.banner(Route::Menu.title(), "Add, edit, and remove menu items");
        self.render_banner(page);

        let categories = page.categories();
        if !categories.is_empty() {
            out.kv("categories", &categories.join(", "));
        }

        let items = page.visible_items();
        if items.is_empty() {
            out.info("No menu items yet. Add one to get started.");
            out.command("bistro-admin menu add --name <NAME> --price <PRICE> --category <CATEGORY>");
            return;
        }

        out.newline();
        out.table_header(&["Id", "Name", "Category", "Price", "Status"]);
        for item in items {
            out.table_row(&[
                &item.id,
                &item.name,
                item.category().unwrap_or("-"),
                &money(item.price),
                &out.availability(item.available),
            ]);
        }
    }

    // ============= Inventory =============

    async fn inventory(
        &self,
        category: Option<String>,
        availability: AvailabilityFilter,
    ) -> Result<()> {
        let mut page = InventoryPage::new();
        page.category_filter = category;
        page.availability_filter = availability;
        page.load(&self.client).await;
        self.render_inventory(&page);
        Ok(())
    }

    async fn toggle(&self, id: &str) -> Result<()> {
        let mut page = InventoryPage::new();
        page.load(&self.client).await;
        let updated = page.toggle(&self.client, id).await?;
        self.output.success(&format!(
            "{} is now {}",
            updated.name,
            self.output.availability(updated.available)
        ));
        self.render_inventory(&page);
        Ok(())
    }

    fn render_inventory(&self, page: &InventoryPage) {
        let out = &self.output;
        out.banner(
            Route::Inventory.title(),
            "Toggle availability for menu items. Unavailable items won't appear for customers.",
        );
        if let Some(error) = page.state().error() {
            out.warning(&format!("Could not load inventory: {}", error));
        }

        let counts = page.counts();
        out.kv("available", &counts.available.to_string());
        out.kv("unavailable", &counts.unavailable.to_string());

        let items = page.filtered();
        if items.is_empty() {
            out.info("No items match the filters.");
            return;
        }
        out.newline();
        out.table_header(&["Id", "Name", "Category", "Price", "Status"]);
        for item in items {
            out.table_row(&[
                &item.id,
                &item.name,
                item.category().unwrap_or("-"),
                &money(item.price),
                &out.availability(item.available),
            ]);
        }
    }

    // ============= Orders =============

    async fn orders(&self, cmd: OrderCommands) -> Result<()> {
        match cmd {
            OrderCommands::List { status } => {
                self.navigator
                    .navigate(Route::Orders { status }.location());
                self.orders_page().await
            }
            OrderCommands::Show { id } => {
                let order = self.client.get_order(&id).await?;
                self.render_order(&order);
                Ok(())
            }
            OrderCommands::SetStatus { id, status } => {
                self.navigator
                    .navigate(Route::Orders { status: None }.location());
                let mut page = OrdersPage::new(self.navigator.clone());
                page.mount(&self.client).await;
                let order = page.update_status(&self.client, &id, status).await?;
                self.output.success(&format!(
                    "Order for {} is now {}",
                    order.customer_name,
                    self.output.status(order.status)
                ));
                Ok(())
            }
            OrderCommands::Delete { id, yes } => {
                if !yes && !self.output.confirm("Delete this order?") {
                    self.output.info("Cancelled");
                    return Ok(());
                }
                self.client.delete_order(&id).await?;
                self.output.success(&format!("Deleted order {}", id));
                Ok(())
            }
        }
    }

    async fn orders_page(&self) -> Result<()> {
        let mut page = OrdersPage::new(self.navigator.clone());
        page.mount(&self.client).await;

        let out = &self.output;
        out.banner(
            Route::Orders { status: None }.title(),
            "View and update incoming customer orders",
        );
        out.kv(
            "status",
            page.status_filter().map(OrderStatus::label).unwrap_or("All"),
        );
        if let Some(error) = page.state().error() {
            out.warning(&format!("Could not load orders: {}", error));
        }

        if page.orders().is_empty() {
            out.info("No orders match the filter.");
            return Ok(());
        }
        out.newline();
        out.table_header(&["Id", "Customer", "Placed", "Total", "Status"]);
        for order in page.orders() {
            out.table_row(&[
                &order.id,
                &order.customer_name,
                &format_created_at(order),
                &money(order.total),
                &out.status(order.status),
            ]);
        }
        Ok(())
    }

    fn render_order(&self, order: &Order) {
        let out = &self.output;
        out.header(&order.customer_name);
        if let Some(phone) = &order.customer_phone {
            out.kv("phone", phone);
        }
        out.kv("placed", &format_created_at(order));
        out.kv("status", &out.status(order.status));
        out.kv("total", &money(order.total));

        out.subheader("Items");
        for line in &order.items {
            out.list_item(&format!(
                "{} × {}  {}",
                line.name,
                line.quantity,
                money(line.subtotal())
            ));
        }
        if let Some(notes) = &order.notes {
            out.kv("note", notes);
        }
    }
}
