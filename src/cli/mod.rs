//! CLI module for Bistro Admin
//!
//! Provides command-line parsing and handling for the `bistro-admin` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod init;
pub mod output;

use crate::pages::AvailabilityFilter;
use crate::types::{OrderStatus, Price};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bistro Admin - restaurant dashboard in your terminal
///
/// Lists menu items, toggles their availability, and tracks customer orders
/// through the restaurant REST API.
#[derive(Parser, Debug)]
#[command(
    name = "bistro-admin",
    version,
    about = "Bistro Admin - restaurant menu, inventory, and order dashboard",
    long_about = "Bistro Admin - administrative dashboard for a restaurant backed by a REST API.\n\n\
                  Run without arguments to show the dashboard, or pick a page with a subcommand.",
    after_help = "EXAMPLES:\n    \
                  bistro-admin                                 # Dashboard counters\n    \
                  bistro-admin menu list --category Pizza      # Menu filtered by category\n    \
                  bistro-admin inventory toggle 665f1c2a       # Flip availability\n    \
                  bistro-admin orders list --status pending    # Pending orders\n    \
                  bistro-admin open '/orders?status=ready'     # Render a page by route\n    \
                  bistro-admin init                            # Write a starter bistro.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "bistro.toml", global = true)]
    pub config: PathBuf,

    /// Base URL of the restaurant API (overrides the config file)
    #[arg(long, env = "BISTRO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dashboard counters
    Dashboard,

    /// Manage menu items
    #[command(subcommand)]
    Menu(MenuCommands),

    /// Show or toggle item availability
    Inventory {
        #[command(subcommand)]
        command: Option<InventoryCommands>,

        /// Only show items in this category
        #[arg(long)]
        category: Option<String>,

        /// all, available, or unavailable
        #[arg(long, default_value = "all")]
        availability: AvailabilityFilter,
    },

    /// View and update customer orders
    #[command(subcommand)]
    Orders(OrderCommands),

    /// Render the page at a dashboard route, e.g. "/orders?status=pending"
    Open {
        /// Client-side route
        route: String,
    },

    /// Write a starter bistro.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// API base URL to write into the config
        #[arg(long = "base-url", default_value = crate::api::DEFAULT_BASE_URL)]
        base_url: String,
    },
}

/// Menu subcommands
#[derive(Subcommand, Debug)]
pub enum MenuCommands {
    /// List menu items
    List {
        /// Only show items in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one menu item
    Show {
        /// Menu item id
        id: String,
    },

    /// Add a menu item
    Add {
        #[arg(long)]
        name: String,

        /// Price, e.g. 12.50
        #[arg(long)]
        price: String,

        #[arg(long, default_value = "")]
        category: String,
    },

    /// Edit a menu item; omitted fields keep their current value
    Edit {
        /// Menu item id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a menu item
    Delete {
        /// Menu item id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Inventory subcommands
#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// Flip availability of one item
    Toggle {
        /// Menu item id
        id: String,
    },
}

/// Order subcommands
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// List orders
    List {
        /// pending, confirmed, preparing, ready, completed, or cancelled
        #[arg(long)]
        status: Option<OrderStatus>,
    },

    /// Show one order with its line items
    Show {
        /// Order id
        id: String,
    },

    /// Set an order's status
    SetStatus {
        /// Order id
        id: String,

        /// New status
        status: OrderStatus,
    },

    /// Delete an order
    Delete {
        /// Order id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Format a price for display.
pub(crate) fn money(price: Price) -> String {
    format!("${}", price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_long_help_names_the_product() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Bistro Admin"));
        assert!(help.contains("bistro-admin open"));
    }

    #[test]
    fn test_parse_orders_list_with_status() {
        let cli = Cli::try_parse_from(["bistro-admin", "orders", "list", "--status", "pending"]).unwrap();
        match cli.command {
            Some(Commands::Orders(OrderCommands::List { status })) => {
                assert_eq!(status, Some(OrderStatus::Pending))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let result = Cli::try_parse_from(["bistro-admin", "orders", "set-status", "o1", "shipped"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_inventory_filters() {
        let cli = Cli::try_parse_from([
            "bistro-admin",
            "inventory",
            "--availability",
            "unavailable",
            "--category",
            "Drinks",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Inventory {
                command,
                category,
                availability,
            }) => {
                assert!(command.is_none());
                assert_eq!(category.as_deref(), Some("Drinks"));
                assert_eq!(availability, AvailabilityFilter::Unavailable);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "bistro-admin",
            "--api-url",
            "http://kitchen:5000/api",
            "--no-color",
            "dashboard",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://kitchen:5000/api"));
        assert!(cli.no_color);
        assert_eq!(cli.config, PathBuf::from("bistro.toml"));
    }

    #[test]
    fn test_money() {
        assert_eq!(money(Price::from_cents(1250)), "$12.50");
    }
}
