//! Command-line configuration.

use clap::{Parser, Subcommand};
use slot_core::ViewTarget;

#[derive(Debug, Parser)]
#[command(name = "slotctl", version, about = "Warehouse and slot actions against the planning backend")]
pub struct Cli {
    /// Base URL of the warehouse backend.
    #[arg(long, env = "WAREHOUSE_API_URL", default_value = "http://127.0.0.1:3000")]
    pub base_url: String,

    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Select a warehouse's slots.
    Select { warehouse_id: String },
    /// Delete one slot of a warehouse.
    DeleteSlot { warehouse_id: String, slot_id: String },
    /// Delete every slot of a warehouse.
    DeleteSlots { warehouse_id: String },
    /// Delete a warehouse and its slots.
    DeleteWarehouse { warehouse_id: String },
    /// Run conveyor planning and show the given page.
    Planning {
        warehouse_id: String,
        #[arg(default_value = "1")]
        page: String,
    },
    /// Show the warehouse list.
    Warehouses,
    /// Show one page of a warehouse's slots.
    Slots {
        warehouse_id: String,
        #[arg(long, default_value = "1")]
        page: String,
    },
}

impl Command {
    /// The view this command leaves the user looking at.
    pub fn view_target(&self) -> ViewTarget {
        match self {
            Command::DeleteWarehouse { .. } | Command::Warehouses => ViewTarget::Warehouses,
            Command::Select { warehouse_id }
            | Command::DeleteSlot { warehouse_id, .. }
            | Command::DeleteSlots { warehouse_id } => ViewTarget::Slots {
                warehouse_id: warehouse_id.clone(),
                page: "1".to_string(),
            },
            Command::Planning { warehouse_id, page } | Command::Slots { warehouse_id, page } => {
                ViewTarget::Slots {
                    warehouse_id: warehouse_id.clone(),
                    page: page.clone(),
                }
            }
        }
    }
}

impl Cli {
    /// Fallback log directive when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
