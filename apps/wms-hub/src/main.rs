//! # WMS Hub Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            WMS Hub                                      │
//! │                                                                         │
//! │  main.rs ────► parses flags, hands off to the library                  │
//! │                                                                         │
//! │  lib.rs ─────► config, logging, backend, the read/render loop          │
//! │                                                                         │
//! │  shell/ ─────► current page + navigation                               │
//! │                                                                         │
//! │  pages/ ─────► dashboard, customers, warehouses, commodities,          │
//! │                inventory                                                │
//! │                                                                         │
//! │  ui/ ────────► button, input, select, modal, table                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use wms_hub_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    wms_hub_lib::run(Cli::parse()).await
}
