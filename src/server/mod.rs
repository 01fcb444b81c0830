//! MCP server for the restaurant desk.
//!
//! Exposes the scheduling helpers and the reservation, order, menu and table
//! services as MCP tools over stdio.

pub mod handlers;

pub use handlers::RestaurantDeskServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the desk server with stdio transport.
///
/// Communicates via stdin/stdout using the MCP protocol and returns when the
/// client disconnects.
pub async fn run_server(server: RestaurantDeskServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
