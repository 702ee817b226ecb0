//! Local dashboard API
//!
//! A small JSON API bound to localhost so a tray app or browser page can
//! watch session status, browse history, and flip the hotkey switch.

pub mod handlers;
mod routes;
mod state;

use std::net::{Ipv4Addr, SocketAddr};

use tracing::info;

pub use routes::create_router;
pub use state::DashboardState;

/// Bind and serve the dashboard API on localhost.
pub async fn serve(state: DashboardState, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("dashboard listening on http://{}", addr);
    axum::serve(listener, create_router(state)).await
}
