//! Seminar hall booking dashboard
//!
//! Serves the booking analytics dashboard as HTML and JSON, fetching the
//! bookings from the backend once per page view.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod charts;
pub mod dashboard;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;

pub use api_client::{BookingClient, BookingSource};
pub use dashboard::{Dashboard, DashboardView};
pub use server::{build_app, build_app_with_state};
pub use state::AppState;
