//! Web front end for the stock dashboard
//!
//! One HTTP request is one rendering pass: the sidebar form and the toggle
//! buttons submit `GET /` with the ticker, the date range and the flags of
//! the sections to show. The pass itself runs in [`dash_stock::DashboardEngine`];
//! this crate only parses parameters, renders HTML and serves it.
//!
//! # Modules
//!
//! - [`app`]: router and listen address
//! - [`state`]: shared engine and renderer
//! - [`params`]: query-string parsing
//! - [`page`]: MiniJinja page rendering
//! - [`routes`]: page, JSON and health handlers
//! - [`error`]: HTTP error mapping

pub mod app;
pub mod error;
pub mod page;
pub mod params;
pub mod routes;
pub mod state;

pub use app::{ServerConfig, create_app};
pub use error::{AppError, AppResult};
pub use page::PageRenderer;
pub use state::AppState;
