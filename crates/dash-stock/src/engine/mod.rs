//! Dashboard workflow
//!
//! One [`DashboardRequest`] in, one [`DashboardView`] out.

pub mod dashboard;
pub mod request;
pub mod view;

pub use dashboard::DashboardEngine;
pub use request::{DashboardRequest, Section, SectionSet};
pub use view::{
    DashboardView, LoadedView, NewsFeed, NumberedNews, SectionState, SessionStage,
    StatementSection,
};
