//! The ORB statistics dashboard without a UI: configuration, the login
//! gate, and the render pipeline producing serializable chart data.

pub mod config;
pub mod errors;
pub mod pipeline;
pub mod session;
pub mod view;

pub use config::{DashboardConfig, load_config_path, load_config_str};
pub use errors::{AuthError, DashboardError};
pub use pipeline::{Dashboard, FilterRequest, Request};
pub use session::{Session, SessionGate};
pub use view::{ChartView, ChartsView, DashboardView, Notice, SelectorOptions};
