use orb_data::selector::SelectorError;
use orb_stats::StatsError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user or wrong password. The two are not told apart.
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Failures that stop a render. Data problems (no combination, fetch
/// failure, missing columns) are notices on the view instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error("log in to view the dashboard")]
    NotAuthenticated,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<SelectorError> for DashboardError {
    fn from(e: SelectorError) -> Self {
        match e {
            SelectorError::InvalidParameter(msg) => DashboardError::InvalidParameter(msg),
            other => DashboardError::InvalidParameter(other.to_string()),
        }
    }
}

impl From<StatsError> for DashboardError {
    fn from(e: StatsError) -> Self {
        DashboardError::InvalidParameter(e.to_string())
    }
}
