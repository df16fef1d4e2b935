//! Service layer - session handling and banking API bindings
//!
//! Each service wraps one area of the REST API on top of the shared
//! [`ApiClient`](crate::adapters::http::ApiClient). The session store is
//! the only service that changes local state.

mod accounts;
mod auth;
mod bulk;
pub mod dashboard;
pub mod logging;
mod payments;
mod reports;
pub mod session;
mod transactions;

pub use accounts::AccountService;
pub use auth::AuthApi;
pub use bulk::BulkOpeningService;
pub use dashboard::{DashboardService, DashboardSummary, RecentActivity};
pub use logging::init_tracing;
pub use payments::PaymentService;
pub use reports::ReportService;
pub use session::{SessionHandle, SessionState, SessionStore};
pub use transactions::TransactionService;
