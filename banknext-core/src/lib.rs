//! BankNext Core - session, request client and banking API bindings
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Wire types (Account, Transaction, Credential, ...)
//! - **ports**: Trait definitions for session storage and credential lookup
//! - **services**: Session store and one service per API area
//! - **adapters**: Concrete implementations (JSON file storage, reqwest client)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use adapters::file_storage::FileSessionStorage;
use adapters::http::ApiClient;
use config::Config;
use ports::SessionStorage;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Account, AccountType, Credential, RegisterRequest, ReportFormat, Transaction,
    TransferRequest, UserProfile,
};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BANKNEXT_DIR";

/// Main context for BankNext operations
///
/// Holds the configuration, the session store, the shared request client
/// and every API service. The client reads the credential from the
/// session store's handle, so services built here are authenticated as soon
/// as the store is.
pub struct BankContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub session: SessionStore,
    pub client: Arc<ApiClient>,
    pub account_service: AccountService,
    pub transaction_service: TransactionService,
    pub payment_service: PaymentService,
    pub report_service: ReportService,
    pub bulk_service: BulkOpeningService,
    pub dashboard_service: DashboardService,
}

impl BankContext {
    /// Create a context for `data_dir` and restore the saved session
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let storage = Arc::new(FileSessionStorage::in_dir(data_dir));
        Self::with_storage(data_dir, config, storage)
    }

    /// Create a context with an explicit session storage backend
    pub fn with_storage(
        data_dir: &Path,
        config: Config,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self> {
        let handle = SessionHandle::new();
        let client = Arc::new(ApiClient::from_config(&config, Arc::new(handle.clone()))?);

        let session = SessionStore::new(storage, handle, AuthApi::new(Arc::clone(&client)));
        session.restore()?;

        let account_service = AccountService::new(Arc::clone(&client));
        let transaction_service = TransactionService::new(Arc::clone(&client));
        let payment_service = PaymentService::new(Arc::clone(&client));
        let report_service = ReportService::new(Arc::clone(&client));
        let bulk_service = BulkOpeningService::new(Arc::clone(&client));
        let dashboard_service =
            DashboardService::new(account_service.clone(), transaction_service.clone());

        Ok(Self {
            config,
            data_dir: data_dir.to_path_buf(),
            session,
            client,
            account_service,
            transaction_service,
            payment_service,
            report_service,
            bulk_service,
            dashboard_service,
        })
    }

    /// Current session, or `NotAuthenticated` if nobody is logged in
    pub fn require_session(&self) -> domain::result::Result<SessionState> {
        let state = self.session.handle().snapshot();
        if state.is_authenticated() {
            Ok(state)
        } else {
            Err(Error::NotAuthenticated)
        }
    }

    /// Numeric customer id to act on: the explicit one, else the saved
    /// profile's when that one is numeric
    pub fn customer_id(&self, explicit: Option<&str>) -> domain::result::Result<String> {
        if let Some(id) = explicit.map(str::trim).filter(|id| !id.is_empty()) {
            return domain::parse_customer_id(id);
        }
        let id = self
            .session
            .handle()
            .customer_id()
            .ok_or_else(|| Error::validation("No customer id known; pass --customer-id"))?;
        domain::parse_customer_id(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bank_mock::{MockBankServer, MockConfig};
    use crate::adapters::memory_storage::MemorySessionStorage;
    use crate::ports::{TOKEN_KEY, USER_KEY};

    fn context(storage: MemorySessionStorage) -> BankContext {
        let dir = std::env::temp_dir();
        BankContext::with_storage(&dir, Config::default(), Arc::new(storage)).unwrap()
    }

    #[test]
    fn test_context_restores_session() {
        let ctx = context(MemorySessionStorage::with_entries([
            (TOKEN_KEY, "abc123"),
            (USER_KEY, r#"{"customerId":"42"}"#),
        ]));

        assert!(ctx.require_session().is_ok());
        assert_eq!(ctx.customer_id(None).unwrap(), "42");
        assert_eq!(ctx.customer_id(Some(" 77 ")).unwrap(), "77");
    }

    #[test]
    fn test_business_customer_id_is_not_sent() {
        let ctx = context(MemorySessionStorage::with_entries([
            (TOKEN_KEY, "abc123"),
            (USER_KEY, r#"{"customerId":"CUST0000000042"}"#),
        ]));

        assert!(matches!(ctx.customer_id(None), Err(Error::Validation(_))));
        assert!(matches!(ctx.customer_id(Some("CUST0000000042")), Err(Error::Validation(_))));
        assert_eq!(ctx.customer_id(Some("42")).unwrap(), "42");
    }

    #[test]
    fn test_customer_id_without_session() {
        let ctx = context(MemorySessionStorage::new());
        assert!(matches!(ctx.require_session(), Err(Error::NotAuthenticated)));
        assert!(matches!(ctx.customer_id(None), Err(Error::Validation(_))));
        assert_eq!(ctx.customer_id(Some("9")).unwrap(), "9");
    }

    #[test]
    fn test_customer_id_missing_from_profile() {
        let ctx = context(MemorySessionStorage::with_entries([(TOKEN_KEY, "abc123")]));
        assert!(matches!(ctx.customer_id(None), Err(Error::Validation(_))));
    }

    #[test]
    fn test_requests_without_session_reach_the_server() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let config = Config {
            api_base_url: server.base_url(),
            ..Config::default()
        };
        let ctx = BankContext::with_storage(
            &std::env::temp_dir(),
            config,
            Arc::new(MemorySessionStorage::new()),
        )
        .unwrap();

        let err = ctx.account_service.list_for_customer("42").unwrap_err();

        assert_eq!(err.status(), Some(401));
        let request = server.last_request().unwrap();
        assert_eq!(request.path, "/api/accounts/customer/42");
        assert!(request.header("authorization").is_none());
    }
}
