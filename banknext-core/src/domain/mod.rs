//! Core domain entities
//!
//! Plain data structures mirroring what the banking API sends and accepts.
//! No I/O here; integrity rules live on the server.

mod account;
pub mod bulk;
mod payment;
mod registration;
pub mod report;
pub mod result;
mod session;
mod transaction;
mod wire;

pub use account::{
    mask_account_number, parse_customer_id, Account, AccountStatus, AccountType,
    CreateAccountRequest,
};
pub use bulk::{BulkFilePreview, BulkOpeningResult};
pub use payment::{IbftTransferRequest, RaastTransferRequest};
pub use registration::RegisterRequest;
pub use report::{Report, ReportFormat, ReportRequest};
pub use session::{AuthResponse, Credential, UserProfile};
pub use transaction::{
    AccountRef, Direction, Transaction, TransactionStatus, TransactionType, TransferRequest,
};
