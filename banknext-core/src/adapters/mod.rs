//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON file under the data directory for SessionStorage
//! - In-process map for SessionStorage in tests and throwaway sessions
//! - Blocking reqwest client for the BankNext REST API

pub mod file_storage;
pub mod http;
pub mod memory_storage;

#[cfg(test)]
pub mod bank_mock;
