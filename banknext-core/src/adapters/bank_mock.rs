//! Mock BankNext API server for testing
//!
//! Serves the same routes and response shapes as the real backend under
//! `/api`, and records every request it receives so tests can assert on
//! headers and bodies.
//!
//! Login succeeds for any email with the configured password. Protected
//! routes answer 401 without a bearer token when `require_auth` is set.
//! Account routes keyed by customer answer 400 for ids that are not
//! numeric, like the real backend does for the `CUST…` business id.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{json, Value as JsonValue};

use super::http::ApiClient;
use crate::domain::Credential;
use crate::ports::CredentialSource;

/// Mock BankNext server for testing
pub struct MockBankServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behaviour knobs for the mock
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Token returned by login and register
    pub token: String,
    /// Fields returned next to the token
    pub profile: JsonValue,
    /// Password accepted by login
    pub password: String,
    /// Reject protected routes that arrive without a bearer token
    pub require_auth: bool,
    /// Answer every request with a bare 500
    pub fail_all: bool,
    /// Account whose transaction history answers 500
    pub failing_account: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            token: "abc123".to_string(),
            profile: json!({
                "customerId": "CUST0000000042",
                "email": "user@bank.test",
                "firstName": "A",
                "lastName": "Customer",
                "accountNumber": "1234567890123456",
                "iban": "PK36BNXT0001234567890123"
            }),
            password: "pw".to_string(),
            require_auth: true,
            fail_all: false,
            failing_account: None,
        }
    }
}

/// A request as the mock saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> JsonValue {
        serde_json::from_slice(&self.body).unwrap_or(JsonValue::Null)
    }
}

impl MockBankServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking accept so stop() can end the loop
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Base URL including the `/api` prefix
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/api", self.port)
    }

    /// Everything received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Client for this server that sends `token` on every request
    pub fn client_with_token(&self, token: Option<&str>) -> Arc<ApiClient> {
        let source = FixedCredential(token.map(Credential::new));
        Arc::new(ApiClient::new(&self.base_url(), Arc::new(source)).unwrap())
    }

    /// Client for this server holding the default login token
    pub fn client(&self) -> Arc<ApiClient> {
        self.client_with_token(Some("abc123"))
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

struct FixedCredential(Option<Credential>);

impl CredentialSource for FixedCredential {
    fn credential(&self) -> Option<Credential> {
        self.0.clone()
    }
}

impl Drop for MockBankServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    stream.set_nonblocking(false).ok()?;
    let mut data = Vec::new();
    let mut buffer = [0u8; 8192];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target, None),
    };

    Some(RecordedRequest {
        method,
        path,
        query,
        headers,
        body: data[header_end..].to_vec(),
    })
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<RecordedRequest>>) {
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    log.lock().unwrap().push(request.clone());

    if config.fail_all {
        send_response(&mut stream, 500, "application/json", br#"{"error":"Internal Server Error","message":""}"#);
        return;
    }

    let segments: Vec<&str> = request
        .path
        .trim_start_matches('/')
        .split('/')
        .collect();

    let is_auth_route = segments.get(1) == Some(&"auth");
    let has_bearer = request
        .header("authorization")
        .map(|v| v.starts_with("Bearer "))
        .unwrap_or(false);

    if config.require_auth && !is_auth_route && !has_bearer {
        send_response(&mut stream, 401, "application/json", b"{}");
        return;
    }

    let (status, content_type, body) = route(&request, &segments, config);
    send_response(&mut stream, status, content_type, &body);
}

fn json_body(value: JsonValue) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

fn message(text: &str) -> Vec<u8> {
    json_body(json!({ "message": text }))
}

/// Customer ids on the account routes are database ids (`Long` on the server)
fn is_numeric_id(id: &str) -> bool {
    id.parse::<i64>().is_ok()
}

/// What the server sends when an id fails to convert: no `message`
fn bad_request() -> Vec<u8> {
    json_body(json!({ "error": "Bad Request", "status": 400 }))
}

fn route(request: &RecordedRequest, segments: &[&str], config: &MockConfig) -> (u16, &'static str, Vec<u8>) {
    const JSON: &str = "application/json";
    let body = request.json();

    match (request.method.as_str(), segments) {
        ("POST", ["api", "auth", "login"]) => {
            if body["password"] == config.password.as_str() {
                let mut response = config.profile.clone();
                response["token"] = json!(config.token);
                (200, JSON, json_body(response))
            } else {
                (400, JSON, message("Invalid credentials"))
            }
        }
        ("POST", ["api", "auth", "register"]) => {
            if body["email"] == "taken@bank.test" {
                return (400, JSON, message("Email already exists"));
            }
            (
                200,
                JSON,
                json_body(json!({
                    "token": config.token,
                    "customerId": "CUST00000000NEW",
                    "email": body["email"],
                    "firstName": body["firstName"],
                    "lastName": body["lastName"],
                    "accountNumber": "5555666677778888",
                    "iban": "PK36BNXT0005555666677778888"
                })),
            )
        }
        ("POST", ["api", "accounts", "create"]) => {
            let numeric = body["customerId"].as_u64().is_some()
                || body["customerId"].as_str().map(is_numeric_id).unwrap_or(false);
            if !numeric {
                return (400, JSON, bad_request());
            }
            (
                200,
                JSON,
                json_body(account_json(
                    "7000000000000001",
                    body["accountType"].as_str().unwrap_or("CURRENT"),
                    0.0,
                    body["currency"].as_str().unwrap_or("PKR"),
                )),
            )
        }
        ("GET", ["api", "accounts", "customer", id]) => {
            if !is_numeric_id(id) {
                return (400, JSON, bad_request());
            }
            (
                200,
                JSON,
                json_body(json!([
                    account_json("1234567890123456", "SAVINGS", 125430.50, "PKR"),
                    account_json("9876543210987654", "CURRENT", 50000.00, "PKR"),
                ])),
            )
        }
        ("GET", ["api", "accounts", number]) => match *number {
            "0000" => (404, JSON, message("Account not found")),
            n => (200, JSON, json_body(account_json(n, "SAVINGS", 1000.0, "PKR"))),
        },
        ("POST", ["api", "accounts", _number, "freeze"]) => {
            (200, "text/plain", b"Account frozen successfully".to_vec())
        }
        ("POST", ["api", "accounts", _number, "unfreeze"]) => {
            (200, "text/plain", b"Account unfrozen successfully".to_vec())
        }
        ("POST", ["api", "transactions", kind @ ("transfer" | "deposit" | "withdrawal")]) => {
            let amount: f64 = body["amount"]
                .as_str()
                .and_then(|a| a.parse().ok())
                .or_else(|| body["amount"].as_f64())
                .unwrap_or(0.0);
            if amount > 1_000_000.0 {
                return (400, JSON, message("Insufficient balance"));
            }
            let tx_type = match *kind {
                "transfer" => "TRANSFER",
                "deposit" => "DEPOSIT",
                _ => "WITHDRAWAL",
            };
            (
                200,
                JSON,
                json_body(transaction_json(
                    "TXN900",
                    tx_type,
                    amount,
                    "COMPLETED",
                    "2025-10-26T10:00:00",
                    body["fromAccountNumber"].as_str(),
                    body["toAccountNumber"].as_str(),
                )),
            )
        }
        ("GET", ["api", "transactions", "account", number])
            if config.failing_account.as_deref() == Some(*number) =>
        {
            (500, JSON, br#"{"message":""}"#.to_vec())
        }
        ("GET", ["api", "transactions", "account", number]) => (
            200,
            JSON,
            json_body(json!([
                transaction_json("TXN001", "TRANSFER", 5000.0, "COMPLETED", "2025-10-25T14:30:00", Some(*number), Some("4444")),
                transaction_json("TXN002", "DEPOSIT", 10000.0, "COMPLETED", "2025-10-24T10:15:00", None, Some(*number)),
                transaction_json("TXN003", "WITHDRAWAL", 2000.0, "COMPLETED", "2025-10-23T16:45:00", Some(*number), None),
                transaction_json("TXN004", "IBFT", 15000.0, "PENDING", "2025-10-22T09:20:00", Some(*number), None),
            ])),
        ),
        ("GET", ["api", "transactions", reference]) => match *reference {
            "MISSING" => (404, JSON, message("Transaction not found")),
            r => (
                200,
                JSON,
                json_body(transaction_json(r, "TRANSFER", 750.0, "COMPLETED", "2025-10-20T08:00:00", Some("1111"), Some("2222"))),
            ),
        },
        ("POST", ["api", "ibft", "transfer"]) => (
            200,
            JSON,
            json_body(json!({"status": "ACCEPTED", "ibftReference": "IBFT123", "toBankCode": body["toBankCode"]})),
        ),
        ("POST", ["api", "raast", "transfer"]) => (
            200,
            JSON,
            json_body(json!({"status": "ACCEPTED", "raastTransactionId": "RAAST456"})),
        ),
        ("GET", ["api", "reports", "transactions", "pdf"]) => {
            (200, "application/pdf", b"%PDF-1.4 mock report".to_vec())
        }
        ("GET", ["api", "reports", "transactions", "excel"]) => {
            (200, "application/octet-stream", b"PK\x03\x04mock".to_vec())
        }
        ("POST", ["api", "csv", "bulk-account-opening"]) => {
            let is_multipart = request
                .header("content-type")
                .map(|v| v.starts_with("multipart/form-data"))
                .unwrap_or(false);
            let text = String::from_utf8_lossy(&request.body);
            if !is_multipart || !text.contains("name=\"file\"") {
                return (400, JSON, message("File is empty"));
            }
            let created = text.lines().filter(|l| l.contains("@bank.test")).count();
            (
                200,
                JSON,
                json_body(json!({"success": true, "customersCreated": created, "customers": []})),
            )
        }
        _ => (404, JSON, message("Endpoint not found")),
    }
}

fn account_json(number: &str, account_type: &str, balance: f64, currency: &str) -> JsonValue {
    json!({
        "id": 1,
        "accountNumber": number,
        "iban": format!("PK36BNXT{}", number),
        "accountType": account_type,
        "balance": balance,
        "availableBalance": balance,
        "currency": currency,
        "status": "ACTIVE"
    })
}

fn transaction_json(
    reference: &str,
    tx_type: &str,
    amount: f64,
    status: &str,
    date: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> JsonValue {
    json!({
        "transactionReference": reference,
        "transactionType": tx_type,
        "amount": amount,
        "currency": "PKR",
        "status": status,
        "channel": "INTERNET",
        "transactionDate": date,
        "fromAccount": from.map(|n| json!({"accountNumber": n})),
        "toAccount": to.map(|n| json!({"accountNumber": n})),
    })
}

fn send_response(stream: &mut TcpStream, status: u16, content_type: &str, body: &[u8]) {
    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Internal Server Error",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        status_text,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
