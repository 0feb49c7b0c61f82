//! In-process mock of the marketplace backend
//!
//! Serves the REST endpoints the client uses on `127.0.0.1:0` and records
//! every request so tests can assert on what was (or was not) sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use market_client::{AppContext, ClientConfig, RetryPolicy};
use serde_json::{Value, json};

pub const CUSTOMER_EMAIL: &str = "a@example.com";
pub const CREATED_BOOKING_ID: &str = "srv-bk-1";
pub const PAYMENT_ERROR: &str = "Cổng thanh toán đang bảo trì";
pub const CONFIRM_MESSAGE: &str = "Đã cập nhật trạng thái thanh toán";

type Reply = (StatusCode, Json<Value>);

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<Recorded>,
    payment_fails: bool,
    payment_delay: Option<Duration>,
    confirmation_fails: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to an ephemeral port and serve in the background; returns the API base URL
    pub async fn start(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    pub fn fail_payments(&self) {
        self.state.lock().unwrap().payment_fails = true;
    }

    /// Hold every `payments/create` reply for `delay`
    pub fn delay_payments(&self, delay: Duration) {
        self.state.lock().unwrap().payment_delay = Some(delay);
    }

    pub fn fail_confirmations(&self) {
        self.state.lock().unwrap().confirmation_fails = true;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn record(
        &self,
        method: &'static str,
        path: impl Into<String>,
        headers: &HeaderMap,
        query: HashMap<String, String>,
        body: Option<Value>,
    ) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.state.lock().unwrap().requests.push(Recorded {
            method,
            path: path.into(),
            authorization,
            query,
            body,
        });
    }
}

/// Context pointed at a started mock, memory-only session, no retry delay
pub async fn context(backend: &MockBackend) -> AppContext {
    let base_url = backend.start().await;
    let config = ClientConfig::new(base_url)
        .with_timeout(5)
        .with_retry(RetryPolicy::new(3, Duration::ZERO));
    AppContext::new(config).unwrap()
}

pub fn service_json(id: &str) -> Value {
    let service_type = if id.starts_with("onsite") {
        "onsite"
    } else if id.starts_with("offsite") {
        "offsite"
    } else {
        "both"
    };
    let availability = if id.contains("closed") {
        "unavailable"
    } else {
        "available"
    };
    json!({
        "_id": id,
        "shopId": "shop-1",
        "name": "Massage body",
        "price": 300000,
        "duration": 60,
        "serviceType": service_type,
        "availability": availability,
        "categories": ["spa"]
    })
}

pub fn booking_json(id: &str, status: &str, payment_status: &str, service_name: &str) -> Value {
    json!({
        "_id": id,
        "serviceId": "svc-1",
        "serviceName": service_name,
        "shopId": "shop-1",
        "customerName": "Nguyễn Văn A",
        "customerPhone": "0901234567",
        "customerEmail": CUSTOMER_EMAIL,
        "serviceType": "onsite",
        "address": "12 Lê Lợi",
        "bookingDate": "2026-10-20",
        "bookingTime": "09:30",
        "status": status,
        "paymentStatus": payment_status,
        "totalAmount": 300000
    })
}

fn seeded_bookings() -> Vec<Value> {
    vec![
        booking_json("b1", "completed", "paid", "Massage body"),
        booking_json("b2", "completed", "pending", "Massage chân"),
        booking_json("b3", "pending", "paid", "Massage đá nóng"),
        booking_json("b4", "completed", "paid", "Cắt tóc nam"),
        booking_json("b5", "completed", "paid", "Thai massage"),
        booking_json("b6", "canceled", "failed", "Gội đầu dưỡng sinh"),
    ]
}

fn ok(data: Value) -> Reply {
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "success": false, "message": message })))
}

fn router(backend: MockBackend) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/services/{id}", get(get_service))
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/customer", get(customer_bookings))
        .route("/api/bookings/shop/{shop_id}", get(shop_bookings))
        .route("/api/bookings/{id}/status", put(update_status))
        .route("/api/payments/create", post(create_payment))
        .route("/api/payments/return", get(payment_return))
        .route("/api/reviews/{booking_id}", post(create_review))
        .with_state(backend)
}

async fn login(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    mock.record("POST", "auth/login", &headers, HashMap::new(), Some(body.clone()));
    if body["password"] != "secret" {
        return fail(StatusCode::UNAUTHORIZED, "Email hoặc mật khẩu không đúng");
    }
    ok(json!({
        "token": "token-123",
        "user": {
            "_id": "u-1",
            "name": "Nguyễn Văn A",
            "email": body["email"],
            "role": "customer"
        }
    }))
}

/// Always rejects the token
async fn me(State(mock): State<MockBackend>, headers: HeaderMap) -> Reply {
    mock.record("GET", "auth/me", &headers, HashMap::new(), None);
    fail(StatusCode::UNAUTHORIZED, "Token expired")
}

async fn get_service(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    mock.record("GET", format!("services/{id}"), &headers, HashMap::new(), None);
    ok(service_json(&id))
}

async fn create_booking(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    mock.record("POST", "bookings", &headers, HashMap::new(), Some(body.clone()));
    let mut booking = body;
    booking["_id"] = json!(CREATED_BOOKING_ID);
    booking["status"] = json!("pending");
    booking["paymentStatus"] = json!("pending");
    booking["totalAmount"] = json!(300000);
    (StatusCode::CREATED, Json(json!({ "success": true, "data": booking })))
}

fn list_reply(query: &HashMap<String, String>, scope: impl Fn(&Value) -> bool) -> Reply {
    let field_matches = |field: &str, key: &str, booking: &Value| {
        query.get(key).is_none_or(|wanted| booking[field] == wanted.as_str())
    };
    let matched: Vec<Value> = seeded_bookings()
        .into_iter()
        .filter(|b| scope(b))
        .filter(|b| {
            field_matches("status", "status", b)
                && field_matches("paymentStatus", "paymentStatus", b)
        })
        .filter(|b| {
            query.get("search").is_none_or(|text| {
                b["serviceName"]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&text.to_lowercase())
            })
        })
        .collect();

    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let total = matched.len();
    let data: Vec<Value> = matched
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": data,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": total,
                "pages": total.div_ceil(limit)
            }
        })),
    )
}

async fn customer_bookings(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    mock.record("GET", "bookings/customer", &headers, query.clone(), None);
    let Some(email) = query.get("email").cloned() else {
        return fail(StatusCode::BAD_REQUEST, "Thiếu email");
    };
    list_reply(&query, |b| b["customerEmail"] == email.as_str())
}

async fn shop_bookings(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Path(shop_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    mock.record("GET", format!("bookings/shop/{shop_id}"), &headers, query.clone(), None);
    list_reply(&query, |b| b["shopId"] == shop_id.as_str())
}

async fn update_status(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    mock.record("PUT", format!("bookings/{id}/status"), &headers, HashMap::new(), Some(body.clone()));
    let status = body["status"].as_str().unwrap_or("pending");
    ok(booking_json(&id, status, "pending", "Massage body"))
}

async fn create_payment(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    mock.record("POST", "payments/create", &headers, HashMap::new(), Some(body.clone()));
    let delay = mock.state.lock().unwrap().payment_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if mock.state.lock().unwrap().payment_fails {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, PAYMENT_ERROR);
    }
    let booking_id = body["bookingId"].as_str().unwrap_or_default();
    ok(json!({
        "paymentUrl": format!("https://pay.example/checkout/{booking_id}"),
        "orderCode": 1001
    }))
}

async fn payment_return(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    mock.record("GET", "payments/return", &headers, query, None);
    if mock.state.lock().unwrap().confirmation_fails {
        return fail(StatusCode::BAD_GATEWAY, "Không xác minh được giao dịch");
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": CONFIRM_MESSAGE })),
    )
}

async fn create_review(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Path(booking_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    mock.record("POST", format!("reviews/{booking_id}"), &headers, HashMap::new(), Some(body.clone()));
    ok(json!({
        "_id": "rv-1",
        "bookingId": booking_id,
        "rating": body["rating"],
        "comment": body["comment"]
    }))
}
