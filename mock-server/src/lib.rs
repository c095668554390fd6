use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const ECHO_RECEIVED: &str = "Echo Test Received";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub reference: String,
    pub deal_id: u64,
    pub created_at: i64,
    pub customer_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderStatus {
    pub reference: String,
    pub timestamp: i64,
    pub status: i64,
    pub tracking_number: String,
    pub shipping_vendor: String,
    pub shipping_method: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: u32,
}

#[derive(Deserialize)]
pub struct OrdersFilter {
    pub page: u32,
    pub per_page: u32,
    pub from_date: i64,
    pub start_date: i64,
    pub end_date: i64,
    pub deal_id: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrdersPage {
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
    pub orders: Vec<Order>,
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub orders: Vec<OrderStatus>,
}

#[derive(Deserialize)]
pub struct EchoRequest {
    pub data: Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EchoResponse {
    pub message: String,
    pub data: Value,
}

#[derive(Default)]
pub struct Store {
    pub orders: Vec<Order>,
    pub statuses: HashMap<String, OrderStatus>,
}

pub type Db = Arc<RwLock<Store>>;

/// Fixture orders served by `app()`, all for deal 9856321.
pub fn seed_orders() -> Vec<Order> {
    (1..=3)
        .map(|i| Order {
            reference: format!("8UPGT3-KKQRN{i}"),
            deal_id: 9856321,
            created_at: 1_700_000_000 + i * 3_600,
            customer_name: format!("Customer {i}"),
        })
        .collect()
}

pub fn app() -> Router {
    app_with_db(Arc::new(RwLock::new(Store {
        orders: seed_orders(),
        statuses: HashMap::new(),
    })))
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/v1/orders", get(list_orders))
        .route("/v1/orders/status", put(update_status))
        .route("/v1/test", post(echo_test))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_orders(
    State(db): State<Db>,
    Query(query): Query<PageQuery>,
    Json(filter): Json<OrdersFilter>,
) -> Result<Json<OrdersPage>, StatusCode> {
    if query.page != filter.page || filter.page == 0 || filter.per_page == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let lower = filter.from_date.max(filter.start_date);
    let store = db.read().await;
    let matching: Vec<&Order> = store
        .orders
        .iter()
        .filter(|o| o.deal_id == filter.deal_id)
        .filter(|o| o.created_at >= lower && o.created_at <= filter.end_date)
        .collect();
    // Pages past the end come back empty.
    let skip = usize::try_from(u64::from(filter.page - 1) * u64::from(filter.per_page)).unwrap_or(usize::MAX);
    let orders = matching
        .iter()
        .skip(skip)
        .take(filter.per_page as usize)
        .map(|o| (*o).clone())
        .collect();
    info!(deal_id = filter.deal_id, page = filter.page, total = matching.len(), "orders listed");
    Ok(Json(OrdersPage {
        page: filter.page,
        per_page: filter.per_page,
        total: matching.len(),
        orders,
    }))
}

async fn update_status(State(db): State<Db>, Json(input): Json<StatusUpdate>) -> StatusCode {
    let mut store = db.write().await;
    for status in input.orders {
        info!(reference = %status.reference, status = status.status, "status updated");
        store.statuses.insert(status.reference.clone(), status);
    }
    StatusCode::OK
}

async fn echo_test(Json(input): Json<EchoRequest>) -> Json<EchoResponse> {
    Json(EchoResponse {
        message: ECHO_RECEIVED.to_string(),
        data: input.data,
    })
}
