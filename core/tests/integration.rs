//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then sends every API method over
//! real HTTP through `UreqTransport`, with the transport's origin override
//! pointing the fixed API domain at the local server.

use chrono::{TimeZone, Utc};
use serde_json::json;
use wowcher_core::{
    ApiError, ApiMethod, EchoTest, HttpMethod, HttpRequest, OrderStatus, Orders, OrdersArgs, Status, Transport,
    TransportConfig, UreqTransport,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn transport(origin: &str) -> UreqTransport {
    UreqTransport::with_config(TransportConfig::default().with_origin(origin))
}

fn orders_args(page: u32, per_page: u32) -> OrdersArgs {
    OrdersArgs::new()
        .page(page)
        .per_page(per_page)
        .from_date(Utc.timestamp_opt(1_600_000_000, 0).unwrap())
        .start_date(Utc.timestamp_opt(1_600_000_000, 0).unwrap())
        .end_date(Utc.timestamp_opt(1_800_000_000, 0).unwrap())
        .deal_id(9856321)
}

#[test]
fn api_methods_against_mock_server() {
    let origin = start_server();
    let transport = transport(&origin);

    // Step 1: echo test unwraps the envelope.
    let message = json!({"one": "1", "two": "2"});
    let echoed = EchoTest::build(message.clone()).unwrap().call(&transport).unwrap();
    assert_eq!(echoed, message);

    // Step 2: first page of orders comes back unchanged.
    let page = orders_args(1, 2).build().unwrap().call(&transport).unwrap();
    let expected = serde_json::to_value(mock_server::OrdersPage {
        page: 1,
        per_page: 2,
        total: 3,
        orders: mock_server::seed_orders()[..2].to_vec(),
    })
    .unwrap();
    assert_eq!(page, expected);

    // Step 3: second page holds the remainder.
    let page = orders_args(2, 2).build().unwrap().call(&transport).unwrap();
    assert_eq!(page["orders"].as_array().unwrap().len(), 1);

    // Step 4: push a status update.
    let orders = vec![OrderStatus {
        reference: "8UPGT3-KKQRN1".to_string(),
        timestamp: 1234567890,
        status: 2,
        tracking_number: "JD1233230001012".to_string(),
        shipping_vendor: "ROYAL_MAIL".to_string(),
        shipping_method: "NEXT_DAY".to_string(),
    }];
    let response = Status::build(orders).unwrap().call(&transport).unwrap();
    assert_eq!(response.status, 200);
}

#[test]
fn rejected_orders_request_surfaces_http_error() {
    let origin = start_server();
    let transport = transport(&origin);

    // Query page and body page disagree, which the server rejects.
    let mut request = orders_args(1, 10).build().unwrap().to_http_request().unwrap();
    request.query = vec![("page".to_string(), "9".to_string())];
    let response = transport.execute(request).unwrap();
    assert_eq!(response.status, 400);

    let err = Orders::process_response(response);
    assert!(matches!(err, Err(ApiError::HttpError { status: 400, .. })));
}

#[test]
fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let transport = transport(&format!("http://{addr}"));

    let request = HttpRequest {
        method: HttpMethod::Post,
        url: EchoTest::url(),
        query: Vec::new(),
        headers: Vec::new(),
        body: None,
    };
    let err = transport.execute(request).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));

    let err = orders_args(1, 1).build().unwrap().call(&transport).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
