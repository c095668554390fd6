//! The Status API method: push shipment and tracking updates for orders.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::method::{ApiMethod, Endpoint, Request};
use crate::types::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status;

impl Status {
    /// Body key the status records are sent under.
    pub const ORDERS: &'static str = "orders";

    pub fn build(orders: Vec<OrderStatus>) -> Result<Request<Status>, ApiError> {
        Request::build(orders)
    }
}

impl ApiMethod for Status {
    const ENDPOINT: Endpoint = Endpoint::new("/v1/orders/status", HttpMethod::Put);

    type Args = Vec<OrderStatus>;
    /// Only the status code is meaningful, so the raw response is returned.
    type Output = HttpResponse;

    fn get_data(orders: &Vec<OrderStatus>) -> Result<Map<String, Value>, ApiError> {
        let orders = serde_json::to_value(orders).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut data = Map::new();
        data.insert(Self::ORDERS.to_string(), orders);
        Ok(data)
    }

    fn process_response(response: HttpResponse) -> Result<HttpResponse, ApiError> {
        Ok(response)
    }
}
