//! The Orders API method: a page of orders for a deal.
//!
//! Filters travel in the JSON body with dates as Unix epoch seconds; only
//! `page` is repeated in the query string. `from_date` and `start_date`
//! default to 100 days before now, each computed on its own, while
//! `end_date` has no default and must be supplied.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::method::{check_success, ApiMethod, Endpoint, Request};

/// How far back `from_date` and `start_date` reach when not supplied.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orders;

/// Arguments for `Orders`. `page`, `per_page`, `deal_id` and `end_date`
/// are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrdersArgs {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub from_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub deal_id: Option<u64>,
}

impl OrdersArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn from_date(mut self, from_date: DateTime<Utc>) -> Self {
        self.from_date = Some(from_date);
        self
    }

    pub fn start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn deal_id(mut self, deal_id: u64) -> Self {
        self.deal_id = Some(deal_id);
        self
    }

    /// Shorthand for `Request::<Orders>::build(self)`.
    pub fn build(self) -> Result<Request<Orders>, ApiError> {
        Request::build(self)
    }
}

fn lookback() -> DateTime<Utc> {
    Utc::now() - Duration::days(DEFAULT_LOOKBACK_DAYS)
}

impl ApiMethod for Orders {
    const ENDPOINT: Endpoint = Endpoint::new("/v1/orders", HttpMethod::Get);

    type Args = OrdersArgs;
    type Output = Value;

    fn get_data(args: &OrdersArgs) -> Result<Map<String, Value>, ApiError> {
        let page = args.page.ok_or(ApiError::MissingArgument("page"))?;
        let per_page = args.per_page.ok_or(ApiError::MissingArgument("per_page"))?;
        let deal_id = args.deal_id.ok_or(ApiError::MissingArgument("deal_id"))?;

        let from_date = args.from_date.unwrap_or_else(lookback);
        let start_date = args.start_date.unwrap_or_else(lookback);
        let end_date = args.end_date.ok_or(ApiError::MissingDate("end_date"))?;

        let mut data = Map::new();
        data.insert("page".to_string(), page.into());
        data.insert("per_page".to_string(), per_page.into());
        data.insert("from_date".to_string(), from_date.timestamp().into());
        data.insert("start_date".to_string(), start_date.timestamp().into());
        data.insert("end_date".to_string(), end_date.timestamp().into());
        data.insert("deal_id".to_string(), deal_id.into());
        Ok(data)
    }

    fn get_params(args: &OrdersArgs) -> Vec<(String, String)> {
        args.page
            .map(|page| vec![("page".to_string(), page.to_string())])
            .unwrap_or_default()
    }

    fn process_response(response: HttpResponse) -> Result<Value, ApiError> {
        check_success(&response)?;
        response.json()
    }
}
