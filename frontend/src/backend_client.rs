use std::fmt::Display;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::api::{
    BalanceResponse, BuySpinsRequest, BuySpinsResponse, ErrorResponse, InventoryResponse,
    SellItemRequest, SellItemResponse, SpinAck, SpinReport, StatsResponse, UseBoosterRequest,
    UseBoosterResponse,
};
use shared::constants::*;
use shared::{AccountBalance, BackendClient, WagerError};

use crate::config::api_url;

fn unavailable(err: impl Display) -> WagerError {
    WagerError::BackendUnavailable(err.to_string())
}

/// Why a call produced no usable body.
enum CallError {
    /// Nothing usable came back: network failure, bad status, bad JSON.
    Transport(String),
    /// The server answered `{success:false, error}`.
    Rejected(String),
}

impl CallError {
    fn transport(err: impl Display) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<CallError> for WagerError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Transport(reason) | CallError::Rejected(reason) => unavailable(reason),
        }
    }
}

/// Talks to the casino API over `fetch`. Every transport or decoding
/// failure comes back as `BackendUnavailable`.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpBackendClient {
    base: String,
}

impl Default for HttpBackendClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBackendClient {
    pub fn new() -> Self {
        Self { base: api_url("") }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn user_url(&self, path: &str, user_id: &str) -> String {
        let user_id: String = js_sys::encode_uri_component(user_id).into();
        format!("{}?user_id={}", self.url(path), user_id)
    }

    pub async fn fetch_stats(&self, user_id: &str) -> Result<StatsResponse, WagerError> {
        Ok(self.get_json(&self.user_url(STATS_ENDPOINT, user_id)).await?)
    }

    pub async fn buy_spins(&self, request: &BuySpinsRequest) -> Result<BuySpinsResponse, WagerError> {
        Ok(self.post_json(SPINS_BUY_ENDPOINT, request).await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CallError> {
        let response = Request::get(url).send().await.map_err(CallError::transport)?;
        read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, CallError> {
        let response = Request::post(&self.url(path))
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(CallError::transport)?
            .send()
            .await
            .map_err(CallError::transport)?;
        read_json(response).await
    }
}

/// Decodes a success body, or turns the `{success:false, error}` body of a
/// failed call into the error text.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CallError> {
    if response.ok() {
        return response.json::<T>().await.map_err(CallError::transport);
    }
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => Err(CallError::Rejected(body.error)),
        Err(_) => Err(CallError::Transport(format!("HTTP {}", status))),
    }
}

impl BackendClient for HttpBackendClient {
    async fn report_spin(&self, report: &SpinReport) -> Result<SpinAck, WagerError> {
        match self.post_json::<_, SpinAck>(SPIN_REPORT_ENDPOINT, report).await {
            Ok(ack) => Ok(ack),
            Err(CallError::Rejected(reason)) => Ok(SpinAck {
                success: false,
                balance: None,
                error: Some(reason),
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn fetch_balance(&self, user_id: &str) -> Result<AccountBalance, WagerError> {
        let body: BalanceResponse = self.get_json(&self.user_url(BALANCE_ENDPOINT, user_id)).await?;
        Ok(body.balance)
    }

    async fn fetch_inventory(&self, user_id: &str) -> Result<InventoryResponse, WagerError> {
        Ok(self.get_json(&self.user_url(INVENTORY_ENDPOINT, user_id)).await?)
    }

    async fn sell_item(&self, request: &SellItemRequest) -> Result<SellItemResponse, WagerError> {
        Ok(self.post_json(INVENTORY_SELL_ENDPOINT, request).await?)
    }

    async fn use_booster(&self, request: &UseBoosterRequest) -> Result<UseBoosterResponse, WagerError> {
        Ok(self.post_json(BOOSTER_USE_ENDPOINT, request).await?)
    }
}
