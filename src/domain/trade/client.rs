//! Trades sub-client: journal CRUD, legs and aggregate stats.

use crate::client::TradeJournalClient;
use crate::domain::trade::wire::{
    CloseTradeRequest, CreateTradeLegRequest, CreateTradeRequest, TradeListQuery,
    TradeListResponse, UpdateTradeRequest,
};
use crate::domain::trade::{Trade, TradeLeg, TradeStats, TradeWithDetails};
use crate::error::SdkError;
use crate::http::RequestOptions;
use crate::shared::validation::validate_required;

pub struct Trades<'a> {
    pub(crate) client: &'a TradeJournalClient,
}

impl<'a> Trades<'a> {
    pub async fn create(&self, request: &CreateTradeRequest) -> Result<Trade, SdkError> {
        validate_required(Some(request.symbol.trim()), "Symbol")?;
        Ok(self
            .client
            .http
            .post("/trades", request, &RequestOptions::default())
            .await?)
    }

    pub async fn list(&self, query: &TradeListQuery) -> Result<TradeListResponse, SdkError> {
        let qs = query.to_query_string();
        let endpoint = if qs.is_empty() {
            "/trades".to_string()
        } else {
            format!("/trades?{}", qs)
        };
        Ok(self
            .client
            .http
            .get(&endpoint, &RequestOptions::default())
            .await?)
    }

    pub async fn get(&self, id: &str) -> Result<TradeWithDetails, SdkError> {
        Ok(self
            .client
            .http
            .get(&format!("/trades/{}", id), &RequestOptions::default())
            .await?)
    }

    pub async fn update(&self, id: &str, request: &UpdateTradeRequest) -> Result<Trade, SdkError> {
        Ok(self
            .client
            .http
            .put(&format!("/trades/{}", id), request, &RequestOptions::default())
            .await?)
    }

    /// Record the exit. The server computes P&L, R-multiple and hold time.
    pub async fn close(&self, id: &str, request: &CloseTradeRequest) -> Result<Trade, SdkError> {
        Ok(self
            .client
            .http
            .post(
                &format!("/trades/{}/close", id),
                request,
                &RequestOptions::default(),
            )
            .await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), SdkError> {
        self.client
            .http
            .delete(&format!("/trades/{}", id), &RequestOptions::default())
            .await?;
        Ok(())
    }

    pub async fn add_leg(
        &self,
        trade_id: &str,
        request: &CreateTradeLegRequest,
    ) -> Result<TradeLeg, SdkError> {
        Ok(self
            .client
            .http
            .post(
                &format!("/trades/{}/legs", trade_id),
                request,
                &RequestOptions::default(),
            )
            .await?)
    }

    pub async fn stats(&self) -> Result<TradeStats, SdkError> {
        Ok(self
            .client
            .http
            .get("/trades/stats", &RequestOptions::default())
            .await?)
    }
}
