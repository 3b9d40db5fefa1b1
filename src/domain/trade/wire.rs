//! Request bodies, list query and list envelope for the trades endpoints.

use super::{AssetClass, ConvictionLevel, Trade, TradeStatus};
use crate::shared::{Pagination, SortOrder, TradeDirection};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Request bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateTradeRequest {
    pub symbol: String,
    pub direction: TradeDirection,
    pub asset_class: AssetClass,
    pub entry_date: DateTime<Utc>,
    pub entry_price: Decimal,
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_size_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conviction: Option<ConvictionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thesis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paper_trade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commissions: Option<Decimal>,
}

impl CreateTradeRequest {
    /// Minimal request; optional planning fields can be set afterwards.
    pub fn new(
        symbol: impl Into<String>,
        direction: TradeDirection,
        asset_class: AssetClass,
        entry_date: DateTime<Utc>,
        entry_price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            direction,
            asset_class,
            entry_date,
            entry_price,
            quantity,
            stop_loss: None,
            take_profit: None,
            risk_amount: None,
            risk_percent: None,
            position_size_pct: None,
            conviction: None,
            setup_name: None,
            timeframe: None,
            thesis: None,
            emotional_state: None,
            market_condition: None,
            is_paper_trade: None,
            commissions: None,
        }
    }
}

/// Partial update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTradeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<TradeDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<AssetClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_exit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_size_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conviction: Option<ConvictionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thesis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mistakes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patience_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paper_trade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_revenge_trade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broke_rules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commissions: Option<Decimal>,
}

/// Exit details plus the post-trade review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloseTradeRequest {
    pub exit_date: DateTime<Utc>,
    pub exit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_exit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mistakes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patience_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broke_rules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed_plan: Option<bool>,
}

impl CloseTradeRequest {
    pub fn new(exit_date: DateTime<Utc>, exit_price: Decimal) -> Self {
        Self {
            exit_date,
            exit_price,
            actual_exit_price: None,
            mistakes: None,
            lessons: None,
            execution_grade: None,
            patience_grade: None,
            discipline_grade: None,
            overall_grade: None,
            broke_rules: None,
            followed_plan: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateTradeLegRequest {
    pub action: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ─── List query ──────────────────────────────────────────────────────────────

/// Filters for the trade list. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFilters {
    pub status: Option<TradeStatus>,
    pub direction: Option<TradeDirection>,
    pub asset_class: Option<AssetClass>,
    pub symbol: Option<String>,
    pub setup_name: Option<String>,
    pub conviction: Option<ConvictionLevel>,
    pub is_paper_trade: Option<bool>,
    pub is_revenge_trade: Option<bool>,
    pub broke_rules: Option<bool>,
    pub followed_plan: Option<bool>,
    pub tag_ids: Vec<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub min_pnl: Option<Decimal>,
    pub max_pnl: Option<Decimal>,
    pub min_r_multiple: Option<Decimal>,
    pub max_r_multiple: Option<Decimal>,
}

impl TradeFilters {
    fn push_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        fn push<T: ToString>(
            pairs: &mut Vec<(&'static str, String)>,
            key: &'static str,
            value: Option<T>,
        ) {
            if let Some(v) = value {
                pairs.push((key, v.to_string()));
            }
        }

        push(pairs, "status", self.status);
        push(pairs, "direction", self.direction);
        push(pairs, "asset_class", self.asset_class);
        push(pairs, "symbol", self.symbol.as_deref());
        push(pairs, "setup_name", self.setup_name.as_deref());
        push(pairs, "conviction", self.conviction);
        push(pairs, "is_paper_trade", self.is_paper_trade);
        push(pairs, "is_revenge_trade", self.is_revenge_trade);
        push(pairs, "broke_rules", self.broke_rules);
        push(pairs, "followed_plan", self.followed_plan);
        for id in &self.tag_ids {
            pairs.push(("tag_ids", id.clone()));
        }
        push(pairs, "from_date", self.from_date.map(format_timestamp));
        push(pairs, "to_date", self.to_date.map(format_timestamp));
        push(pairs, "min_pnl", self.min_pnl);
        push(pairs, "max_pnl", self.max_pnl);
        push(pairs, "min_r_multiple", self.min_r_multiple);
        push(pairs, "max_r_multiple", self.max_r_multiple);
    }
}

/// Paging, sorting and filtering for `GET /trades`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filters: TradeFilters,
}

impl TradeListQuery {
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

    pub fn sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }

    pub fn filters(mut self, filters: TradeFilters) -> Self {
        self.filters = filters;
        self
    }

    /// URL-encoded query string without the leading `?`. Empty when nothing
    /// is set. Paging and sorting come first, then filters; `tag_ids` repeats
    /// once per id.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page.filter(|p| *p > 0) {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sort_by", sort_by.to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order", order.to_string()));
        }
        self.filters.push_pairs(&mut pairs);

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// ─── List envelope ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeListResponse {
    pub trades: Vec<Trade>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
