//! Trade domain: journal entries, their legs, media and tag chips.

pub mod client;
pub mod wire;

use crate::calc;
use crate::shared::TradeDirection;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use wire::{
    CloseTradeRequest, CreateTradeLegRequest, CreateTradeRequest, TradeFilters, TradeListQuery,
    TradeListResponse, UpdateTradeRequest,
};

// ─── Enums ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
    Cancelled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stocks,
    Options,
    Futures,
    Forex,
    Crypto,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Options => "options",
            Self::Futures => "futures",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvictionLevel {
    Low,
    Medium,
    High,
}

impl ConvictionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ConvictionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Trade ───────────────────────────────────────────────────────────────────

/// A journaled trade.
///
/// Prices and amounts are exact decimals. Derived figures (`pnl`,
/// `r_multiple`, `hold_time_minutes`, ...) are computed by the server when the
/// trade is closed and are absent while it is open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub direction: TradeDirection,
    pub asset_class: AssetClass,
    pub status: TradeStatus,

    pub entry_date: DateTime<Utc>,
    pub entry_price: Decimal,
    pub quantity: Decimal,
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub take_profit: Option<Decimal>,

    #[serde(default)]
    pub exit_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    #[serde(default)]
    pub actual_exit_price: Option<Decimal>,

    #[serde(default)]
    pub pnl: Option<Decimal>,
    #[serde(default)]
    pub pnl_percent: Option<Decimal>,
    #[serde(default)]
    pub commissions: Option<Decimal>,
    #[serde(default)]
    pub net_pnl: Option<Decimal>,
    #[serde(default)]
    pub r_multiple: Option<Decimal>,
    #[serde(default)]
    pub mae: Option<Decimal>,
    #[serde(default)]
    pub mfe: Option<Decimal>,
    #[serde(default)]
    pub hold_time_minutes: Option<i32>,

    #[serde(default)]
    pub risk_amount: Option<Decimal>,
    #[serde(default)]
    pub risk_percent: Option<Decimal>,
    #[serde(default)]
    pub position_size_pct: Option<Decimal>,
    #[serde(default)]
    pub conviction: Option<ConvictionLevel>,
    #[serde(default)]
    pub setup_name: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,

    #[serde(default)]
    pub thesis: Option<String>,
    #[serde(default)]
    pub mistakes: Option<String>,
    #[serde(default)]
    pub lessons: Option<String>,
    #[serde(default)]
    pub emotional_state: Option<String>,
    #[serde(default)]
    pub market_condition: Option<String>,

    #[serde(default)]
    pub execution_grade: Option<String>,
    #[serde(default)]
    pub patience_grade: Option<String>,
    #[serde(default)]
    pub discipline_grade: Option<String>,
    #[serde(default)]
    pub overall_grade: Option<String>,

    #[serde(default)]
    pub is_paper_trade: bool,
    #[serde(default)]
    pub is_revenge_trade: bool,
    #[serde(default)]
    pub broke_rules: bool,
    #[serde(default)]
    pub followed_plan: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// The price the position actually left at: the recorded fill when
    /// present, else the planned exit.
    pub fn effective_exit_price(&self) -> Option<Decimal> {
        self.actual_exit_price.or(self.exit_price)
    }

    /// R-multiple computed locally from entry, exit and stop.
    ///
    /// `None` while the trade has no exit or no stop loss.
    pub fn computed_r_multiple(&self) -> Option<f64> {
        let exit = self.effective_exit_price()?.to_f64()?;
        let stop = self.stop_loss?.to_f64()?;
        let entry = self.entry_price.to_f64()?;
        Some(calc::r_multiple(entry, exit, stop, self.direction))
    }
}

// ─── Details ─────────────────────────────────────────────────────────────────

/// A scale-in or scale-out fill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeLeg {
    pub id: String,
    pub trade_id: String,
    pub leg_number: i32,
    pub action: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A chart screenshot or other attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeMedia {
    pub id: String,
    pub trade_id: String,
    pub media_type: String,
    pub s3_key: String,
    pub s3_url: String,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub annotations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Tag as attached to a trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeTag {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// A trade with its tags, legs and media. The trade's own fields sit at the
/// top level of the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeWithDetails {
    #[serde(flatten)]
    pub trade: Trade,
    #[serde(default)]
    pub tags: Vec<TradeTag>,
    #[serde(default)]
    pub legs: Vec<TradeLeg>,
    #[serde(default)]
    pub media: Vec<TradeMedia>,
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Aggregate performance across the user's closed trades.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeStats {
    pub total_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    pub win_rate: Decimal,
    pub total_pnl: Decimal,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
    #[serde(default)]
    pub profit_factor: Option<Decimal>,
    #[serde(default)]
    pub avg_r_multiple: Option<Decimal>,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
    #[serde(default)]
    pub avg_hold_time_minutes: Option<i32>,
}

impl TradeStats {
    /// Expected result per trade from the average win, average loss and
    /// win rate.
    pub fn expectancy(&self) -> Option<f64> {
        Some(calc::expectancy(
            self.avg_win.to_f64()?,
            self.avg_loss.to_f64()?,
            self.win_rate.to_f64()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn trade_json() -> serde_json::Value {
        serde_json::json!({
            "id": "6f1c2b9e-1d5a-4c8e-9e0b-2b3f4c5d6e7f",
            "user_id": "0b8f1c2d-3e4f-4a5b-8c6d-7e8f9a0b1c2d",
            "symbol": "AAPL",
            "direction": "long",
            "asset_class": "stocks",
            "status": "closed",
            "entry_date": "2024-01-05T14:30:00Z",
            "entry_price": "100.00",
            "quantity": 10,
            "stop_loss": "95",
            "exit_date": "2024-01-05T16:30:00Z",
            "exit_price": "110",
            "pnl": "100.00",
            "hold_time_minutes": 120,
            "conviction": "high",
            "is_paper_trade": false,
            "is_revenge_trade": false,
            "broke_rules": false,
            "followed_plan": true,
            "created_at": "2024-01-05T14:30:00Z",
            "updated_at": "2024-01-05T16:30:00Z"
        })
    }

    #[test]
    fn test_trade_deserialize() {
        let trade: Trade = serde_json::from_value(trade_json()).unwrap();
        assert_eq!(trade.symbol, "AAPL");
        assert_eq!(trade.direction, TradeDirection::Long);
        assert_eq!(trade.status, TradeStatus::Closed);
        assert_eq!(trade.entry_price, Decimal::from_str("100.00").unwrap());
        assert_eq!(trade.quantity, Decimal::from(10));
        assert_eq!(trade.conviction, Some(ConvictionLevel::High));
        assert!(trade.take_profit.is_none());
        assert!(trade.followed_plan);
        assert!(!trade.is_open());
    }

    #[test]
    fn test_computed_r_multiple() {
        let mut trade: Trade = serde_json::from_value(trade_json()).unwrap();
        assert_eq!(trade.computed_r_multiple(), Some(2.0));

        trade.actual_exit_price = Some(Decimal::from(95));
        assert_eq!(trade.computed_r_multiple(), Some(-1.0));

        trade.stop_loss = None;
        assert_eq!(trade.computed_r_multiple(), None);
    }

    #[test]
    fn test_open_trade_has_no_r_multiple() {
        let mut json = trade_json();
        json["status"] = "open".into();
        json["exit_price"] = serde_json::Value::Null;
        let trade: Trade = serde_json::from_value(json).unwrap();
        assert!(trade.is_open());
        assert_eq!(trade.computed_r_multiple(), None);
    }

    #[test]
    fn test_details_flattened() {
        let mut json = trade_json();
        json["tags"] = serde_json::json!([{ "id": "t1", "name": "Breakout", "color": "#22c55e" }]);
        json["legs"] = serde_json::json!([]);
        let details: TradeWithDetails = serde_json::from_value(json).unwrap();
        assert_eq!(details.trade.symbol, "AAPL");
        assert_eq!(details.tags.len(), 1);
        assert_eq!(details.tags[0].category, None);
        assert!(details.media.is_empty());
    }

    #[test]
    fn test_stats_expectancy() {
        let stats: TradeStats = serde_json::from_value(serde_json::json!({
            "total_trades": 10,
            "winning_trades": 6,
            "losing_trades": 4,
            "win_rate": "60",
            "total_pnl": "800",
            "avg_win": "200",
            "avg_loss": "-100",
            "profit_factor": "3",
            "largest_win": "400",
            "largest_loss": "-150"
        }))
        .unwrap();
        assert_eq!(stats.profit_factor, Some(Decimal::from(3)));
        assert!(stats.avg_r_multiple.is_none());
        let e = stats.expectancy().unwrap();
        assert!((e - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(TradeStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(AssetClass::Forex.as_str(), "forex");
        let c: ConvictionLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(c, ConvictionLevel::Medium);
    }
}
