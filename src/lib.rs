//! # Trading Journal SDK
//!
//! A Rust client for the trading journal REST API, usable from native and
//! WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: shared enums, formatting and validation, trading arithmetic,
//!    domain models (always available, no I/O)
//! 2. **Auth**: token storage, session state and its change events
//! 3. **HTTP API**: `ApiHttp` with bearer auth, timeouts, typed errors and a
//!    single-flight token refresh on `401`
//! 4. **High-Level Client**: `TradeJournalClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tradejournal_sdk::prelude::*;
//!
//! let client = TradeJournalClient::builder()
//!     .from_env()
//!     .build()?;
//!
//! client
//!     .auth()
//!     .login(&LoginRequest { email: "me@example.com".into(), password: "s3cret-pass".into() })
//!     .await?;
//!
//! let stats = client.trades().stats().await?;
//! println!("win rate {}", format_percent(stats.win_rate.try_into()?, 1));
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared enums, formatting and validation helpers.
pub mod shared;

/// Win rate, profit factor, expectancy, R-multiple and position sizing.
pub mod calc;

/// Domain modules (vertical slices): types, wire types, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: tokens, session store, login/logout.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with timeout and refresh-on-401.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `TradeJournalClient`, the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types and helpers
    pub use crate::shared::fmt::{
        format_currency, format_date, format_date_time, format_duration, format_number,
        format_percent, format_r_multiple,
    };
    pub use crate::shared::validation::{
        validate_email, validate_number, validate_password, validate_required,
    };
    pub use crate::shared::{Pagination, SortOrder, TradeDirection, ValidationError};

    // Calculations
    pub use crate::calc::{expectancy, position_size, profit_factor, r_multiple, win_rate};

    // Domain types: trade
    pub use crate::domain::trade::{
        AssetClass, CloseTradeRequest, ConvictionLevel, CreateTradeLegRequest,
        CreateTradeRequest, Trade, TradeFilters, TradeLeg, TradeListQuery, TradeListResponse,
        TradeMedia, TradeStats, TradeStatus, TradeTag, TradeWithDetails, UpdateTradeRequest,
    };

    // Domain types: tag
    pub use crate::domain::tag::{CreateTagRequest, Tag, TagWithCount, UpdateTagRequest};

    // Errors
    pub use crate::error::{user_friendly_message, ApiError, ErrorKind, SdkError};

    // Network
    pub use crate::network::{API_PREFIX, DEFAULT_API_URL, DEFAULT_TIMEOUT};

    // Auth + session
    pub use crate::auth::{
        LoginRequest, MemoryTokenStore, OAuthProvider, RegisterRequest, SessionEvent,
        SessionStore, SubscriptionId, TokenStore, User, UserUpdate,
    };

    // HTTP client + sub-clients
    pub use crate::client::{
        AuthClient, TagsClient, TradeJournalClient, TradeJournalClientBuilder, TradesClient,
    };
    pub use crate::http::{ApiHttp, RequestOptions, Transport};
}
