//! Per-trade risk arithmetic.

use crate::shared::TradeDirection;

/// Result of a trade in units of initial risk (`R`).
///
/// Risk is the distance from entry to stop on the losing side. A stop on the
/// wrong side of entry, or at entry, means there is no defined risk and the
/// result is `0`.
pub fn r_multiple(
    entry_price: f64,
    exit_price: f64,
    stop_loss: f64,
    direction: TradeDirection,
) -> f64 {
    let (risk, pnl) = match direction {
        TradeDirection::Long => (entry_price - stop_loss, exit_price - entry_price),
        TradeDirection::Short => (stop_loss - entry_price, entry_price - exit_price),
    };
    if risk <= 0.0 {
        return 0.0;
    }
    pnl / risk
}

/// Units to buy so that hitting the stop loses `risk_percentage` percent of
/// the account. Zero when entry equals stop.
pub fn position_size(
    account_size: f64,
    risk_percentage: f64,
    entry_price: f64,
    stop_loss: f64,
) -> f64 {
    let risk_amount = account_size * (risk_percentage / 100.0);
    let price_risk = (entry_price - stop_loss).abs();
    if price_risk == 0.0 {
        return 0.0;
    }
    risk_amount / price_risk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r_multiple_long() {
        assert_eq!(r_multiple(100.0, 110.0, 95.0, TradeDirection::Long), 2.0);
        assert_eq!(r_multiple(100.0, 95.0, 95.0, TradeDirection::Long), -1.0);
    }

    #[test]
    fn test_r_multiple_short() {
        assert_eq!(r_multiple(100.0, 90.0, 105.0, TradeDirection::Short), 2.0);
        assert_eq!(r_multiple(100.0, 110.0, 105.0, TradeDirection::Short), -2.0);
    }

    #[test]
    fn test_r_multiple_without_risk() {
        assert_eq!(r_multiple(100.0, 110.0, 100.0, TradeDirection::Long), 0.0);
        // Stop above entry on a long.
        assert_eq!(r_multiple(100.0, 110.0, 105.0, TradeDirection::Long), 0.0);
        // Stop below entry on a short.
        assert_eq!(r_multiple(100.0, 90.0, 95.0, TradeDirection::Short), 0.0);
    }

    #[test]
    fn test_position_size() {
        assert_eq!(position_size(10_000.0, 1.0, 50.0, 48.0), 50.0);
        // Short side: stop above entry.
        assert_eq!(position_size(10_000.0, 2.0, 50.0, 52.0), 100.0);
        assert_eq!(position_size(10_000.0, 1.0, 50.0, 50.0), 0.0);
    }
}
