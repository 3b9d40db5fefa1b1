//! Aggregate performance metrics over a set of closed trades.

/// Percentage of winning trades, `0..=100`. Zero when there are no trades.
pub fn win_rate(wins: u32, total_trades: u32) -> f64 {
    if total_trades == 0 {
        return 0.0;
    }
    f64::from(wins) / f64::from(total_trades) * 100.0
}

/// Gross profit divided by the magnitude of gross loss.
///
/// With no losses the ratio is unbounded: `f64::INFINITY` when there was any
/// profit, `0` otherwise.
pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> f64 {
    if gross_loss == 0.0 {
        return if gross_profit > 0.0 { f64::INFINITY } else { 0.0 };
    }
    gross_profit / gross_loss.abs()
}

/// Expected result per trade. `win_rate_pct` is a percentage, as returned by
/// [`win_rate`]. The sign of `avg_loss` is ignored.
pub fn expectancy(avg_win: f64, avg_loss: f64, win_rate_pct: f64) -> f64 {
    let p = win_rate_pct / 100.0;
    avg_win * p - avg_loss.abs() * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate(0, 0), 0.0);
        assert_eq!(win_rate(5, 10), 50.0);
        assert_eq!(win_rate(10, 10), 100.0);
        assert!(approx(win_rate(1, 3), 33.333_333_333_333_336));
    }

    #[test]
    fn test_profit_factor() {
        assert_eq!(profit_factor(1000.0, 0.0), f64::INFINITY);
        assert_eq!(profit_factor(0.0, 0.0), 0.0);
        assert_eq!(profit_factor(1500.0, -500.0), 3.0);
        assert_eq!(profit_factor(1500.0, 500.0), 3.0);
        assert_eq!(profit_factor(0.0, -250.0), 0.0);
    }

    #[test]
    fn test_expectancy() {
        // 60% winners averaging 200, 40% losers averaging 100.
        assert!(approx(expectancy(200.0, -100.0, 60.0), 80.0));
        assert!(approx(expectancy(200.0, 100.0, 60.0), 80.0));
        assert!(approx(expectancy(100.0, 100.0, 50.0), 0.0));
        assert!(approx(expectancy(100.0, 50.0, 0.0), -50.0));
    }
}
