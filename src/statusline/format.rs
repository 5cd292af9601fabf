// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a token count compactly (e.g. 15234 -> "15.2k", 1500000 -> "1.5M").
pub fn format_tokens(tokens: u64) -> String {
    if tokens < 1000 {
        return tokens.to_string();
    }
    let k = tokens as f64 / 1000.0;
    if round_tenth(k) < 1000.0 {
        return format!("{}k", trim_tenth(k));
    }
    let m = tokens as f64 / 1_000_000.0;
    format!("{}M", trim_tenth(m))
}

/// Format a USD amount without the currency symbol. Two decimals, or four
/// for sub-cent amounts so tiny sessions do not read as free.
pub fn format_cost(usd: f64) -> String {
    if usd != 0.0 && usd.abs() < 0.01 {
        format!("{:.4}", usd)
    } else {
        format!("{:.2}", usd)
    }
}

/// Format milliseconds as "1h2m", "3m5s" or "45s". Zero-valued trailing
/// units are omitted ("2h", "3m").
pub fn format_duration_ms(ms: u64) -> String {
    format_seconds(ms / 1000)
}

/// Format a countdown. Zero or negative reads as "now".
pub fn format_countdown(seconds: i64) -> String {
    if seconds <= 0 {
        return "now".to_string();
    }
    format_seconds(seconds.unsigned_abs())
}

fn format_seconds(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;

    if h > 0 {
        return if m > 0 {
            format!("{}h{}m", h, m)
        } else {
            format!("{}h", h)
        };
    }
    if m > 0 {
        return if s > 0 {
            format!("{}m{}s", m, s)
        } else {
            format!("{}m", m)
        };
    }
    format!("{}s", s)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One decimal place with a trailing ".0" dropped.
fn trim_tenth(value: f64) -> String {
    let text = format!("{:.1}", round_tenth(value));
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1000), "1k");
        assert_eq!(format_tokens(1500), "1.5k");
        assert_eq!(format_tokens(4521), "4.5k");
        assert_eq!(format_tokens(15234), "15.2k");
        assert_eq!(format_tokens(200000), "200k");
        assert_eq!(format_tokens(999_960), "1M");
        assert_eq!(format_tokens(1_500_000), "1.5M");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(0.0), "0.00");
        assert_eq!(format_cost(0.0234), "0.02");
        assert_eq!(format_cost(0.142857), "0.14");
        assert_eq!(format_cost(1.5), "1.50");
        assert_eq!(format_cost(0.0042), "0.0042");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(0), "0s");
        assert_eq!(format_duration_ms(45_000), "45s");
        assert_eq!(format_duration_ms(60_000), "1m");
        assert_eq!(format_duration_ms(222_000), "3m42s");
        assert_eq!(format_duration_ms(3_600_000), "1h");
        assert_eq!(format_duration_ms(3_661_000), "1h1m");
        assert_eq!(format_duration_ms(999), "0s");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(-5), "now");
        assert_eq!(format_countdown(0), "now");
        assert_eq!(format_countdown(30), "30s");
        assert_eq!(format_countdown(8100), "2h15m");
        assert_eq!(format_countdown(7200), "2h");
    }
}
