//! Result formatting shared by the front ends.

/// Shown before the first prediction of a session.
pub const PROMPT_MESSAGE: &str = "Please use the predict button after entering values";

/// Format a price with thousands separators and two decimals.
///
/// ```
/// use appraise_core::format_price;
/// assert_eq!(format_price(181234.5, "$"), "$181,234.50");
/// assert_eq!(format_price(-999.999, "$"), "-$1,000.00");
/// ```
pub fn format_price(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{symbol}{value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.001 rounds to 0.00 and should not print a sign
    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{grouped}.{cents}")
}

/// The sentence shown after a prediction.
pub fn price_sentence(value: f64, symbol: &str) -> String {
    format!("Price prediction is {}", format_price(value, symbol))
}
