//! Number formatting for counters, cards and share messages

/// Naira sign used as the currency prefix
pub const NAIRA: &str = "₦";

/// Format a number with fixed decimals and a thousands separator
///
/// The value is fixed to `decimals` places first, then `separator` is
/// inserted every three digits from the right of the integer part. The
/// fractional part is left untouched. Exact halves round away from zero.
pub fn format_number(value: f64, decimals: usize, separator: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let value = round_half_away(value, decimals);
    // Normalize negative zero so it never renders as "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 * separator.len());
    out.push_str(sign);
    out.push_str(&group_digits(integer, separator));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Round to `decimals` places with ties going away from zero
///
/// `{:.*}` alone rounds ties to even, so `2.25` would become `2.2`.
fn round_half_away(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(i32::MAX as usize) as i32);
    let scaled = value.abs() * factor;
    if !scaled.is_finite() {
        return value;
    }
    (scaled.round() / factor).copysign(value)
}

/// Insert `separator` between every group of three digits, counted from the right
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Locale-style grouping for plain amounts: integers get no decimals,
/// fractional values keep up to three significant decimals
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        return format_number(value, 0, ",");
    }
    let formatted = format_number(value, 3, ",");
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Currency amount with the naira prefix, e.g. `₦2,450,000`
pub fn format_naira(value: f64) -> String {
    format!("{}{}", NAIRA, format_amount(value))
}

/// Compact millions, e.g. `2.5M`
pub fn format_millions(value: f64) -> String {
    format!("{}M", format_number(value / 1_000_000.0, 1, ""))
}

/// Compact thousands, e.g. `850K`
pub fn format_thousands(value: f64) -> String {
    format!("{}K", format_number(value / 1_000.0, 0, ""))
}

/// Display options for an animated counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFormat {
    pub prefix: String,
    pub suffix: String,
    pub decimals: usize,
    pub separator: String,
}

impl Default for CounterFormat {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            decimals: 0,
            separator: ",".to_string(),
        }
    }
}

impl CounterFormat {
    /// Naira amount with thousands separators
    pub fn naira() -> Self {
        Self {
            prefix: NAIRA.to_string(),
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn apply(&self, value: f64) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            format_number(value, self.decimals, &self.separator),
            self.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1234567.0, 0, ","), "1,234,567");
        assert_eq!(format_number(1234.5, 1, ","), "1,234.5");
        assert_eq!(format_number(999.0, 0, ","), "999");
        assert_eq!(format_number(1000.0, 0, ","), "1,000");
        assert_eq!(format_number(0.0, 0, ","), "0");
        // Ties round away from zero
        assert_eq!(format_number(0.5, 0, ","), "1");
        assert_eq!(format_number(2692.5, 0, ","), "2,693");
        assert_eq!(format_number(12.25, 1, ","), "12.3");
        assert_eq!(format_number(-2.5, 0, ","), "-3");
        assert_eq!(format_number(-0.4, 0, ","), "0");
    }

    #[test]
    fn test_format_number_fraction_untouched() {
        assert_eq!(format_number(1234.5678, 4, ","), "1,234.5678");
        assert_eq!(format_number(12.0, 2, ","), "12.00");
    }

    #[test]
    fn test_format_number_custom_and_empty_separator() {
        assert_eq!(format_number(2450000.0, 0, " "), "2 450 000");
        assert_eq!(format_number(2450000.0, 0, ""), "2450000");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1234567.0, 0, ","), "-1,234,567");
        assert_eq!(format_number(-123.0, 0, ","), "-123");
        assert_eq!(format_number(-0.0, 0, ","), "0");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2692.0), "2,692");
        assert_eq!(format_amount(1234.25), "1,234.25");
        assert_eq!(format_naira(2450000.0), "₦2,450,000");
    }

    #[test]
    fn test_compact_forms() {
        assert_eq!(format_millions(2450000.0), "2.5M");
        assert_eq!(format_thousands(850000.0), "850K");
        assert_eq!(format_millions(2_250_000.0), "2.3M");
        assert_eq!(format_thousands(850_500.0), "851K");
    }

    #[test]
    fn test_counter_format() {
        let format = CounterFormat::naira();
        assert_eq!(format.apply(18500.0), "₦18,500");

        let format = CounterFormat::default().with_suffix(" km").with_decimals(1);
        assert_eq!(format.apply(2340.0), "2,340.0 km");
    }
}
