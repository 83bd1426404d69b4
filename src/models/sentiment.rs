//! Fear & Greed sentiment readings

use chrono::DateTime;

/// A single Fear & Greed index reading
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReading {
    /// Parsed index value, 0-100
    pub value: u8,
    /// The numeral exactly as the provider sent it
    pub raw_value: String,
    /// Classification such as "Fear" or "Extreme Greed"
    pub label: String,
    /// Unix seconds, as text
    pub timestamp: String,
}

impl SentimentReading {
    /// Build a reading from the provider's text fields.
    ///
    /// The leading integer is read and clamped to 0-100, so "75.5" is 75 and
    /// "300" is 100. Text with no leading integer counts as 0.
    pub fn from_raw(raw_value: &str, label: &str, timestamp: &str) -> Self {
        let value = match leading_integer(raw_value) {
            Some(v) => v.clamp(0, 100) as u8,
            None => {
                tracing::warn!("Unparseable sentiment value '{}'", raw_value);
                0
            }
        };

        Self {
            value,
            raw_value: raw_value.to_string(),
            label: label.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    pub fn is_fearful(&self) -> bool {
        self.value < 50
    }

    /// `YYYY-MM-DD` for the reading's timestamp, or the raw text if it isn't unix seconds
    pub fn date_label(&self) -> String {
        self.timestamp
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }
}

/// Optional sign followed by digits at the start of `text`, saturating on overflow.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numeral() {
        let reading = SentimentReading::from_raw("25", "Fear", "1720000000");
        assert_eq!(reading.value, 25);
        assert_eq!(reading.raw_value, "25");
        assert!(reading.is_fearful());
    }

    #[test]
    fn test_garbage_numeral_counts_as_zero() {
        let reading = SentimentReading::from_raw("n/a", "Unknown", "0");
        assert_eq!(reading.value, 0);
        assert_eq!(reading.raw_value, "n/a");
    }

    #[test]
    fn test_date_label_from_unix_seconds() {
        let reading = SentimentReading::from_raw("60", "Greed", "1706745600");
        assert_eq!(reading.date_label(), "2024-02-01");
    }

    #[test]
    fn test_date_label_falls_back_to_raw() {
        let reading = SentimentReading::from_raw("60", "Greed", "yesterday");
        assert_eq!(reading.date_label(), "yesterday");
    }

    #[test]
    fn test_fifty_is_not_fearful() {
        assert!(!SentimentReading::from_raw("50", "Neutral", "0").is_fearful());
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        for (raw, expected) in [("250", 100), ("300", 100), ("99999999999999999999", 100), ("-5", 0)] {
            assert_eq!(SentimentReading::from_raw(raw, "", "0").value, expected, "{}", raw);
        }
        assert!(!SentimentReading::from_raw("300", "", "0").is_fearful());
    }

    #[test]
    fn test_reads_leading_integer() {
        let reading = SentimentReading::from_raw("75.5", "Greed", "0");
        assert_eq!(reading.value, 75);
        assert!(!reading.is_fearful());
        assert_eq!(SentimentReading::from_raw(" 42 ", "", "0").value, 42);
        assert_eq!(SentimentReading::from_raw("+7", "", "0").value, 7);
        assert_eq!(SentimentReading::from_raw("-", "", "0").value, 0);
    }
}
