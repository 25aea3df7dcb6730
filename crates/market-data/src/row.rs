use serde::{Deserialize, Serialize};

/// Column order of the replay dataset file. Rows are zipped onto this list
/// positionally; values are kept as strings so the wire payload matches the
/// file byte-for-byte (no float round-tripping).
pub const COLUMNS: [&str; 10] = [
    "Datetime", "Close", "High", "Low", "Open", "Volume", "SMA_10", "EMA_10", "ROC", "RSI",
];

/// One row of the replay dataset as sent over the live channel.
///
/// Short or malformed file lines leave trailing fields `None`; those keys
/// are omitted from the JSON payload rather than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "Datetime", skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(rename = "Close", skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
    #[serde(rename = "High", skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
    #[serde(rename = "Low", skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
    #[serde(rename = "Open", skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(rename = "Volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(rename = "SMA_10", skip_serializing_if = "Option::is_none")]
    pub sma_10: Option<String>,
    #[serde(rename = "EMA_10", skip_serializing_if = "Option::is_none")]
    pub ema_10: Option<String>,
    #[serde(rename = "ROC", skip_serializing_if = "Option::is_none")]
    pub roc: Option<String>,
    #[serde(rename = "RSI", skip_serializing_if = "Option::is_none")]
    pub rsi: Option<String>,
}

impl PriceRow {
    /// Build a row from raw CSV fields, zipped positionally onto [`COLUMNS`].
    /// Extra fields are dropped, missing ones stay `None`.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values: [Option<String>; 10] = Default::default();
        for (slot, field) in values.iter_mut().zip(fields) {
            *slot = Some(field.trim().to_string());
        }
        let [datetime, close, high, low, open, volume, sma_10, ema_10, roc, rsi] = values;
        Self {
            datetime,
            close,
            high,
            low,
            open,
            volume,
            sma_10,
            ema_10,
            roc,
            rsi,
        }
    }
}
