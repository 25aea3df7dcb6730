//! dataset-prep: enrich a raw OHLCV export with the derived indicator columns.
//!
//! Reads a raw price CSV (3 header lines, then Datetime,Close,High,Low,Open,Volume
//! rows), computes SMA_10, EMA_10, ROC and RSI from the close series, and
//! writes the replay-ready dataset.
//!
//! Usage:
//!   cargo run -p market-data --bin dataset-prep -- raw.csv dataset/Data_INFY.NS.csv

use anyhow::{bail, Context, Result};
use market_data::indicators::{backfill, ema, roc, rsi, sma};

const SMA_WINDOW: usize = 10;
const EMA_SPAN: usize = 10;
const ROC_PERIODS: usize = 10;
const RSI_PERIOD: usize = 14;
const HEADER_LINES: usize = 3;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dataset_prep=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        bail!("usage: dataset-prep <raw.csv> <output.csv>");
    }
    let input = &args[1];
    let output = &args[2];

    let contents = std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    let mut lines = contents.lines();

    let headers: Vec<&str> = lines.by_ref().take(HEADER_LINES).collect();
    if headers.len() < HEADER_LINES {
        bail!("{input} has fewer than {HEADER_LINES} header lines");
    }

    let data_lines: Vec<&str> = lines.filter(|l| !l.trim().is_empty()).collect();
    let closes: Vec<f64> = data_lines
        .iter()
        .map(|line| {
            let close = line.split(',').nth(1).unwrap_or("");
            close
                .trim()
                .parse::<f64>()
                .with_context(|| format!("unparseable close value {close:?}"))
        })
        .collect::<Result<_>>()?;

    tracing::info!(rows = closes.len(), "Computing indicator columns");

    let mut columns = [
        sma(&closes, SMA_WINDOW),
        ema(&closes, EMA_SPAN),
        roc(&closes, ROC_PERIODS),
        rsi(&closes, RSI_PERIOD),
    ];
    for column in &mut columns {
        backfill(column);
    }

    let mut out = String::new();
    out.push_str(headers[0]);
    out.push_str(",SMA_10,EMA_10,ROC,RSI\n");
    for header in &headers[1..] {
        out.push_str(header);
        out.push_str(",,,,\n");
    }
    for (i, line) in data_lines.iter().enumerate() {
        out.push_str(line);
        for column in &columns {
            out.push(',');
            if let Some(value) = column[i] {
                out.push_str(&value.to_string());
            }
        }
        out.push('\n');
    }

    std::fs::write(output, out).with_context(|| format!("writing {output}"))?;
    tracing::info!(rows = data_lines.len(), output, "Wrote replay dataset");
    Ok(())
}
