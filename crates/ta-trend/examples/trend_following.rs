//! Trend Following Example
//!
//! Computes Parabolic SAR and the Hilbert Transform Trendline on synthetic
//! bars and prints where the stop flips sides.
//!
//! Run with: `RUST_LOG=ta_trend=debug cargo run --example trend_following`

#![allow(clippy::cast_precision_loss)]

use ta_trend::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let close: Vec<f64> = (0..120)
        .map(|i| {
            let t = i as f64;
            100.0 + 0.1 * t + 6.0 * (t * 2.0 * std::f64::consts::PI / 30.0).sin()
        })
        .collect();
    let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
    let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();

    println!("=== Trend Following ===");
    println!();

    let stops = Sar::new().acceleration(0.02).maximum(0.2).compute(&high, &low)?;
    let trend = ht_trendline(&close)?;

    println!("{:>5} {:>10} {:>10} {:>10}", "bar", "close", "sar", "trend");
    for i in (0..close.len()).step_by(5) {
        let fmt = |v: f64| if v.is_nan() { "-".to_string() } else { format!("{v:.3}") };
        println!(
            "{:>5} {:>10.3} {:>10} {:>10}",
            i,
            close[i],
            fmt(stops[i]),
            fmt(trend[i])
        );
    }
    println!();

    println!("SAR flips:");
    let mut state = SarState::new(&high, &low, 0.02, 0.2).ok_or(Error::InvalidInput {
        indicator: "sar",
        description: "need at least two bars".to_string(),
    })?;
    let mut long = state.is_long();
    for i in 1..high.len() {
        state.next(high[i], low[i]);
        if state.is_long() != long {
            long = state.is_long();
            println!("   bar {i:>3}: now {}", if long { "long" } else { "short" });
        }
    }

    Ok(())
}
