use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

/// Install the global tracing subscriber. `tracing_level` takes an EnvFilter
/// directive string, e.g. "info" or "showbill=debug".
pub fn init_tracing(tracing_level: &str) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().pretty();
    let filter_layer =
        EnvFilter::try_new(tracing_level).map_err(|e| Error::LogFilter(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    Ok(())
}
