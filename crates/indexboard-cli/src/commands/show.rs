use std::sync::Arc;
use std::time::Instant;

use indexboard_core::{
    render, DashboardQuery, DateRange, HttpClient, IndexCatalog, NoopHttpClient, QuoteProvider,
    ReqwestHttpClient, TradingDate, YahooIndexClient,
};

use crate::cli::{Cli, ShowArgs};
use crate::error::CliError;

use super::{CommandResult, CommandView};

pub async fn run(args: &ShowArgs, cli: &Cli) -> Result<CommandResult, CliError> {
    if cli.timeout_ms == 0 {
        return Err(CliError::Command(String::from(
            "timeout must be greater than zero milliseconds",
        )));
    }

    let catalog = IndexCatalog::global();

    let start = TradingDate::parse(&args.start)?;
    let end = match &args.end {
        Some(raw) => TradingDate::parse(raw)?,
        None => TradingDate::today_utc(),
    };
    let range = DateRange::new(start, end);

    let http_client: Arc<dyn HttpClient> = if cli.offline {
        Arc::new(NoopHttpClient)
    } else {
        Arc::new(ReqwestHttpClient::new())
    };
    let provider = YahooIndexClient::new(http_client).with_timeout_ms(cli.timeout_ms);
    let source = provider.id();

    log::debug!(
        "rendering '{}' between {start} and {end} (offline: {})",
        args.index,
        cli.offline
    );

    let query = DashboardQuery::new(args.index.clone(), range);
    let started = Instant::now();
    let outcome = render(&catalog, &provider, &query).await?;
    let latency_ms = started.elapsed().as_millis() as u64;

    let warnings = outcome.warnings().to_vec();

    Ok(CommandResult::ok(CommandView::Dashboard(outcome), source)
        .with_warnings(warnings)
        .with_latency(latency_ms))
}
