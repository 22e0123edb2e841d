//! # Fxconv Application
//!
//! Binary that wires together all the components:
//! - Load configuration from flags and environment
//! - Initialize the ExchangeRate-API fetcher
//! - Create the conversion service
//! - Start the HTTP server or the interactive console

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fxconv_fetcher::build_fetcher;
use fxconv_hex::{
    ConversionService,
    inbound::{ConsoleUi, HttpServer},
};

const SERVER_FILTER: &str = "info,fxconv_app=debug,fxconv_hex=debug";
const CONSOLE_FILTER: &str = "warn";

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fxconv"), provider))
}

/// Installs the subscriber. OTLP export is only wired when an endpoint is configured.
fn init_logging(server_mode: bool) -> anyhow::Result<Option<sdktrace::SdkTracerProvider>> {
    let default_filter = if server_mode { SERVER_FILTER } else { CONSOLE_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (telemetry, provider) = if std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        let (tracer, provider) = init_tracer()?;
        (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        )
    } else {
        (None, None)
    };

    // Console mode keeps stdout for the menu.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(telemetry)
        .init();

    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    let otel_provider = init_logging(config.server_mode)?;

    // Build the outbound adapter
    let fetcher = build_fetcher(config.fetcher_config())?;

    // Create the conversion service
    let service = ConversionService::with_ttl(fetcher, config.cache_ttl);
    tracing::debug!("Rate cache TTL: {:?}", service.ttl());

    if config.server_mode {
        tracing::info!("Starting fxconv server on port {}", config.port);
        tracing::info!("Using exchange rate API at {}", config.api_base_url);

        // Create and run the HTTP server
        let server = HttpServer::new(service);
        let addr = format!("0.0.0.0:{}", config.port);
        server.run(&addr).await?;
    } else {
        let stdin = std::io::stdin();
        let mut console = ConsoleUi::new(service, stdin.lock(), std::io::stdout());
        console.run().await?;
    }

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
