use crate::config::toml_config::LoggingConfig;
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over the defaults below.
fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "small_polls=debug,tower_http=debug,info"
    } else {
        "small_polls=info,tower_http=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

// 一行一個 JSON 物件，方便收集器解析
fn json_subscriber(verbose: bool) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(default_filter(verbose)).with(
        fmt::layer()
            .with_target(true)
            .json()
            .with_current_span(false),
    )
}

/// Compact console output, used before a config file has been read.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(fmt::layer().with_target(false).compact())
        .init();
}

/// Installs the subscriber described by the `[logging]` section.
pub fn init_from_config(logging: &LoggingConfig) {
    if logging.json {
        json_subscriber(logging.verbose).init();
    } else {
        init_cli_logger(logging.verbose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_subscriber_accepts_events() {
        tracing::subscriber::with_default(json_subscriber(true), || {
            tracing::info!(poll_id = 1, "vote recorded");
        });
    }
}
