use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "survey_composite_analysis=info";

/// Route diagnostics to stderr so stdout carries only the analysis output.
/// `RUST_LOG` overrides the default filter; `verbose` raises it to debug.
pub fn init_logging(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ if verbose => EnvFilter::new("survey_composite_analysis=debug"),
        _ => EnvFilter::new(DEFAULT_DIRECTIVE),
    };

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}
