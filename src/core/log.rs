use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Filter used when `RUST_LOG` is unset. Warnings from this crate, such as
/// the cause of a failed rate refresh, are always shown; dependencies stay
/// quiet unless they error.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "error,curconv=debug"
    } else {
        "error,curconv=warn"
    }
}

/// Installs the global subscriber, writing to stderr so log lines never
/// interleave with the rendered cards on stdout.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
