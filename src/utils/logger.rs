use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Stdout carries rendered output, so log lines always go to stderr.
/// Phase statistics are logged at info, so `monitor` raises the default level.
pub fn init_cli_logger(verbose: bool, monitor: bool) {
    let default_directive = if verbose {
        "topo_render=debug,warn"
    } else if monitor {
        "topo_render=info"
    } else {
        "topo_render=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
