use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "fcg=debug,fcg_lib=debug"
    } else {
        "warn"
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `--verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // Already installed (tests) is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
