use tracing_subscriber::EnvFilter;

/// JSON logs on stdout for CloudWatch. Lambda stamps each line itself, so no
/// timestamps here. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber installed earlier (tests, repeated init) stays in place.
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_current_span(false)
        .with_ansi(false)
        .without_time()
        .try_init();
}
