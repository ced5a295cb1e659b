use env_logger::Env;

/// Install `env_logger` honouring `RUST_LOG`, defaulting to `info`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(true)
        .try_init();
}

#[cfg(feature = "tracing")]
pub fn init_tracing_from_env() {
    // Bridge log:: macros into tracing so library diagnostics reach the subscriber
    let _ = tracing_log::LogTracer::init();
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init_logging();
        super::init_logging();
        log::debug!("logger installed");
    }
}
