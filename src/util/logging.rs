/// Install the process-wide logger. Later calls are no-ops.
///
/// Defaults to `clinvcf=info` unless RUST_LOG says otherwise.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("clinvcf=info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_module_path(false)
        .try_init();
}
