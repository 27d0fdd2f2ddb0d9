use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "CORETABS_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Filter from `CORETABS_LOG`, falling back to `warn` when unset or invalid.
pub fn filter_from_env<F>(get_env: F) -> EnvFilter
where
    F: Fn(&str) -> Option<String>,
{
    get_env(LOG_ENV)
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init_tracing() {
    let filter = filter_from_env(|key| std::env::var(key).ok());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_and_custom_filters() {
        assert_eq!(filter_from_env(|_| None).to_string(), "warn");
        let custom = filter_from_env(|_| Some("coretabs_render=trace".to_string()));
        assert_eq!(custom.to_string(), "coretabs_render=trace");
        let invalid = filter_from_env(|_| Some("coretabs=loud".to_string()));
        assert_eq!(invalid.to_string(), "warn");
    }
}
