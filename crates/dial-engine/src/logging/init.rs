use std::sync::Once;

/// GPU stack crates log every pipeline creation at `info`; keep them quiet
/// unless a filter asks for them explicitly.
const GPU_NOISE: &str = "wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "dial_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then `info`.
/// Subsequent calls are ignored, and so is a logger installed by someone else.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter {filter:?}");
        }
    });
}

fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    let base = explicit
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| "info".to_string());

    // env_logger lets later directives win, so the defaults go first.
    format!("{GPU_NOISE},{base}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_env() {
        let f = resolve_filter(Some("debug".into()), Some("trace".into()));
        assert!(f.ends_with(",debug"));
    }

    #[test]
    fn env_used_when_no_explicit_filter() {
        let f = resolve_filter(None, Some("dial_face=trace".into()));
        assert!(f.ends_with(",dial_face=trace"));
    }

    #[test]
    fn falls_back_to_info_and_quiets_gpu_crates() {
        let f = resolve_filter(None, Some("  ".into()));
        assert_eq!(f, format!("{GPU_NOISE},info"));
    }
}
