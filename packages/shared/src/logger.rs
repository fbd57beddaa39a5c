//! Logging setup for the Agora binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server library crate, this crate and the binary
/// itself. It can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "agora-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use agora_shared::logger::setup_logger;
///
/// setup_logger("agora-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Crate names are normalized to their `snake_case` target form, which is
/// what `tracing` records as the event target.
fn default_directives(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "agora_server={level},{shared}={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        shared = env!("CARGO_PKG_NAME").replace('-', "_"),
        bin = binary_name.replace('-', "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_normalize_crate_names() {
        // テスト項目: ハイフンを含むバイナリ名が tracing のターゲット形式に変換される
        // given (前提条件):
        let binary_name = "agora-server";

        // when (操作):
        let directives = default_directives(binary_name, "debug");

        // then (期待する結果):
        assert!(directives.contains("agora_server=debug"));
        assert!(directives.contains("agora_shared=debug"));
        assert!(!directives.contains('-'));
    }

    #[test]
    fn test_default_directives_use_given_level() {
        // テスト項目: 指定したログレベルが全ディレクティブに反映される
        // given (前提条件):

        // when (操作):
        let directives = default_directives("server", "warn");

        // then (期待する結果):
        for directive in directives.split(',') {
            assert!(directive.ends_with("=warn"), "unexpected: {}", directive);
        }
    }
}
