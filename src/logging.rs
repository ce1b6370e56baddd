use tracing_subscriber::{fmt, EnvFilter};

/// ログレベルを上書きする環境変数
const LOG_ENV_VAR: &str = "FFE_LOG";

/// tracing の初期化（stderr に出力）
///
/// `FFE_LOG` が設定されていればそれを優先し、なければ `--verbose` で debug、通常は warn。
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| default_filter.to_string());

    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
