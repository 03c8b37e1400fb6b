//! # ログ初期化
//!
//! 3 つのバイナリで共通の tracing subscriber を組み立てる。
//!
//! - 出力先は stderr（stdout は `mailmatrix-event` の応答 JSON 専用）
//! - `LOG_FORMAT=json` で 1 行 1 イベントのフラットな JSON、それ以外は人間向け表示
//! - `RUST_LOG` 未設定時は [`DEFAULT_LOG_FILTER`]

/// `RUST_LOG` 未設定時のフィルタ
///
/// tracing のターゲットはクレート名（`mailmatrix_notifier` 等）なので、クレートごとに列挙する。
pub const DEFAULT_LOG_FILTER: &str =
    "info,mailmatrix_notifier=debug,mailmatrix_infra=debug,mailmatrix_domain=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 大文字小文字と前後の空白は無視する。未設定・空・未知の値は `Pretty`。
    /// 未知の値の場合は subscriber 初期化前なので stderr に直接警告を書く。
    pub fn from_value(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Self::default();
        };

        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else if value.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            eprintln!("WARNING: unknown LOG_FORMAT={value:?}, using pretty");
            Self::Pretty
        }
    }

    pub fn from_env() -> Self {
        Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// ログ初期化の設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// バイナリ名。初期化完了ログの `service` フィールドに出す
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバル subscriber を登録する
///
/// `ErrorLayer` も登録するので、`InfraError` の `SpanTrace` に
/// `storage_event` / `local_batch` スパンが記録される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let output = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let output = match config.log_format {
        LogFormat::Json => output
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => output.boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(service = %config.service_name, format = ?config.log_format, "ログを初期化しました");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_未設定や空文字列はprettyになる() {
        assert_eq!(LogFormat::from_value(None), LogFormat::Pretty);
        assert_eq!(LogFormat::from_value(Some("")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_value(Some("  ")), LogFormat::Pretty);
    }

    #[test]
    fn test_大文字小文字と空白を無視してjsonを認識する() {
        assert_eq!(LogFormat::from_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_value(Some(" JSON ")), LogFormat::Json);
    }

    #[test]
    fn test_未知の値はprettyにフォールバックする() {
        assert_eq!(LogFormat::from_value(Some("yaml")), LogFormat::Pretty);
    }

    #[test]
    fn test_既定フィルタは各クレートのターゲットを含む() {
        for target in ["mailmatrix_notifier", "mailmatrix_infra", "mailmatrix_domain"] {
            assert!(
                DEFAULT_LOG_FILTER.contains(&format!("{target}=debug")),
                "{target} が既定フィルタに含まれること"
            );
        }
    }
}
