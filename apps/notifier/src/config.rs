//! # Notifier 設定
//!
//! 環境変数から送信元アドレス、リージョン、送信バックエンドなどの設定を読み込む。
//! すべての項目にリテラルの既定値があり、不正な値のみエラーになる。

use std::{env, path::PathBuf};

use mailmatrix_domain::notification::NotificationKind;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} の値が不正です: {value:?}（{reason}）")]
    InvalidValue {
        name:   &'static str,
        value:  String,
        reason: String,
    },
}

/// Notifier 全体の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// AWS リージョン（SES と S3 で共通）
    pub aws_region: String,
    /// S3 エンドポイント URL（MinIO 使用時に設定、未設定で AWS S3 デフォルト）
    pub s3_endpoint_url: Option<String>,
    /// 受信者リストの既定パス（`mailmatrix-validate` で使用）
    pub default_recipients_file: PathBuf,
    /// 作成イベントで送る通知の種別
    pub notification_kind: NotificationKind,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知送信の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:      NotificationBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス（SES では検証済みであること）
    pub from_address: String,
}

/// 送信バックエンド
///
/// `NOTIFICATION_BACKEND` 環境変数で切り替える:
/// - `ses`: Amazon SES v2 経由で送信（本番）
/// - `smtp`: Mailpit（開発）/ SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationBackend {
    #[default]
    Ses,
    Smtp,
    Noop,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意のルックアップ関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let kind = var("MAILMATRIX_NOTIFICATION_KIND", "welcome");
        let backend = var("NOTIFICATION_BACKEND", "ses");
        let smtp_port = var("SMTP_PORT", "1025");

        Ok(Self {
            aws_region: var("AWS_REGION", "ap-south-1"),
            s3_endpoint_url: lookup("S3_ENDPOINT_URL").filter(|url| !url.is_empty()),
            default_recipients_file: PathBuf::from(var(
                "MAILMATRIX_RECIPIENTS_FILE",
                "data/recipients.csv",
            )),
            notification_kind: kind.parse().map_err(|e: strum::ParseError| {
                ConfigError::InvalidValue {
                    name:   "MAILMATRIX_NOTIFICATION_KIND",
                    value:  kind.clone(),
                    reason: e.to_string(),
                }
            })?,
            notification: NotificationConfig {
                backend:      backend.parse().map_err(|e: strum::ParseError| {
                    ConfigError::InvalidValue {
                        name:   "NOTIFICATION_BACKEND",
                        value:  backend.clone(),
                        reason: e.to_string(),
                    }
                })?,
                smtp_host:    var("SMTP_HOST", "localhost"),
                smtp_port:    smtp_port.parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        name:   "SMTP_PORT",
                        value:  smtp_port.clone(),
                        reason: e.to_string(),
                    }
                })?,
                from_address: var("MAILMATRIX_SENDER_EMAIL", "noreply@mailmatrix.example.com"),
            },
        })
    }
}
