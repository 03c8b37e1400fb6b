//! # インフラ層エラー定義
//!
//! オブジェクトストレージやローカルファイルからの取得で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `std::io::Error`, `FromUtf8Error` などをラップ
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（S3, Io, Decode 等）

use std::{fmt, string::FromUtf8Error};

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::NotFound { location } => { /* 取得元が存在しない */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 取得元が存在しない
    ///
    /// S3 の `NoSuchKey` やローカルファイルの `NotFound`。
    #[error("取得元が見つかりません: {location}")]
    NotFound {
        /// `s3://bucket/key` またはファイルパス
        location: String,
    },

    /// S3 エラー
    ///
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// 手動で String にマップする。
    #[error("S3 エラー: {0}")]
    S3(String),

    /// ファイル I/O エラー
    #[error("I/O エラー: {0}")]
    Io(#[source] std::io::Error),

    /// UTF-8 デコードエラー
    ///
    /// 受信者リストやテンプレートがテキストとして読めない場合。
    #[error("UTF-8 デコードエラー: {0}")]
    Decode(#[source] FromUtf8Error),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 取得元が存在しないエラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, InfraErrorKind::NotFound { .. })
    }

    // ===== Convenience constructors =====

    /// 取得元が存在しないエラーを生成する
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::from_kind(InfraErrorKind::NotFound {
            location: location.into(),
        })
    }

    /// S3 エラーを生成する
    pub fn s3(msg: impl Into<String>) -> Self {
        Self::from_kind(InfraErrorKind::S3(msg.into()))
    }

    fn from_kind(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<std::io::Error> for InfraError {
    fn from(source: std::io::Error) -> Self {
        Self::from_kind(InfraErrorKind::Io(source))
    }
}

impl From<FromUtf8Error> for InfraError {
    fn from(source: FromUtf8Error) -> Self {
        Self::from_kind(InfraErrorKind::Decode(source))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_from_io_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_read_file", path = "data/recipients.csv");
            let _enter = span.enter();

            let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
            let err: InfraError = io_err.into();

            assert!(matches!(err.kind(), InfraErrorKind::Io(_)));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_read_file"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_from_utf8_errorでdecodeになる() {
        with_error_layer(|| {
            let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
            let err: InfraError = utf8_err.into();

            assert!(matches!(err.kind(), InfraErrorKind::Decode(_)));
        });
    }

    #[test]
    fn test_s3でspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_fetch_object");
            let _enter = span.enter();

            let err = InfraError::s3("接続失敗");

            assert!(matches!(err.kind(), InfraErrorKind::S3(msg) if msg == "接続失敗"));
            let trace_str = format!("{}", err.span_trace());
            assert!(trace_str.contains("test_fetch_object"));
        });
    }

    #[test]
    fn test_not_foundを判定できる() {
        let err = InfraError::not_found("s3://b/list.csv");

        assert!(err.is_not_found());
        assert!(!InfraError::s3("接続失敗").is_not_found());
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::not_found("s3://b/list.csv");
        assert_eq!(format!("{err}"), "取得元が見つかりません: s3://b/list.csv");
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let err: InfraError = std::io::Error::other("boom").into();

        assert!(err.source().is_some());
        assert!(InfraError::s3("x").source().is_none());
    }
}
