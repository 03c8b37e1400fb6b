//! # Notifier エラー定義
//!
//! バッチ全体を中断するエラーと、イベントハンドラのステータスコードへの対応を定義する。
//! 受信者ごとの送信失敗はここには含めない（ログのみ）。

use mailmatrix_domain::DomainError;
use mailmatrix_infra::InfraError;
use thiserror::Error;

/// バッチ全体を中断するエラー
#[derive(Debug, Error)]
pub enum NotifierError {
    /// トリガーペイロードが不正
    #[error("イベントデータの取り出しに失敗: {0}")]
    InvalidPayload(#[source] DomainError),

    /// 受信者リストまたはテンプレートを取得できない
    #[error("{what} の取得に失敗: {source}")]
    SourceFetch {
        /// 取得対象（`s3://bucket/key` またはファイルパス）
        what:   String,
        #[source]
        source: InfraError,
    },

    /// 受信者リストの内容が不正
    #[error("受信者リストが不正です: {0}")]
    InvalidRecipients(#[source] DomainError),
}

impl NotifierError {
    pub fn source_fetch(what: impl Into<String>, source: InfraError) -> Self {
        Self::SourceFetch {
            what: what.into(),
            source,
        }
    }

    /// イベントハンドラのステータスコード
    ///
    /// ペイロード不正は 400、取得元の問題は 500。
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPayload(_) => 400,
            Self::SourceFetch { .. } | Self::InvalidRecipients(_) => 500,
        }
    }

    /// ログの `error.kind` フィールド値
    pub fn log_kind(&self) -> &'static str {
        use mailmatrix_shared::event_log::error::kind;

        match self {
            Self::InvalidPayload(_) => kind::INVALID_PAYLOAD,
            Self::SourceFetch { .. } | Self::InvalidRecipients(_) => kind::SOURCE_FETCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ペイロード不正は400() {
        let err = NotifierError::InvalidPayload(DomainError::InvalidPayload("x".to_string()));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_取得失敗は500() {
        let err = NotifierError::source_fetch("s3://b/list.csv", InfraError::not_found("s3://b/list.csv"));

        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_string(),
            "s3://b/list.csv の取得に失敗: 取得元が見つかりません: s3://b/list.csv"
        );
    }

    #[test]
    fn test_受信者リスト不正は500() {
        let err = NotifierError::InvalidRecipients(DomainError::Validation("x".to_string()));
        assert_eq!(err.status_code(), 500);
    }
}
