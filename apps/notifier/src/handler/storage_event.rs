//! # ストレージイベントハンドラ
//!
//! S3 イベント通知の JSON を受け取り、`{"statusCode": ..., "body": ...}` 形式で応答する。
//!
//! | 状況 | ステータス | 本文 |
//! |------|-----------|------|
//! | ペイロード不正 | 400 | `Error extracting event data.` |
//! | 受信者リスト・テンプレート取得失敗 | 500 | `Error processing S3 object.` |
//! | 作成イベント完了 | 200 | 通知種別ごとの完了メッセージ |
//! | 削除イベント完了 | 200 | `Processed S3 event successfully!` |
//!
//! 受信者ごとの送信失敗はステータスに反映しない。

use mailmatrix_domain::storage_event::{StorageEvent, StorageEventType};
use mailmatrix_shared::event_log::error::category;
use serde::Serialize;
use tracing::Instrument as _;

use crate::{error::NotifierError, usecase::StorageEventUseCase};

pub const INVALID_PAYLOAD_MESSAGE: &str = "Error extracting event data.";
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing S3 object.";
pub const REMOVAL_COMPLETED_MESSAGE: &str = "Processed S3 event successfully!";

/// ハンドラの応答
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body:        String,
}

impl HandlerResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    fn from_error(err: &NotifierError) -> Self {
        let body = match err {
            NotifierError::InvalidPayload(_) => INVALID_PAYLOAD_MESSAGE,
            NotifierError::SourceFetch { .. } | NotifierError::InvalidRecipients(_) => {
                PROCESSING_ERROR_MESSAGE
            }
        };
        Self::new(err.status_code(), body)
    }
}

/// パース済みのペイロードを処理する
pub async fn handle_storage_event(
    usecase: &StorageEventUseCase,
    payload: &serde_json::Value,
) -> HandlerResponse {
    let event = match StorageEvent::from_payload(payload) {
        Ok(event) => event,
        Err(e) => return error_response(NotifierError::InvalidPayload(e)),
    };

    let span = tracing::info_span!(
        "storage_event",
        bucket = %event.bucket(),
        key = %event.key(),
        event_type = ?event.event_type(),
    );

    async {
        match usecase.execute(&event).await {
            Ok(_) => match event.event_type() {
                StorageEventType::ObjectCreated => {
                    HandlerResponse::new(200, usecase.kind().completion_message())
                }
                StorageEventType::ObjectRemoved => {
                    HandlerResponse::new(200, REMOVAL_COMPLETED_MESSAGE)
                }
            },
            Err(e) => error_response(e),
        }
    }
    .instrument(span)
    .await
}

/// 生の JSON 文字列を処理する
///
/// JSON として読めない場合はペイロード不正として 400 を返す。
pub async fn handle_raw_payload(usecase: &StorageEventUseCase, raw: &str) -> HandlerResponse {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(payload) => handle_storage_event(usecase, &payload).await,
        Err(e) => error_response(NotifierError::InvalidPayload(
            mailmatrix_domain::DomainError::InvalidPayload(e.to_string()),
        )),
    }
}

fn error_response(err: NotifierError) -> HandlerResponse {
    let error_category = match err {
        NotifierError::InvalidPayload(_) | NotifierError::InvalidRecipients(_) => category::INPUT,
        NotifierError::SourceFetch { .. } => category::EXTERNAL_SERVICE,
    };
    tracing::error!(
        error.category = error_category,
        error.kind = err.log_kind(),
        error = %err,
        "イベントの処理に失敗しました"
    );
    HandlerResponse::from_error(&err)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_応答はcamel_caseでシリアライズされる() {
        let response = HandlerResponse::new(200, "ok");

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "statusCode": 200, "body": "ok" }));
    }

    #[test]
    fn test_200のみ成功とみなす() {
        assert!(HandlerResponse::new(200, "ok").is_success());
        assert!(!HandlerResponse::new(400, INVALID_PAYLOAD_MESSAGE).is_success());
        assert!(!HandlerResponse::new(500, PROCESSING_ERROR_MESSAGE).is_success());
    }
}
