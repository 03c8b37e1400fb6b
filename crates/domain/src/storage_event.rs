//! # ストレージイベント
//!
//! オブジェクトストレージ（S3）のイベント通知ペイロードを、
//! バケット名・オブジェクトキー・イベント種別に変換する。
//!
//! ## 設計方針
//!
//! - **境界で一度だけ判定**: イベント名の文字列はここで [`StorageEventType`] に変換し、
//!   以降は enum のパターンマッチで分岐する
//! - **キーのデコード**: S3 はキーを URL エンコード（空白は `+`）して通知するため、
//!   境界でデコードする
//!
//! ## ペイロード形式
//!
//! ```json
//! {
//!   "Records": [{
//!     "eventName": "ObjectCreated:Put",
//!     "s3": { "bucket": { "name": "b" }, "object": { "key": "list.csv" } }
//!   }]
//! }
//! ```

use serde::Deserialize;

use crate::DomainError;

/// ストレージイベント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StorageEventType {
    /// オブジェクト作成（`ObjectCreated:*` / `PutObject`）
    ObjectCreated,
    /// オブジェクト削除（`ObjectRemoved:*` / `DeleteObject`）
    ObjectRemoved,
}

impl StorageEventType {
    /// イベント名から種別を判定する
    ///
    /// 作成・削除のどちらにも当たらない場合は `None`。
    pub fn from_event_name(event_name: &str) -> Option<Self> {
        if event_name.contains("ObjectCreated") || event_name.contains("PutObject") {
            Some(Self::ObjectCreated)
        } else if event_name.contains("ObjectRemoved") || event_name.contains("DeleteObject") {
            Some(Self::ObjectRemoved)
        } else {
            None
        }
    }
}

/// ストレージイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    bucket:     String,
    key:        String,
    event_type: StorageEventType,
}

impl StorageEvent {
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        event_type: StorageEventType,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            event_type,
        }
    }

    /// トリガーペイロードから最初のレコードを取り出す
    ///
    /// # エラー
    ///
    /// 必須フィールドの欠落、キーのデコード失敗、未対応のイベント種別の場合は
    /// `DomainError::InvalidPayload` を返す。
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, DomainError> {
        let payload = S3EventPayload::deserialize(payload)
            .map_err(|e| DomainError::InvalidPayload(e.to_string()))?;

        let record = payload
            .records
            .into_iter()
            .next()
            .ok_or_else(|| missing("Records[0]"))?;

        let s3 = record.s3.ok_or_else(|| missing("Records[0].s3"))?;
        let bucket = s3
            .bucket
            .and_then(|bucket| bucket.name)
            .ok_or_else(|| missing("Records[0].s3.bucket.name"))?;
        let raw_key = s3
            .object
            .and_then(|object| object.key)
            .ok_or_else(|| missing("Records[0].s3.object.key"))?;
        let event_name = record
            .event_name
            .ok_or_else(|| missing("Records[0].eventName"))?;

        let event_type = StorageEventType::from_event_name(&event_name).ok_or_else(|| {
            DomainError::InvalidPayload(format!("未対応のイベント種別です: {event_name}"))
        })?;

        Ok(Self::new(bucket, decode_key(&raw_key)?, event_type))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn event_type(&self) -> StorageEventType {
        self.event_type
    }
}

fn missing(field: &str) -> DomainError {
    DomainError::InvalidPayload(format!("{field} がありません"))
}

fn decode_key(raw_key: &str) -> Result<String, DomainError> {
    urlencoding::decode(&raw_key.replace('+', " "))
        .map(|key| key.into_owned())
        .map_err(|e| DomainError::InvalidPayload(format!("オブジェクトキーのデコードに失敗: {e}")))
}

#[derive(Debug, Deserialize)]
struct S3EventPayload {
    #[serde(rename = "Records", default)]
    records: Vec<S3EventRecord>,
}

#[derive(Debug, Deserialize)]
struct S3EventRecord {
    #[serde(rename = "eventName")]
    event_name: Option<String>,
    s3:         Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: Option<S3Bucket>,
    object: Option<S3Object>,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: Option<String>,
}
