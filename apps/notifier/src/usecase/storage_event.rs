//! # ストレージイベントのユースケース
//!
//! S3 のオブジェクト作成・削除イベントを受けて、受信者リストを取得し通知を送る。
//!
//! - 作成: 同じバケットから `NotificationKind` に応じたテンプレートを取得し、
//!   受信者ごとにレンダリングした HTML を送る
//! - 削除: 固定文面の削除通知をテキストで送る
//!
//! どちらの場合も受信者リストはイベントが指すオブジェクト自身から読み込む。

use std::sync::Arc;

use mailmatrix_domain::{
    notification::{EmailBody, NotificationKind, REMOVAL_SUBJECT, removal_notice},
    recipient::{Recipient, parse_recipients},
    storage_event::{StorageEvent, StorageEventType},
    template::Template,
};
use mailmatrix_infra::s3::ObjectStore;

use super::notification::{AddressCheck, BatchSummary, BodySource, NotificationService};
use crate::error::NotifierError;

/// ストレージイベントのユースケース
pub struct StorageEventUseCase {
    store:   Arc<dyn ObjectStore>,
    service: NotificationService,
    kind:    NotificationKind,
}

impl StorageEventUseCase {
    pub fn new(store: Arc<dyn ObjectStore>, service: NotificationService, kind: NotificationKind) -> Self {
        Self {
            store,
            service,
            kind,
        }
    }

    /// 作成イベントで送る通知の種別
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// イベントを処理する
    ///
    /// 受信者リストやテンプレートが取得できない場合はバッチ全体をエラーにする。
    /// 受信者ごとの送信失敗はエラーにしない。
    pub async fn execute(&self, event: &StorageEvent) -> Result<BatchSummary, NotifierError> {
        let recipients = self.load_recipients(event).await?;

        let summary = match event.event_type() {
            StorageEventType::ObjectCreated => {
                let template = self.fetch_template(event.bucket()).await?;
                self.service
                    .notify_all(
                        &recipients,
                        self.kind.subject(),
                        BodySource::Template(&template),
                        AddressCheck::Validate,
                    )
                    .await
            }
            StorageEventType::ObjectRemoved => {
                let body = EmailBody::Text(removal_notice(event));
                self.service
                    .notify_all(
                        &recipients,
                        REMOVAL_SUBJECT,
                        BodySource::Fixed(&body),
                        AddressCheck::Validate,
                    )
                    .await
            }
        };

        Ok(summary)
    }

    async fn load_recipients(&self, event: &StorageEvent) -> Result<Vec<Recipient>, NotifierError> {
        let location = format!("s3://{}/{}", event.bucket(), event.key());
        let text = self
            .store
            .fetch_object(event.bucket(), event.key())
            .await
            .map_err(|e| NotifierError::source_fetch(&location, e))?;

        let recipients = parse_recipients(&text).map_err(NotifierError::InvalidRecipients)?;

        tracing::debug!(
            source = %location,
            count = recipients.len(),
            "受信者リストを読み込みました"
        );
        Ok(recipients)
    }

    async fn fetch_template(&self, bucket: &str) -> Result<Template, NotifierError> {
        let key = self.kind.template_key();
        let content = self
            .store
            .fetch_object(bucket, key)
            .await
            .map_err(|e| NotifierError::source_fetch(format!("s3://{bucket}/{key}"), e))?;

        Ok(Template::new(key, content))
    }
}
