//! # 依存コンポーネントの組み立て
//!
//! 設定から送信バックエンドとオブジェクトストアを構築する。

use std::sync::Arc;

use mailmatrix_infra::{
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SesNotificationSender,
        SmtpNotificationSender,
        create_ses_client,
    },
    s3::{self, AwsS3ObjectStore, ObjectStore},
};

use crate::{
    config::{NotificationBackend, NotifierConfig},
    usecase::NotificationService,
};

/// 設定に応じた送信バックエンドを構築する
pub async fn build_notification_sender(config: &NotifierConfig) -> Arc<dyn NotificationSender> {
    let notification = &config.notification;

    match notification.backend {
        NotificationBackend::Ses => {
            let client = create_ses_client(&config.aws_region).await;
            tracing::info!(region = %config.aws_region, "SES 送信を使用します");
            Arc::new(SesNotificationSender::new(
                client,
                notification.from_address.clone(),
            ))
        }
        NotificationBackend::Smtp => {
            tracing::info!(
                host = %notification.smtp_host,
                port = notification.smtp_port,
                "SMTP 送信を使用します"
            );
            Arc::new(SmtpNotificationSender::new(
                &notification.smtp_host,
                notification.smtp_port,
                notification.from_address.clone(),
            ))
        }
        NotificationBackend::Noop => {
            tracing::info!("Noop 送信を使用します（メールは送信されません）");
            Arc::new(NoopNotificationSender)
        }
    }
}

/// 通知サービスを構築する
pub async fn build_notification_service(config: &NotifierConfig) -> NotificationService {
    NotificationService::new(build_notification_sender(config).await)
}

/// S3 オブジェクトストアを構築する
pub async fn build_object_store(config: &NotifierConfig) -> Arc<dyn ObjectStore> {
    let client = s3::create_client(&config.aws_region, config.s3_endpoint_url.as_deref()).await;
    Arc::new(AwsS3ObjectStore::new(client))
}
