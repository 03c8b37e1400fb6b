//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 受信者リストやテンプレートの動作確認に使用する。

use async_trait::async_trait;
use mailmatrix_domain::notification::{DispatchResult, EmailMessage, MessageId};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> DispatchResult {
        let message_id = MessageId::new(format!("noop-{}", uuid::Uuid::now_v7()));
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            message_id = %message_id,
            "Noop: メール送信をスキップ"
        );
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use mailmatrix_domain::notification::EmailBody;

    use super::*;

    #[tokio::test]
    async fn send_emailがnoopのメッセージidを返す() {
        let sender = NoopNotificationSender;
        let email = EmailMessage {
            to:      "test@example.com".to_string(),
            subject: "テスト件名".to_string(),
            body:    EmailBody::Html("<p>テスト</p>".to_string()),
        };

        let message_id = sender.send_email(&email).await.unwrap();

        assert!(message_id.as_str().starts_with("noop-"));
    }
}
