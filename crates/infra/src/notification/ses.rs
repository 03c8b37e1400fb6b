//! SES 通知送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 本番環境で使用する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message},
};
use mailmatrix_domain::notification::{
    DispatchResult,
    EmailBody,
    EmailMessage,
    MessageId,
    NotificationError,
};

use super::NotificationSender;

/// SES 通知送信
///
/// `aws_sdk_sesv2::Client` をラップする。
pub struct SesNotificationSender {
    client:       Client,
    from_address: String,
}

impl SesNotificationSender {
    /// 新しい SES 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `client`: AWS SES v2 クライアント
    /// - `from_address`: 送信元メールアドレス（SES で検証済みであること）
    pub fn new(client: Client, from_address: String) -> Self {
        Self {
            client,
            from_address,
        }
    }
}

fn content(data: &str, part: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .build()
        .map_err(|e| NotificationError::BuildFailed(format!("{part}構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SesNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> DispatchResult {
        let destination = Destination::builder().to_addresses(&email.to).build();

        let body = match &email.body {
            EmailBody::Html(html) => Body::builder().html(content(html, "HTML 本文")?),
            EmailBody::Text(text) => Body::builder().text(content(text, "テキスト本文")?),
        }
        .build();

        let message = Message::builder()
            .subject(content(&email.subject, "件名")?)
            .body(body)
            .build();

        let output = self
            .client
            .send_email()
            .from_email_address(&self.from_address)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SES 送信失敗: {e}")))?;

        Ok(MessageId::new(output.message_id().unwrap_or_default()))
    }
}

/// SES v2 クライアントを作成する
///
/// 認証情報は SDK のデフォルト認証チェーンで解決する。
pub async fn create_client(region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;

    Client::new(&config)
}
