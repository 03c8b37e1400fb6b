//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Message, header::ContentType},
};
use mailmatrix_domain::notification::{
    DispatchResult,
    EmailBody,
    EmailMessage,
    MessageId,
    NotificationError,
};

use super::NotificationSender;

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// SMTP にはプロバイダのメッセージ ID がないため、`Message-ID` ヘッダーを
/// 自前で生成してそれを返す。
pub struct SmtpNotificationSender {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    /// - `from_address`: 送信元メールアドレス
    pub fn new(host: &str, port: u16, from_address: String) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            transport,
            from_address,
        }
    }

    fn build_message(
        &self,
        email: &EmailMessage,
        message_id: &MessageId,
    ) -> Result<Message, NotificationError> {
        let (content_type, body) = match &email.body {
            EmailBody::Html(html) => (ContentType::TEXT_HTML, html.clone()),
            EmailBody::Text(text) => (ContentType::TEXT_PLAIN, text.clone()),
        };

        Message::builder()
            .message_id(Some(message_id.to_string()))
            .from(self.from_address.parse().map_err(|e| {
                NotificationError::BuildFailed(format!("送信元アドレス不正: {e}"))
            })?)
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .header(content_type)
            .body(body)
            .map_err(|e| NotificationError::BuildFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> DispatchResult {
        let message_id = MessageId::new(format!("<{}@mailmatrix>", uuid::Uuid::now_v7()));
        let message = self.build_message(email, &message_id)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(message_id)
    }
}
