//! # 通知サービス
//!
//! 受信者ごとにテンプレートレンダリング → メール送信 → ログ出力を行う。
//!
//! ## 設計方針
//!
//! - **受信者単位の隔離**: 1 件の送信失敗でループを止めない
//! - **ログのみ**: 成功・失敗・スキップはビジネスイベントとしてログに出力し、
//!   呼び出し元のステータスには反映しない
//! - **依存性注入**: `NotificationSender` は trait オブジェクトで受け取る

use std::sync::Arc;

use mailmatrix_domain::{
    notification::{EmailBody, EmailMessage},
    recipient::Recipient,
    template::{RenderContext, Template},
};
use mailmatrix_infra::notification::NotificationSender;
use mailmatrix_shared::{
    event_log::{error, event},
    log_business_event,
};

/// 本文の生成方法
#[derive(Debug, Clone, Copy)]
pub enum BodySource<'a> {
    /// 受信者ごとにテンプレートをレンダリングし、HTML として送る
    Template(&'a Template),
    /// 全受信者に同じ本文を送る
    Fixed(&'a EmailBody),
}

impl BodySource<'_> {
    fn body_for(&self, recipient: &Recipient) -> EmailBody {
        match self {
            Self::Template(template) => {
                EmailBody::Html(template.render(&RenderContext::for_recipient(recipient)))
            }
            Self::Fixed(body) => (*body).clone(),
        }
    }
}

/// 送信前のアドレス検証
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressCheck {
    /// 形式が不正なアドレスをスキップする（イベント駆動の経路）
    Validate,
    /// 検証せずに送信する（CLI 経路）
    Trust,
}

/// バッチの送信結果の集計
///
/// ログ出力用。集約ステータスには反映しない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub sent:    usize,
    pub failed:  usize,
    pub skipped: usize,
}

impl BatchSummary {
    /// 送信を試みた件数
    pub fn attempted(&self) -> usize {
        self.sent + self.failed
    }
}

/// 通知サービス
pub struct NotificationService {
    sender: Arc<dyn NotificationSender>,
}

impl NotificationService {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    /// 受信者リスト全員に通知を送る
    ///
    /// 受信者は入力順に 1 件ずつ送信し、前の送信が終わってから次へ進む。
    pub async fn notify_all(
        &self,
        recipients: &[Recipient],
        subject: &str,
        body: BodySource<'_>,
        address_check: AddressCheck,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for recipient in recipients {
            if address_check == AddressCheck::Validate && !recipient.has_valid_email() {
                tracing::warn!("Invalid email address: {}", recipient.email());
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::RECIPIENT_SKIPPED,
                    event.result = event::result::SKIPPED,
                    notification.recipient = recipient.email(),
                    "受信者をスキップ"
                );
                summary.skipped += 1;
                continue;
            }

            let email = EmailMessage {
                to:      recipient.email().to_string(),
                subject: subject.to_string(),
                body:    body.body_for(recipient),
            };

            match self.sender.send_email(&email).await {
                Ok(message_id) => {
                    log_business_event!(
                        event.category = event::category::NOTIFICATION,
                        event.action = event::action::NOTIFICATION_SENT,
                        event.result = event::result::SUCCESS,
                        notification.recipient = %email.to,
                        notification.message_id = %message_id,
                        "Email sent to {}! Message ID: {}",
                        email.to,
                        message_id
                    );
                    summary.sent += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error sending email to {}", email.to);
                    log_business_event!(
                        event.category = event::category::NOTIFICATION,
                        event.action = event::action::NOTIFICATION_FAILED,
                        event.result = event::result::FAILURE,
                        notification.recipient = %email.to,
                        error.kind = error::kind::DISPATCH,
                        "通知の送信に失敗"
                    );
                    summary.failed += 1;
                }
            }
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::BATCH_COMPLETED,
            event.result = event::result::SUCCESS,
            batch.sent = summary.sent,
            batch.failed = summary.failed,
            batch.skipped = summary.skipped,
            "通知バッチ完了"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use mailmatrix_domain::recipient::parse_lines;
    use mailmatrix_infra::mock::MockNotificationSender;
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_service(sender: &MockNotificationSender) -> NotificationService {
        NotificationService::new(Arc::new(sender.clone()))
    }

    #[tokio::test]
    async fn テンプレートを受信者ごとにレンダリングして送信する() {
        let sender = MockNotificationSender::new();
        let service = make_service(&sender);
        let recipients = parse_lines("a@x.com,Alice\nb@x.com");
        let template = Template::new("welcome_email.html", "Hi {{ name }}");

        let summary = service
            .notify_all(
                &recipients,
                "Welcome",
                BodySource::Template(&template),
                AddressCheck::Validate,
            )
            .await;

        assert_eq!(summary, BatchSummary { sent: 2, failed: 0, skipped: 0 });
        let sent = sender.sent_emails();
        assert_eq!(sent[0].to, "a@x.com");
        assert_eq!(sent[0].body, EmailBody::Html("Hi Alice".to_string()));
        assert_eq!(sent[1].body, EmailBody::Html("Hi Valued Customer".to_string()));
    }

    #[tokio::test]
    async fn 検証ありの場合は不正なアドレスをスキップする() {
        let sender = MockNotificationSender::new();
        let service = make_service(&sender);
        let recipients = parse_lines("a@x.com,Alice\nbad-email");
        let body = EmailBody::Text("notice".to_string());

        let summary = service
            .notify_all(&recipients, "Notice", BodySource::Fixed(&body), AddressCheck::Validate)
            .await;

        assert_eq!(summary, BatchSummary { sent: 1, failed: 0, skipped: 1 });
        assert_eq!(sender.attempted_emails().len(), 1);
    }

    #[tokio::test]
    async fn 検証なしの場合は不正なアドレスにも送信を試みる() {
        let sender = MockNotificationSender::new();
        let service = make_service(&sender);
        let recipients = parse_lines("bad-email");
        let body = EmailBody::Text("notice".to_string());

        let summary = service
            .notify_all(&recipients, "Notice", BodySource::Fixed(&body), AddressCheck::Trust)
            .await;

        assert_eq!(summary.attempted(), 1);
        assert_eq!(sender.attempted_emails()[0].to, "bad-email");
    }

    #[tokio::test]
    async fn 送信失敗しても残りの受信者への送信を続ける() {
        let sender = MockNotificationSender::new();
        sender.fail_for("b@x.com");
        let service = make_service(&sender);
        let recipients = parse_lines("a@x.com\nb@x.com\nc@x.com");
        let body = EmailBody::Text("notice".to_string());

        let summary = service
            .notify_all(&recipients, "Notice", BodySource::Fixed(&body), AddressCheck::Validate)
            .await;

        assert_eq!(summary, BatchSummary { sent: 2, failed: 1, skipped: 0 });
        let attempted: Vec<String> = sender
            .attempted_emails()
            .into_iter()
            .map(|email| email.to)
            .collect();
        assert_eq!(attempted, vec!["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[tokio::test]
    async fn 受信者がいなければ何も送信しない() {
        let sender = MockNotificationSender::new();
        let service = make_service(&sender);
        let body = EmailBody::Text("notice".to_string());

        let summary = service
            .notify_all(&[], "Notice", BodySource::Fixed(&body), AddressCheck::Validate)
            .await;

        assert_eq!(summary, BatchSummary::default());
        assert!(sender.attempted_emails().is_empty());
    }
}
