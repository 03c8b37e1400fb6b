//! # 通知送信
//!
//! メール送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SES（本番用）、SMTP（Mailpit 開発用）、Noop（ドライラン用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **リトライなし**: プロバイダのエラーはそのまま呼び出し元へ返す

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
use mailmatrix_domain::notification::{DispatchResult, EmailMessage};
pub use noop::NoopNotificationSender;
pub use ses::{SesNotificationSender, create_client as create_ses_client};
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
///
/// 1 回の呼び出しで 1 宛先に 1 通を送る。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信し、プロバイダが割り当てたメッセージ ID を返す
    async fn send_email(&self, email: &EmailMessage) -> DispatchResult;
}
