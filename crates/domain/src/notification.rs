//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationKind`] | 通知種別 | 作成イベントで送る通知（歓迎 / 不採用）と削除時の退会通知 |
//! | [`EmailMessage`] | メールメッセージ | 宛先・件名・本文。`NotificationSender` に渡される |
//! | [`DispatchResult`] | 送信結果 | プロバイダのメッセージ ID または送信エラー |
//!
//! ## 設計方針
//!
//! - **受信者単位の隔離**: 1 件の送信失敗はバッチを中断しない
//! - **ログのみ**: 送信結果は永続化せず、ログにのみ残す

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::storage_event::StorageEvent;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗（プロバイダのエラー詳細を保持する）
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// メッセージの構築に失敗
    #[error("メッセージ構築に失敗: {0}")]
    BuildFailed(String),
}

/// プロバイダが割り当てたメッセージ ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 1 件の送信試行の結果
pub type DispatchResult = Result<MessageId, NotificationError>;

/// メール本文
///
/// 経路によって HTML か プレーンテキストのどちらか一方を送る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Html(String),
    Text(String),
}

impl EmailBody {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html(body) | Self::Text(body) => body,
        }
    }
}

/// メールメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:      String,
    /// 件名
    pub subject: String,
    /// 本文
    pub body:    EmailBody,
}

/// 通知種別
///
/// 作成イベントで使うテンプレートと件名を決める。
/// `MAILMATRIX_NOTIFICATION_KIND` で `welcome` / `rejection` を選ぶ。
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// 歓迎メール
    #[default]
    Welcome,
    /// 不採用通知
    Rejection,
}

impl NotificationKind {
    /// オブジェクトストレージ上のテンプレートキー
    pub fn template_key(self) -> &'static str {
        match self {
            Self::Welcome => "welcome_email.html",
            Self::Rejection => "rejection_email.html",
        }
    }

    /// メール件名
    pub fn subject(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to Mail-Matrix: Stream!",
            Self::Rejection => "Mail-Matrix: Stream - Application Status",
        }
    }

    /// イベントハンドラの成功メッセージ
    pub fn completion_message(self) -> &'static str {
        match self {
            Self::Welcome => "Emails processed successfully!",
            Self::Rejection => "Rejection emails processed successfully!",
        }
    }
}

/// 退会通知の件名
pub const REMOVAL_SUBJECT: &str = "You have been removed from the service";

/// オブジェクト削除時の退会通知本文を生成する
pub fn removal_notice(event: &StorageEvent) -> String {
    format!(
        "The object with key {} has been deleted from bucket {}. You have been removed from the service.",
        event.key(),
        event.bucket()
    )
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage_event::StorageEventType;

    #[test]
    fn notification_kind_の文字列変換が正しい() {
        assert_eq!(NotificationKind::Welcome.to_string(), "welcome");
        assert_eq!(NotificationKind::Rejection.to_string(), "rejection");

        assert_eq!(
            NotificationKind::from_str("welcome").unwrap(),
            NotificationKind::Welcome
        );
        assert_eq!(
            NotificationKind::from_str("rejection").unwrap(),
            NotificationKind::Rejection
        );
        assert!(NotificationKind::from_str("removal").is_err());
    }

    #[test]
    fn notification_kindごとのテンプレートと件名() {
        assert_eq!(NotificationKind::Welcome.template_key(), "welcome_email.html");
        assert_eq!(
            NotificationKind::Rejection.template_key(),
            "rejection_email.html"
        );
        assert_eq!(
            NotificationKind::Rejection.subject(),
            "Mail-Matrix: Stream - Application Status"
        );
    }

    #[test]
    fn 退会通知に削除されたキーとバケットが含まれる() {
        let event = StorageEvent::new("b", "list.csv", StorageEventType::ObjectRemoved);

        let body = removal_notice(&event);

        assert!(body.contains("The object with key list.csv has been deleted from bucket b"));
    }

    #[test]
    fn email_bodyはどちらの形式でも本文を返す() {
        assert_eq!(EmailBody::Html("<p>x</p>".to_string()).as_str(), "<p>x</p>");
        assert_eq!(EmailBody::Text("x".to_string()).as_str(), "x");
    }
}
