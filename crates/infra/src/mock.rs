//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリのオブジェクトストアと通知送信。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mailmatrix-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mailmatrix_domain::notification::{
    DispatchResult,
    EmailMessage,
    MessageId,
    NotificationError,
};

use crate::{InfraError, notification::NotificationSender, s3::ObjectStore};

// ===== MockObjectStore =====

#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects:  Arc<Mutex<HashMap<(String, String), String>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_object(&self, bucket: &str, key: &str, content: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), content.to_string());
    }

    /// `fetch_object` に渡された `(bucket, key)` を呼び出し順に返す
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn fetch_object(&self, bucket: &str, key: &str) -> Result<String, InfraError> {
        self.requests
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));

        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| InfraError::not_found(format!("s3://{bucket}/{key}")))
    }
}

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// `fail_for` で指定した宛先への送信はプロバイダエラーとして失敗させる。
/// 失敗した送信も `attempted_emails` には記録される。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    attempted:  Arc<Mutex<Vec<EmailMessage>>>,
    failing_to: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, to: &str) {
        self.failing_to.lock().unwrap().insert(to.to_string());
    }

    /// 送信を試みたすべてのメール（失敗を含む）
    pub fn attempted_emails(&self) -> Vec<EmailMessage> {
        self.attempted.lock().unwrap().clone()
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        let failing_to = self.failing_to.lock().unwrap();
        self.attempted
            .lock()
            .unwrap()
            .iter()
            .filter(|email| !failing_to.contains(&email.to))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> DispatchResult {
        let should_fail = self.failing_to.lock().unwrap().contains(&email.to);

        let attempt_count = {
            let mut attempted = self.attempted.lock().unwrap();
            attempted.push(email.clone());
            attempted.len()
        };

        if should_fail {
            return Err(NotificationError::SendFailed(format!(
                "MessageRejected: Email address is not verified. {}",
                email.to
            )));
        }

        Ok(MessageId::new(format!("mock-{attempt_count}")))
    }
}
