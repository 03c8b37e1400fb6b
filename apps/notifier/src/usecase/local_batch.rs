//! # ローカルバッチのユースケース
//!
//! CLI から受信者リストとテンプレートをディスクから読み込み、指定の件名で送信する。
//! アドレス形式の検証は行わない。

use std::path::{Path, PathBuf};

use mailmatrix_domain::{recipient::{Recipient, parse_recipients}, template::Template};
use mailmatrix_infra::local_file::read_text_file;

use super::notification::{AddressCheck, BatchSummary, BodySource, NotificationService};
use crate::error::NotifierError;

/// ローカルバッチの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBatchRequest {
    pub recipients_path: PathBuf,
    pub template_path:   PathBuf,
    pub subject:         String,
}

/// ローカルバッチのユースケース
pub struct LocalBatchUseCase {
    service: NotificationService,
}

impl LocalBatchUseCase {
    pub fn new(service: NotificationService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, request: &LocalBatchRequest) -> Result<BatchSummary, NotifierError> {
        let recipients = load_local_recipients(&request.recipients_path).await?;
        let template = load_local_template(&request.template_path).await?;

        Ok(self
            .service
            .notify_all(
                &recipients,
                &request.subject,
                BodySource::Template(&template),
                AddressCheck::Trust,
            )
            .await)
    }
}

/// ローカルファイルから受信者リストを読み込む
pub async fn load_local_recipients(path: &Path) -> Result<Vec<Recipient>, NotifierError> {
    let text = read_text_file(path)
        .await
        .map_err(|e| NotifierError::source_fetch(path.display().to_string(), e))?;

    parse_recipients(&text).map_err(NotifierError::InvalidRecipients)
}

async fn load_local_template(path: &Path) -> Result<Template, NotifierError> {
    let content = read_text_file(path)
        .await
        .map_err(|e| NotifierError::source_fetch(path.display().to_string(), e))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Template::new(name, content))
}
