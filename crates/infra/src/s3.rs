//! # S3 オブジェクト取得
//!
//! Amazon S3 / MinIO から受信者リストとテンプレートをテキストとして取得する。
//!
//! ## 設計方針
//!
//! - **ローカル開発**: MinIO を使用（`S3_ENDPOINT_URL` で接続先を指定）
//! - **本番環境**: IAM ロールによる認証で Amazon S3 に接続（`S3_ENDPOINT_URL` 未設定）
//! - **バケットは呼び出しごとに指定**: トリガーイベントがバケット名を運んでくるため、
//!   クライアントはバケットに束縛しない
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use mailmatrix_infra::s3::{self, ObjectStore};
//!
//! async fn fetch() -> Result<String, mailmatrix_infra::InfraError> {
//!     let client = s3::create_client("ap-south-1", None).await;
//!     let store = s3::AwsS3ObjectStore::new(client);
//!
//!     store.fetch_object("mailmatrix-lists", "recipients.csv").await
//! }
//! ```

use async_trait::async_trait;
use aws_sdk_s3::Client;

use crate::InfraError;

/// オブジェクトストレージのインターフェース
///
/// テスト時はモックに差し替え可能。
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// オブジェクトを UTF-8 テキストとして取得する
    ///
    /// # 引数
    ///
    /// * `bucket` - バケット名
    /// * `key` - オブジェクトキー（例: `welcome_email.html`）
    ///
    /// # エラー
    ///
    /// オブジェクトが存在しない場合は `InfraErrorKind::NotFound`、
    /// 本文が UTF-8 でない場合は `InfraErrorKind::Decode` を返す。
    async fn fetch_object(&self, bucket: &str, key: &str) -> Result<String, InfraError>;
}

/// AWS S3 オブジェクトストア
///
/// `aws-sdk-s3` を使用した [`ObjectStore`] の実装。
/// MinIO とも互換動作する。
pub struct AwsS3ObjectStore {
    client: Client,
}

impl AwsS3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for AwsS3ObjectStore {
    async fn fetch_object(&self, bucket: &str, key: &str) -> Result<String, InfraError> {
        let result = self.client.get_object().bucket(bucket).key(key).send().await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                let is_not_found = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false);
                return Err(if is_not_found {
                    InfraError::not_found(format!("s3://{bucket}/{key}"))
                } else {
                    InfraError::s3(format!("GetObject の実行に失敗: {err}"))
                });
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| InfraError::s3(format!("オブジェクト本文の読み取りに失敗: {e}")))?
            .into_bytes();

        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// S3 クライアントを作成する
///
/// `endpoint` が `Some` の場合は MinIO 等のカスタムエンドポイントに接続する。
/// `None` の場合は AWS S3 のデフォルトエンドポイントを使用する。
///
/// 認証情報は SDK のデフォルト認証チェーンで解決する:
/// - ローカル: 環境変数 `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`（`.env` で設定）
/// - 本番: IAM ロール
pub async fn create_client(region: &str, endpoint: Option<&str>) -> Client {
    let mut config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    if let Some(endpoint_url) = endpoint {
        config_builder = config_builder.endpoint_url(endpoint_url);
    }

    let config = config_builder.load().await;

    // MinIO はパススタイルが必要（バーチャルホスト型 URL を使わない）
    let s3_config_builder = aws_sdk_s3::config::Builder::from(&config);
    let s3_config = if endpoint.is_some() {
        s3_config_builder.force_path_style(true).build()
    } else {
        s3_config_builder.build()
    };

    Client::from_conf(s3_config)
}
