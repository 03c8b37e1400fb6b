//! # MailMatrix インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **オブジェクトストレージ**: S3 / MinIO からの受信者リスト・テンプレート取得
//! - **ローカルファイル**: CLI 経路でのファイル読み込み
//! - **メール送信**: SES / SMTP / Noop の送信実装
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - [`s3`] - オブジェクトストレージ
//! - [`local_file`] - ローカルファイル読み込み
//! - [`notification`] - メール送信
//! - `mock` - テスト用モック（`test-utils` feature）

pub mod error;
pub mod local_file;
pub mod notification;
pub mod s3;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
