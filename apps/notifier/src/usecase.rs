//! # ユースケース層
//!
//! - [`notification`] - 受信者ごとのレンダリング + 送信 + ログ出力
//! - [`storage_event`] - S3 イベント経路のオーケストレーション
//! - [`local_batch`] - CLI（ローカルファイル）経路のオーケストレーション

pub mod local_batch;
pub mod notification;
pub mod storage_event;

pub use local_batch::{LocalBatchRequest, LocalBatchUseCase, load_local_recipients};
pub use notification::{AddressCheck, BatchSummary, BodySource, NotificationService};
pub use storage_event::StorageEventUseCase;
