//! # MailMatrix Notifier
//!
//! 受信者リストとテンプレートから受信者ごとのメールを生成し、送信する。
//!
//! ## 起動経路
//!
//! | バイナリ | トリガー | アドレス検証 |
//! |---------|---------|-------------|
//! | `mailmatrix-event` | S3 オブジェクト作成 / 削除イベント | あり |
//! | `mailmatrix` | CLI 引数（ローカルファイル） | なし |
//! | `mailmatrix-validate` | CLI 引数（ローカルファイル） | 空アドレスの検出のみ |
//!
//! ## データフロー
//!
//! ```text
//! イベント / CLI 引数 → 受信者リスト読み込み → 受信者ごとに
//!   テンプレート置換 → メール送信 → ログ出力 → 集約ステータス
//! ```

pub mod app_builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
