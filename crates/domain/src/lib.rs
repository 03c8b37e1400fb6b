//! # MailMatrix ドメイン層
//!
//! 通知配信の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **I/O を持たない**: ファイル取得やメール送信はインフラ層の責務
//! - **純粋関数**: 受信者リストのパース、アドレス検証、テンプレート置換は
//!   同じ入力に対して常に同じ出力を返す
//! - **境界での型付け**: ストレージイベントの種別は文字列ではなく enum で扱う
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//!      ↘      ↓
//!        shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層エラー
//! - [`recipient`] - 受信者と受信者リストのパース、アドレス検証
//! - [`template`] - プレースホルダ置換によるテンプレートレンダリング
//! - [`notification`] - メールメッセージと送信結果
//! - [`storage_event`] - オブジェクトストレージのトリガーイベント
//!
//! ## 使用例
//!
//! ```rust
//! use mailmatrix_domain::{
//!     recipient::parse_recipients,
//!     template::{RenderContext, render},
//! };
//!
//! let recipients = parse_recipients("a@example.com,Alice").unwrap();
//! let context = RenderContext::for_recipient(&recipients[0]);
//!
//! assert_eq!(render("Hi {{ name }}", &context), "Hi Alice");
//! ```

pub mod error;
pub mod notification;
pub mod recipient;
pub mod storage_event;
pub mod template;

pub use error::DomainError;
