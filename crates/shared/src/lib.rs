//! # MailMatrix 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ドメイン・インフラ・アプリのどこからでも依存できる
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - トレーシング初期化は `observability` feature の背後に置く

pub mod event_log;
pub mod observability;
