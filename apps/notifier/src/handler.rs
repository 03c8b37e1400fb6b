//! # イベントハンドラ
//!
//! トリガーペイロードを受け取り、ユースケースを呼び出して応答を返す。
//!
//! ハンドラは薄く保ち、処理はユースケース層に委譲する。

pub mod storage_event;

pub use storage_event::{HandlerResponse, handle_raw_payload, handle_storage_event};
