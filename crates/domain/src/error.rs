//! # ドメイン層エラー定義
//!
//! 入力データがドメインルールに違反した状態を表現するエラー型。
//!
//! ## エラーの種類と呼び出し元での扱い
//!
//! | エラー種別 | イベントハンドラ | CLI |
//! |-----------|----------------|-----|
//! | `Validation` | 400 | 非ゼロ終了 |
//! | `InvalidPayload` | 400 | - |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 受信者リストの内容がルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - CSV ヘッダーに `email` 列がない
    /// - `email` が空の行がある（明示的な検証時）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// トリガーペイロードが不正
    ///
    /// 必須フィールドの欠落や未対応のイベント種別。
    #[error("ペイロードが不正です: {0}")]
    InvalidPayload(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_displayにメッセージが含まれる() {
        let err = DomainError::InvalidPayload("Records[0].eventName がありません".to_string());
        assert_eq!(
            err.to_string(),
            "ペイロードが不正です: Records[0].eventName がありません"
        );
    }
}
