//! # ローカルファイル読み込み
//!
//! CLI 経路で受信者リストとテンプレートをディスクから読み込む。

use std::path::Path;

use crate::InfraError;

/// ファイルを UTF-8 テキストとして読み込む
///
/// 存在しないパスは `InfraErrorKind::NotFound` になる。
pub async fn read_text_file(path: &Path) -> Result<String, InfraError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InfraError::not_found(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::InfraErrorKind;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mailmatrix-{}-{name}", uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn test_テキストファイルを読み込める() {
        let path = temp_path("recipients.csv");
        tokio::fs::write(&path, "email,name\na@x.com,Alice\n")
            .await
            .unwrap();

        let content = read_text_file(&path).await.unwrap();

        assert_eq!(content, "email,name\na@x.com,Alice\n");
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_存在しないファイルはnot_found() {
        let path = temp_path("missing.csv");

        let err = read_text_file(&path).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_utf8でないファイルはdecodeエラー() {
        let path = temp_path("binary.html");
        tokio::fs::write(&path, [0xff, 0xfe, 0xfd]).await.unwrap();

        let err = read_text_file(&path).await.unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Decode(_)));
        tokio::fs::remove_file(&path).await.unwrap();
    }
}
