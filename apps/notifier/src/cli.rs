//! # コマンドライン引数
//!
//! 各バイナリの引数定義。パースは `clap` の derive に任せる。

use std::path::PathBuf;

use clap::Parser;

use crate::usecase::LocalBatchRequest;

/// `mailmatrix`: ローカルの受信者リストとテンプレートで一括送信する
#[derive(Debug, Parser)]
#[command(name = "mailmatrix")]
#[command(about = "Send a templated email to every recipient in a local list", long_about = None)]
pub struct SendArgs {
    /// 受信者リスト（`email[,name]` 行形式、または `email` 列付き CSV）
    #[arg(long)]
    pub recipients: PathBuf,

    /// HTML テンプレート（`{{ name }}` を受信者名に置換する）
    #[arg(long)]
    pub template: PathBuf,

    /// メール件名
    #[arg(long)]
    pub subject: String,
}

impl From<SendArgs> for LocalBatchRequest {
    fn from(args: SendArgs) -> Self {
        Self {
            recipients_path: args.recipients,
            template_path:   args.template,
            subject:         args.subject,
        }
    }
}

/// `mailmatrix-event`: S3 イベント通知の JSON を処理する
#[derive(Debug, Parser)]
#[command(name = "mailmatrix-event")]
#[command(about = "Handle an S3 event notification payload", long_about = None)]
pub struct EventArgs {
    /// ペイロード JSON のパス（省略時は標準入力から読む）
    #[arg(long)]
    pub payload: Option<PathBuf>,
}

/// `mailmatrix-validate`: 受信者リストを検証する
#[derive(Debug, Parser)]
#[command(name = "mailmatrix-validate")]
#[command(about = "Check that every recipient in a list has an email address", long_about = None)]
pub struct ValidateArgs {
    /// 受信者リストのパス（省略時は `MAILMATRIX_RECIPIENTS_FILE`）
    #[arg(long)]
    pub recipients: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_送信引数をパースできる() {
        let args = SendArgs::try_parse_from([
            "mailmatrix",
            "--recipients",
            "data/recipients.csv",
            "--template",
            "templates/welcome_email.html",
            "--subject",
            "Welcome!",
        ])
        .unwrap();

        assert_eq!(
            LocalBatchRequest::from(args),
            LocalBatchRequest {
                recipients_path: PathBuf::from("data/recipients.csv"),
                template_path:   PathBuf::from("templates/welcome_email.html"),
                subject:         "Welcome!".to_string(),
            }
        );
    }

    #[test]
    fn test_送信引数はすべて必須() {
        let result = SendArgs::try_parse_from([
            "mailmatrix",
            "--recipients",
            "data/recipients.csv",
            "--template",
            "templates/welcome_email.html",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_ペイロード省略時はnone() {
        let args = EventArgs::try_parse_from(["mailmatrix-event"]).unwrap();
        assert_eq!(args.payload, None);
    }

    #[test]
    fn test_検証対象のパスを指定できる() {
        let args =
            ValidateArgs::try_parse_from(["mailmatrix-validate", "--recipients", "list.csv"]).unwrap();
        assert_eq!(args.recipients, Some(PathBuf::from("list.csv")));
    }
}
