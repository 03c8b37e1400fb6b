//! # mailmatrix
//!
//! ローカルの受信者リストと HTML テンプレートから、受信者ごとにメールを送信する。
//!
//! ## 使用例
//!
//! ```bash
//! mailmatrix \
//!   --recipients data/recipients.csv \
//!   --template templates/welcome_email.html \
//!   --subject "Welcome to Mail-Matrix: Stream!"
//! ```
//!
//! 受信者ごとの送信失敗はログに出力し、終了コードには反映しない。
//! 設定・ファイル読み込み・パースの失敗のみ非ゼロで終了する。

use anyhow::Context as _;
use clap::Parser as _;
use mailmatrix_notifier::{
    app_builder,
    cli::SendArgs,
    config::NotifierConfig,
    usecase::{LocalBatchRequest, LocalBatchUseCase},
};
use mailmatrix_shared::observability::{TracingConfig, init_tracing};
use tracing::Instrument as _;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("mailmatrix"));

    let args = SendArgs::parse();
    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    let request = LocalBatchRequest::from(args);
    let span = tracing::info_span!(
        "local_batch",
        recipients = %request.recipients_path.display(),
        template = %request.template_path.display(),
    );

    async {
        let service = app_builder::build_notification_service(&config).await;
        let summary = LocalBatchUseCase::new(service).execute(&request).await?;

        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            "送信処理が完了しました"
        );
        Ok::<_, anyhow::Error>(())
    }
    .instrument(span)
    .await
}
