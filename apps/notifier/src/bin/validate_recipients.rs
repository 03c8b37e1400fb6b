//! # mailmatrix-validate
//!
//! 受信者リストを読み込み、メールアドレスが空の受信者がいないか検証する。
//!
//! ```bash
//! mailmatrix-validate --recipients data/recipients.csv
//! ```

use anyhow::Context as _;
use clap::Parser as _;
use mailmatrix_domain::recipient::validate_recipients;
use mailmatrix_notifier::{
    cli::ValidateArgs,
    config::NotifierConfig,
    usecase::load_local_recipients,
};
use mailmatrix_shared::observability::{TracingConfig, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("mailmatrix-validate"));

    let args = ValidateArgs::parse();
    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;
    let path = args.recipients.unwrap_or(config.default_recipients_file);

    let recipients = load_local_recipients(&path).await?;
    validate_recipients(&recipients)
        .with_context(|| format!("受信者リストが不正です: {}", path.display()))?;

    tracing::debug!(count = recipients.len(), path = %path.display(), "受信者リストを検証しました");
    println!("All recipients are valid.");
    Ok(())
}
