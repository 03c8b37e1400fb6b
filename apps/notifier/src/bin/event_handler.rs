//! # mailmatrix-event
//!
//! S3 イベント通知の JSON を処理し、`{"statusCode": ..., "body": ...}` を標準出力に書く。
//!
//! ```bash
//! mailmatrix-event --payload event.json
//! cat event.json | mailmatrix-event
//! ```
//!
//! ステータスが 200 の場合のみ終了コード 0 で終了する。

use std::{io::Read as _, process::ExitCode};

use anyhow::Context as _;
use clap::Parser as _;
use mailmatrix_notifier::{
    app_builder,
    cli::EventArgs,
    config::NotifierConfig,
    handler::handle_raw_payload,
    usecase::StorageEventUseCase,
};
use mailmatrix_shared::observability::{TracingConfig, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("mailmatrix-event"));

    let args = EventArgs::parse();
    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    let raw = match &args.payload {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("ペイロードの読み込みに失敗しました: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("標準入力からの読み込みに失敗しました")?;
            buf
        }
    };

    let usecase = StorageEventUseCase::new(
        app_builder::build_object_store(&config).await,
        app_builder::build_notification_service(&config).await,
        config.notification_kind,
    );

    let response = handle_raw_payload(&usecase, &raw).await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
