//! Command-line entrypoint for `sget`.
//!
//! Thin glue: parse arguments, merge them with the optional config file,
//! build the HTTP client and console observer, then hand everything to
//! the coordinator. Exits non-zero on failure.
use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use segmented_downloader::config::Settings;
use segmented_downloader::{Args, ConsoleObserver, DEFAULT_CONCURRENCY, downloader, utils};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load().unwrap_or_default();

    let threads = args.threads.or(settings.threads).unwrap_or(DEFAULT_CONCURRENCY);
    let output_dir = args
        .dir
        .or(settings.default_dir)
        .unwrap_or_else(|| ".".to_string());
    let filename = args
        .output
        .unwrap_or_else(|| utils::resource_name_from_url(&args.url));

    let mut output_path = PathBuf::from(&output_dir);
    output_path.push(&filename);

    if output_dir != "." {
        tokio::fs::create_dir_all(&output_dir).await?;
    }

    let client = reqwest::Client::builder()
        .user_agent("SegmentedDownloader/0.1")
        .connect_timeout(Duration::from_secs(30))
        .build()?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} parts")
            .unwrap()
            .progress_chars("=>-"),
    );
    let observer = Arc::new(ConsoleObserver { pb });

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n🛑 Received Ctrl+C. Aborting download...");
            signal_token.cancel();
        }
    });

    println!("Starting download for: {}", args.url);

    let final_path = downloader::download(
        &args.url,
        &output_path,
        threads,
        &client,
        observer,
        cancel_token,
    )
    .await?;

    if let Some(expected_hash) = args.verify_sha256 {
        let path = final_path.to_string_lossy().to_string();

        tokio::task::spawn_blocking(move || utils::verify_file_integrity(&path, &expected_hash))
            .await??;
    }

    println!("✅ Download completed: {}", final_path.display());
    Ok(())
}
