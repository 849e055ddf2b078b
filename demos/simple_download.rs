use indicatif::{ProgressBar, ProgressStyle};
use segmented_downloader::observer::ConsoleObserver;
use segmented_downloader::{downloader, utils};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration
    let url = "https://proof.ovh.net/files/10Mb.dat";
    let threads = 6;
    let output_dir = ".";

    println!("Starting example download...");
    println!("URL: {}", url);

    // 1. Setup a robust HTTP Client
    let client = reqwest::Client::builder()
        .user_agent("SegmentedDownloader-Example/0.1")
        .connect_timeout(Duration::from_secs(30))
        .build()?;

    // 2. Prepare the output path from the URL
    let filename = utils::resource_name_from_url(url);
    let mut output_path = PathBuf::from(output_dir);
    output_path.push(&filename);

    // 3. Setup UI (one tick per finished part)
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} parts")
            .unwrap()
            .progress_chars("=>-"),
    );
    let observer = Arc::new(ConsoleObserver { pb });

    // 4. Run the whole pipeline: probe, plan, fetch, merge
    let final_path = downloader::download(
        url,
        &output_path,
        threads,
        &client,
        observer,
        CancellationToken::new(),
    )
    .await?;

    println!("✅ Download completed successfully: {}", final_path.display());
    Ok(())
}
