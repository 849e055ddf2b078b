//! Command-line argument definitions for the `sget` binary.
use clap::Parser;

/// A segmented, concurrent file downloader.
///
/// Splits a remote file into byte-range chunks, downloads them in
/// parallel, and stitches the parts back together in order.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The URL of the file to download.
    #[arg(short, long)]
    pub url: String,

    /// The name of the output file. Defaults to the name in the URL.
    #[arg(short, long)]
    pub output: Option<String>,

    /// The directory to save the file in. Defaults to the current directory.
    #[arg(short = 'd', long)]
    pub dir: Option<String>,

    /// The number of concurrent range requests to use.
    #[arg(short = 't', long)]
    pub threads: Option<u8>,

    /// An optional SHA-256 hash to verify file integrity after download.
    #[arg(long)]
    pub verify_sha256: Option<String>,
}
