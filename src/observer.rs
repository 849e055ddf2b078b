//! Observability port for the download pipeline.
//!
//! The coordinator never configures logging itself; callers inject an
//! observer and own its lifecycle. The CLI wires up a console observer
//! backed by an indicatif bar; tests pass a hidden bar.
use indicatif::ProgressBar;

/// Receives coarse phase events from a download in progress.
pub trait DownloadObserver: Send + Sync {
    /// Fan-out is about to begin with `total_chunks` concurrent fetches.
    fn started(&self, total_chunks: u64);

    /// One chunk has been fully fetched into its part file.
    fn chunk_done(&self, index: usize);

    /// A phase transition or other human-facing note.
    fn message(&self, text: &str);

    /// The download reached a terminal state.
    fn finish(&self);
}

/// Console observer rendering one tick per completed chunk.
pub struct ConsoleObserver {
    pub pb: ProgressBar,
}

impl DownloadObserver for ConsoleObserver {
    fn started(&self, total_chunks: u64) {
        self.pb.set_length(total_chunks);
        self.pb.set_message("Downloading");
    }

    fn chunk_done(&self, _index: usize) {
        self.pb.inc(1);
    }

    fn message(&self, text: &str) {
        // println through the bar so the bar itself stays intact
        self.pb.println(text);
    }

    fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}
