//! Batch processing: analyze a directory of extracted documents.
//!
//! Each `*.json` file in the input directory is an
//! [`ExtractedDocument`](crate::model::ExtractedDocument); its result is
//! written to the output directory under the same stem. Files are processed
//! in parallel with rayon by default, and a failure in one file never stops
//! the rest.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use rayon::prelude::*;

use crate::engine::{self, EngineConfig, LearnedClassifier};
use crate::error::{Error, Result};
use crate::model::DocumentResult;
use crate::output::{to_json, JsonFormat};

/// How often the resource monitor samples memory.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(200);

/// Options controlling a batch run.
pub struct BatchOptions {
    /// Engine configuration applied to every document
    pub config: EngineConfig,

    /// Optional learned classifier shared across workers
    pub model: Option<Box<dyn LearnedClassifier>>,

    /// Process files in parallel (default true)
    pub parallel: bool,

    /// JSON format for result files
    pub format: JsonFormat,

    /// Called after each file completes, with the file's stem and whether
    /// it succeeded. Used for progress reporting.
    pub on_file_done: Option<Box<dyn Fn(&str, bool) + Send + Sync>>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            model: None,
            parallel: true,
            format: JsonFormat::Pretty,
            on_file_done: None,
        }
    }
}

/// Summary of one batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Files analyzed and written
    pub files_processed: usize,
    /// Files skipped due to errors
    pub files_failed: usize,
    /// Total outline entries across all results
    pub headings_emitted: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
    /// Peak resident set size observed during the run, if the monitor
    /// could sample it
    pub peak_memory_bytes: Option<u64>,
}

/// Analyze every `*.json` document in `input_dir`, writing one result file
/// per input into `output_dir`.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport> {
    if !input_dir.is_dir() {
        return Err(Error::InvalidPath(format!(
            "not a directory: {}",
            input_dir.display()
        )));
    }
    fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    inputs.sort();

    let started = Instant::now();
    let monitor = ResourceMonitor::start();

    let processed = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let headings = AtomicUsize::new(0);

    let run_one = |path: &PathBuf| {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match process_file(path, output_dir, options) {
            Ok(result) => {
                processed.fetch_add(1, Ordering::Relaxed);
                headings.fetch_add(result.outline.len(), Ordering::Relaxed);
                if let Some(cb) = &options.on_file_done {
                    cb(&stem, true);
                }
            }
            Err(e) => {
                log::error!("skipping {}: {}", path.display(), e);
                failed.fetch_add(1, Ordering::Relaxed);
                if let Some(cb) = &options.on_file_done {
                    cb(&stem, false);
                }
            }
        }
    };

    if options.parallel {
        inputs.par_iter().for_each(run_one);
    } else {
        inputs.iter().for_each(run_one);
    }

    Ok(BatchReport {
        files_processed: processed.into_inner(),
        files_failed: failed.into_inner(),
        headings_emitted: headings.into_inner(),
        elapsed: started.elapsed(),
        peak_memory_bytes: monitor.stop(),
    })
}

/// Analyze one extracted-document file and write its result.
fn process_file(
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<DocumentResult> {
    let doc = crate::read_document(input)?;
    let result = engine::analyze(&doc, &options.config, options.model.as_deref());

    let stem = input
        .file_stem()
        .ok_or_else(|| Error::InvalidPath(format!("no file stem: {}", input.display())))?;
    let out_path = output_dir.join(stem).with_extension("json");
    fs::write(&out_path, to_json(&result, options.format)?)?;

    Ok(result)
}

/// Samples this process's resident set size on a background thread.
///
/// Sampling reads `/proc/self/statm`; on platforms or sandboxes where that
/// read fails the monitor stays silent and reports nothing.
pub struct ResourceMonitor {
    shutdown: Sender<()>,
    handle: thread::JoinHandle<()>,
    peak: std::sync::Arc<AtomicU64>,
}

impl ResourceMonitor {
    /// Start sampling.
    pub fn start() -> Self {
        let (shutdown, stop) = bounded::<()>(0);
        let peak = std::sync::Arc::new(AtomicU64::new(0));
        let shared = std::sync::Arc::clone(&peak);

        let handle = thread::spawn(move || loop {
            if let Some(rss) = read_rss_bytes() {
                shared.fetch_max(rss, Ordering::Relaxed);
            }
            // A closed or signaled channel ends the loop; a timeout means
            // take another sample.
            match stop.recv_timeout(SAMPLE_INTERVAL) {
                Ok(()) | Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
                Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            }
        });

        Self {
            shutdown,
            handle,
            peak,
        }
    }

    /// Stop sampling and return the peak RSS in bytes, if any sample
    /// succeeded.
    pub fn stop(self) -> Option<u64> {
        let _ = self.shutdown.send(());
        let _ = self.handle.join();

        match self.peak.load(Ordering::Relaxed) {
            0 => None,
            bytes => Some(bytes),
        }
    }
}

/// Current resident set size from `/proc/self/statm`, in bytes.
fn read_rss_bytes() -> Option<u64> {
    let statm = fs::read_to_string("/proc/self/statm").ok()?;
    let resident_pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(resident_pages * 4096)
}
