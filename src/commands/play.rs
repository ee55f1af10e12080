//! Play command handler

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use scanswitch::{
    Bitmap, Carousel, Config, Driver, FileStore, Frame, ImageStore, Index, PanelState,
    SyntheticStore,
};

use super::load_config;
use crate::cli::PlayArgs;

/// Edge length of generated images.
const SYNTHETIC_SIZE: u32 = 64;

/// How often the frame loop re-checks the interrupt flag.
const INTERRUPT_POLL: Duration = Duration::from_millis(50);

/// The parts of a frame the terminal output needs.
struct FrameSummary {
    first_visible: Index,
    missing: Vec<(Index, String)>,
}

impl FrameSummary {
    fn of(frame: &Frame<Bitmap>) -> Self {
        let missing = [&frame.left, &frame.right]
            .into_iter()
            .filter_map(|panel| match panel {
                PanelState::Missing { index, error } => Some((*index, error.to_string())),
                _ => None,
            })
            .collect();
        Self {
            first_visible: frame.first_visible,
            missing,
        }
    }
}

/// Play a directory or a synthetic image set.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: PlayArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid options: {}", e))?;

    match (args.synthetic, args.dir) {
        (Some(count), _) => {
            let store = SyntheticStore::new(SYNTHETIC_SIZE, SYNTHETIC_SIZE);
            run(store, SyntheticStore::ids(count), &config, args.frames)
        }
        (None, Some(dir)) => {
            let store = FileStore::new(dir);
            let ids = store.scan()?;
            if ids.is_empty() {
                anyhow::bail!("No images found in {}", store.root().display());
            }
            run(store, ids, &config, args.frames)
        }
        (None, None) => anyhow::bail!("Specify an image directory or --synthetic <N>"),
    }
}

fn apply_overrides(config: &mut Config, args: &PlayArgs) {
    if let Some(capacity) = args.capacity {
        config.cache.capacity = capacity;
    }
    if let Some(step) = args.step {
        config.carousel.step = step;
    }
    if let Some(width) = args.width {
        config.carousel.width = width;
    }
}

#[cfg(not(tarpaulin_include))]
fn run<S>(store: S, ids: Vec<String>, config: &Config, frames: Option<u64>) -> Result<()>
where
    S: ImageStore<Image = Bitmap>,
{
    let carousel = Arc::new(Carousel::new(
        store,
        config.cache.capacity,
        config.carousel_settings(),
    ));
    carousel
        .set_data(ids.clone())
        .context("Failed to load the first image")?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl-C handler")?;

    let (tx, rx) = channel::<FrameSummary>();
    carousel.start();
    let driver = Driver::spawn(Arc::clone(&carousel), move |frame: &Frame<Bitmap>| {
        let _ = tx.send(FrameSummary::of(frame));
    })
    .context("Failed to start the carousel")?;

    let count = present_frames(&rx, &interrupted, &ids, frames);

    driver.stop();
    carousel.stop();
    print_summary(&carousel, ids.len(), count);
    Ok(())
}

/// Print frame activity until the frame limit, an interrupt, or the
/// driver going away. Returns the number of frames seen.
fn present_frames(
    rx: &Receiver<FrameSummary>,
    interrupted: &AtomicBool,
    ids: &[String],
    frames: Option<u64>,
) -> u64 {
    let mut shown: Option<Index> = None;
    let mut reported = HashSet::new();
    let mut count: u64 = 0;

    while !interrupted.load(Ordering::SeqCst) {
        let summary = match rx.recv_timeout(INTERRUPT_POLL) {
            Ok(summary) => summary,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        count += 1;

        if shown != Some(summary.first_visible) {
            shown = Some(summary.first_visible);
            let id = ids
                .get(summary.first_visible)
                .map(String::as_str)
                .unwrap_or("?");
            println!("[{:>6}] showing #{} {}", count, summary.first_visible, id);
        }
        for (index, error) in summary.missing {
            if reported.insert(index) {
                eprintln!("[{:>6}] image #{} unavailable: {}", count, index, error);
            }
        }

        if frames.is_some_and(|limit| count >= limit) {
            break;
        }
    }
    count
}

fn print_summary<S: ImageStore>(carousel: &Carousel<S>, images: usize, frames: u64) {
    let cache = carousel.cache();
    let cache_stats = cache.stats();
    let loader_stats = carousel.loader_stats();

    println!();
    println!("Played {} frames over {} images", frames, images);
    println!(
        "Cache:  {}/{} entries, {} hits, {} misses, {} inserts, {} evictions",
        cache.len(),
        cache.capacity(),
        cache_stats.hits,
        cache_stats.misses,
        cache_stats.inserts,
        cache_stats.evictions
    );
    println!(
        "Loader: {} sync loads ({} failed), {} background decodes ({} failed), {} coalesced, {} skipped",
        loader_stats.sync_loads,
        loader_stats.sync_failures,
        loader_stats.async_decodes,
        loader_stats.async_failures,
        loader_stats.coalesced,
        loader_stats.skipped
    );
}
