//! CLI definitions for scanswitch
//!
//! The clap structure lives here, separate from main.rs, so the dispatch
//! logic stays small.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("VERGEN_GIT_SHA"));
#[cfg(feature = "release")]
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "scanswitch")]
#[command(about = "Scroll through a sequence of images with a bounded, prefetching image cache")]
#[command(
    long_about = "scanswitch - headless image carousel.

Images scroll past a moving divider, one step per tick. The image about to be
drawn is decoded on demand; the one after it is prefetched in the background.
At most `cache.capacity` decoded images are kept; the least recently used one
is dropped first.

QUICK START:
    scanswitch play ~/Pictures            Play the images in a directory
    scanswitch play --synthetic 6         Play six generated images
    scanswitch config show                Show the effective configuration"
)]
#[command(version = VERSION)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Log cache and loader activity
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a sequence of images
    #[command(long_about = "Play a sequence of images through the carousel.

Without --frames, playback runs until interrupted with Ctrl-C. A summary of
cache and loader activity is printed at the end.

EXAMPLES:
    scanswitch play ./shots                    Play every image in ./shots
    scanswitch play ./shots --frames 500       Stop after 500 frames
    scanswitch play --synthetic 4 --step 40    Fast scroll over generated images
    scanswitch play ./shots --capacity 3       Keep at most three images decoded")]
    Play(PlayArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
pub struct PlayArgs {
    /// Directory containing the images to play
    #[arg(required_unless_present = "synthetic", conflicts_with = "synthetic")]
    pub dir: Option<PathBuf>,

    /// Play N generated solid-colour images instead of a directory
    #[arg(long, value_name = "N")]
    pub synthetic: Option<usize>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Override cache.capacity
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Override carousel.step
    #[arg(long)]
    pub step: Option<u32>,

    /// Override carousel.width
    #[arg(long)]
    pub width: Option<u32>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
