//! scatterline CLI — separate two colored point clusters with a max-margin
//! line and write the 2×2 report image.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use scatterline::{separate, Channel, SeparationConfig};

#[derive(Parser)]
#[command(name = "scatterline")]
#[command(about = "Find the maximum-margin line separating two colored point clusters in an image")]
#[command(version)]
struct Cli {
    /// Path to the input image (3-channel color).
    #[arg(long)]
    image: PathBuf,

    /// Path to write the 2×2 report (original, both masks, overlay).
    #[arg(long, default_value = "separated.png")]
    out: PathBuf,

    /// Channel whose dark dots mark class A.
    #[arg(long, value_enum, default_value_t = ChannelArg::Red)]
    class_a_channel: ChannelArg,

    /// Channel whose dark dots mark class B.
    #[arg(long, value_enum, default_value_t = ChannelArg::Blue)]
    class_b_channel: ChannelArg,

    /// Intensity below which a channel value counts as foreground.
    #[arg(long, default_value_t = 50)]
    threshold: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChannelArg {
    Red,
    Green,
    Blue,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Red => Channel::Red,
            ChannelArg::Green => Channel::Green,
            ChannelArg::Blue => Channel::Blue,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let mut config = SeparationConfig {
        class_a_channel: cli.class_a_channel.into(),
        class_b_channel: cli.class_b_channel.into(),
        ..SeparationConfig::default()
    };
    config.mask.threshold = cli.threshold;

    let image = image::open(&cli.image)
        .with_context(|| format!("failed to open image: {}", cli.image.display()))?
        .to_rgb8();

    let result = separate(&image, &config)?;

    println!(
        "separator: {:.6}·y + {:.6}·x + {:.6} = 0",
        result.separator.a, result.separator.b, result.separator.c
    );
    println!(
        "margin: {:.2} px across {} + {} points",
        result.separator.margin_width(),
        result.class_a.len(),
        result.class_b.len()
    );

    let report = result.panel_report(&image);
    report
        .save(&cli.out)
        .with_context(|| format!("failed to write report image: {}", cli.out.display()))?;
    println!("report written to {}", cli.out.display());

    Ok(())
}
