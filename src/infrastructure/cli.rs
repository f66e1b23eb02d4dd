use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::domain::config::{FoldConfig, IndicatorMode, TipGravity};
use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 30.0
    )]
    pub frame_rate: f64,

    /// Text file to display instead of the built-in sample
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Number of lines shown while collapsed
    #[arg(short = 'n', long, value_name = "LINES")]
    pub max_lines: Option<usize>,

    /// Where the fold indicator goes: `end` or `start`
    #[arg(short, long, value_name = "GRAVITY")]
    pub gravity: Option<TipGravity>,

    /// Draw the fold indicator as a text label instead of a chevron
    #[arg(long)]
    pub text_tip: bool,
}

impl Cli {
    /// Overrides configured values with the ones given on the command line.
    pub fn apply(&self, fold: &mut FoldConfig) {
        if let Some(max_lines) = self.max_lines {
            fold.max_lines = max_lines;
        }
        if let Some(gravity) = self.gravity {
            fold.gravity = gravity;
        }
        if self.text_tip {
            fold.indicator = IndicatorMode::Text;
            fold.show_tip_after_expand = true;
        }
    }

    /// Contents of `--file`, or `fallback` when none was given.
    pub fn read_text(&self, fallback: &str) -> Result<String> {
        match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display())),
            None => Ok(fallback.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["foldtext"]);
        let mut fold = FoldConfig::default();
        cli.apply(&mut fold);

        assert_eq!(cli.tick_rate, 4.0);
        assert_eq!(cli.frame_rate, 30.0);
        assert_eq!(fold, FoldConfig::default());
        assert_eq!(cli.read_text("sample").unwrap(), "sample");
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["foldtext", "-n", "2", "--gravity", "start", "--text-tip"]);
        let mut fold = FoldConfig::default();
        cli.apply(&mut fold);

        assert_eq!(fold.max_lines, 2);
        assert_eq!(fold.gravity, TipGravity::Start);
        assert_eq!(fold.indicator, IndicatorMode::Text);
        assert!(fold.show_tip_after_expand);
    }

    #[test]
    fn test_unknown_gravity_is_rejected() {
        assert!(Cli::try_parse_from(["foldtext", "--gravity", "middle"]).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cli = Cli::parse_from(["foldtext", "--file", "/nonexistent/foldtext.txt"]);
        assert!(cli.read_text("sample").is_err());
    }
}
