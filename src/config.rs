use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indoc::indoc;
use tracing::Level;

use crate::constants::{
    DEFAULT_CELL_HEIGHT_PX, DEFAULT_CELL_WIDTH_PX, DEFAULT_FLIP_DELAY_MS,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MISMATCH_DELAY_MS,
};
use crate::memory::{BoardSize, GameRules};
use crate::window::CellScale;

const AFTER_HELP: &str = indoc! {"
    Keys:
      m        open a memory game window
      c        close every window
      Ctrl+Q   quit

    Mouse:
      drag a window by its title bar, click [X] to close it,
      click cards to turn them over.
"};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "desk-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal desktop of draggable mini-app windows",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Memory board dimensions as ROWSxCOLUMNS. The card count must be even
    /// and from 4 to 1024.
    #[arg(long, value_name = "RxC", default_value = "4x4")]
    pub board: BoardSize,

    /// Counted turns allowed before a memory game is lost.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// How long a mismatched pair stays face up.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_MISMATCH_DELAY_MS)]
    pub mismatch_delay_ms: u64,

    /// Delay between turning a card over and its face showing.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_FLIP_DELAY_MS)]
    pub flip_delay_ms: u64,

    /// Pixels represented by one terminal column.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_WIDTH_PX)]
    pub cell_width: u32,

    /// Pixels represented by one terminal row.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_HEIGHT_PX)]
    pub cell_height: u32,

    /// Seed for reproducible card deals.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Append log output to this file. Without it logs are discarded while
    /// the desktop owns the terminal.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: Level::INFO,
        }
    }
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub board: BoardSize,
    pub rules: GameRules,
    pub scale: CellScale,
    pub seed: Option<u64>,
    pub log: LogConfig,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            board: BoardSize::default(),
            rules: GameRules::default(),
            scale: CellScale::default(),
            seed: None,
            log: LogConfig::default(),
        }
    }
}

impl TryFrom<&Cli> for DeskConfig {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.max_attempts == 0 {
            return Err("max-attempts must be at least 1".to_string());
        }
        if !(1..=200).contains(&cli.cell_width) || !(1..=200).contains(&cli.cell_height) {
            return Err("cell-width and cell-height must be between 1 and 200 pixels".to_string());
        }
        if cli.mismatch_delay_ms > 60_000 || cli.flip_delay_ms > 60_000 {
            return Err("delays must not exceed 60000 ms".to_string());
        }
        Ok(Self {
            board: cli.board,
            rules: GameRules {
                max_attempts: cli.max_attempts,
                flip_delay: Duration::from_millis(cli.flip_delay_ms),
                mismatch_delay: Duration::from_millis(cli.mismatch_delay_ms),
            },
            scale: CellScale::new(cli.cell_width, cli.cell_height),
            seed: cli.seed,
            log: LogConfig {
                file: cli.log_file.clone(),
                level: cli.log_level,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("desk-wm").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_constants() {
        let cli = parse(&[]).unwrap();
        let config = DeskConfig::try_from(&cli).unwrap();
        assert_eq!(config, DeskConfig::default());
        assert_eq!(config.rules.max_attempts, 15);
        assert_eq!(config.rules.mismatch_delay, Duration::from_millis(2250));
    }

    #[test]
    fn board_flag_is_validated_at_parse_time() {
        assert!(parse(&["--board", "3x3"]).is_err());
        assert!(parse(&["--board", "wide"]).is_err());
        assert!(parse(&["--board", "256x512"]).is_err());
        let cli = parse(&["--board", "2x3"]).unwrap();
        assert_eq!(cli.board.cards(), 6);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let cli = parse(&["--max-attempts", "0"]).unwrap();
        assert!(DeskConfig::try_from(&cli).is_err());
        let cli = parse(&["--cell-width", "0"]).unwrap();
        assert!(DeskConfig::try_from(&cli).is_err());
    }

    #[test]
    fn log_flags_carry_through() {
        let cli = parse(&["--log-file", "/tmp/desk.log", "--log-level", "trace", "--seed", "9"])
            .unwrap();
        let config = DeskConfig::try_from(&cli).unwrap();
        assert_eq!(config.log.level, Level::TRACE);
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/desk.log")));
        assert_eq!(config.seed, Some(9));
    }
}
