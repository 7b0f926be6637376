//! Shared crate-wide constants.

/// Maximum number of windows that may be live at once, across all kinds.
pub const MAX_LIVE_WINDOWS: usize = 125;

/// Pixels added to both cascade offsets for every new window, and removed
/// again when a window closes.
pub const CASCADE_STEP_PX: i32 = 50;

/// Once the top cascade offset grows past this value it wraps back to 0.
///
/// Units: pixels. The comparison is strict, so a window may still be placed
/// at exactly this offset.
pub const CASCADE_TOP_CEILING_PX: i32 = 250;

/// Once the left cascade offset reaches this value it wraps back to 0.
///
/// Units: pixels. Unlike the top offset the comparison is inclusive.
pub const CASCADE_LEFT_CEILING_PX: i32 = 1250;

/// Depth assigned to the first window raised in a session.
pub const DEPTH_BASE: u32 = 1000;

/// Highest depth handed out before the counter wraps back to `DEPTH_BASE`.
pub const DEPTH_CEILING: u32 = 9999;

/// Number of counted turns a memory game tolerates; the turn after this one
/// loses the game.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// Delay between revealing a card and its face becoming visible.
pub const DEFAULT_FLIP_DELAY_MS: u64 = 250;

/// How long a mismatched pair stays face up before turning back.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 2250;

/// Default memory board dimensions (rows, columns).
pub const DEFAULT_BOARD: (u16, u16) = (4, 4);

/// Largest card count a memory board may hold.
pub const MAX_BOARD_CARDS: u32 = 1024;

/// Default memory game window size in pixels (width, height).
pub const MEMORY_WINDOW_SIZE_PX: (u32, u32) = (450, 485);

/// Horizontal pixels represented by one terminal column.
pub const DEFAULT_CELL_WIDTH_PX: u32 = 10;

/// Vertical pixels represented by one terminal row.
pub const DEFAULT_CELL_HEIGHT_PX: u32 = 20;

/// Minimum number of visible pixels a dropped window keeps inside its drop
/// surface so the user can grab its chrome again.
pub const MIN_VISIBLE_MARGIN_PX: i32 = 40;

/// Message shown when a window-open request is refused.
pub const CAPACITY_NOTICE: &str = "You can create a maximum of 125 windows per session.";
