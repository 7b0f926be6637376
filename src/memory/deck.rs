use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{DEFAULT_BOARD, MAX_BOARD_CARDS};
use crate::error::{DeskError, DeskResult};

/// Identifies the picture on a card's face. Two cards share each face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub u16);

impl FaceId {
    /// Asset path the face was drawn from on the web desktop.
    pub fn image_path(self) -> String {
        format!("/images/image{}.jpg", self.0)
    }

    /// Short glyph used when rendering the face in a terminal cell.
    pub fn glyph(self) -> char {
        const GLYPHS: &[char] = &[
            '♠', '♥', '♦', '♣', '★', '☀', '☂', '♪', '☘', '⚓', '✈', '☕', '⚑', '✿', '☯', '♞',
        ];
        match GLYPHS.get(self.0 as usize) {
            Some(glyph) => *glyph,
            None => char::from_digit(u32::from(self.0) % 36, 36).unwrap_or('?'),
        }
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image{}", self.0)
    }
}

/// Stable handle to a card: its board position, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardRef(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    rows: u16,
    columns: u16,
}

impl BoardSize {
    /// Validate a board: the card count must be even, at least 4 and at
    /// most `MAX_BOARD_CARDS`.
    pub fn new(rows: u16, columns: u16) -> DeskResult<Self> {
        let cards = u32::from(rows) * u32::from(columns);
        if !(4..=MAX_BOARD_CARDS).contains(&cards) || cards % 2 != 0 {
            return Err(DeskError::InvalidBoard { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn cards(&self) -> usize {
        usize::from(self.rows) * usize::from(self.columns)
    }

    pub fn pairs(&self) -> usize {
        self.cards() / 2
    }

    pub fn card_at(&self, row: u16, column: u16) -> Option<CardRef> {
        (row < self.rows && column < self.columns)
            .then(|| CardRef(usize::from(row) * usize::from(self.columns) + usize::from(column)))
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        let (rows, columns) = DEFAULT_BOARD;
        Self { rows, columns }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

impl std::str::FromStr for BoardSize {
    type Err = DeskError;

    /// Parse `"RxC"`, e.g. `"4x4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DeskError::InvalidBoard {
            rows: 0,
            columns: 0,
        };
        let (rows, columns) = s
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let rows = rows.trim().parse::<u16>().map_err(|_| invalid())?;
        let columns = columns.trim().parse::<u16>().map_err(|_| invalid())?;
        Self::new(rows, columns)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    face: FaceId,
    revealed: bool,
    face_visible: bool,
    in_play: bool,
}

impl Card {
    fn new(face: FaceId) -> Self {
        Self {
            face,
            revealed: false,
            face_visible: false,
            in_play: true,
        }
    }

    pub fn face(&self) -> FaceId {
        self.face
    }

    /// Turned face up (or turning).
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// The face picture is showing. Lags `revealed` by the flip delay.
    pub fn face_visible(&self) -> bool {
        self.face_visible
    }

    /// Still waiting to be matched.
    pub fn in_play(&self) -> bool {
        self.in_play
    }

    pub fn matched(&self) -> bool {
        !self.in_play
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn show_face(&mut self) {
        self.face_visible = true;
    }

    pub(crate) fn turn_back(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn hide_face(&mut self) {
        self.face_visible = false;
    }

    pub(crate) fn set_matched(&mut self) {
        self.in_play = false;
    }
}

/// Build a shuffled deck for `size`: every face appears on exactly two cards.
pub fn deal<R: Rng + ?Sized>(size: BoardSize, rng: &mut R) -> Vec<Card> {
    // BoardSize caps the card count, so the pair count always fits.
    let pairs = u16::try_from(size.pairs()).unwrap_or(u16::MAX);
    let mut faces: Vec<FaceId> = (0..pairs)
        .flat_map(|face| [FaceId(face), FaceId(face)])
        .collect();
    faces.shuffle(rng);
    faces.into_iter().map(Card::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    #[test]
    fn board_size_rejects_odd_and_tiny_boards() {
        assert!(BoardSize::new(3, 3).is_err());
        assert!(BoardSize::new(1, 2).is_err());
        assert!(BoardSize::new(0, 4).is_err());
        assert!(BoardSize::new(2, 2).is_ok());
        assert!(BoardSize::new(1, 4).is_ok());
    }

    #[test]
    fn oversized_boards_are_rejected() {
        assert!(BoardSize::new(32, 32).is_ok());
        assert!(BoardSize::new(32, 34).is_err());
        assert!(BoardSize::new(256, 512).is_err());
        assert!(BoardSize::new(u16::MAX, u16::MAX - 1).is_err());
        assert!("256x512".parse::<BoardSize>().is_err());
    }

    #[test]
    fn largest_board_deals_every_card() {
        let size = BoardSize::new(32, 32).unwrap();
        let cards = deal(size, &mut StdRng::seed_from_u64(1));
        assert_eq!(cards.len(), size.cards());
        let mut counts: BTreeMap<FaceId, usize> = BTreeMap::new();
        for card in &cards {
            *counts.entry(card.face()).or_default() += 1;
        }
        assert_eq!(counts.len(), size.pairs());
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn board_size_parses_rows_by_columns() {
        let size: BoardSize = "4x6".parse().unwrap();
        assert_eq!((size.rows(), size.columns()), (4, 6));
        assert!("4by4".parse::<BoardSize>().is_err());
        assert!("3x3".parse::<BoardSize>().is_err());
    }

    #[test]
    fn card_at_is_row_major() {
        let size = BoardSize::new(2, 3).unwrap();
        assert_eq!(size.card_at(1, 2), Some(CardRef(5)));
        assert_eq!(size.card_at(2, 0), None);
    }

    #[test]
    fn every_face_dealt_exactly_twice() {
        let mut rng = StdRng::seed_from_u64(7);
        for (rows, columns) in [(2, 2), (4, 4), (3, 4), (6, 6)] {
            let size = BoardSize::new(rows, columns).unwrap();
            let deck = deal(size, &mut rng);
            assert_eq!(deck.len(), size.cards());
            let mut counts: BTreeMap<FaceId, usize> = BTreeMap::new();
            for card in &deck {
                *counts.entry(card.face()).or_default() += 1;
            }
            assert_eq!(counts.len(), size.pairs());
            assert!(counts.values().all(|&n| n == 2));
            assert!(deck.iter().all(|c| c.in_play() && !c.revealed()));
        }
    }

    #[test]
    fn shuffle_spreads_faces_evenly() {
        // Face 0 should land in each slot of a 2x4 board about 1/4 of the
        // time (two copies over eight slots).
        let size = BoardSize::new(2, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(2021);
        let runs = 20_000;
        let mut hits = [0usize; 8];
        for _ in 0..runs {
            for (slot, card) in deal(size, &mut rng).iter().enumerate() {
                if card.face() == FaceId(0) {
                    hits[slot] += 1;
                }
            }
        }
        let expected = runs as f64 / 4.0;
        for count in hits {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "slot count {count} too far from {expected}");
        }
    }

    #[test]
    fn glyphs_cover_default_board() {
        let glyphs: std::collections::BTreeSet<char> = (0..8).map(|f| FaceId(f).glyph()).collect();
        assert_eq!(glyphs.len(), 8);
        assert_eq!(FaceId(3).image_path(), "/images/image3.jpg");
    }
}
