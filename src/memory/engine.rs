use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::deck::{BoardSize, Card, CardRef, deal};
use super::timer::{Generation, TimerQueue};
use crate::constants::{DEFAULT_FLIP_DELAY_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MISMATCH_DELAY_MS};
use crate::error::DeskResult;

/// Tunable limits of a memory game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Counted turns allowed; the turn that pushes the counter past this
    /// loses the game.
    pub max_attempts: u32,
    /// Delay between revealing a card and its face showing.
    pub flip_delay: Duration,
    /// How long a mismatched pair stays face up.
    pub mismatch_delay: Duration,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            flip_delay: Duration::from_millis(DEFAULT_FLIP_DELAY_MS),
            mismatch_delay: Duration::from_millis(DEFAULT_MISMATCH_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    OneRevealed(CardRef),
    /// A mismatched pair is on show; no input until it turns back.
    Resolving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won => Some("Congratulations. You win :)"),
            Outcome::Lost => Some("GAME OVER. YOU LOST :("),
        }
    }
}

/// What a mutation of the game did, for the board view to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The selection was not honored.
    Ignored,
    /// First card of a turn turned over.
    Revealed(CardRef),
    Matched {
        first: CardRef,
        second: CardRef,
        attempts: u32,
    },
    Mismatched {
        first: CardRef,
        second: CardRef,
        attempts: u32,
    },
    Won {
        attempts: u32,
    },
    Lost {
        attempts: u32,
    },
    /// A card's face became visible after the flip delay.
    FaceShown(CardRef),
    /// A mismatched pair started turning back.
    TurnedBack(CardRef, CardRef),
    /// The mismatched pair is hidden again and input is accepted.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    ShowFace(CardRef),
    TurnBack(CardRef, CardRef),
    Settle(CardRef, CardRef),
}

/// A single memory-matching game session and its turn state machine.
#[derive(Debug)]
pub struct MemoryGame {
    size: BoardSize,
    rules: GameRules,
    rng: StdRng,
    cards: Vec<Card>,
    turn: TurnState,
    attempts: u32,
    outcome: Outcome,
    generation: Generation,
    timers: TimerQueue<Timer>,
}

impl MemoryGame {
    pub fn new(size: BoardSize, rules: GameRules) -> Self {
        Self::with_rng(size, rules, StdRng::from_os_rng())
    }

    /// A game whose deals are reproducible from `seed`.
    pub fn seeded(size: BoardSize, rules: GameRules, seed: u64) -> Self {
        Self::with_rng(size, rules, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: BoardSize, rules: GameRules, rng: StdRng) -> Self {
        let mut game = Self {
            size,
            rules,
            rng,
            cards: Vec::new(),
            turn: TurnState::Idle,
            attempts: 0,
            outcome: Outcome::InProgress,
            generation: Generation::default(),
            timers: TimerQueue::new(),
        };
        game.deal(size);
        game
    }

    /// Start a fresh game on a `rows` x `columns` board.
    ///
    /// The board must hold an even number of cards, at least four; otherwise
    /// the current game is left untouched.
    pub fn start(&mut self, rows: u16, columns: u16) -> DeskResult<()> {
        let size = BoardSize::new(rows, columns)?;
        self.deal(size);
        Ok(())
    }

    /// Throw away the current session and deal again on the same board.
    /// Timers still pending from the old session become no-ops.
    pub fn restart(&mut self) {
        self.deal(self.size);
    }

    fn deal(&mut self, size: BoardSize) {
        self.size = size;
        self.cards = deal(size, &mut self.rng);
        self.turn = TurnState::Idle;
        self.attempts = 0;
        self.outcome = Outcome::InProgress;
        self.generation = self.generation.next();
        tracing::debug!(board = %size, generation = self.generation.0, "dealt memory game");
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn rules(&self) -> GameRules {
        self.rules
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, card: CardRef) -> Option<&Card> {
        self.cards.get(card.0)
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Footer text for the attempt counter.
    pub fn attempt_label(&self) -> String {
        format!("Attempt counter : {}", self.attempts)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn remaining_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.in_play()).count() / 2
    }

    pub fn accepts_input(&self) -> bool {
        !self.outcome.is_terminal() && self.turn != TurnState::Resolving
    }

    /// When the next pending timer is due, for the runner to schedule a
    /// redraw.
    pub fn next_timer_due(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    /// Pick `card`. Selections that can't be honored right now (mismatch on
    /// show, game over, card already matched or already picked this turn)
    /// return `Effect::Ignored` and change nothing.
    pub fn select_card(&mut self, card: CardRef, now: Instant) -> Effect {
        if !self.accepts_input() {
            return Effect::Ignored;
        }
        match self.cards.get(card.0) {
            Some(c) if c.in_play() && !c.revealed() => {}
            _ => return Effect::Ignored,
        }
        self.cards[card.0].reveal();
        self.timers
            .schedule(now, self.rules.flip_delay, self.generation, Timer::ShowFace(card));

        let TurnState::OneRevealed(first) = self.turn else {
            self.turn = TurnState::OneRevealed(card);
            return Effect::Revealed(card);
        };
        self.turn = TurnState::Resolving;
        self.attempts += 1;
        let attempts = self.attempts;

        if self.cards[first.0].face() == self.cards[card.0].face() {
            self.cards[first.0].set_matched();
            self.cards[card.0].set_matched();
            self.turn = TurnState::Idle;
            if self.cards.iter().all(Card::matched) {
                self.outcome = Outcome::Won;
                tracing::debug!(attempts, "memory game won");
                return Effect::Won { attempts };
            }
            if self.exceeded_attempts() {
                return self.lose();
            }
            return Effect::Matched {
                first,
                second: card,
                attempts,
            };
        }

        if self.exceeded_attempts() {
            return self.lose();
        }
        self.timers.schedule(
            now,
            self.rules.mismatch_delay,
            self.generation,
            Timer::TurnBack(first, card),
        );
        Effect::Mismatched {
            first,
            second: card,
            attempts,
        }
    }

    fn exceeded_attempts(&self) -> bool {
        self.attempts > self.rules.max_attempts
    }

    fn lose(&mut self) -> Effect {
        self.outcome = Outcome::Lost;
        self.turn = TurnState::Idle;
        tracing::debug!(attempts = self.attempts, "memory game lost");
        Effect::Lost {
            attempts: self.attempts,
        }
    }

    /// Run every timer due by `now`. Timers scheduled by an earlier session
    /// are dropped without touching the board.
    pub fn advance(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        loop {
            let due = self.timers.take_due(now);
            if due.is_empty() {
                break;
            }
            for scheduled in due {
                if scheduled.generation != self.generation {
                    tracing::trace!(
                        timer = ?scheduled.task,
                        stale = scheduled.generation.0,
                        current = self.generation.0,
                        "dropping stale timer"
                    );
                    continue;
                }
                if let Some(effect) = self.fire(scheduled.task, scheduled.due) {
                    effects.push(effect);
                }
            }
        }
        effects
    }

    fn fire(&mut self, timer: Timer, due: Instant) -> Option<Effect> {
        match timer {
            Timer::ShowFace(card) => {
                let c = self.cards.get_mut(card.0)?;
                if !c.revealed() {
                    return None;
                }
                c.show_face();
                Some(Effect::FaceShown(card))
            }
            Timer::TurnBack(a, b) => {
                if !self.pending_pair(a, b) {
                    return None;
                }
                self.cards[a.0].turn_back();
                self.cards[b.0].turn_back();
                self.timers
                    .schedule(due, self.rules.flip_delay, self.generation, Timer::Settle(a, b));
                Some(Effect::TurnedBack(a, b))
            }
            Timer::Settle(a, b) => {
                for card in [a, b] {
                    if let Some(c) = self.cards.get_mut(card.0)
                        && c.in_play()
                        && !c.revealed()
                    {
                        c.hide_face();
                    }
                }
                if self.turn != TurnState::Resolving {
                    return None;
                }
                self.turn = TurnState::Idle;
                Some(Effect::Settled)
            }
        }
    }

    fn pending_pair(&self, a: CardRef, b: CardRef) -> bool {
        [a, b].iter().all(|card| {
            self.cards
                .get(card.0)
                .is_some_and(|c| c.in_play() && c.revealed())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::deck::FaceId;
    use std::collections::BTreeMap;

    fn game(rows: u16, columns: u16) -> MemoryGame {
        MemoryGame::seeded(
            BoardSize::new(rows, columns).unwrap(),
            GameRules::default(),
            42,
        )
    }

    fn pairs(game: &MemoryGame) -> Vec<(CardRef, CardRef)> {
        let mut by_face: BTreeMap<FaceId, Vec<CardRef>> = BTreeMap::new();
        for (idx, card) in game.cards().iter().enumerate() {
            by_face.entry(card.face()).or_default().push(CardRef(idx));
        }
        by_face.into_values().map(|v| (v[0], v[1])).collect()
    }

    fn mismatch(game: &MemoryGame) -> (CardRef, CardRef) {
        let p = pairs(game);
        (p[0].0, p[1].0)
    }

    fn settle(game: &mut MemoryGame, now: Instant) -> Instant {
        let later = now + game.rules().mismatch_delay + game.rules().flip_delay;
        game.advance(later);
        later
    }

    #[test]
    fn first_pick_reveals_and_face_shows_after_delay() {
        let mut g = game(2, 2);
        let t0 = Instant::now();
        assert_eq!(g.select_card(CardRef(0), t0), Effect::Revealed(CardRef(0)));
        assert_eq!(g.turn(), TurnState::OneRevealed(CardRef(0)));
        assert!(g.card(CardRef(0)).unwrap().revealed());
        assert!(!g.card(CardRef(0)).unwrap().face_visible());

        let effects = g.advance(t0 + Duration::from_millis(250));
        assert_eq!(effects, vec![Effect::FaceShown(CardRef(0))]);
        assert!(g.card(CardRef(0)).unwrap().face_visible());
    }

    #[test]
    fn same_card_twice_is_ignored() {
        let mut g = game(2, 2);
        let t0 = Instant::now();
        g.select_card(CardRef(1), t0);
        assert_eq!(g.select_card(CardRef(1), t0), Effect::Ignored);
        assert_eq!(g.attempts(), 0);
    }

    #[test]
    fn out_of_range_card_is_ignored() {
        let mut g = game(2, 2);
        assert_eq!(g.select_card(CardRef(99), Instant::now()), Effect::Ignored);
        assert_eq!(g.turn(), TurnState::Idle);
    }

    #[test]
    fn matching_every_pair_wins_in_any_order() {
        let mut g = game(4, 4);
        let t0 = Instant::now();
        let mut ps = pairs(&g);
        ps.reverse();
        let last = ps.len() - 1;
        for (i, (a, b)) in ps.into_iter().enumerate() {
            g.select_card(b, t0);
            let effect = g.select_card(a, t0);
            if i == last {
                assert_eq!(effect, Effect::Won { attempts: 8 });
            } else {
                assert!(matches!(effect, Effect::Matched { .. }));
                assert_eq!(g.turn(), TurnState::Idle);
            }
        }
        assert_eq!(g.outcome(), Outcome::Won);
        assert_eq!(g.remaining_pairs(), 0);
        assert_eq!(g.select_card(CardRef(0), t0), Effect::Ignored);
    }

    #[test]
    fn matched_cards_leave_play_for_good() {
        let mut g = game(2, 2);
        let t0 = Instant::now();
        let (a, b) = pairs(&g)[0];
        g.select_card(a, t0);
        g.select_card(b, t0);
        assert!(g.card(a).unwrap().matched());
        assert_eq!(g.select_card(a, t0), Effect::Ignored);
    }

    #[test]
    fn attempt_counter_counts_turns_not_clicks() {
        let mut g = game(2, 2);
        let t0 = Instant::now();
        let (a, b) = mismatch(&g);
        g.select_card(a, t0);
        assert_eq!(g.attempts(), 0);
        g.select_card(b, t0);
        assert_eq!(g.attempts(), 1);
        assert_eq!(g.attempt_label(), "Attempt counter : 1");
    }

    #[test]
    fn mismatch_blocks_input_until_pair_turns_back() {
        let mut g = game(2, 2);
        let t0 = Instant::now();
        let (a, b) = mismatch(&g);
        g.select_card(a, t0);
        assert!(matches!(g.select_card(b, t0), Effect::Mismatched { .. }));
        assert_eq!(g.turn(), TurnState::Resolving);
        let other = (0..4).map(CardRef).find(|c| *c != a && *c != b).unwrap();
        assert_eq!(g.select_card(other, t0), Effect::Ignored);

        let turned = g.advance(t0 + g.rules().mismatch_delay);
        assert!(turned.contains(&Effect::TurnedBack(a, b)));
        assert!(!g.card(a).unwrap().revealed());
        assert_eq!(g.turn(), TurnState::Resolving);

        let settled = g.advance(t0 + g.rules().mismatch_delay + g.rules().flip_delay);
        assert_eq!(settled, vec![Effect::Settled]);
        assert_eq!(g.turn(), TurnState::Idle);
        assert!(!g.card(a).unwrap().face_visible());
        assert_eq!(g.select_card(a, t0), Effect::Revealed(a));
    }

    #[test]
    fn large_time_jump_runs_chained_timers() {
        let mut g = game(2, 2);
        let t0 = Instant::now();
        let (a, b) = mismatch(&g);
        g.select_card(a, t0);
        g.select_card(b, t0);
        g.advance(t0 + Duration::from_secs(60));
        assert_eq!(g.turn(), TurnState::Idle);
    }

    #[test]
    fn sixteenth_counted_turn_loses() {
        let mut g = game(2, 2);
        let mut now = Instant::now();
        let (a, b) = mismatch(&g);
        for turn in 1..=15 {
            g.select_card(a, now);
            let effect = g.select_card(b, now);
            assert_eq!(
                effect,
                Effect::Mismatched {
                    first: a,
                    second: b,
                    attempts: turn
                }
            );
            now = settle(&mut g, now);
        }
        g.select_card(a, now);
        assert_eq!(g.select_card(b, now), Effect::Lost { attempts: 16 });
        assert_eq!(g.outcome(), Outcome::Lost);

        now = settle(&mut g, now);
        for card in 0..4 {
            assert_eq!(g.select_card(CardRef(card), now), Effect::Ignored);
        }
    }

    #[test]
    fn restart_mid_resolving_resets_and_ignores_stale_timers() {
        let mut g = game(2, 2);
        let t0 = Instant::now();
        let (a, b) = mismatch(&g);
        g.select_card(a, t0);
        g.select_card(b, t0);
        let old_generation = g.generation();

        g.restart();
        assert_eq!(g.turn(), TurnState::Idle);
        assert_eq!(g.attempts(), 0);
        assert_eq!(g.outcome(), Outcome::InProgress);
        assert_ne!(g.generation(), old_generation);
        assert!(g.cards().iter().all(|c| c.in_play() && !c.revealed()));

        let t1 = t0 + Duration::from_millis(10);
        let first = g.select_card(CardRef(0), t1);
        assert_eq!(first, Effect::Revealed(CardRef(0)));

        // Old flip-back and face timers fire now but must not touch the new
        // session.
        let effects = g.advance(t0 + Duration::from_millis(2300));
        assert!(!effects.iter().any(|e| matches!(e, Effect::TurnedBack(..))));
        assert_eq!(g.turn(), TurnState::OneRevealed(CardRef(0)));
        assert!(g.card(CardRef(0)).unwrap().revealed());
    }

    #[test]
    fn start_rejects_bad_board_and_keeps_game() {
        let mut g = game(2, 2);
        assert!(g.start(3, 3).is_err());
        assert_eq!(g.cards().len(), 4);
        g.start(2, 3).unwrap();
        assert_eq!(g.cards().len(), 6);
        assert_eq!(g.size().columns(), 3);
    }

    #[test]
    fn restart_reshuffles() {
        let mut g = game(4, 4);
        let before: Vec<FaceId> = g.cards().iter().map(Card::face).collect();
        let mut changed = false;
        for _ in 0..5 {
            g.restart();
            let after: Vec<FaceId> = g.cards().iter().map(Card::face).collect();
            changed |= after != before;
        }
        assert!(changed);
    }

    #[test]
    fn configurable_attempt_limit() {
        let rules = GameRules {
            max_attempts: 1,
            ..GameRules::default()
        };
        let mut g = MemoryGame::seeded(BoardSize::new(2, 2).unwrap(), rules, 3);
        let t0 = Instant::now();
        let (a, b) = mismatch(&g);
        g.select_card(a, t0);
        g.select_card(b, t0);
        let t1 = settle(&mut g, t0);
        g.select_card(a, t1);
        assert_eq!(g.select_card(b, t1), Effect::Lost { attempts: 2 });
    }
}
