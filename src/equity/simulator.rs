//! Monte Carlo equity estimation.
//!
//! Trials are split into fixed-size batches. Each batch gets its own `StdRng`
//! derived from `(base_seed, batch_index)` and produces integer win/tie
//! counters, which are summed. The estimate therefore depends only on the
//! base seed, never on how rayon schedules the batches.

use log::{trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use crate::cards::{ensure_distinct, Card, Deck, HandClass, HandEvaluator, HandRanker, HoleCards};
use crate::config::SimulationConfig;
use crate::error::CoreError;
use crate::range::OpponentRange;

/// Equity reported when the inputs leave nothing to simulate.
pub const NEUTRAL_EQUITY: f64 = 50.0;

/// Who hero is up against.
#[derive(Debug, Clone, Copy)]
pub enum OpponentSpec<'a> {
    /// `n` opponents holding uniformly random cards.
    Uniform(usize),
    /// One opponent whose holding follows a weighted range.
    Range(&'a OpponentRange),
}

/// Result of one simulation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityEstimate {
    /// Win percentage with ties counted as half (0-100).
    pub equity: f64,
    /// Trials actually run (fewer than requested if the time budget ran out).
    pub trials_run: u32,
    /// True when the neutral default was returned instead of a simulation.
    pub neutral: bool,
}

impl EquityEstimate {
    fn neutral() -> Self {
        Self {
            equity: NEUTRAL_EQUITY,
            trials_run: 0,
            neutral: true,
        }
    }
}

/// Win/tie counters for a group of trials.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    wins: u64,
    ties: u64,
    trials: u64,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }

    fn equity(&self) -> f64 {
        if self.trials == 0 {
            return NEUTRAL_EQUITY;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / self.trials as f64 * 100.0
    }
}

/// Opponent combos with a cumulative weight table for inverse-CDF sampling.
struct ComboTable {
    combos: Vec<HoleCards>,
    cumulative: Vec<f64>,
}

impl ComboTable {
    /// Expand every class above `min_weight` into its live combos.
    fn build(range: &OpponentRange, dead_mask: u64, min_weight: f64) -> Self {
        let mut combos = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0;

        for wh in range.iter().filter(|wh| wh.weight > min_weight) {
            for combo in wh.class.live_combos(dead_mask) {
                total += wh.weight;
                combos.push(combo);
                cumulative.push(total);
            }
        }

        Self { combos, cumulative }
    }

    fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> HoleCards {
        let target = rng.gen::<f64>() * self.total();
        let index = self
            .cumulative
            .partition_point(|&c| c <= target)
            .min(self.combos.len() - 1);
        self.combos[index]
    }
}

/// Prepared opponent model for one simulation call.
enum Opponents {
    Uniform(usize),
    Range(ComboTable),
}

/// Monte Carlo equity simulator over a pluggable hand ranker.
#[derive(Debug, Clone)]
pub struct EquitySimulator<E: HandRanker = HandEvaluator> {
    evaluator: E,
    config: SimulationConfig,
}

impl EquitySimulator<HandEvaluator> {
    /// Simulator using the built-in evaluator.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_evaluator(HandEvaluator::new(), config)
    }
}

impl Default for EquitySimulator<HandEvaluator> {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl<E: HandRanker> EquitySimulator<E> {
    /// Simulator using an external hand ranker (lower rank = stronger).
    pub fn with_evaluator(evaluator: E, config: SimulationConfig) -> Self {
        Self { evaluator, config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Hero's equity (0-100) over `trials` samples.
    ///
    /// # Errors
    /// Returns an error if hero does not hold exactly two cards, the board
    /// has more than five cards, or any card appears twice.
    pub fn equity<R: Rng + ?Sized>(
        &self,
        hero: &[Card],
        board: &[Card],
        opponents: OpponentSpec<'_>,
        trials: u32,
        rng: &mut R,
    ) -> Result<f64, CoreError> {
        self.estimate(hero, board, opponents, trials, rng)
            .map(|e| e.equity)
    }

    /// Like [`equity`](Self::equity) but also reports how many trials ran.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        hero: &[Card],
        board: &[Card],
        opponents: OpponentSpec<'_>,
        trials: u32,
        rng: &mut R,
    ) -> Result<EquityEstimate, CoreError> {
        if hero.len() != 2 {
            return Err(CoreError::NotEnoughHoleCards(hero.len()));
        }
        if board.len() > 5 {
            return Err(CoreError::TooManyBoardCards(board.len()));
        }
        let known: Vec<Card> = hero.iter().chain(board).copied().collect();
        let dead_mask = ensure_distinct(&known)?;

        if trials == 0 {
            warn!("equity requested with zero trials; returning neutral estimate");
            return Ok(EquityEstimate::neutral());
        }

        let residual = Deck::without_mask(dead_mask);
        let board_needed = 5 - board.len();

        let opponents = match opponents {
            OpponentSpec::Uniform(0) => {
                return Ok(EquityEstimate {
                    equity: 100.0,
                    trials_run: 0,
                    neutral: false,
                })
            }
            OpponentSpec::Uniform(n) => {
                if residual.remaining() < board_needed + 2 * n {
                    warn!(
                        "{} cards left cannot cover {} board cards and {} opponents; returning neutral equity",
                        residual.remaining(),
                        board_needed,
                        n
                    );
                    return Ok(EquityEstimate::neutral());
                }
                Opponents::Uniform(n)
            }
            OpponentSpec::Range(range) => {
                let table = ComboTable::build(range, dead_mask, self.config.min_weight);
                if table.is_empty() || table.total() <= 0.0 {
                    warn!("opponent range has no live combos; returning neutral equity");
                    return Ok(EquityEstimate::neutral());
                }
                Opponents::Range(table)
            }
        };

        let base_seed = self.config.seed.unwrap_or_else(|| rng.gen());
        let tally = self.run_batches(hero, board, residual.remaining_cards(), &opponents, trials, base_seed);

        trace!(
            "equity {:.2}% over {} trials (wins {}, ties {})",
            tally.equity(),
            tally.trials,
            tally.wins,
            tally.ties
        );

        Ok(EquityEstimate {
            equity: tally.equity(),
            trials_run: tally.trials as u32,
            neutral: false,
        })
    }

    fn run_batches(
        &self,
        hero: &[Card],
        board: &[Card],
        residual: &[Card],
        opponents: &Opponents,
        trials: u32,
        base_seed: u64,
    ) -> Tally {
        let batch_size = self.config.batch_size.max(1);
        let num_batches = trials.div_ceil(batch_size);
        let deadline = self
            .config
            .time_budget_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        (0..num_batches)
            .into_par_iter()
            .filter_map(|batch| {
                // The first batch always runs so there is an estimate to return.
                if batch > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                    trace!("batch {} skipped: time budget exhausted", batch);
                    return None;
                }
                let size = batch_size.min(trials - batch * batch_size);
                let mut rng = StdRng::seed_from_u64(batch_seed(base_seed, batch));
                Some(self.run_batch(hero, board, residual, opponents, size, &mut rng))
            })
            .reduce(Tally::default, Tally::merge)
    }

    fn run_batch(
        &self,
        hero: &[Card],
        board: &[Card],
        residual: &[Card],
        opponents: &Opponents,
        trials: u32,
        rng: &mut StdRng,
    ) -> Tally {
        let mut deck = residual.to_vec();
        let board_needed = 5 - board.len();
        let mut tally = Tally::default();

        let mut hero_cards = [hero[0]; 7];
        hero_cards[..2].copy_from_slice(hero);
        hero_cards[2..2 + board.len()].copy_from_slice(board);
        let mut villain_cards = hero_cards;

        for _ in 0..trials {
            let outcome = match opponents {
                Opponents::Uniform(n) => {
                    let (drawn, _) = deck.partial_shuffle(rng, board_needed + 2 * n);
                    let (runout, holes) = drawn.split_at(board_needed);
                    hero_cards[2 + board.len()..].copy_from_slice(runout);
                    let hero_rank = self.evaluator.rank(&hero_cards);

                    let mut best_villain = u32::MAX;
                    for hole in holes.chunks_exact(2) {
                        villain_cards[..2].copy_from_slice(hole);
                        villain_cards[2..].copy_from_slice(&hero_cards[2..]);
                        best_villain = best_villain.min(self.evaluator.rank(&villain_cards));
                    }
                    hero_rank.cmp(&best_villain)
                }
                Opponents::Range(table) => {
                    let villain = table.sample(rng);
                    let villain_mask = villain.mask();
                    // Two extra cards cover the villain's hole cards if they get drawn.
                    let (drawn, _) = deck.partial_shuffle(rng, board_needed + 2);
                    let runout = drawn.iter().filter(|c| c.mask() & villain_mask == 0);
                    for (slot, card) in hero_cards[2 + board.len()..].iter_mut().zip(runout) {
                        *slot = *card;
                    }
                    let hero_rank = self.evaluator.rank(&hero_cards);

                    villain_cards[..2].copy_from_slice(&villain.cards());
                    villain_cards[2..].copy_from_slice(&hero_cards[2..]);
                    hero_rank.cmp(&self.evaluator.rank(&villain_cards))
                }
            };

            match outcome {
                std::cmp::Ordering::Less => tally.wins += 1,
                std::cmp::Ordering::Equal => tally.ties += 1,
                std::cmp::Ordering::Greater => {}
            }
            tally.trials += 1;
        }

        tally
    }
}

/// Per-batch seed derived from the call's base seed.
fn batch_seed(base_seed: u64, batch: u32) -> u64 {
    let mut hasher = DefaultHasher::new();
    base_seed.hash(&mut hasher);
    batch.hash(&mut hasher);
    hasher.finish()
}

/// Equity of a hand class against one uniformly random hand, preflop.
///
/// Uses the first combo of the class; the result is suit-independent.
pub fn class_equity_vs_random(class: &HandClass, trials: u32, seed: u64) -> Result<f64, CoreError> {
    let hole = class.combos()[0];
    let simulator = EquitySimulator::new(SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    });
    simulator.equity(
        &hole.cards(),
        &[],
        OpponentSpec::Uniform(1),
        trials,
        &mut StdRng::seed_from_u64(seed),
    )
}
