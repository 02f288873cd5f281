//! One-call decision facade.
//!
//! [`Advisor`] owns one instance of every engine and routes a [`GameState`]
//! snapshot to the right one: the preflop policy on an empty board, Monte
//! Carlo equity followed by the EV search otherwise.

use log::debug;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::action::BettingAction;
use crate::cards::{ensure_distinct, Board, Card, HandEvaluator, HoleCards};
use crate::config::{ConfigError, EngineConfig};
use crate::decision::Decision;
use crate::equity::{EquitySimulator, OpponentSpec};
use crate::error::{check_amount, CoreError};
use crate::position::Position;
use crate::postflop::{PostflopEngine, PostflopSpot};
use crate::preflop::{PreflopContext, PreflopEngine};
use crate::range::HandRanges;
use crate::stats::{ExploitAdjustment, OpponentStats, PlayerType};

fn one_opponent() -> usize {
    1
}

/// Snapshot of the table at hero's decision point. All amounts are in BB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Hero's two hole cards, e.g. `["As", "Kd"]`.
    pub hero_cards: Vec<Card>,
    /// Community cards (empty preflop).
    #[serde(default)]
    pub board: Vec<Card>,
    pub position: Position,
    pub pot_bb: f64,
    /// Hero's remaining stack.
    pub stack_bb: f64,
    #[serde(default)]
    pub to_call_bb: f64,
    /// Preflop action log up to hero's turn.
    #[serde(default)]
    pub actions: Vec<BettingAction>,
    /// Opponents still in the hand, used when no villain range is tracked.
    #[serde(default = "one_opponent")]
    pub opponents: usize,
    /// Identity of the main opponent, if known.
    #[serde(default)]
    pub villain: Option<String>,
    /// Tracked statistics keyed by player identity.
    #[serde(default)]
    pub stats: FxHashMap<String, OpponentStats>,
}

impl GameState {
    pub fn new(hero_cards: Vec<Card>, position: Position, pot_bb: f64, stack_bb: f64) -> Self {
        Self {
            hero_cards,
            board: Vec::new(),
            position,
            pot_bb,
            stack_bb,
            to_call_bb: 0.0,
            actions: Vec::new(),
            opponents: 1,
            villain: None,
            stats: FxHashMap::default(),
        }
    }

    /// Statistics of the main opponent, if both the identity and stats are known.
    pub fn villain_stats(&self) -> Option<&OpponentStats> {
        self.villain.as_ref().and_then(|v| self.stats.get(v))
    }
}

/// Decision entry point bundling the preflop, equity and postflop engines.
#[derive(Debug, Clone)]
pub struct Advisor {
    config: EngineConfig,
    preflop: PreflopEngine,
    simulator: EquitySimulator,
    postflop: PostflopEngine,
}

impl Default for Advisor {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            preflop: PreflopEngine::default(),
            simulator: EquitySimulator::default(),
            postflop: PostflopEngine::new(),
        }
    }
}

impl Advisor {
    /// Build the engines from a configuration, validating it first.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            preflop: PreflopEngine::new(config.preflop.clone(), config.short_stack_bb)?,
            simulator: EquitySimulator::new(config.simulation.clone()),
            postflop: PostflopEngine::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommend an action for hero.
    ///
    /// `ranges` holds the opponent ranges tracked so far this hand; when the
    /// villain has one, postflop equity is computed against it, otherwise
    /// against `state.opponents` random hands.
    ///
    /// # Errors
    /// Returns an error on malformed cards, a 1-2 card board or negative amounts.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        ranges: &HandRanges,
        rng: &mut R,
    ) -> Result<Decision, CoreError> {
        let hole = HoleCards::from_slice(&state.hero_cards)?;
        let board = Board::from_cards(state.board.clone())?;
        let known: Vec<Card> = state.hero_cards.iter().chain(&state.board).copied().collect();
        ensure_distinct(&known)?;
        check_amount("pot", state.pot_bb)?;
        check_amount("stack", state.stack_bb)?;
        check_amount("to_call", state.to_call_bb)?;

        let villain_stats = state.villain_stats();

        if board.is_empty() {
            let ctx = PreflopContext::from_actions(&state.actions, state.position, state.pot_bb);
            let exploit = ExploitAdjustment::from_stats(villain_stats);
            return self.preflop.decide(&hole, &ctx, state.stack_bb, &exploit, rng);
        }

        let tracked = state
            .villain
            .as_deref()
            .filter(|v| ranges.contains(v))
            .map(|v| ranges.range(v));
        let spec = match &tracked {
            Some(range) => OpponentSpec::Range(range),
            None => OpponentSpec::Uniform(state.opponents.max(1)),
        };

        let equity = self.simulator.equity(
            &state.hero_cards,
            &state.board,
            spec,
            self.config.simulation.trials,
            rng,
        )?;
        debug!(
            "{} on {:?} ({}): {:.1}% equity vs {}",
            hole,
            board,
            HandEvaluator::new().evaluate(&known).category(),
            equity,
            if tracked.is_some() { "tracked range" } else { "random hands" }
        );

        let spot = PostflopSpot::new(
            equity,
            state.pot_bb,
            state.stack_bb,
            state.to_call_bb,
            board.street(),
        )
        .against(PlayerType::classify(villain_stats));
        self.postflop.decide(&spot)
    }
}
