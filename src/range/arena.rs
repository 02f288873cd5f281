//! Per-hand storage of opponent ranges.
//!
//! A `HandRanges` value is owned by the decision loop for exactly one hand of
//! play. Nothing is shared between hands: call [`HandRanges::new_hand`] (or
//! drop the value) when the next hand starts.

use rustc_hash::FxHashMap;

use crate::action::{ActionKind, BettingAction};
use crate::position::Position;
use crate::stats::OpponentStats;

use super::narrowing::{narrow, starting_range, NarrowContext};
use super::weighted::OpponentRange;

/// Opponent ranges for the current hand, keyed by opponent identity.
#[derive(Debug, Default, Clone)]
pub struct HandRanges {
    ranges: FxHashMap<String, OpponentRange>,
}

impl HandRanges {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            ranges: FxHashMap::default(),
        }
    }

    /// Discard every range at the start of a new hand.
    pub fn new_hand(&mut self) {
        self.ranges.clear();
    }

    /// Seed a player's range from position and statistics, replacing any previous one.
    pub fn seed(&mut self, player: &str, position: Position, stats: Option<&OpponentStats>) {
        self.ranges
            .insert(player.to_string(), starting_range(position, stats));
    }

    /// Narrow a player's range by an observed action.
    ///
    /// A player who has not been seeded starts from the uniform range.
    pub fn observe(&mut self, player: &str, action: ActionKind, ctx: &NarrowContext) {
        let range = self
            .ranges
            .entry(player.to_string())
            .or_insert_with(OpponentRange::uniform);
        *range = narrow(range, action, ctx);
    }

    /// Current range for a player; uniform when nothing has been observed.
    pub fn range(&self, player: &str) -> OpponentRange {
        self.ranges
            .get(player)
            .cloned()
            .unwrap_or_else(OpponentRange::uniform)
    }

    /// Check if a player has a tracked range this hand.
    pub fn contains(&self, player: &str) -> bool {
        self.ranges.contains_key(player)
    }

    /// Stop tracking a player (e.g. after they fold).
    pub fn remove(&mut self, player: &str) -> Option<OpponentRange> {
        self.ranges.remove(player)
    }

    /// Seed and narrow every opponent from a preflop action log.
    ///
    /// Players are seeded from their position the first time they act;
    /// folded players are dropped.
    pub fn replay_preflop(&mut self, actions: &[BettingAction], stats: &FxHashMap<String, OpponentStats>) {
        let mut raises_before = 0u8;
        for action in actions {
            if action.kind == ActionKind::Fold {
                self.remove(&action.actor);
                continue;
            }
            if !self.contains(&action.actor) {
                self.seed(&action.actor, action.position, stats.get(&action.actor));
            }
            if action.kind.is_voluntary() {
                let ctx = NarrowContext::preflop(action.position, raises_before);
                self.observe(&action.actor, action.kind, &ctx);
            }
            if action.kind.is_aggressive() {
                raises_before = raises_before.saturating_add(1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HandClass;

    #[test]
    fn test_unseen_player_is_uniform() {
        let arena = HandRanges::new();
        let range = arena.range("villain");
        assert_eq!(range, OpponentRange::uniform());
        assert!(!arena.contains("villain"));
    }

    #[test]
    fn test_seed_observe_and_reset() {
        let mut arena = HandRanges::new();
        arena.seed("villain", Position::CO, None);
        let seeded = arena.range("villain").total_weight();

        arena.observe(
            "villain",
            ActionKind::Raise,
            &NarrowContext::preflop(Position::CO, 1),
        );
        assert!(arena.range("villain").total_weight() < seeded);
        assert_eq!(
            arena.range("villain").weight(&HandClass::parse("AA").unwrap()),
            1.0
        );

        arena.new_hand();
        assert!(arena.is_empty());
        assert_eq!(arena.range("villain"), OpponentRange::uniform());
    }

    #[test]
    fn test_replay_preflop() {
        let log = vec![
            BettingAction::new("alice", Position::UTG, ActionKind::Raise, 2.5),
            BettingAction::new("bob", Position::MP, ActionKind::Fold, 0.0),
            BettingAction::new("carol", Position::BU, ActionKind::Call, 2.5),
        ];
        let mut stats = FxHashMap::default();
        stats.insert(
            "carol".to_string(),
            OpponentStats {
                hands: 100,
                vpip_hands: 45,
                pfr_hands: 8,
                ..Default::default()
            },
        );

        let mut arena = HandRanges::new();
        arena.replay_preflop(&log, &stats);
        assert_eq!(arena.len(), 2);
        assert!(!arena.contains("bob"));

        let alice = arena.range("alice");
        assert_eq!(alice.weight(&HandClass::parse("AA").unwrap()), 1.0);
        assert_eq!(alice.weight(&HandClass::parse("72o").unwrap()), 0.0);

        // Flatting caps carol's range: aces are mostly gone.
        let carol = arena.range("carol");
        assert!(carol.weight(&HandClass::parse("AA").unwrap()) < 0.2);
    }

    #[test]
    fn test_observe_unseeded_starts_uniform() {
        let mut arena = HandRanges::new();
        arena.observe(
            "fish",
            ActionKind::Call,
            &NarrowContext::preflop(Position::BB, 1),
        );
        assert_eq!(arena.len(), 1);
        assert!(arena.remove("fish").is_some());
        assert!(arena.is_empty());
    }
}
