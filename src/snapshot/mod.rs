//! Game snapshots: the complete serializable game state.
//!
//! A `GameSnapshot` is the only unit exchanged with persistence and sync.
//! Its JSON form is:
//!
//! ```text
//! {
//!   "players": [
//!     { "id": 1, "name": "Ana", "grid": [3, 1, 6, 2, 5, 4],
//!       "validatedItems": [[0, 1700000000000]] }
//!   ],
//!   "propositions": [ { "id": 1, "text": "A" } ]
//! }
//! ```
//!
//! Grid entries that name a proposition missing from `propositions` are
//! stale, not malformed.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};
use crate::players::{PlayerId, PlayerState, ValidationMarker};
use crate::pool::{Proposition, PropositionId, PropositionPool};

/// One player as serialized in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub grid: Vec<PropositionId>,
    /// `(cell index, marker)` pairs, ordered by index when written here.
    #[serde(default)]
    pub validated_items: Vec<(usize, ValidationMarker)>,
}

impl From<&PlayerState> for PlayerSnapshot {
    fn from(player: &PlayerState) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            grid: player.grid.to_vec(),
            validated_items: player
                .validated_items()
                .iter()
                .map(|(index, marker)| (*index, marker.clone()))
                .collect(),
        }
    }
}

impl PlayerSnapshot {
    /// Rebuild the in-memory player.
    #[must_use]
    pub fn to_state(&self) -> PlayerState {
        PlayerState::new(self.id, self.grid.iter().copied().collect())
            .with_name(self.name.clone())
            .with_validations(self.validated_items.iter().cloned())
    }
}

/// A grid cell naming a proposition that is not in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaleReference {
    pub player: PlayerId,
    pub index: usize,
    pub proposition: PropositionId,
}

/// Complete game state: players and propositions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub propositions: Vec<Proposition>,
}

impl GameSnapshot {
    /// Capture players and pool.
    pub fn capture<'a>(
        players: impl IntoIterator<Item = &'a PlayerState>,
        pool: &PropositionPool,
    ) -> Self {
        Self {
            players: players.into_iter().map(PlayerSnapshot::from).collect(),
            propositions: pool.iter().cloned().collect(),
        }
    }

    /// Parse and check a snapshot.
    ///
    /// Fails with `GameError::Parse` on malformed JSON or on a snapshot that
    /// breaks structural rules (see [`GameSnapshot::check`]).
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check()?;
        Ok(snapshot)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(GameError::from)
    }

    /// Structural rules every applied snapshot satisfies.
    ///
    /// - Player ids are unique
    /// - Proposition ids are unique
    /// - Validation indices point inside the player's grid
    /// - No id is `u64::MAX`, so allocation can always resume above it
    pub fn check(&self) -> Result<()> {
        let mut player_ids = FxHashSet::default();
        for player in &self.players {
            if player.id.raw() == u64::MAX {
                return Err(GameError::parse("player id space exhausted"));
            }
            if !player_ids.insert(player.id) {
                return Err(GameError::parse(format!("duplicate player id {}", player.id.raw())));
            }
            if let Some((index, _)) = player
                .validated_items
                .iter()
                .find(|(index, _)| *index >= player.grid.len())
            {
                return Err(GameError::parse(format!(
                    "validated cell {} outside grid of {} for player {}",
                    index,
                    player.grid.len(),
                    player.id.raw()
                )));
            }
        }

        let mut proposition_ids = FxHashSet::default();
        for proposition in &self.propositions {
            if proposition.id.raw() == u64::MAX {
                return Err(GameError::parse("proposition id space exhausted"));
            }
            if !proposition_ids.insert(proposition.id) {
                return Err(GameError::parse(format!(
                    "duplicate proposition id {}",
                    proposition.id.raw()
                )));
            }
        }
        Ok(())
    }

    /// Grid cells whose proposition is missing from `propositions`.
    #[must_use]
    pub fn stale_references(&self) -> Vec<StaleReference> {
        let known: FxHashSet<PropositionId> = self.propositions.iter().map(|p| p.id).collect();

        self.players
            .iter()
            .flat_map(|player| {
                player
                    .grid
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| !known.contains(*id))
                    .map(|(index, id)| StaleReference {
                        player: player.id,
                        index,
                        proposition: *id,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Rebuild the pool.
    #[must_use]
    pub fn to_pool(&self) -> PropositionPool {
        PropositionPool::from_propositions(self.propositions.iter().cloned())
    }

    /// Rebuild every player.
    #[must_use]
    pub fn to_players(&self) -> Vec<PlayerState> {
        self.players.iter().map(PlayerSnapshot::to_state).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn sample_json() -> &'static str {
        r#"{
            "players": [
                { "id": 1, "name": "Ana", "grid": [3, 1, 6, 2, 5, 4],
                  "validatedItems": [[4, 1700000000000], [0, true]] }
            ],
            "propositions": [
                { "id": 1, "text": "A" }, { "id": 2, "text": "B" },
                { "id": 3, "text": "C" }, { "id": 4, "text": "D" },
                { "id": 5, "text": "E" }, { "id": 6, "text": "F" }
            ]
        }"#
    }

    #[test]
    fn test_parse_wire_format() {
        let snapshot = GameSnapshot::from_json(sample_json()).unwrap();

        assert_eq!(snapshot.players.len(), 1);
        assert_eq!(snapshot.propositions.len(), 6);

        let player = &snapshot.players[0];
        assert_eq!(player.name, "Ana");
        assert_eq!(player.grid[0], PropositionId::new(3));
        assert_eq!(player.validated_items[1], (0, ValidationMarker::Flag(true)));
    }

    #[test]
    fn test_written_shape() {
        let snapshot = GameSnapshot::from_json(sample_json()).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert!(value["players"][0]["validatedItems"].is_array());
        assert_eq!(value["players"][0]["validatedItems"][0][0], 4);
        assert_eq!(value["propositions"][0]["text"], "A");
    }

    #[test]
    fn test_to_state_orders_validations() {
        let snapshot = GameSnapshot::from_json(sample_json()).unwrap();
        let players = snapshot.to_players();

        let indices: Vec<_> = players[0].validated_items().keys().copied().collect();
        assert_eq!(indices, vec![0, 4]);

        let recaptured = PlayerSnapshot::from(&players[0]);
        assert_eq!(recaptured.validated_items[0].0, 0);
        assert_eq!(recaptured.validated_items[1].0, 4);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameSnapshot::from_json("{ not json"),
            Err(GameError::Parse(_))
        ));
        assert!(matches!(
            GameSnapshot::from_json(r#"{ "players": 3, "propositions": [] }"#),
            Err(GameError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_optional_fields() {
        let snapshot = GameSnapshot::from_json(
            r#"{ "players": [{ "id": 2, "grid": [] }], "propositions": [] }"#,
        )
        .unwrap();
        assert!(snapshot.players[0].name.is_empty());
        assert!(snapshot.players[0].validated_items.is_empty());
    }

    #[test]
    fn test_rejects_duplicates() {
        let dup_players = r#"{ "players": [{ "id": 1, "grid": [] }, { "id": 1, "grid": [] }],
                                "propositions": [] }"#;
        assert!(matches!(GameSnapshot::from_json(dup_players), Err(GameError::Parse(_))));

        let dup_props = r#"{ "players": [],
                              "propositions": [{ "id": 1, "text": "A" }, { "id": 1, "text": "B" }] }"#;
        assert!(matches!(GameSnapshot::from_json(dup_props), Err(GameError::Parse(_))));
    }

    #[test]
    fn test_rejects_validation_outside_grid() {
        let json = r#"{ "players": [{ "id": 1, "grid": [1, 2], "validatedItems": [[2, true]] }],
                        "propositions": [] }"#;
        assert!(matches!(GameSnapshot::from_json(json), Err(GameError::Parse(_))));
    }

    #[test]
    fn test_rejects_exhausted_ids() {
        let max_prop = format!(
            r#"{{ "players": [], "propositions": [{{ "id": {}, "text": "A" }}] }}"#,
            u64::MAX
        );
        assert!(matches!(GameSnapshot::from_json(&max_prop), Err(GameError::Parse(_))));

        let max_player = format!(
            r#"{{ "players": [{{ "id": {}, "grid": [] }}], "propositions": [] }}"#,
            u64::MAX
        );
        assert!(matches!(GameSnapshot::from_json(&max_player), Err(GameError::Parse(_))));

        let near_max = format!(
            r#"{{ "players": [], "propositions": [{{ "id": {}, "text": "A" }}] }}"#,
            u64::MAX - 1
        );
        assert!(GameSnapshot::from_json(&near_max).is_ok());
    }

    #[test]
    fn test_stale_references_tolerated() {
        let json = r#"{ "players": [{ "id": 1, "grid": [1, 9] }],
                        "propositions": [{ "id": 1, "text": "A" }] }"#;
        let snapshot = GameSnapshot::from_json(json).unwrap();

        assert_eq!(
            snapshot.stale_references(),
            vec![StaleReference {
                player: PlayerId::new(1),
                index: 1,
                proposition: PropositionId::new(9),
            }]
        );
    }

    #[test]
    fn test_capture() {
        let pool = PropositionPool::from_texts(["A", "B"]);
        let grid: Grid = pool.iter().map(|p| p.id).collect();
        let player = PlayerState::new(PlayerId::new(1), grid).with_name("Zoe");

        let snapshot = GameSnapshot::capture([&player], &pool);
        assert_eq!(snapshot.players[0].name, "Zoe");
        assert_eq!(snapshot.propositions.len(), 2);
        assert_eq!(snapshot.to_pool().len(), 2);
    }
}
