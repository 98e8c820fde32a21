//! Actor classification by log ID prefix.

use serde::Serialize;

/// Player actor IDs start with this prefix (e.g. `1075762D`).
pub const PLAYER_PREFIX: &str = "10";
/// Enemy and NPC actor IDs start with this prefix (e.g. `4000A132`).
pub const ENEMY_PREFIX: &str = "40";
/// Source ID used for mechanics that have no owning entity.
pub const ENVIRONMENT_ID: &str = "E0000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorKind {
    Player,
    Enemy,
    Environment,
    Other,
}

impl ActorKind {
    pub fn classify(actor_id: &str) -> Self {
        if is_environment_id(actor_id) {
            ActorKind::Environment
        } else if is_player_id(actor_id) {
            ActorKind::Player
        } else if is_enemy_id(actor_id) {
            ActorKind::Enemy
        } else {
            ActorKind::Other
        }
    }
}

pub fn is_player_id(actor_id: &str) -> bool {
    has_prefix(actor_id, PLAYER_PREFIX)
}

pub fn is_enemy_id(actor_id: &str) -> bool {
    has_prefix(actor_id, ENEMY_PREFIX)
}

pub fn is_environment_id(actor_id: &str) -> bool {
    actor_id.eq_ignore_ascii_case(ENVIRONMENT_ID)
}

fn has_prefix(actor_id: &str, prefix: &str) -> bool {
    actor_id
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_prefix() {
        assert_eq!(ActorKind::classify("1075762D"), ActorKind::Player);
        assert_eq!(ActorKind::classify("4000A132"), ActorKind::Enemy);
        assert_eq!(ActorKind::classify("E0000000"), ActorKind::Environment);
        assert_eq!(ActorKind::classify("e0000000"), ActorKind::Environment);
        assert_eq!(ActorKind::classify("80034E8B"), ActorKind::Other);
        assert_eq!(ActorKind::classify(""), ActorKind::Other);
    }

    #[test]
    fn short_ids_are_not_players() {
        assert!(!is_player_id("1"));
        assert!(!is_enemy_id("4"));
    }
}
