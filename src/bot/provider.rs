//! External AI decision provider contract.
//!
//! The room treats the provider as an untrusted collaborator: it gets a
//! bounded deadline, its payload is duck-typed JSON coerced into a
//! closed [`PlayerAction`], and any timeout, error, or unparsable
//! payload degrades to the safe default. Provider failures never reach
//! players.

use async_trait::async_trait;
use serde::Serialize;

use crate::game::{Card, Chips, GameStateView, PlayerAction, PlayerId};

/// Everything a provider may see when deciding for one bot: the bot's
/// own hole cards plus the same sanitized view a human in that seat
/// would get.
#[derive(Clone, Debug, Serialize)]
pub struct DecisionContext {
    pub player_id: PlayerId,
    pub hole_cards: Vec<Card>,
    pub view: GameStateView,
    /// Chips owed to match the current bet.
    pub to_call: Chips,
    /// Minimum legal raise target.
    pub min_raise: Chips,
    pub can_check: bool,
}

/// A pluggable decision engine for bot seats.
#[async_trait]
pub trait AiDecisionProvider: Send + Sync {
    /// Decide an action for the given context. The returned value is
    /// coerced by [`coerce_action`]; anything unrecognized falls back to
    /// the safe default.
    async fn decide(&self, ctx: DecisionContext) -> anyhow::Result<serde_json::Value>;
}

/// Provider that never decides. Bots play the safe default (check if
/// free, else fold).
pub struct NullDecisionProvider;

#[async_trait]
impl AiDecisionProvider for NullDecisionProvider {
    async fn decide(&self, _ctx: DecisionContext) -> anyhow::Result<serde_json::Value> {
        anyhow::bail!("no decision provider configured")
    }
}

/// Coerce a raw provider payload into an action, or `None` if the
/// payload does not describe one. Legality is checked later by the
/// betting engine; this only closes the type.
#[must_use]
pub fn coerce_action(payload: &serde_json::Value) -> Option<PlayerAction> {
    serde_json::from_value(payload.clone()).ok()
}

/// The action the room takes when no usable decision arrived in time.
#[must_use]
pub fn fallback_action(can_check: bool) -> PlayerAction {
    if can_check {
        PlayerAction::Check
    } else {
        PlayerAction::Fold
    }
}
