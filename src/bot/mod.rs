//! AI bot integration.

pub mod provider;

pub use provider::{
    coerce_action, fallback_action, AiDecisionProvider, DecisionContext, NullDecisionProvider,
};
