//! Event subscriptions: which agents receive which channels.
//!
//! Timer firings and damage always reach their agent; perception,
//! navigation and proximity events only while the agent holds a token for
//! that channel.  The simulation keeps each agent's tokens and hands them
//! back when its controller detaches.

use std::collections::BTreeMap;

use hd_behavior::Channel;
use hd_core::AgentId;

/// Proof of one subscription; hand it back to [`Subscriptions::unsubscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken {
    pub agent:   AgentId,
    pub channel: Channel,
    id:          u64,
}

#[derive(Default)]
pub struct Subscriptions {
    next:     u64,
    by_agent: BTreeMap<AgentId, Vec<SubscriptionToken>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, agent: AgentId, channel: Channel) -> SubscriptionToken {
        let token = SubscriptionToken { agent, channel, id: self.next };
        self.next += 1;
        self.by_agent.entry(agent).or_default().push(token);
        token
    }

    /// Returns `false` if the token was already revoked.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let Some(tokens) = self.by_agent.get_mut(&token.agent) else {
            return false;
        };
        let before = tokens.len();
        tokens.retain(|t| *t != token);
        let removed = tokens.len() != before;
        if tokens.is_empty() {
            self.by_agent.remove(&token.agent);
        }
        removed
    }

    pub fn is_subscribed(&self, agent: AgentId, channel: Channel) -> bool {
        self.by_agent
            .get(&agent)
            .is_some_and(|tokens| tokens.iter().any(|t| t.channel == channel))
    }
}
