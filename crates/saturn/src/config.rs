//! Configuration for building a proof state.

use crate::clause::ClauseContext;
use crate::error::Result;
use crate::logic::{Interner, Kbo, KboConfig, KboSettings, LiteralSelectionStrategy};
use crate::queue::{build_queues, ClauseQueue, Profile, QueueSpec};
use crate::state::CleanPolicy;
use serde::{Deserialize, Serialize};

/// Everything needed to set up the saturation core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationConfig {
    /// Preset queue list, used when `queues` is not given
    pub profile: Profile,
    /// Custom queue list; overrides `profile`
    pub queues: Option<Vec<QueueSpec>>,
    pub literal_selection: LiteralSelectionStrategy,
    pub clean_policy: CleanPolicy,
    pub kbo: KboSettings,
}

impl SaturationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn queue_specs(&self) -> Vec<QueueSpec> {
        match &self.queues {
            Some(specs) => specs.clone(),
            None => self.profile.specs(),
        }
    }

    pub fn build_queues(&self) -> Result<Vec<(ClauseQueue, u32)>> {
        build_queues(&self.queue_specs())
    }

    /// A clause context whose ordering and selection follow this
    /// configuration. Symbol settings only apply to names already in
    /// `interner`.
    pub fn build_context(&self, interner: Interner) -> ClauseContext {
        let kbo = Kbo::new(KboConfig::from_settings(&interner, &self.kbo));
        ClauseContext::new(interner, Box::new(kbo), self.literal_selection.build())
    }
}
