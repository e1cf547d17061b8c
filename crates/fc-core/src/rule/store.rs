use std::collections::HashSet;

use fc_config::CustomizerConfig;

use crate::error::FcResult;
use crate::rule::model::{GroupId, Profile, Rule};

// ---------------------------------------------------------------------------
// RuleStore trait
// ---------------------------------------------------------------------------

/// Storage seam for candidate retrieval.
///
/// Implementations return the rules for `(action, for_parent)` pre-filtered
/// by set/profile activity and the caller's group membership. Row order is
/// unspecified — the resolver normalizes it by rank.
pub trait RuleStore {
    fn fetch(
        &self,
        action: &str,
        for_parent: bool,
        caller_groups: &HashSet<GroupId>,
    ) -> FcResult<Vec<Rule>>;
}

// ---------------------------------------------------------------------------
// MemoryRuleStore
// ---------------------------------------------------------------------------

/// In-process rule store holding the full profile tree, the stand-in for the
/// original system's relational rule query.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    profiles: Vec<Profile>,
}

impl MemoryRuleStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn from_config(config: &CustomizerConfig) -> Self {
        Self::new(config.profiles.iter().map(Profile::from).collect())
    }
}

impl RuleStore for MemoryRuleStore {
    fn fetch(
        &self,
        action: &str,
        for_parent: bool,
        caller_groups: &HashSet<GroupId>,
    ) -> FcResult<Vec<Rule>> {
        let mut out = Vec::new();
        for profile in &self.profiles {
            if !profile.active || !group_filter_passes(profile, caller_groups) {
                continue;
            }
            for set in &profile.sets {
                if !set.active || set.action != action || set.for_parent != for_parent {
                    continue;
                }
                out.extend(set.rules.iter().cloned());
            }
        }
        Ok(out)
    }
}

/// Per-association-row membership predicate, kept exactly as the legacy
/// store's query evaluates it:
///
/// `(group IN caller AND (group IS NULL OR profile-active)) OR group IS NULL`
///
/// The disjuncts overlap — a NULL group short-circuits through the second
/// branch regardless of the first — but the historical form is preserved
/// rather than simplified. A profile with no rows passes unconditionally.
fn group_filter_passes(profile: &Profile, caller: &HashSet<GroupId>) -> bool {
    if profile.usergroups.is_empty() {
        return true;
    }
    profile.usergroups.iter().any(|row| {
        let in_caller = row.group.map(|g| caller.contains(&g)).unwrap_or(false);
        (in_caller && (row.group.is_none() || profile.active)) || row.group.is_none()
    })
}
