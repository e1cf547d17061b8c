mod coerce;
mod model;
mod render;
mod resolver;
mod store;


pub use model::{GroupAssociation, GroupId, Profile, Rule, RuleKind, RuleSet};
pub use resolver::{OverrideMap, Resolver};
pub use store::{MemoryRuleStore, RuleStore};
