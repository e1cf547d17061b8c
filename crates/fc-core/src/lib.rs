pub mod error;
pub mod object;
pub mod rule;
pub mod script;

pub use error::{FcError, FcReason, FcResult};
pub use object::{ShapeCatalog, ShapeId, TargetObject, Value};
pub use rule::{
    GroupAssociation, GroupId, MemoryRuleStore, OverrideMap, Profile, Resolver, Rule, RuleKind,
    RuleSet, RuleStore,
};
pub use script::ScriptBuffer;
