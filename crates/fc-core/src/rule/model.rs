use fc_config::{ProfileConfig, RuleConfig, RuleKindConfig, SetConfig, ValueConfig};

use crate::object::{ShapeId, Value};

pub type GroupId = u64;

// ---------------------------------------------------------------------------
// Rule & RuleKind
// ---------------------------------------------------------------------------

/// Enforcement kinds a rule can carry. `FieldDefault` is the only kind that
/// writes into the override map; every kind renders a client-side fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    FieldDefault,
    FieldVisible,
    FieldTitle,
    TabVisible,
    TabTitle,
}

impl From<RuleKindConfig> for RuleKind {
    fn from(kind: RuleKindConfig) -> Self {
        match kind {
            RuleKindConfig::FieldDefault => RuleKind::FieldDefault,
            RuleKindConfig::FieldVisible => RuleKind::FieldVisible,
            RuleKindConfig::FieldTitle => RuleKind::FieldTitle,
            RuleKindConfig::TabVisible => RuleKind::TabVisible,
            RuleKindConfig::TabTitle => RuleKind::TabTitle,
        }
    }
}

/// A single field-override or enforcement directive, scoped to an action (via
/// its owning set) and optional object constraints.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Ascending sort key; ties keep store order (stable sort).
    pub rank: u32,
    pub kind: RuleKind,
    /// Target field name (or tab id for the tab kinds), before aliasing.
    pub field: String,
    pub value: Value,
    /// Only applies to objects rendered with this template id.
    pub template: Option<i64>,
    /// Only applies to objects of this shape (or a descendant).
    pub constraint_class: Option<ShapeId>,
    /// With `constraint_class`: the object field that must loosely equal
    /// `constraint`.
    pub constraint_field: Option<String>,
    pub constraint: Option<Value>,
}

// ---------------------------------------------------------------------------
// RuleSet & Profile
// ---------------------------------------------------------------------------

/// An activatable grouping of rules under a profile, keyed by
/// `(action, for_parent)`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub action: String,
    pub for_parent: bool,
    pub active: bool,
    pub rules: Vec<Rule>,
}

/// One profile/user-group association row. `group: None` is the NULL
/// (wildcard) row.
#[derive(Debug, Clone)]
pub struct GroupAssociation {
    pub group: Option<GroupId>,
}

/// An activatable grouping of rule sets. A profile with no association rows
/// applies to every caller.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub active: bool,
    pub usergroups: Vec<GroupAssociation>,
    pub sets: Vec<RuleSet>,
}

// ---------------------------------------------------------------------------
// Config conversions
// ---------------------------------------------------------------------------

impl From<&ValueConfig> for Value {
    fn from(value: &ValueConfig) -> Self {
        match value {
            ValueConfig::Bool(b) => Value::Bool(*b),
            ValueConfig::Int(n) => Value::Int(*n),
            ValueConfig::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl From<&RuleConfig> for Rule {
    fn from(rule: &RuleConfig) -> Self {
        Rule {
            rank: rule.rank,
            kind: rule.kind.into(),
            field: rule.field.clone(),
            value: (&rule.value).into(),
            template: rule.template,
            constraint_class: rule.class.as_deref().map(ShapeId::from),
            constraint_field: rule.constraint_field.clone(),
            constraint: rule.constraint.as_ref().map(Value::from),
        }
    }
}

impl From<&SetConfig> for RuleSet {
    fn from(set: &SetConfig) -> Self {
        RuleSet {
            action: set.action.clone(),
            for_parent: set.for_parent,
            active: set.active,
            rules: set.rules.iter().map(Rule::from).collect(),
        }
    }
}

impl From<&ProfileConfig> for Profile {
    fn from(profile: &ProfileConfig) -> Self {
        Profile {
            name: profile.name.clone(),
            active: profile.active,
            usergroups: profile
                .usergroups
                .iter()
                .map(|row| GroupAssociation { group: row.group })
                .collect(),
            sets: profile.sets.iter().map(RuleSet::from).collect(),
        }
    }
}
