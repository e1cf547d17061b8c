use serde::Deserialize;

// ---------------------------------------------------------------------------
// Profile → set → rule TOML structure
// ---------------------------------------------------------------------------

/// A customization profile: an activatable grouping of rule sets, optionally
/// scoped to user groups via association rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Group association rows. An empty list means the profile applies to
    /// every caller; a row without a `group` is the wildcard row.
    #[serde(default, rename = "usergroup")]
    pub usergroups: Vec<UserGroupConfig>,
    #[serde(default, rename = "set")]
    pub sets: Vec<SetConfig>,
}

/// One profile/user-group association row.
#[derive(Debug, Clone, Deserialize)]
pub struct UserGroupConfig {
    #[serde(default)]
    pub group: Option<u64>,
}

/// An activatable rule set, keyed by the manager action it customizes.
#[derive(Debug, Clone, Deserialize)]
pub struct SetConfig {
    /// Manager action id, e.g. `"resource/update"`.
    pub action: String,
    /// Rules in this set apply to the parent-context object instead of the
    /// primary target.
    #[serde(default)]
    pub for_parent: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleConfig>,
}

/// A single field-override or enforcement directive.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Ascending sort key; later ranks overwrite earlier ones.
    pub rank: u32,
    pub kind: RuleKindConfig,
    /// Target field (or tab, for the tab kinds).
    pub field: String,
    pub value: ValueConfig,
    /// Restrict to objects rendered with this template id.
    #[serde(default)]
    pub template: Option<i64>,
    /// Restrict to objects of this declared shape.
    #[serde(default)]
    pub class: Option<String>,
    /// With `class`, further restrict to objects whose field loosely equals
    /// `constraint`.
    #[serde(default)]
    pub constraint_field: Option<String>,
    #[serde(default)]
    pub constraint: Option<ValueConfig>,
}

/// Rule kinds understood by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKindConfig {
    FieldDefault,
    FieldVisible,
    FieldTitle,
    TabVisible,
    TabTitle,
}

/// A scalar rule value as written in TOML: bool, integer, or string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueConfig {
    Bool(bool),
    Int(i64),
    Str(String),
}

fn default_true() -> bool {
    true
}
