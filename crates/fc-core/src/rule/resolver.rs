use std::collections::{HashMap, HashSet};

use crate::object::{ShapeCatalog, TargetObject, Value};
use crate::rule::coerce;
use crate::rule::model::{GroupId, Rule, RuleKind};
use crate::rule::render;
use crate::rule::store::RuleStore;
use crate::script::ScriptBuffer;

/// Field-name → override value, accumulated in rank order. Later rules
/// overwrite earlier ones for the same field.
pub type OverrideMap = HashMap<String, Value>;

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Form-customization rule resolver.
///
/// One resolution per render cycle: fetch candidates, sort by rank, gate each
/// rule against the target object, accumulate overrides and enforcement
/// fragments. Pure read-then-compute — a failed fetch or an unmatched rule
/// degrades to fewer overrides, never an error.
pub struct Resolver<S> {
    store: S,
    shapes: ShapeCatalog,
}

impl<S: RuleStore> Resolver<S> {
    pub fn new(store: S, shapes: ShapeCatalog) -> Self {
        Self { store, shapes }
    }

    /// Resolve the overrides for `action`, appending the (single) rendered
    /// script block to `scripts` when any rule produced a fragment.
    pub fn resolve(
        &self,
        target: Option<&TargetObject>,
        for_parent: bool,
        action: &str,
        caller_groups: &HashSet<GroupId>,
        scripts: &mut ScriptBuffer,
    ) -> OverrideMap {
        let mut rules = match self.store.fetch(action, for_parent, caller_groups) {
            Ok(rows) => rows,
            Err(e) => {
                log::warn!("rule fetch failed for action '{action}': {e}");
                Vec::new()
            }
        };
        // Stable sort: rank order decides precedence, store order breaks ties.
        rules.sort_by_key(|r| r.rank);

        let mut overrides = OverrideMap::new();
        let mut fragments: Vec<String> = Vec::new();

        for rule in &rules {
            if !self.gates_pass(rule, target) {
                continue;
            }
            if rule.kind == RuleKind::FieldDefault {
                apply_default(&mut overrides, rule);
            }
            let fragment = render::fragment(rule);
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        if !fragments.is_empty() {
            scripts.append(render::wrap_deferred(&fragments));
        }
        overrides
    }

    /// Object-shape and field-value gates, applied in order. A failed gate
    /// skips the rule; it never aborts the resolution.
    fn gates_pass(&self, rule: &Rule, target: Option<&TargetObject>) -> bool {
        // Template gate only binds when an object is present.
        if let Some(template) = rule.template
            && let Some(obj) = target
            && obj.template() != Some(template)
        {
            return false;
        }

        if let Some(ref class) = rule.constraint_class {
            // Shape constraints cannot be evaluated without an object.
            let Some(obj) = target else { return false };
            if !self.shapes.is_a(obj.shape(), class) {
                return false;
            }
            if let Some(ref field) = rule.constraint_field {
                let empty = Value::Str(String::new());
                let expected = rule.constraint.as_ref().unwrap_or(&empty);
                let actual = obj.get(field).unwrap_or(&empty);
                if !coerce::loose_eq(actual, expected) {
                    return false;
                }
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Field aliasing & default application
// ---------------------------------------------------------------------------

/// The manager form posts some fields under legacy element ids; rules written
/// against those ids must land on the canonical field.
fn canonical_field(name: &str) -> &str {
    match name {
        // the rich-text editor's element id for the resource body
        "modx-resource-content" => "content",
        other => other,
    }
}

fn apply_default(overrides: &mut OverrideMap, rule: &Rule) {
    let field = canonical_field(&rule.field);
    if field == "parent-cmb" {
        // The parent combo posts both the combo field and the real parent
        // column; the column wants an integer.
        let parent = Value::Int(coerce::to_int(&rule.value));
        overrides.insert("parent".to_string(), parent.clone());
        overrides.insert("parent-cmb".to_string(), parent);
    } else {
        overrides.insert(field.to_string(), rule.value.clone());
    }
}
