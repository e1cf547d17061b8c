use std::collections::HashSet;

use crate::customizer::CustomizerConfig;

/// Cross-field validation run after deserialization.
///
/// Shape `extends` targets must be declared; a rule's `class` may reference an
/// undeclared shape (the resolver skips such rules at runtime), but a
/// `constraint_field` without `class` or a `constraint` without a
/// `constraint_field` is a config mistake and is rejected here.
pub fn validate(config: &CustomizerConfig) -> anyhow::Result<()> {
    let shape_names: HashSet<&str> = config.shapes.keys().map(String::as_str).collect();

    for (name, shape) in &config.shapes {
        if let Some(ref parent) = shape.extends {
            if parent == name {
                anyhow::bail!("shape '{name}' extends itself");
            }
            if !shape_names.contains(parent.as_str()) {
                anyhow::bail!("shape '{name}' extends undeclared shape '{parent}'");
            }
        }
    }

    let mut seen = HashSet::new();
    for profile in &config.profiles {
        if profile.name.trim().is_empty() {
            anyhow::bail!("profile with empty name");
        }
        if !seen.insert(profile.name.as_str()) {
            anyhow::bail!("duplicate profile name '{}'", profile.name);
        }
        for set in &profile.sets {
            if set.action.trim().is_empty() {
                anyhow::bail!("profile '{}': set with empty action", profile.name);
            }
            for rule in &set.rules {
                if rule.field.trim().is_empty() {
                    anyhow::bail!(
                        "profile '{}', action '{}': rule with empty field",
                        profile.name,
                        set.action,
                    );
                }
                if rule.constraint_field.is_some() && rule.class.is_none() {
                    anyhow::bail!(
                        "profile '{}', action '{}', field '{}': constraint_field requires class",
                        profile.name,
                        set.action,
                        rule.field,
                    );
                }
                if rule.constraint.is_some() && rule.constraint_field.is_none() {
                    anyhow::bail!(
                        "profile '{}', action '{}', field '{}': constraint requires constraint_field",
                        profile.name,
                        set.action,
                        rule.field,
                    );
                }
            }
        }
    }

    Ok(())
}
