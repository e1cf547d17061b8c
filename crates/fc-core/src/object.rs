use std::collections::HashMap;
use std::fmt;

use orion_error::prelude::*;
use serde::Serialize;

use fc_config::ShapeConfig;

use crate::error::{FcReason, FcResult};

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// Scalar field value carried by a [`TargetObject`], a rule override, or a
/// rule constraint.
///
/// Comparison and coercion between values of different types live in one
/// place: `rule::coerce`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }
}

impl fmt::Display for Value {
    /// Stringification used by loose comparison and script rendering.
    /// Booleans render as `1`/`0`, matching how the legacy store keeps them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{}", if *b { 1 } else { 0 }),
        }
    }
}

// ---------------------------------------------------------------------------
// ShapeId & ShapeCatalog
// ---------------------------------------------------------------------------

/// Closed shape tag identifying an object's class, assigned once when the
/// object is constructed. Constraint evaluation compares tags (plus declared
/// ancestry) instead of inspecting runtime types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShapeId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared shapes and their `extends` ancestry.
///
/// `is_a(shape, class)` walks the parent chain; a class the catalog does not
/// know never matches, which is how malformed constraints degrade to a
/// skipped rule rather than an error.
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    parents: HashMap<ShapeId, Option<ShapeId>>,
}

impl ShapeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a shape with an optional parent. The parent does not need to
    /// be declared yet; chains are checked in [`from_config`](Self::from_config).
    pub fn declare(&mut self, shape: ShapeId, parent: Option<ShapeId>) {
        self.parents.insert(shape, parent);
    }

    /// Build the catalog from the `[shapes]` config table, rejecting
    /// ancestry cycles.
    pub fn from_config(shapes: &HashMap<String, ShapeConfig>) -> FcResult<Self> {
        let mut catalog = Self::new();
        for (name, shape) in shapes {
            catalog.declare(
                ShapeId::new(name.clone()),
                shape.extends.as_deref().map(ShapeId::from),
            );
        }
        for start in catalog.parents.keys() {
            let mut seen = vec![start.clone()];
            let mut cur = catalog.parents.get(start).cloned().flatten();
            while let Some(s) = cur {
                if seen.contains(&s) {
                    return Err(StructError::from(FcReason::ShapeCatalog)
                        .with_detail(format!("ancestry cycle through shape '{s}'")));
                }
                cur = catalog.parents.get(&s).cloned().flatten();
                seen.push(s);
            }
        }
        Ok(catalog)
    }

    pub fn contains(&self, shape: &ShapeId) -> bool {
        self.parents.contains_key(shape)
    }

    /// True when `shape` is `class` or descends from it.
    pub fn is_a(&self, shape: &ShapeId, class: &ShapeId) -> bool {
        if !self.parents.contains_key(class) {
            return false;
        }
        let mut cur = Some(shape.clone());
        while let Some(s) = cur {
            if &s == class {
                return true;
            }
            cur = self.parents.get(&s).cloned().flatten();
        }
        false
    }
}

// ---------------------------------------------------------------------------
// TargetObject
// ---------------------------------------------------------------------------

/// The in-memory record being customized.
///
/// Read-only to the resolver: constraint gates read fields through
/// [`get`](Self::get), and the caller applies the returned override map
/// separately.
#[derive(Debug, Clone)]
pub struct TargetObject {
    shape: ShapeId,
    template: Option<i64>,
    fields: HashMap<String, Value>,
}

impl TargetObject {
    pub fn new(shape: ShapeId, template: Option<i64>) -> Self {
        Self {
            shape,
            template,
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn shape(&self) -> &ShapeId {
        &self.shape
    }

    pub fn template(&self) -> Option<i64> {
        self.template
    }

    /// Decode an object from its JSON description:
    /// `{"shape": "document", "template": 3, "fields": {"published": 0}}`.
    ///
    /// Field values must be scalar; floats are accepted only when they are
    /// whole numbers.
    pub fn from_json(raw: &str) -> FcResult<Self> {
        #[derive(serde::Deserialize)]
        struct RawObject {
            shape: String,
            #[serde(default)]
            template: Option<i64>,
            #[serde(default)]
            fields: serde_json::Map<String, serde_json::Value>,
        }

        let raw: RawObject = serde_json::from_str(raw).map_err(|e| {
            StructError::from(FcReason::ObjectDecode).with_detail(format!("invalid object: {e}"))
        })?;

        let mut obj = TargetObject::new(ShapeId::new(raw.shape), raw.template);
        for (name, value) in raw.fields {
            let value = match value {
                serde_json::Value::String(s) => Value::Str(s),
                serde_json::Value::Bool(b) => Value::Bool(b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => Value::Int(i),
                    None => {
                        return Err(StructError::from(FcReason::ObjectDecode)
                            .with_detail(format!("field '{name}': non-integer number {n}")));
                    }
                },
                other => {
                    return Err(StructError::from(FcReason::ObjectDecode)
                        .with_detail(format!("field '{name}': unsupported value {other}")));
                }
            };
            obj.set(name, value);
        }
        Ok(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_ancestry_walk() {
        let mut catalog = ShapeCatalog::new();
        catalog.declare(ShapeId::from("document"), None);
        catalog.declare(ShapeId::from("weblink"), Some(ShapeId::from("document")));

        assert!(catalog.is_a(&ShapeId::from("weblink"), &ShapeId::from("document")));
        assert!(catalog.is_a(&ShapeId::from("document"), &ShapeId::from("document")));
        assert!(!catalog.is_a(&ShapeId::from("document"), &ShapeId::from("weblink")));
        // unknown class never matches
        assert!(!catalog.is_a(&ShapeId::from("weblink"), &ShapeId::from("asset")));
    }

    #[test]
    fn catalog_rejects_cycle() {
        let mut shapes = HashMap::new();
        shapes.insert(
            "a".to_string(),
            ShapeConfig {
                extends: Some("b".to_string()),
            },
        );
        shapes.insert(
            "b".to_string(),
            ShapeConfig {
                extends: Some("a".to_string()),
            },
        );
        assert!(ShapeCatalog::from_config(&shapes).is_err());
    }

    #[test]
    fn object_from_json() {
        let obj = TargetObject::from_json(
            r#"{"shape": "document", "template": 4, "fields": {"published": 0, "alias": "home", "hidemenu": true}}"#,
        )
        .unwrap();
        assert_eq!(obj.shape().as_str(), "document");
        assert_eq!(obj.template(), Some(4));
        assert_eq!(obj.get("published"), Some(&Value::Int(0)));
        assert_eq!(obj.get("alias"), Some(&Value::str("home")));
        assert_eq!(obj.get("hidemenu"), Some(&Value::Bool(true)));
    }

    #[test]
    fn object_from_json_rejects_nested_field() {
        let err = TargetObject::from_json(r#"{"shape": "document", "fields": {"tv": [1, 2]}}"#);
        assert!(err.is_err());
    }
}
