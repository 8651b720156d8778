use chrono::Utc;
use indexmap::IndexMap;

use crate::value::Value;

/// Names the evaluator can resolve as an initial object.
///
/// A registry is layered: the default zero-values sit underneath, caller
/// entries are inserted on top and win on conflict. Iteration order is
/// deterministic (defaults in declaration order, then caller entries in
/// insertion order) so alias lookup always picks the same match.
#[derive(Debug, Clone)]
pub struct Registry {
    objects: IndexMap<String, Value>,
}

impl Registry {
    /// A registry holding only the default zero-values.
    pub fn new() -> Self {
        Self {
            objects: Self::default_objects(),
        }
    }

    /// A registry without defaults.
    pub fn empty() -> Self {
        Self {
            objects: IndexMap::new(),
        }
    }

    /// The default table: `Bool`, `Date`, `Int`, `Double` and `String`.
    pub fn default_objects() -> IndexMap<String, Value> {
        IndexMap::from([
            ("Bool".to_owned(), Value::Bool(true)),
            ("Date".to_owned(), Value::Date(Utc::now())),
            ("Int".to_owned(), Value::Int(0)),
            ("Double".to_owned(), Value::Double(0.0)),
            ("String".to_owned(), Value::String(String::new())),
        ])
    }

    /// Adds or overrides an entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.objects.insert(name.into(), value.into());
    }

    /// Builder form of [`Registry::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Layers `overrides` on top of `self`; entries in `overrides` win.
    pub fn merged(mut self, overrides: Registry) -> Self {
        for (name, value) in overrides.objects {
            self.objects.insert(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.objects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.objects.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, Value)> for Registry {
    /// Builds a registry of caller entries on top of the defaults.
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut registry = Registry::new();
        for (name, value) in iter {
            registry.insert(name, value);
        }
        registry
    }
}
