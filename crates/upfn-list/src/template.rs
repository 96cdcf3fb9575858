//! `$self` and `$context` substitution for generated items.

use upfn_protocol::{DynamicValue, Mapping};

const SELF_PREFIX: &str = "$self.";
const CONTEXT_PREFIX: &str = "$context.";

/// Per-item values exposed to a template as `$self.<field>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemContext {
    index: usize,
    count: usize,
}

impl ItemContext {
    /// Describes the item at zero-based `index` of `count` items.
    #[must_use]
    pub const fn new(index: usize, count: usize) -> Self {
        Self { index, count }
    }

    /// Resolves a `$self` field, or `None` for unknown fields.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<DynamicValue> {
        let as_int = |value: usize| DynamicValue::int(i64::try_from(value).unwrap_or(i64::MAX));
        match name {
            "number" => Some(as_int(self.index.saturating_add(1))),
            "index" => Some(as_int(self.index)),
            "count" => Some(as_int(self.count)),
            "first" => Some(DynamicValue::Bool(self.index == 0)),
            "last" => Some(DynamicValue::Bool(self.index.saturating_add(1) == self.count)),
            _ => None,
        }
    }
}

/// Copies `template`, replacing whole-string references.
///
/// A string leaf equal to `$self.<field>` becomes that field's typed value.
/// A leaf equal to `$context.<key>` becomes the context entry when present.
/// Anything else, including unresolved references, is copied unchanged.
#[must_use]
pub fn expand(template: &DynamicValue, item: &ItemContext, context: &Mapping) -> DynamicValue {
    match template {
        DynamicValue::String(text) => resolve(text, item, context)
            .unwrap_or_else(|| DynamicValue::String(text.clone())),
        DynamicValue::Sequence(items) => DynamicValue::Sequence(
            items
                .iter()
                .map(|value| expand(value, item, context))
                .collect(),
        ),
        DynamicValue::Mapping(entries) => DynamicValue::Mapping(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), expand(value, item, context)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

fn resolve(text: &str, item: &ItemContext, context: &Mapping) -> Option<DynamicValue> {
    if let Some(field) = text.strip_prefix(SELF_PREFIX) {
        return item.field(field);
    }
    text.strip_prefix(CONTEXT_PREFIX)
        .and_then(|key| context.get(key))
        .cloned()
}
