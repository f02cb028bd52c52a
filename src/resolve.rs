//! `$ref` flattening over raw schema documents.
//!
//! Two-phase, intentionally non-recursive into substitutions so mutually
//! recursive definitions terminate:
//! 1. collect `$defs`/`definitions` under canonical pointer strings;
//! 2. self-resolve the table in a single pass against the *original* table
//!    (an inner `$ref` inside a substituted target stays unresolved);
//! 3. rewrite the root fragment, replacing each `$ref`-bearing dict with its
//!    table entry; dangling pointers resolve to themselves;
//! 4. drop the definitions section from the output.
//!
//! A resolution miss is absorbed, never surfaced as an `Err`: consumers must
//! tolerate a leftover `$ref` marker.

use indexmap::IndexMap;
use serde_json::Value;

const DEF_SECTIONS: [&str; 2] = ["$defs", "definitions"];

/// Canonical pointer → schema fragment, built once per document and
/// self-resolved one level deep at construction time.
#[derive(Debug, Clone, Default)]
pub struct DefinitionsTable {
    entries: IndexMap<String, Value>,
}

impl DefinitionsTable {
    pub fn from_document(doc: &Value) -> Self {
        let mut raw = IndexMap::new();
        if let Some(map) = doc.as_object() {
            for section in DEF_SECTIONS {
                if let Some(Value::Object(defs)) = map.get(section) {
                    for (name, fragment) in defs {
                        raw.insert(format!("#/{section}/{name}"), fragment.clone());
                    }
                }
            }
        }

        // Self-resolution pass: every entry is rewritten against the original
        // (unrewritten) table. One level of indirection only.
        let original = DefinitionsTable { entries: raw.clone() };
        let entries = raw
            .into_iter()
            .map(|(pointer, fragment)| {
                let rewritten = rewrite_refs(&original, &fragment);
                (pointer, rewritten)
            })
            .collect();

        DefinitionsTable { entries }
    }

    pub fn lookup(&self, pointer: &str) -> Option<&Value> {
        self.entries.get(pointer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flatten every reachable `$ref` in `doc` and drop its definitions section.
pub fn resolve_document(doc: &Value) -> Value {
    let table = DefinitionsTable::from_document(doc);
    log::debug!("resolving document against {} definitions", table.len());
    let mut out = rewrite_refs(&table, doc);
    if let Some(map) = out.as_object_mut() {
        for section in DEF_SECTIONS {
            map.shift_remove(section);
        }
    }
    out
}

/// Main rewrite rule: a dict carrying `$ref` is replaced whole by its table
/// entry (or kept unchanged on a miss); otherwise recurse into list/dict
/// members, leaving scalar members untouched.
fn rewrite_refs(table: &DefinitionsTable, v: &Value) -> Value {
    match v {
        Value::Array(items) => Value::Array(items.iter().map(|x| rewrite_refs(table, x)).collect()),
        Value::Object(map) => {
            if let Some(Value::String(pointer)) = map.get("$ref") {
                return match table.lookup(pointer) {
                    Some(target) => target.clone(),
                    // dangling pointer: no-op substitution
                    None => v.clone(),
                };
            }
            let mut out = serde_json::Map::new();
            for (key, member) in map {
                let rewritten = match member {
                    Value::Array(_) | Value::Object(_) => rewrite_refs(table, member),
                    scalar => scalar.clone(),
                };
                out.insert(key.clone(), rewritten);
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

// ------------------------------- Tests ------------------------------------ //
