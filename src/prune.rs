//! Cycle-safe materialization of graph-shaped values.
//!
//! `serde_json::Value` cannot express a cycle, so callers that need to
//! serialize possibly self-referential graphs build them in a `ValueArena`:
//! every container gets a stable integer handle, edges are handles, and the
//! same handle may appear any number of times, including below itself.
//!
//! `prune` walks the graph depth-first with a path-scoped visited set:
//! - a handle already on the *current descent path* is a cycle and is cut to
//!   `null` without descending;
//! - a handle reached again through a sibling branch is shared-but-acyclic
//!   and is expanded in full each time (no memoized short-circuit).
//!
//! Both halves of that contract are asserted independently in the tests.

use std::collections::HashSet;

use serde_json::Value;

/// Stable handle into a `ValueArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum GraphNode {
    Scalar(Value),
    Seq(Vec<NodeId>),
    Map(Vec<(String, NodeId)>),
}

/// Arena of graph nodes. Container category is preserved through pruning:
/// a `Seq` materializes as a JSON array, a `Map` as a JSON object.
#[derive(Debug, Default)]
pub struct ValueArena {
    nodes: Vec<GraphNode>,
}

impl ValueArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: GraphNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn scalar(&mut self, v: impl Into<Value>) -> NodeId {
        self.push(GraphNode::Scalar(v.into()))
    }

    pub fn seq(&mut self, items: Vec<NodeId>) -> NodeId {
        self.push(GraphNode::Seq(items))
    }

    pub fn map(&mut self, entries: Vec<(String, NodeId)>) -> NodeId {
        self.push(GraphNode::Map(entries))
    }

    /// Append to an existing sequence. Back-edges (`item` pointing at `seq`
    /// or one of its ancestors) are how cycles are built.
    pub fn seq_push(&mut self, seq: NodeId, item: NodeId) {
        match self.nodes.get_mut(seq.0) {
            Some(GraphNode::Seq(items)) => items.push(item),
            _ => debug_assert!(false, "seq_push on a non-seq handle"),
        }
    }

    /// Insert into an existing map; same back-edge story as `seq_push`.
    pub fn map_insert(&mut self, map: NodeId, key: impl Into<String>, value: NodeId) {
        match self.nodes.get_mut(map.0) {
            Some(GraphNode::Map(entries)) => entries.push((key.into(), value)),
            _ => debug_assert!(false, "map_insert on a non-map handle"),
        }
    }

    /// Import a plain (necessarily acyclic) JSON tree.
    pub fn from_value(&mut self, v: &Value) -> NodeId {
        match v {
            Value::Array(items) => {
                let ids = items.iter().map(|x| self.from_value(x)).collect();
                self.seq(ids)
            }
            Value::Object(map) => {
                let entries = map
                    .iter()
                    .map(|(k, x)| (k.clone(), self.from_value(x)))
                    .collect();
                self.map(entries)
            }
            scalar => self.scalar(scalar.clone()),
        }
    }

    /// Materialize the subgraph at `root` into a plain JSON tree, cutting
    /// cycles to `null`. The visited set lives on this call's stack only.
    pub fn prune(&self, root: NodeId) -> Value {
        let mut on_path = HashSet::new();
        self.prune_inner(root, &mut on_path)
    }

    fn prune_inner(&self, id: NodeId, on_path: &mut HashSet<NodeId>) -> Value {
        let Some(node) = self.nodes.get(id.0) else {
            // foreign or stale handle: degrade rather than panic
            return Value::Null;
        };
        match node {
            GraphNode::Scalar(v) => v.clone(),
            GraphNode::Seq(items) => {
                if !on_path.insert(id) {
                    return Value::Null; // cycle: ancestor on the current path
                }
                let out = items.iter().map(|it| self.prune_inner(*it, on_path)).collect();
                on_path.remove(&id);
                Value::Array(out)
            }
            GraphNode::Map(entries) => {
                if !on_path.insert(id) {
                    return Value::Null;
                }
                let mut out = serde_json::Map::new();
                for (key, child) in entries {
                    out.insert(key.clone(), self.prune_inner(*child, on_path));
                }
                on_path.remove(&id);
                Value::Object(out)
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
