//! Name disambiguation over the flattened node list of one graph.
//!
//! Unrelated subtrees often declare identically named shapes (`a.config`, `b.config`), and every node of a graph
//! becomes a record triad (`X`, `XAttributes`, `XState`) in one namespace. Nodes whose triads share any record name
//! are qualified with ancestor names until every rendered name is unique.
//!
//! ## Notes
//! - Collisions are detected on the rendered record names, so `rule` and `rule_state` collide on `RuleState`, and
//!   `a.config` collides with a top-level `a_config` on `AConfig`.
//! - Ancestors are consumed nearest first: `x.a.config` collides first as `config`, then as `a.config`.
//! - Only nodes in a colliding group are qualified; a unique name is never lengthened.
//! - When no member of a group has ancestors left but their paths differ, every member after the first (in pre-order)
//!   gets a `_block` suffix.
//! - Members with identical paths cannot be told apart and are reported, never silently accepted.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use terragen_core::naming;

use super::errors::DisambiguationError;
use super::graph::{Graph, Node};

/// Appended to a fully qualified name that still collides.
const EXHAUSTED_SUFFIX: &str = "_block";

/// Rewrite `unique_name`/`unique_depth` of every node so rendered record names are pairwise distinct.
///
/// ## Errors
/// - [`DisambiguationError`] when two colliding nodes have the same dotted path.
#[tracing::instrument(skip_all, level = "trace", fields(nodes = graph.nodes.len()))]
pub fn disambiguate(graph: &mut Graph) -> Result<(), DisambiguationError> {
    for node in &mut graph.nodes {
        node.unique_name = node.name.clone();
        node.unique_depth = 0;
    }

    loop {
        let groups = collisions(graph);
        if groups.is_empty() {
            return Ok(());
        }

        // A node moves at most once per round; groups it shares are re-checked next round.
        let mut moved = BTreeSet::new();
        for members in groups {
            if members.iter().any(|index| moved.contains(index)) {
                continue;
            }
            let qualifiable: Vec<usize> = members
                .iter()
                .copied()
                .filter(|index| has_ancestor_left(&graph.nodes[*index]))
                .collect();
            if !qualifiable.is_empty() {
                for index in qualifiable {
                    let node = &mut graph.nodes[index];
                    let position = node.ancestors.len() - node.unique_depth - 1;
                    node.unique_name = format!("{}.{}", node.ancestors[position], node.unique_name);
                    node.unique_depth += 1;
                    moved.insert(index);
                }
                continue;
            }

            if let Some((name, count)) = shared_path(graph, &members) {
                return Err(DisambiguationError { name, count });
            }
            for index in &members[1..] {
                let node = &mut graph.nodes[*index];
                tracing::trace!(name = %node.unique_name, "qualified by suffix");
                node.unique_name.push_str(EXHAUSTED_SUFFIX);
                moved.insert(*index);
            }
        }
    }
}

/// Groups of nodes (ascending pre-order indices) whose record triads share at least one name.
fn collisions(graph: &Graph) -> BTreeSet<Vec<usize>> {
    let mut owners: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
    for (index, node) in graph.nodes.iter().enumerate() {
        for record in naming::record_triad(&node.unique_name) {
            owners.entry(record).or_default().insert(index);
        }
    }
    owners
        .into_values()
        .filter(|members| members.len() > 1)
        .map(|members| members.into_iter().collect())
        .collect()
}

fn has_ancestor_left(node: &Node) -> bool {
    node.unique_depth < node.ancestors.len()
}

fn dotted_path(node: &Node) -> String {
    let mut parts = node.ancestors.clone();
    parts.push(node.name.clone());
    parts.join(".")
}

/// The first dotted path shared by two or more members, with its multiplicity.
fn shared_path(graph: &Graph, members: &[usize]) -> Option<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for index in members {
        let path = dotted_path(&graph.nodes[*index]);
        let count = counts.entry(path.clone()).or_default();
        if *count == 0 {
            order.push(path);
        }
        *count += 1;
    }
    order.into_iter().find_map(|path| {
        let count = counts[&path];
        (count > 1).then_some((path, count))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::graph::build_graph;
    use crate::frontend::schema::Block;

    fn graph(json: serde_json::Value) -> Graph {
        let block: Block = serde_json::from_value(json).unwrap();
        build_graph(&block).unwrap()
    }

    fn single(inner: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"nesting_mode": "single", "block": inner})
    }

    #[test]
    fn test_sibling_subtrees_are_qualified() {
        let mut g = graph(serde_json::json!({"block_types": {
            "a": single(serde_json::json!({"block_types": {"config": single(serde_json::json!({}))}})),
            "b": single(serde_json::json!({"block_types": {"config": single(serde_json::json!({}))}}))
        }}));
        disambiguate(&mut g).unwrap();
        let names: Vec<_> = g.nodes.iter().map(|n| n.unique_name.as_str()).collect();
        assert_eq!(names, vec!["a", "a.config", "b", "b.config"]);
        assert_eq!(g.nodes[1].unique_depth, 1);
        assert_eq!(g.nodes[0].unique_depth, 0);
    }

    #[test]
    fn test_nearest_ancestor_consumed_first() {
        // x.a.config and y.a.config collide twice before `x`/`y` separate them.
        let nested = |outer: &str| {
            serde_json::json!({"block_types": {outer: single(serde_json::json!({"block_types": {
                "a": single(serde_json::json!({"block_types": {"config": single(serde_json::json!({}))}}))
            }}))}})
        };
        let mut x = nested("x");
        let y = nested("y");
        x["block_types"]["y"] = y["block_types"]["y"].clone();
        let mut g = graph(x);
        disambiguate(&mut g).unwrap();
        let mut names: Vec<_> = g.nodes.iter().map(|n| n.unique_name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["x", "x.a", "x.a.config", "y", "y.a", "y.a.config"]);
    }

    #[test]
    fn test_top_level_node_keeps_name_when_other_member_qualifies() {
        let mut g = graph(serde_json::json!({"block_types": {
            "config": single(serde_json::json!({})),
            "outer": single(serde_json::json!({"block_types": {"config": single(serde_json::json!({}))}}))
        }}));
        disambiguate(&mut g).unwrap();
        let names: Vec<_> = g.nodes.iter().map(|n| n.unique_name.as_str()).collect();
        assert_eq!(names, vec!["config", "outer", "outer.config"]);
    }

    #[test]
    fn test_unresolvable_collision_is_reported() {
        let mut g = graph(serde_json::json!({
            "attributes": {"config": {"type": ["object", {"a": "string"}], "optional": true}},
            "block_types": {"config": single(serde_json::json!({}))}
        }));
        let err = disambiguate(&mut g).unwrap_err();
        assert_eq!(err.name, "config");
        assert_eq!(err.count, 2);
    }

    #[test]
    fn test_suffix_collision_is_qualified() {
        let mut g = graph(serde_json::json!({"block_types": {
            "rule": single(serde_json::json!({})),
            "rule_state": single(serde_json::json!({}))
        }}));
        disambiguate(&mut g).unwrap();
        let names: Vec<_> = g.nodes.iter().map(|n| n.unique_name.as_str()).collect();
        assert_eq!(names, vec!["rule", "rule_state_block"]);
    }

    #[test]
    fn test_qualified_name_colliding_with_top_level_block() {
        let config = || single(serde_json::json!({"block_types": {"config": single(serde_json::json!({}))}}));
        let mut g = graph(serde_json::json!({"block_types": {
            "a": config(),
            "a_config": single(serde_json::json!({})),
            "b": config()
        }}));
        disambiguate(&mut g).unwrap();
        let names: Vec<_> = g.nodes.iter().map(|n| n.unique_name.as_str()).collect();
        assert_eq!(names, vec!["a", "a.config", "a_config_block", "b", "b.config"]);

        let mut records = BTreeSet::new();
        for node in &g.nodes {
            for record in naming::record_triad(&node.unique_name) {
                assert!(records.insert(record.clone()), "{record} rendered twice");
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let mut g = graph(serde_json::json!({"block_types": {
            "a": single(serde_json::json!({"block_types": {"config": single(serde_json::json!({}))}})),
            "b": single(serde_json::json!({"block_types": {"config": single(serde_json::json!({}))}}))
        }}));
        disambiguate(&mut g).unwrap();
        let first = g.clone();
        disambiguate(&mut g).unwrap();
        assert_eq!(first, g);
    }
}
