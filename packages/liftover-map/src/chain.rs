//! Chain resolution: linking one-hop edges into lineage chains
//!
//! The core of the converter. Given the pooled edges of one or more liftover
//! tables, trace every lineage path forward and classify it against the
//! anchor model:
//! - complete: the final hop lands on the anchor with a real node/property
//! - conflicted: the lineage never reaches the anchor (kept for review)
//!
//! Next-hop lookup goes through a source-triple index, so each hop is O(1)
//! and the whole build is O(E).

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::edge::{Edge, Triple};
use crate::error::{LiftoverError, Result};

/// A traced lineage path: a non-empty edge sequence where each edge's
/// destination triple equals the next edge's source triple.
///
/// Built once here, consumed once by the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    edges: Vec<Edge>,
}

impl Chain {
    fn new(head: Edge) -> Self {
        Self { edges: vec![head] }
    }

    fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        // chains are non-empty by construction
        false
    }

    /// The last edge; its destination decides the chain's classification
    /// and, for complete chains, the target node/property in the graph.
    pub fn final_edge(&self) -> &Edge {
        self.edges.last().expect("chain is never empty")
    }
}

/// Link edges into chains and classify them against `anchor_model`
/// (the ChainBuilder).
///
/// Heads are edges whose source triple no other edge produces as a fully
/// specified destination. Each head is walked forward until the destination
/// is unmapped (empty node or property) or has no continuation.
///
/// Tie-break: when several edges share a source triple, the first one in
/// input order wins and the ambiguity is logged, so re-running on the same
/// input is deterministic.
///
/// Fails with [`LiftoverError::CycleDetected`] when the edge set contains a
/// lineage loop, whether reachable from a head or closed onto itself.
pub fn build_chains(edges: &[Edge], anchor_model: &str) -> Result<(Vec<Chain>, Vec<Chain>)> {
    // Source-triple index, input order preserved for the tie-break.
    let mut by_source: FxHashMap<Triple, Vec<usize>> = FxHashMap::default();
    for (idx, edge) in edges.iter().enumerate() {
        by_source.entry(edge.source_triple()).or_default().push(idx);
    }
    for (triple, indices) in &by_source {
        if indices.len() > 1 {
            warn!(
                source = %triple,
                candidates = indices.len(),
                "ambiguous source triple: first edge in input order wins"
            );
        }
    }

    // Only fully specified destinations can source a next hop.
    let dest_triples: FxHashSet<Triple> = edges
        .iter()
        .filter(|e| e.has_full_destination())
        .map(Edge::dest_triple)
        .collect();

    let heads: Vec<usize> = (0..edges.len())
        .filter(|&idx| !dest_triples.contains(&edges[idx].source_triple()))
        .collect();

    detect_unreachable_cycles(edges, &by_source, &heads)?;

    let mut complete = Vec::new();
    let mut conflicted = Vec::new();

    for &head in &heads {
        let mut chain = Chain::new(edges[head].clone());
        let mut visited: FxHashSet<Triple> = FxHashSet::default();
        loop {
            let current = chain.final_edge();
            if current.new_node.is_empty() || current.new_prop.is_empty() {
                // unmapped destination, nothing can continue from here
                break;
            }
            let next_key = current.dest_triple();
            if !visited.insert(next_key.clone()) {
                return Err(LiftoverError::CycleDetected {
                    model: next_key.model,
                    node: next_key.node,
                    prop: next_key.prop,
                });
            }
            match by_source.get(&next_key) {
                Some(indices) => chain.push(edges[indices[0]].clone()),
                None => break,
            }
        }

        let last = chain.final_edge();
        if last.new_model == anchor_model
            && !last.new_node.is_empty()
            && !last.new_prop.is_empty()
        {
            complete.push(chain);
        } else {
            conflicted.push(chain);
        }
    }

    debug!(
        heads = heads.len(),
        complete = complete.len(),
        conflicted = conflicted.len(),
        "chain build finished"
    );
    Ok((complete, conflicted))
}

/// A closed lineage loop has no head, so the forward walks would silently
/// skip it. BFS over all continuations from every head; any edge left
/// unreached can only sit in (or behind) such a loop.
fn detect_unreachable_cycles(
    edges: &[Edge],
    by_source: &FxHashMap<Triple, Vec<usize>>,
    heads: &[usize],
) -> Result<()> {
    let mut reached = vec![false; edges.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for &head in heads {
        reached[head] = true;
        queue.push_back(head);
    }
    while let Some(idx) = queue.pop_front() {
        let edge = &edges[idx];
        if edge.new_node.is_empty() || edge.new_prop.is_empty() {
            continue;
        }
        if let Some(successors) = by_source.get(&edge.dest_triple()) {
            for &succ in successors {
                if !reached[succ] {
                    reached[succ] = true;
                    queue.push_back(succ);
                }
            }
        }
    }
    if let Some(idx) = reached.iter().position(|&r| !r) {
        let triple = edges[idx].source_triple();
        return Err(LiftoverError::CycleDetected {
            model: triple.model,
            node: triple.node,
            prop: triple.prop,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(
        old_ver: &str,
        old_node: &str,
        old_prop: &str,
        new_ver: &str,
        new_node: &str,
        new_prop: &str,
    ) -> Edge {
        Edge {
            old_model: format!("CCDIv{old_ver}"),
            old_node: old_node.to_string(),
            old_prop: old_prop.to_string(),
            new_model: format!("CCDIv{new_ver}"),
            new_node: new_node.to_string(),
            new_prop: new_prop.to_string(),
        }
    }

    #[test]
    fn test_two_hop_chain_is_complete() {
        let edges = vec![
            edge("1.7.2", "n1", "p1", "1.9.1", "n2", "p2"),
            edge("1.9.1", "n2", "p2", "2.1.0", "n3", "p3"),
        ];
        let (complete, conflicted) = build_chains(&edges, "CCDIv2.1.0").unwrap();
        assert_eq!(complete.len(), 1);
        assert!(conflicted.is_empty());
        assert_eq!(complete[0].len(), 2);
        assert_eq!(complete[0].final_edge().new_node, "n3");
    }

    #[test]
    fn test_chain_not_reaching_anchor_is_conflicted() {
        let edges = vec![edge("1.7.2", "n1", "p1", "1.9.1", "n2", "p2")];
        let (complete, conflicted) = build_chains(&edges, "CCDIv2.1.0").unwrap();
        assert!(complete.is_empty());
        assert_eq!(conflicted.len(), 1);
    }

    #[test]
    fn test_chain_with_empty_destination_is_conflicted() {
        // Unmapped destination terminates the walk even though the model
        // matches the anchor.
        let edges = vec![edge("1.9.1", "n2", "p2", "2.1.0", "", "")];
        let (complete, conflicted) = build_chains(&edges, "CCDIv2.1.0").unwrap();
        assert!(complete.is_empty());
        assert_eq!(conflicted.len(), 1);
    }

    #[test]
    fn test_classification_is_order_independent() {
        let forward = vec![
            edge("1.7.2", "n1", "p1", "1.9.1", "n2", "p2"),
            edge("1.9.1", "n2", "p2", "2.1.0", "n3", "p3"),
            edge("1.8.0", "x1", "q1", "1.9.1", "x2", "q2"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let (c1, f1) = build_chains(&forward, "CCDIv2.1.0").unwrap();
        let (c2, f2) = build_chains(&reversed, "CCDIv2.1.0").unwrap();
        assert_eq!(c1.len(), c2.len());
        assert_eq!(f1.len(), f2.len());

        let finals = |chains: &[Chain]| {
            let mut v: Vec<String> = chains
                .iter()
                .map(|c| c.final_edge().dest_triple().to_string())
                .collect();
            v.sort();
            v
        };
        assert_eq!(finals(&c1), finals(&c2));
        assert_eq!(finals(&f1), finals(&f2));
    }

    #[test]
    fn test_tie_break_picks_first_edge_in_input_order() {
        let winner = edge("1.9.1", "n2", "p2", "2.1.0", "n3", "p3");
        let loser = edge("1.9.1", "n2", "p2", "2.1.0", "other", "q");
        let edges = vec![
            edge("1.7.2", "n1", "p1", "1.9.1", "n2", "p2"),
            winner.clone(),
            loser,
        ];
        let (complete, _) = build_chains(&edges, "CCDIv2.1.0").unwrap();
        let through_n1: Vec<&Chain> = complete
            .iter()
            .filter(|c| c.edges()[0].old_node == "n1")
            .collect();
        assert_eq!(through_n1.len(), 1);
        assert_eq!(through_n1[0].edges()[1], winner);
    }

    #[test]
    fn test_closed_two_cycle_is_detected() {
        let edges = vec![
            edge("1.7.2", "n1", "p1", "1.9.1", "n2", "p2"),
            edge("1.9.1", "n2", "p2", "1.7.2", "n1", "p1"),
        ];
        let err = build_chains(&edges, "CCDIv2.1.0").unwrap_err();
        assert!(matches!(err, LiftoverError::CycleDetected { .. }));
    }

    #[test]
    fn test_cycle_reachable_from_head_is_detected() {
        let edges = vec![
            edge("1.7.2", "s", "p", "1.8.0", "a", "q"),
            edge("1.8.0", "a", "q", "1.9.1", "b", "r"),
            edge("1.9.1", "b", "r", "1.8.0", "a", "q"),
        ];
        let err = build_chains(&edges, "CCDIv2.1.0").unwrap_err();
        match err {
            LiftoverError::CycleDetected { model, node, prop } => {
                assert_eq!(model, "CCDIv1.8.0");
                assert_eq!(node, "a");
                assert_eq!(prop, "q");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_loop_is_detected() {
        let edges = vec![edge("1.9.1", "n", "p", "1.9.1", "n", "p")];
        let err = build_chains(&edges, "CCDIv2.1.0").unwrap_err();
        assert!(matches!(err, LiftoverError::CycleDetected { .. }));
    }

    #[test]
    fn test_empty_edge_set_builds_nothing() {
        let (complete, conflicted) = build_chains(&[], "CCDIv2.1.0").unwrap();
        assert!(complete.is_empty());
        assert!(conflicted.is_empty());
    }
}
