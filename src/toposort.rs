//! Stage 5: Kahn's algorithm over non-sink nodes.
//!
//! Produces a sequence where every node precedes all of its children. Ties
//! (multiple zero-in-degree nodes available at once) are broken by a stack
//! discipline (last one queued, first one emitted) — a valid topological
//! order is all the encoder requires; determinism only demands the same
//! tie-break every run, which a plain `Vec`-backed stack gives for free.

use crate::graph::{Dafsa, Link, NodeId};

pub fn topo_sort(dafsa: &Dafsa) -> Vec<NodeId> {
    let n = dafsa.arena.len();
    let mut incoming = vec![0usize; n];
    let mut discovered = vec![false; n];

    for &root in &dafsa.roots {
        if let Link::Node(id) = root {
            discover(dafsa, &mut discovered, &mut incoming, id);
        }
    }

    let mut waiting: Vec<NodeId> = Vec::new();
    let mut queued = vec![false; n];
    for &root in &dafsa.roots {
        if let Link::Node(id) = root {
            if incoming[id as usize] == 0 && !queued[id as usize] {
                queued[id as usize] = true;
                waiting.push(id);
            }
        }
    }

    let mut emitted = vec![false; n];
    let mut order = Vec::with_capacity(n);
    while let Some(id) = waiting.pop() {
        if emitted[id as usize] {
            continue;
        }
        emitted[id as usize] = true;
        order.push(id);
        for &child in &dafsa.arena.get(id).children {
            if let Link::Node(cid) = child {
                incoming[cid as usize] -= 1;
                if incoming[cid as usize] == 0 && !queued[cid as usize] {
                    queued[cid as usize] = true;
                    waiting.push(cid);
                }
            }
        }
    }
    debug_assert_eq!(order.len(), n, "every node must be reachable from the roots");
    log::trace!("topo-sort: {} nodes ordered", order.len());
    order
}

/// Walks the graph once, counting true in-edges (edges from some interior
/// node to another — being a root does not count as an in-edge, matching
/// the implicit, unaddressed source).
fn discover(dafsa: &Dafsa, discovered: &mut Vec<bool>, incoming: &mut Vec<usize>, id: NodeId) {
    if discovered[id as usize] {
        return;
    }
    discovered[id as usize] = true;
    for &child in &dafsa.arena.get(id).children {
        if let Link::Node(cid) = child {
            incoming[cid as usize] += 1;
            discover(dafsa, discovered, incoming, cid);
        }
    }
}
