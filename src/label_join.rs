//! Stage 4: fuses a node into its sole child when that child has no other
//! parent, concatenating their labels. Runs last, after both suffix merges,
//! so it never defeats sharing.
//!
//! Two passes: count parents (the sink is pinned at "2 or more" so it is
//! never a fusion target), then rebuild depth-first, fusing where eligible.

use crate::graph::{Arena, Dafsa, Link};

/// The sink is never fused into, so its effective parent count is always
/// treated as at least this many.
const SINK_PARENT_COUNT: usize = 2;

pub fn join_labels(dafsa: &Dafsa) -> Dafsa {
    let mut parent_count = vec![0usize; dafsa.arena.len()];
    let mut visited = vec![false; dafsa.arena.len()];
    for &root in &dafsa.roots {
        count_parents(dafsa, &mut visited, &mut parent_count, root);
    }

    let mut new_arena = Arena::default();
    let mut memo: Vec<Option<Link>> = vec![None; dafsa.arena.len()];
    let roots: Vec<Link> = dafsa
        .roots
        .iter()
        .map(|&root| join(dafsa, &mut new_arena, &parent_count, &mut memo, root))
        .collect();

    log::trace!("label-join: {} nodes -> {} nodes", dafsa.arena.len(), new_arena.len());
    Dafsa { arena: new_arena, roots }
}

fn count_parents(dafsa: &Dafsa, visited: &mut Vec<bool>, parent_count: &mut Vec<usize>, node: Link) {
    let id = match node {
        Link::Sink => return,
        Link::Node(id) => id,
    };
    parent_count[id as usize] += 1;
    if visited[id as usize] {
        return;
    }
    visited[id as usize] = true;
    let children = dafsa.arena.get(id).children.clone();
    for child in children {
        count_parents(dafsa, visited, parent_count, child);
    }
}

fn join(
    dafsa: &Dafsa,
    new_arena: &mut Arena,
    parent_count: &[usize],
    memo: &mut Vec<Option<Link>>,
    node: Link,
) -> Link {
    let old_id = match node {
        Link::Sink => return Link::Sink,
        Link::Node(id) => id,
    };
    if let Some(existing) = memo[old_id as usize] {
        return existing;
    }

    let interior = dafsa.arena.get(old_id);
    let label = interior.label.clone();
    let orig_children = interior.children.clone();

    let mut joined_children = Vec::with_capacity(orig_children.len());
    for &child in &orig_children {
        joined_children.push(join(dafsa, new_arena, parent_count, memo, child));
    }

    let result = if joined_children.len() == 1 {
        let sole_parent_count = match orig_children[0] {
            Link::Sink => SINK_PARENT_COUNT,
            Link::Node(cid) => parent_count[cid as usize],
        };
        if sole_parent_count == 1 {
            let Link::Node(child_id) = joined_children[0] else {
                unreachable!("a node with parent-count 1 cannot be the sink")
            };
            let child = new_arena.get(child_id);
            let mut fused_label = label;
            fused_label.extend_from_slice(&child.label);
            let grandchildren = child.children.clone();
            Link::Node(new_arena.alloc(fused_label, grandchildren))
        } else {
            Link::Node(new_arena.alloc(label, joined_children))
        }
    } else {
        Link::Node(new_arena.alloc(label, joined_children))
    };
    memo[old_id as usize] = Some(result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build;
    use crate::reverse::reverse;
    use crate::suffix_merge::merge_suffixes;

    fn pipeline_upto_join(words: &[&str]) -> Dafsa {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let d = build(&words).unwrap();
        let d = reverse(&d);
        let d = merge_suffixes(&d);
        let d = reverse(&d);
        merge_suffixes(&d)
    }

    #[test]
    fn fuses_single_child_single_parent_chain() {
        let before = pipeline_upto_join(&["aa1", "a2"]);
        let after = join_labels(&before);
        assert_eq!(after.roots.len(), 1);
        let Link::Node(root) = after.roots[0] else { panic!("expected node") };
        let root_node = after.arena.get(root);
        assert_eq!(root_node.label, vec![b'a']);
        assert_eq!(root_node.children.len(), 2);
        let labels: Vec<Vec<u8>> = root_node
            .children
            .iter()
            .map(|&c| match c {
                Link::Node(id) => after.arena.get(id).label.clone(),
                Link::Sink => panic!("expected node"),
            })
            .collect();
        assert!(labels.contains(&vec![b'a', 1]));
        assert!(labels.contains(&vec![2]));
    }

    #[test]
    fn never_fuses_into_the_sink() {
        let before = pipeline_upto_join(&["ab1"]);
        let after = join_labels(&before);
        // single word "ab1" has no sharing at all, so the whole chain fuses
        // down to one node whose label ends in the return byte.
        let Link::Node(root) = after.roots[0] else { panic!("expected node") };
        let node = after.arena.get(root);
        assert_eq!(node.label, vec![b'a', b'b', 1]);
        assert_eq!(node.children, vec![Link::Sink]);
    }
}
