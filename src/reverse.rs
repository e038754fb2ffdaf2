//! Stage 2: edge reversal.
//!
//! Builds a new DAFSA that is the old one's edge reversal: the old sink
//! becomes the new source (i.e. the nodes that used to point at the old
//! sink become the new roots), the old source becomes the new sink (nodes
//! that used to be roots now point at `Link::Sink`), and every label is
//! byte-reversed. Node identity is preserved one-to-one via a dense
//! old-id -> new-id map, exactly as `spec.md` requires.

use crate::graph::{Arena, Dafsa, Link, NodeId};

pub fn reverse(dafsa: &Dafsa) -> Dafsa {
    let mut new_arena = Arena::default();
    let mut mapped: Vec<Option<NodeId>> = vec![None; dafsa.arena.len()];
    let mut new_roots: Vec<Link> = Vec::new();

    for &root in &dafsa.roots {
        visit(dafsa, &mut new_arena, &mut mapped, &mut new_roots, root, Link::Sink);
    }

    log::trace!(
        "reverse: {} nodes -> {} nodes, {} roots",
        dafsa.arena.len(),
        new_arena.len(),
        new_roots.len()
    );
    Dafsa { arena: new_arena, roots: new_roots }
}

/// `parent` is the link the new node (or the new source, via `new_roots`)
/// should grow as a child, since in the reversed graph every old parent
/// becomes a new child.
fn visit(
    old: &Dafsa,
    new_arena: &mut Arena,
    mapped: &mut Vec<Option<NodeId>>,
    new_roots: &mut Vec<Link>,
    node: Link,
    parent: Link,
) {
    match node {
        Link::Sink => new_roots.push(parent),
        Link::Node(old_id) => match mapped[old_id as usize] {
            Some(new_id) => new_arena.push_child(new_id, parent),
            None => {
                let interior = old.arena.get(old_id);
                let mut label = interior.label.clone();
                label.reverse();
                let new_id = new_arena.alloc(label, vec![parent]);
                mapped[old_id as usize] = Some(new_id);
                for &child in &interior.children {
                    visit(old, new_arena, mapped, new_roots, child, Link::Node(new_id));
                }
            }
        },
    }
}
