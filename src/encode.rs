//! Stage 6: the byte-array encoder.
//!
//! Emits nodes in reverse topological order (children before parents) into
//! a buffer that grows toward lower addresses conceptually, then reverses
//! the whole buffer once at the end so every offset in the finished array
//! points strictly forward. See `spec.md` §4.6 for the wire format; this
//! module is a direct translation of that section's algorithm, including
//! its fixed-point offset-width search.

use std::collections::HashMap;

use crate::graph::{Dafsa, Link, NodeId};
use crate::Error;

/// `spec.md` §4.6: `d >= 2^21` cannot be represented by the 3-byte format.
const MAX_DISTANCE: usize = 1 << 21;

pub fn encode(dafsa: &Dafsa, order: &[NodeId]) -> Result<Vec<u8>, Error> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: HashMap<NodeId, usize> = HashMap::with_capacity(order.len());

    for &id in order.iter().rev() {
        let interior = dafsa.arena.get(id);
        let prefix_fusable = interior.children.len() == 1
            && match interior.children[0] {
                Link::Sink => false,
                Link::Node(cid) => offsets.get(&cid) == Some(&output.len()),
            };
        if prefix_fusable {
            output.extend(encode_prefix(&interior.label));
        } else {
            let links = encode_links(&interior.children, &offsets, output.len())?;
            output.extend(links);
            output.extend(encode_label(&interior.label));
        }
        offsets.insert(id, output.len());
    }

    let source_links = encode_links(&dafsa.roots, &offsets, output.len())?;
    output.extend(source_links);
    output.reverse();
    log::debug!("encode: {} nodes -> {} bytes", order.len(), output.len());
    Ok(output)
}

/// Encodes a node label with no trailing terminator, for placement directly
/// before a child that immediately follows it in the finished array.
fn encode_prefix(label: &[u8]) -> Vec<u8> {
    label.iter().rev().copied().collect()
}

/// Encodes a node label terminated by setting the high bit of its
/// reversed-first (i.e. original-last) byte — the `end_char` or
/// `return_value` marker.
fn encode_label(label: &[u8]) -> Vec<u8> {
    let mut buf = encode_prefix(label);
    buf[0] |= 0x80;
    buf
}

/// Encodes a node's outgoing links as one, two, or three byte offsets,
/// using the fixed-point width search from `spec.md` §4.6: each iteration's
/// produced length is a lower bound on the next guess, so the loop
/// terminates in at most `2 * children.len()` passes.
fn encode_links(children: &[Link], offsets: &HashMap<NodeId, usize>, current: usize) -> Result<Vec<u8>, Error> {
    if children.len() == 1 && children[0] == Link::Sink {
        // An end-label node: the label's return-value terminator doubles as
        // the end marker, so there is no offset block at all.
        return Ok(Vec::new());
    }

    let mut sorted: Vec<NodeId> = children
        .iter()
        .map(|c| match c {
            Link::Node(id) => *id,
            Link::Sink => unreachable!("sink cannot share a node with other children"),
        })
        .collect();
    sorted.sort_by_key(|id| std::cmp::Reverse(offsets[id]));

    let mut guess = 3 * sorted.len();
    loop {
        let mut offset = current + guess;
        let mut buf: Vec<u8> = Vec::new();
        let mut last_group_start = 0usize;
        for &child_id in &sorted {
            let target = offsets[&child_id];
            last_group_start = buf.len();
            debug_assert!(offset > target, "child must already have been emitted at a lower offset");
            let distance = offset - target;
            if distance >= MAX_DISTANCE {
                return Err(Error::EncodingOverflow(distance));
            }
            if distance < (1 << 6) {
                buf.push(distance as u8);
            } else if distance < (1 << 13) {
                buf.push(0x40 | (distance >> 8) as u8);
                buf.push((distance & 0xFF) as u8);
            } else {
                buf.push(0x60 | (distance >> 16) as u8);
                buf.push(((distance >> 8) & 0xFF) as u8);
                buf.push((distance & 0xFF) as u8);
            }
            // The first link is relative to the record that follows this
            // offset block; every later link is relative to the previous
            // child's start.
            offset -= distance;
        }
        debug_assert!(buf.len() <= guess, "fixed-point width search must shrink monotonically");
        if buf.len() == guess {
            buf[last_group_start] |= 0x80;
            buf.reverse();
            return Ok(buf);
        }
        guess = buf.len();
    }
}
