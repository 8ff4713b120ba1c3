//! Collision chains: singly-linked lists threaded through a node arena.
//!
//! A `Chain` is only a head link. Nodes live in a `SlotMap` owned by the
//! map, and each node carries the link to its successor, so relinking a
//! node into another chain never moves the key or value.

use slotmap::{DefaultKey, SlotMap};

pub(crate) type NodeId = DefaultKey;
pub(crate) type Nodes<K, V> = SlotMap<NodeId, Node<K, V>>;

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    // Hash of `key` computed once at insertion.
    pub(crate) hash: u64,
    next: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, hash: u64) -> Self {
        Self {
            key,
            value,
            hash,
            next: None,
        }
    }

    pub(crate) fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Chain {
    head: Option<NodeId>,
}

impl Chain {
    pub(crate) const EMPTY: Chain = Chain { head: None };

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Store `node` in the arena and link it at the front. O(1).
    pub(crate) fn push_front<K, V>(
        &mut self,
        nodes: &mut Nodes<K, V>,
        mut node: Node<K, V>,
    ) -> NodeId {
        node.next = self.head;
        let id = nodes.insert(node);
        self.head = Some(id);
        id
    }

    pub(crate) fn iter<'a, K, V>(&self, nodes: &'a Nodes<K, V>) -> Iter<'a, K, V> {
        Iter {
            nodes,
            cur: self.head,
        }
    }

    /// First node, in chain order, accepted by `pred`.
    pub(crate) fn find<K, V, P>(&self, nodes: &Nodes<K, V>, mut pred: P) -> Option<NodeId>
    where
        P: FnMut(&Node<K, V>) -> bool,
    {
        self.iter(nodes).find(|&(_, n)| pred(n)).map(|(id, _)| id)
    }

    /// Unlink `target` from this chain and take it out of the arena. O(n).
    /// Returns `None` if `target` is not linked into this chain.
    pub(crate) fn remove<K, V>(
        &mut self,
        nodes: &mut Nodes<K, V>,
        target: NodeId,
    ) -> Option<Node<K, V>> {
        let mut prev: Option<NodeId> = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            let next = nodes[id].next;
            if id == target {
                match prev {
                    None => self.head = next,
                    Some(p) => nodes[p].next = next,
                }
                return nodes.remove(id);
            }
            prev = Some(id);
            cur = next;
        }
        None
    }

    pub(crate) fn pop_front<K, V>(&mut self, nodes: &mut Nodes<K, V>) -> Option<Node<K, V>> {
        let id = self.head?;
        let node = nodes.remove(id)?;
        self.head = node.next;
        Some(node)
    }

    /// Split the chain in two, keeping chain order on both sides. Nodes for
    /// which `goes_high` is true end up in the second chain.
    pub(crate) fn split<K, V, F>(
        self,
        nodes: &mut Nodes<K, V>,
        mut goes_high: F,
    ) -> (Chain, Chain)
    where
        F: FnMut(&Node<K, V>) -> bool,
    {
        let mut lo = Chain::EMPTY;
        let mut hi = Chain::EMPTY;
        let mut lo_tail: Option<NodeId> = None;
        let mut hi_tail: Option<NodeId> = None;

        let mut cur = self.head;
        while let Some(id) = cur {
            let node = &mut nodes[id];
            cur = node.next.take();
            let (chain, tail) = if goes_high(node) {
                (&mut hi, &mut hi_tail)
            } else {
                (&mut lo, &mut lo_tail)
            };
            match *tail {
                None => chain.head = Some(id),
                Some(t) => nodes[t].next = Some(id),
            }
            *tail = Some(id);
        }
        (lo, hi)
    }
}

/// Forward traversal of one chain.
pub(crate) struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    cur: Option<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (NodeId, &'a Node<K, V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        let node = self.nodes.get(id)?;
        self.cur = node.next;
        Some((id, node))
    }
}
