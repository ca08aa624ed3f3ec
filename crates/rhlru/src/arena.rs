//! Node arena holding the circular recency list
//!
//! Slot 0 is a sentinel: its `next` is the most recently used node and its
//! `prev` the least recently used one. Links are `u32` offsets into the
//! arena, so the ring never allocates per node.

/// Index of the sentinel slot
pub(crate) const SENTINEL: u32 = 0;

/// Node in the recency ring
pub(crate) struct Node<K, V> {
    pub(crate) next: u32,
    pub(crate) prev: u32,
    /// `None` for the sentinel and for reservoir slots
    pub(crate) entry: Option<(K, V)>,
}

impl<K, V> Node<K, V> {
    fn vacant(prev: u32, next: u32) -> Self {
        Self {
            next,
            prev,
            entry: None,
        }
    }
}

/// Growable arena of ring nodes
pub(crate) struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of slots including the sentinel (0 before the first grow)
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn head(&self) -> u32 {
        self.nodes.first().map_or(SENTINEL, |s| s.next)
    }

    pub(crate) fn tail(&self) -> u32 {
        self.nodes.first().map_or(SENTINEL, |s| s.prev)
    }

    pub(crate) fn node(&self, idx: u32) -> &Node<K, V> {
        &self.nodes[idx as usize]
    }

    pub(crate) fn entry(&self, idx: u32) -> Option<&(K, V)> {
        self.nodes[idx as usize].entry.as_ref()
    }

    pub(crate) fn entry_mut(&mut self, idx: u32) -> Option<&mut (K, V)> {
        self.nodes[idx as usize].entry.as_mut()
    }

    /// Release the payload of a slot, leaving it vacant
    pub(crate) fn take(&mut self, idx: u32) -> Option<(K, V)> {
        self.nodes[idx as usize].entry.take()
    }

    pub(crate) fn set(&mut self, idx: u32, key: K, value: V) {
        self.nodes[idx as usize].entry = Some((key, value));
    }

    /// Raw access for `IterMut`, which hands out disjoint borrows per node
    pub(crate) fn as_mut_ptr(&mut self) -> *mut Node<K, V> {
        self.nodes.as_mut_ptr()
    }

    /// Drop every payload while keeping links and storage intact
    pub(crate) fn clear_entries(&mut self) {
        for node in &mut self.nodes {
            node.entry = None;
        }
    }

    fn unlink(&mut self, idx: u32) {
        let (prev, next) = {
            let node = &self.nodes[idx as usize];
            (node.prev, node.next)
        };
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
    }

    /// Make `idx` the most recently used node
    pub(crate) fn move_to_front(&mut self, idx: u32) {
        if self.head() == idx {
            return;
        }
        self.unlink(idx);

        let old_head = self.nodes[SENTINEL as usize].next;
        let node = &mut self.nodes[idx as usize];
        node.prev = SENTINEL;
        node.next = old_head;
        self.nodes[old_head as usize].prev = idx;
        self.nodes[SENTINEL as usize].next = idx;
    }

    /// Make `idx` the least recently used node
    pub(crate) fn move_to_back(&mut self, idx: u32) {
        if self.tail() == idx {
            return;
        }
        self.unlink(idx);

        let old_tail = self.nodes[SENTINEL as usize].prev;
        let node = &mut self.nodes[idx as usize];
        node.next = SENTINEL;
        node.prev = old_tail;
        self.nodes[old_tail as usize].next = idx;
        self.nodes[SENTINEL as usize].prev = idx;
    }

    /// Extend the arena to `new_len` slots
    ///
    /// The new slots form a sub-ring that is spliced in just before the
    /// sentinel, so they sit at the least recently used end and are handed
    /// out before any live entry gets evicted.
    pub(crate) fn grow(&mut self, new_len: usize) {
        if self.nodes.is_empty() {
            self.nodes.push(Node::vacant(SENTINEL, SENTINEL));
        }
        let old_len = self.nodes.len();
        if new_len <= old_len {
            return;
        }

        let first = old_len as u32;
        let last = (new_len - 1) as u32;
        self.nodes.reserve_exact(new_len - old_len);
        for idx in first..=last {
            self.nodes.push(Node::vacant(idx.wrapping_sub(1), idx + 1));
        }

        let old_tail = self.nodes[SENTINEL as usize].prev;
        self.nodes[old_tail as usize].next = first;
        self.nodes[first as usize].prev = old_tail;
        self.nodes[last as usize].next = SENTINEL;
        self.nodes[SENTINEL as usize].prev = last;
    }
}
