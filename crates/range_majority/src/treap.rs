use std::cmp::Ordering;

const DEFAULT_SEED: u64 = 0x5EED_7EA9_2026;

/// Priority source for the treaps. Each tree owns one so priority streams
/// stay deterministic per structure.
#[derive(Clone, Copy)]
pub(crate) struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    prio: u32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, prio: u32) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            prio,
            left: None,
            right: None,
        })
    }
}

/// Lifts the left child above `node`; BST order is preserved.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.left.take() {
        Some(mut x) => {
            node.left = x.right.take();
            x.right = Some(node);
            x
        }
        None => node,
    }
}

/// Lifts the right child above `node`; BST order is preserved.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.right.take() {
        Some(mut x) => {
            node.right = x.left.take();
            x.left = Some(node);
            x
        }
        None => node,
    }
}

/// Joins two subtrees where every key in `a` precedes every key in `b`,
/// keeping the higher-priority root on top. This is the rotate-down removal
/// of an internal node expressed as a merge of its children.
fn merge<K, V>(a: Link<K, V>, b: Link<K, V>) -> Link<K, V> {
    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(mut a), Some(mut b)) => {
            if a.prio > b.prio {
                let right = a.right.take();
                a.right = merge(right, Some(b));
                Some(a)
            } else {
                let left = b.left.take();
                b.left = merge(Some(a), left);
                Some(b)
            }
        }
    }
}

/// Randomized ordered multiset.
///
/// - Duplicate keys are permitted; equal keys chain into the right subtree.
/// - `remove` drops exactly one occurrence and is a no-op on absent keys.
/// - `min` / `ceiling` are read-only single descents.
pub struct TreapMultiset<K: Ord> {
    root: Link<K, ()>,
    len: usize,
    rng: XorShift64,
}

impl<K: Ord> TreapMultiset<K> {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            root: None,
            len: 0,
            rng: XorShift64::new(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, key: K) {
        let prio = self.rng.next_u32();
        self.root = Some(Self::insert_at(self.root.take(), key, prio));
        self.len += 1;
    }

    fn insert_at(link: Link<K, ()>, key: K, prio: u32) -> Box<Node<K, ()>> {
        let Some(mut node) = link else {
            return Node::new(key, (), prio);
        };
        if key < node.key {
            let child = Self::insert_at(node.left.take(), key, prio);
            let lift = child.prio > node.prio;
            node.left = Some(child);
            if lift {
                node = rotate_right(node);
            }
        } else {
            let child = Self::insert_at(node.right.take(), key, prio);
            let lift = child.prio > node.prio;
            node.right = Some(child);
            if lift {
                node = rotate_left(node);
            }
        }
        node
    }

    /// Removes one occurrence of `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        let (root, removed) = Self::remove_at(self.root.take(), key);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_at(link: Link<K, ()>, key: &K) -> (Link<K, ()>, bool) {
        let Some(mut node) = link else {
            return (None, false);
        };
        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, removed) = Self::remove_at(node.left.take(), key);
                node.left = left;
                (Some(node), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_at(node.right.take(), key);
                node.right = right;
                (Some(node), removed)
            }
            Ordering::Equal => (merge(node.left.take(), node.right.take()), true),
        }
    }

    /// Smallest key in the set.
    pub fn min(&self) -> Option<&K> {
        let mut cur = self.root.as_deref()?;
        while let Some(left) = cur.left.as_deref() {
            cur = left;
        }
        Some(&cur.key)
    }

    /// Smallest key that is `>= bound`.
    pub fn ceiling(&self, bound: &K) -> Option<&K> {
        let mut cur = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = cur {
            if node.key >= *bound {
                candidate = Some(&node.key);
                cur = node.left.as_deref();
            } else {
                cur = node.right.as_deref();
            }
        }
        candidate
    }
}

impl<K: Ord> Default for TreapMultiset<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Randomized ordered map with unique keys and owned payloads.
///
/// Same rotation and priority discipline as [`TreapMultiset`]; `insert` on an
/// existing key replaces the payload in place instead of adding a node.
pub struct TreapMap<K: Ord, V> {
    root: Link<K, V>,
    len: usize,
    rng: XorShift64,
}

impl<K: Ord, V> TreapMap<K, V> {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            root: None,
            len: 0,
            rng: XorShift64::new(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Inserts `key -> value`, returning the replaced payload if the key was
    /// already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let prio = self.rng.next_u32();
        let (root, old) = Self::insert_at(self.root.take(), key, value, prio);
        self.root = Some(root);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    fn insert_at(link: Link<K, V>, key: K, value: V, prio: u32) -> (Box<Node<K, V>>, Option<V>) {
        let Some(mut node) = link else {
            return (Node::new(key, value, prio), None);
        };
        match key.cmp(&node.key) {
            Ordering::Less => {
                let (child, old) = Self::insert_at(node.left.take(), key, value, prio);
                let lift = child.prio > node.prio;
                node.left = Some(child);
                if lift {
                    node = rotate_right(node);
                }
                (node, old)
            }
            Ordering::Greater => {
                let (child, old) = Self::insert_at(node.right.take(), key, value, prio);
                let lift = child.prio > node.prio;
                node.right = Some(child);
                if lift {
                    node = rotate_left(node);
                }
                (node, old)
            }
            Ordering::Equal => {
                let old = std::mem::replace(&mut node.value, value);
                (node, Some(old))
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (root, removed) = Self::remove_at(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn remove_at(link: Link<K, V>, key: &K) -> (Link<K, V>, Option<V>) {
        let Some(mut node) = link else {
            return (None, None);
        };
        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, removed) = Self::remove_at(node.left.take(), key);
                node.left = left;
                (Some(node), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_at(node.right.take(), key);
                node.right = right;
                (Some(node), removed)
            }
            Ordering::Equal => {
                let Node {
                    value, left, right, ..
                } = *node;
                (merge(left, right), Some(value))
            }
        }
    }

    /// Smallest entry with key `>= bound`.
    pub fn ceiling(&self, bound: &K) -> Option<(&K, &V)> {
        let mut cur = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = cur {
            match bound.cmp(&node.key) {
                Ordering::Less | Ordering::Equal => {
                    candidate = Some(node);
                    cur = node.left.as_deref();
                }
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }
        candidate.map(|n| (&n.key, &n.value))
    }

    /// In-order visit of every entry with key `>= bound`, pruning subtrees
    /// that lie entirely below it.
    pub fn for_each_ge<F: FnMut(&K, &V)>(&self, bound: &K, mut f: F) {
        fn walk<K: Ord, V, F: FnMut(&K, &V)>(link: &Link<K, V>, bound: &K, f: &mut F) {
            let Some(node) = link.as_deref() else {
                return;
            };
            if node.key >= *bound {
                walk(&node.left, bound, f);
                f(&node.key, &node.value);
            }
            walk(&node.right, bound, f);
        }
        walk(&self.root, bound, &mut f);
    }

    /// In-order visit of every entry.
    #[cfg(test)]
    pub(crate) fn for_each<F: FnMut(&K, &V)>(&self, mut f: F) {
        fn walk<K, V, F: FnMut(&K, &V)>(link: &Link<K, V>, f: &mut F) {
            if let Some(node) = link.as_deref() {
                walk(&node.left, f);
                f(&node.key, &node.value);
                walk(&node.right, f);
            }
        }
        walk(&self.root, &mut f);
    }
}

impl<K: Ord, V> Default for TreapMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
