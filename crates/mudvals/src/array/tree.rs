//! AVL tree backing dictionary-mode arrays
//!
//! A height-balanced binary search tree of owned (key, value) pairs. Keys
//! are ordered by the value comparator with ASCII case folding, so `"Foo"`
//! and `"foo"` address the same entry. Nodes own their children and their
//! payloads exclusively; rotations transfer subtree ownership without
//! copying.

use std::cmp::Ordering;
use std::mem;

use crate::value::cmp::{compare, Case};
use crate::value::Value;

type Link = Option<Box<Node>>;

#[derive(Clone)]
struct Node {
    key: Value,
    value: Value,
    left: Link,
    right: Link,
    height: i16,
}

impl Node {
    fn new(key: Value, value: Value) -> Self {
        Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn fix_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    // Positive means right-heavy
    fn balance(&self) -> i16 {
        height(&self.right) - height(&self.left)
    }
}

fn height(link: &Link) -> i16 {
    link.as_deref().map_or(0, |n| n.height)
}

fn balance_of(link: &Link) -> i16 {
    link.as_deref().map_or(0, |n| n.balance())
}

fn key_compare(a: &Value, b: &Value) -> Ordering {
    compare(a, b, Case::Insensitive)
}

fn rotate_left(mut a: Box<Node>) -> Box<Node> {
    let mut b = a.right.take().expect("left rotation requires a right child");
    a.right = b.left.take();
    a.fix_height();
    b.left = Some(a);
    b.fix_height();
    b
}

fn rotate_right(mut a: Box<Node>) -> Box<Node> {
    let mut b = a.left.take().expect("right rotation requires a left child");
    a.left = b.right.take();
    a.fix_height();
    b.right = Some(a);
    b.fix_height();
    b
}

/// Restore the AVL invariant at this link after one child's height changed.
fn rebalance(link: &mut Link) {
    let diff = match link.as_mut() {
        None => return,
        Some(node) => node.balance(),
    };
    if diff.abs() < 2 {
        if let Some(node) = link.as_mut() {
            node.fix_height();
        }
        return;
    }
    let mut a = match link.take() {
        Some(a) => a,
        None => return,
    };
    *link = Some(if diff > 0 {
        // Right-heavy: single rotation when the right child leans the same
        // way (or is even), double rotation when it leans left.
        if balance_of(&a.right) < 0 {
            a.right = a.right.take().map(rotate_right);
            rotate_left(a)
        } else {
            rotate_left(a)
        }
    } else if balance_of(&a.left) > 0 {
        a.left = a.left.take().map(rotate_left);
        rotate_right(a)
    } else {
        rotate_right(a)
    });
}

fn find<'a>(mut link: &'a Link, key: &Value) -> Option<&'a Node> {
    while let Some(node) = link.as_deref() {
        match key_compare(key, &node.key) {
            Ordering::Less => link = &node.left,
            Ordering::Greater => link = &node.right,
            Ordering::Equal => return Some(node),
        }
    }
    None
}

fn insert(link: &mut Link, key: Value, value: Value) -> bool {
    let node = match link {
        None => {
            *link = Some(Box::new(Node::new(key, value)));
            return true;
        }
        Some(node) => node,
    };
    let inserted = match key_compare(&key, &node.key) {
        Ordering::Less => insert(&mut node.left, key, value),
        Ordering::Greater => insert(&mut node.right, key, value),
        Ordering::Equal => {
            // Existing key keeps its position; only the value changes
            node.value = value;
            false
        }
    };
    if inserted {
        rebalance(link);
    }
    inserted
}

/// Detach the rightmost pair of a non-empty subtree.
fn remove_max(link: &mut Link) -> Option<(Value, Value)> {
    if link.as_deref()?.right.is_some() {
        let node = link.as_mut()?;
        let removed = remove_max(&mut node.right);
        rebalance(link);
        removed
    } else {
        let node = link.take()?;
        *link = node.left;
        Some((node.key, node.value))
    }
}

fn remove(link: &mut Link, key: &Value) -> Option<(Value, Value)> {
    let ord = key_compare(key, &link.as_deref()?.key);
    let removed = match ord {
        Ordering::Less => {
            let node = link.as_mut()?;
            remove(&mut node.left, key)
        }
        Ordering::Greater => {
            let node = link.as_mut()?;
            remove(&mut node.right, key)
        }
        Ordering::Equal => {
            let two_children = {
                let node = link.as_deref()?;
                node.left.is_some() && node.right.is_some()
            };
            if two_children {
                // Promote the in-order predecessor into this slot; its
                // pair moves here, the evicted pair moves out.
                let node = link.as_mut()?;
                let (pk, pv) =
                    remove_max(&mut node.left).expect("two-child node has a predecessor");
                let key = mem::replace(&mut node.key, pk);
                let value = mem::replace(&mut node.value, pv);
                Some((key, value))
            } else {
                let node = link.take()?;
                *link = if node.left.is_some() {
                    node.left
                } else {
                    node.right
                };
                // The spliced-in child subtree is already balanced;
                // ancestors rebalance as the recursion unwinds.
                return Some((node.key, node.value));
            }
        }
    };
    if removed.is_some() {
        rebalance(link);
    }
    removed
}

fn leftmost(link: &Link) -> Option<&Node> {
    let mut node = link.as_deref()?;
    while let Some(next) = node.left.as_deref() {
        node = next;
    }
    Some(node)
}

fn rightmost(link: &Link) -> Option<&Node> {
    let mut node = link.as_deref()?;
    while let Some(next) = node.right.as_deref() {
        node = next;
    }
    Some(node)
}

/// Smallest entry strictly greater than `key`; `key` need not be present.
fn next_node<'a>(link: &'a Link, key: &Value) -> Option<&'a Node> {
    let node = link.as_deref()?;
    match key_compare(key, &node.key) {
        Ordering::Less => next_node(&node.left, key).or(Some(node)),
        Ordering::Greater => next_node(&node.right, key),
        Ordering::Equal => leftmost(&node.right),
    }
}

/// Largest entry strictly smaller than `key`; `key` need not be present.
fn prev_node<'a>(link: &'a Link, key: &Value) -> Option<&'a Node> {
    let node = link.as_deref()?;
    match key_compare(key, &node.key) {
        Ordering::Greater => prev_node(&node.right, key).or(Some(node)),
        Ordering::Less => prev_node(&node.left, key),
        Ordering::Equal => rightmost(&node.left),
    }
}

/// Ordered dictionary of (key, value) pairs used as the backing store for
/// dictionary-mode arrays.
///
/// `Clone` copies the node structure directly, without re-running the key
/// comparator; entry values clone by reference-count bump.
#[derive(Default, Clone)]
pub(crate) struct AvlTree {
    root: Link,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        find(&self.root, key).map(|n| &n.value)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        find(&self.root, key).is_some()
    }

    /// Insert or overwrite; returns true when the key was newly inserted.
    pub fn set(&mut self, key: Value, value: Value) -> bool {
        let inserted = insert(&mut self.root, key, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove a key, handing the owned pair back to the caller.
    pub fn remove(&mut self, key: &Value) -> Option<(Value, Value)> {
        let removed = remove(&mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn first(&self) -> Option<(&Value, &Value)> {
        leftmost(&self.root).map(|n| (&n.key, &n.value))
    }

    pub fn last(&self) -> Option<(&Value, &Value)> {
        rightmost(&self.root).map(|n| (&n.key, &n.value))
    }

    pub fn next(&self, key: &Value) -> Option<(&Value, &Value)> {
        next_node(&self.root, key).map(|n| (&n.key, &n.value))
    }

    pub fn prev(&self, key: &Value) -> Option<(&Value, &Value)> {
        prev_node(&self.root, key).map(|n| (&n.key, &n.value))
    }

    pub fn iter(&self) -> Entries<'_> {
        Entries::new(&self.root)
    }
}

/// In-order borrowing iterator over a tree's entries.
pub(crate) struct Entries<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Entries<'a> {
    fn new(root: &'a Link) -> Self {
        let mut entries = Entries { stack: Vec::new() };
        entries.push_left(root);
        entries
    }

    fn push_left(&mut self, mut link: &'a Link) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a Value, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some((&node.key, &node.value))
    }
}
