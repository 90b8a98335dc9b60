use std::collections::HashMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::Options;
use super::level::random_level;
use crate::error::{Error, Result};
use crate::types::{Entry, Score};

/// Arena slot of the head sentinel.
const HEAD: usize = 0;

/// Arena slot of the terminal guard. A forward pointer equal to `TERMINAL`
/// means "no successor at this level".
const TERMINAL: usize = 1;

/// A single node in the arena.
///
/// `forward[i]` is the slot of the next node at level `i`. The length of
/// `forward` is the node's height: it is linked at levels `0..height`.
///
/// ```text
/// Level 3:  HEAD ──────────────────────────────► 50 ──────────► TERM
/// Level 2:  HEAD ──────────► 20 ────────────────► 50 ──────────► TERM
/// Level 1:  HEAD ──► 10 ──► 20 ────► 35 ────────► 50 ──► 60 ──► TERM
/// Level 0:  HEAD ──► 10 ──► 20 ──► 25 ──► 35 ──► 50 ──► 60 ──► 70 ► TERM
/// ```
#[derive(Debug)]
struct Node {
    key: String,
    score: Score,
    forward: Vec<usize>,
}

impl Node {
    fn new(key: String, score: Score, height: usize) -> Self {
        Node {
            key,
            score,
            forward: vec![TERMINAL; height],
        }
    }
}

/// A key→score index kept in score order by a skip list.
///
/// Nodes live in an arena and refer to each other by slot index. Slot 0 is
/// the head sentinel (linked at every level), slot 1 the terminal guard with
/// a score of negative infinity. Neither is ever handed out to callers.
/// Slots freed by [`delete`](Self::delete) are reused by later inserts.
///
/// Average case: O(log n) insert and delete, O(1) search by key.
/// Worst case: O(n), astronomically unlikely with random level assignment.
///
/// Equal scores are allowed under different keys. Their relative order is
/// unspecified; a new node goes in front of existing nodes with the same
/// score.
///
/// The random source is a type parameter so tests can pin levels exactly.
pub struct OrderedIndex<R = StdRng> {
    nodes: Vec<Node>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    options: Options,
    rng: R,
}

impl OrderedIndex<StdRng> {
    /// Create an empty index with `max_level` levels and promotion
    /// probability `p`, seeded from OS entropy.
    ///
    /// # Panics
    /// Panics if `max_level` is 0 or `p` is not in (0, 1).
    pub fn new(max_level: usize, p: f64) -> Self {
        Self::with_options(Options::new(max_level, p))
    }

    /// Create an empty index from `options`, seeded from OS entropy.
    pub fn with_options(options: Options) -> Self {
        Self::with_rng(options, StdRng::from_entropy())
    }
}

impl Default for OrderedIndex<StdRng> {
    fn default() -> Self {
        Self::with_options(Options::default())
    }
}

impl<R: Rng> OrderedIndex<R> {
    /// Create an empty index that draws node levels from `rng`.
    ///
    /// # Panics
    /// Panics if `options` fails [`Options::validate`].
    pub fn with_rng(options: Options, rng: R) -> Self {
        options.validate();
        let head = Node::new(String::new(), 0.0, options.max_level);
        let terminal = Node::new(String::new(), Score::NEG_INFINITY, 0);
        OrderedIndex {
            nodes: vec![head, terminal],
            free: Vec::new(),
            index: HashMap::new(),
            options,
            rng,
        }
    }

    /// Insert `key` with `score`.
    ///
    /// If the key is already present nothing changes (its score and position
    /// are kept) and `Error::AlreadyExists` is returned. Callers that treat
    /// this as success can simply ignore that variant.
    ///
    /// Algorithm:
    ///   1. Draw the node's top level
    ///   2. Walk down from the highest level, recording at each level the
    ///      last node whose score is below `score` (the predecessors)
    ///   3. Splice the new node in after each predecessor up to its level
    ///   4. Register the key in the map
    pub fn add(&mut self, key: impl Into<String>, score: Score) -> Result<()> {
        let key = key.into();
        if self.index.contains_key(&key) {
            debug!(key = %key, "key already exists, add ignored");
            return Err(Error::AlreadyExists(key));
        }

        let level = random_level(
            &mut self.rng,
            self.options.max_level,
            self.options.probability,
        );

        let mut update = vec![HEAD; level + 1];
        let mut x = HEAD;
        for i in (0..self.options.max_level).rev() {
            x = self.last_below(x, i, score);
            if i <= level {
                update[i] = x;
            }
        }

        let slot = self.allocate(Node::new(key.clone(), score, level + 1));
        for (i, &prev) in update.iter().enumerate() {
            self.nodes[slot].forward[i] = self.nodes[prev].forward[i];
            self.nodes[prev].forward[i] = slot;
        }
        trace!(key = %key, score, level, "inserted");
        self.index.insert(key, slot);
        Ok(())
    }
}

impl<R> OrderedIndex<R> {
    /// Remove `key` from every level it is linked at.
    ///
    /// Predecessors are located by node identity rather than by score, so a
    /// run of equal scores under other keys cannot hide the target.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let target = self
            .index
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))?;
        let score = self.nodes[target].score;
        let height = self.nodes[target].forward.len();

        let mut x = HEAD;
        for i in (0..self.options.max_level).rev() {
            if i >= height {
                // Target is not linked here: stop before any equal score so we
                // never pass it on the way down.
                x = self.last_below(x, i, score);
                continue;
            }
            loop {
                let next = self.nodes[x].forward[i];
                if next == target || next == TERMINAL {
                    break;
                }
                x = next;
            }
            if self.nodes[x].forward[i] == target {
                self.nodes[x].forward[i] = self.nodes[target].forward[i];
            }
        }

        self.release(target);
        trace!(key, score, "deleted");
        Ok(())
    }

    /// Look up `key` through the map. No traversal is needed.
    pub fn search(&self, key: &str) -> Result<Entry<'_>> {
        self.index
            .get(key)
            .map(|&slot| self.entry(slot))
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of levels the node for `key` is linked at.
    pub fn height(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&slot| self.nodes[slot].forward.len())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn max_level(&self) -> usize {
        self.options.max_level
    }

    pub fn probability(&self) -> f64 {
        self.options.probability
    }

    /// The entry with the lowest score, if any.
    pub fn first(&self) -> Option<Entry<'_>> {
        self.iter().next()
    }

    /// Iterate the entries linked at `level`, from the head to the terminal
    /// guard.
    ///
    /// # Panics
    /// Panics if `level >= max_level()`.
    pub fn level(&self, level: usize) -> LevelIter<'_> {
        assert!(
            level < self.options.max_level,
            "level {level} out of range for {} levels",
            self.options.max_level
        );
        LevelIter {
            nodes: &self.nodes,
            current: self.nodes[HEAD].forward[level],
            level,
        }
    }

    /// Iterate all entries in score order. Level 0 links every node.
    pub fn iter(&self) -> LevelIter<'_> {
        self.level(0)
    }

    /// Starting at `from`, advance along level `i` while the next node's
    /// score is strictly below `score`. Returns the last node visited.
    fn last_below(&self, from: usize, i: usize, score: Score) -> usize {
        let mut x = from;
        loop {
            let next = self.nodes[x].forward[i];
            if next == TERMINAL || self.nodes[next].score.total_cmp(&score).is_ge() {
                return x;
            }
            x = next;
        }
    }

    fn entry(&self, slot: usize) -> Entry<'_> {
        let node = &self.nodes[slot];
        Entry::new(&node.key, node.score)
    }

    fn allocate(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) {
        let node = &mut self.nodes[slot];
        node.key = String::new();
        node.forward = Vec::new();
        self.free.push(slot);
    }
}

/// Dump every level, one line each:
///
/// ```text
/// Level 0: head -> a: 1.000000 -> b: 2.000000 -> nil
/// Level 1: head -> b: 2.000000 -> nil
/// ```
impl<R> fmt::Display for OrderedIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.options.max_level {
            write!(f, "Level {i}: head")?;
            for entry in self.level(i) {
                write!(f, " -> {entry}")?;
            }
            writeln!(f, " -> nil")?;
        }
        Ok(())
    }
}

impl<R> fmt::Debug for OrderedIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("len", &self.len())
            .field("options", &self.options)
            .finish()
    }
}

impl<'a, R> IntoIterator for &'a OrderedIndex<R> {
    type Item = Entry<'a>;
    type IntoIter = LevelIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries linked at one level, in score order.
///
/// Simply follows `forward[level]` until it reaches the terminal guard.
pub struct LevelIter<'a> {
    nodes: &'a [Node],
    current: usize,
    level: usize,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TERMINAL {
            return None;
        }
        let node = &self.nodes[self.current];
        self.current = node.forward[self.level];
        Some(Entry::new(&node.key, node.score))
    }
}
