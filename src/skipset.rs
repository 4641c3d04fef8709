use num_traits::Bounded;
use rand::Rng;
use std::fmt::Debug;
use tracing::{debug, instrument, trace};

use crate::error::SkipSetError;
use crate::level::{CoinFlipLevels, LevelGenerator, DEFAULT_LEVELS};

/// An index into the node arena.
type Link = Option<usize>;

/// One occurrence of a value at one level.
#[derive(Debug)]
struct SkipNode<T> {
    value: T,
    prev: Link,
    next: Link,
    /// The same value's node on the level below. `None` on the bottom level.
    below: Link,
}

impl<T> SkipNode<T> {
    fn new(value: T) -> Self {
        SkipNode {
            value,
            prev: None,
            next: None,
            below: None,
        }
    }
}

/// Where a search through the levels came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Located {
    /// The target is the type's minimum, which only ever lives in the head sentinels.
    MinSentinel,
    /// The target is the type's maximum, which only ever lives in the tail sentinels.
    MaxSentinel,
    /// The search stopped on this node. Callers must still compare its value to the target.
    Node(usize),
    /// The bottom level ran out before reaching the target.
    Missing,
}

/// An ordered set of unique values backed by a skip list with a fixed number of levels.
///
/// Every level is bounded by a head sentinel holding `T::min_value()` and a tail sentinel holding
/// `T::max_value()`. Because of that those two values can never be stored in ordinary nodes, so
/// their membership is tracked with a pair of flags instead.
///
/// Nodes live in an arena owned by the set and refer to each other by index. Slots freed by
/// [`remove`](SkipSet::remove) are reused by later insertions.
///
/// # Concurrency
///
/// None. Wrap the set in a lock if it has to be shared between threads.
#[derive(Debug)]
pub struct SkipSet<T, G = CoinFlipLevels> {
    /// Sentinels occupy the first `2 * height` slots and are never freed.
    nodes: Vec<Option<SkipNode<T>>>,
    free: Vec<usize>,
    /// The head sentinel of each level. Level 0 is the bottom.
    heads: Vec<usize>,
    /// The tail sentinel of each level. Level 0 is the bottom.
    tails: Vec<usize>,
    min_value: T,
    max_value: T,
    has_min: bool,
    has_max: bool,
    length: usize,
    levels: G,
}

impl<T> SkipSet<T>
where
    T: Ord + Bounded + Clone + Debug,
{
    /// Create a new skip set with the default number of levels and a fair coin seeded from the
    /// operating system.
    ///
    /// # Examples
    /// ```
    /// use hopscotch_set::SkipSet;
    ///
    /// let skipset = SkipSet::<i32>::new();
    /// assert!(skipset.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::build(CoinFlipLevels::from_entropy())
    }
}

impl<T, R> SkipSet<T, CoinFlipLevels<R>>
where
    T: Ord + Bounded + Clone + Debug,
    R: Rng,
{
    /// Create a new skip set with the default number of levels and a fair coin drawing from
    /// `rng`.
    ///
    /// # Examples
    /// ```
    /// use hopscotch_set::SkipSet;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut skipset = SkipSet::with_rng(StdRng::seed_from_u64(42));
    /// skipset.insert(3);
    /// assert!(skipset.search(&3));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self::build(CoinFlipLevels::fair(DEFAULT_LEVELS, rng))
    }
}

// Public methods of SkipSet
impl<T, G> SkipSet<T, G>
where
    T: Ord + Bounded + Clone + Debug,
    G: LevelGenerator,
{
    /// Create a new skip set whose height and level selection come from `levels`.
    ///
    /// Returns [`SkipSetError::ZeroLevels`] if the generator reports no levels.
    pub fn with_level_generator(levels: G) -> Result<Self, SkipSetError> {
        if levels.total() == 0 {
            return Err(SkipSetError::ZeroLevels);
        }

        Ok(Self::build(levels))
    }

    /// Insert a value.
    ///
    /// Returns `true` if the value was not already present. Inserting a present value leaves the
    /// set untouched.
    ///
    /// # Examples
    /// ```
    /// use hopscotch_set::SkipSet;
    ///
    /// let mut skipset = SkipSet::new();
    /// assert!(skipset.insert(5));
    /// assert!(!skipset.insert(5));
    /// assert_eq!(skipset.len(), 1);
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, value: T) -> bool {
        match self.locate(&value) {
            Located::MinSentinel => Self::update_flag(&mut self.has_min, &mut self.length, true),
            Located::MaxSentinel => Self::update_flag(&mut self.has_max, &mut self.length, true),
            Located::Node(idx) if self.node(idx).value == value => false,
            _ => {
                self.insert_tower(value);
                self.length += 1;
                true
            }
        }
    }

    /// Returns `true` if the value is in the set.
    pub fn search(&self, value: &T) -> bool {
        match self.locate(value) {
            Located::MinSentinel => self.has_min,
            Located::MaxSentinel => self.has_max,
            Located::Node(idx) => self.node(idx).value == *value,
            Located::Missing => false,
        }
    }

    /// Remove a value from every level it occupies.
    ///
    /// Returns `true` if the value was present. Removing an absent value is a no-op.
    ///
    /// # Examples
    /// ```
    /// use hopscotch_set::SkipSet;
    ///
    /// let mut skipset: SkipSet<i32> = [0, 5].into_iter().collect();
    /// assert!(skipset.remove(&5));
    /// assert!(!skipset.remove(&8));
    /// assert!(skipset.search(&0));
    /// assert!(!skipset.search(&5));
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, value: &T) -> bool {
        match self.locate(value) {
            Located::MinSentinel => Self::update_flag(&mut self.has_min, &mut self.length, false),
            Located::MaxSentinel => Self::update_flag(&mut self.has_max, &mut self.length, false),
            Located::Node(idx) if self.node(idx).value == *value => {
                self.remove_tower(idx);
                self.length -= 1;
                true
            }
            _ => false,
        }
    }

    /// Remove every value. The sentinels are kept.
    pub fn clear(&mut self) {
        self.nodes.truncate(2 * self.height());
        self.free.clear();
        for level in 0..self.height() {
            let (head, tail) = (self.heads[level], self.tails[level]);
            self.node_mut(head).next = Some(tail);
            self.node_mut(tail).prev = Some(head);
        }
        self.has_min = false;
        self.has_max = false;
        self.length = 0;
    }

    /// The number of values in the set, including present boundary values.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the set does not hold any values; otherwise false.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The number of levels. This is fixed at construction.
    pub fn height(&self) -> usize {
        self.heads.len()
    }
}

// Private methods of SkipSet
impl<T, G> SkipSet<T, G>
where
    T: Ord + Bounded + Clone + Debug,
    G: LevelGenerator,
{
    /// Lay out a head and tail sentinel on each level and link them together.
    fn build(levels: G) -> Self {
        let height = levels.total();
        let mut nodes = Vec::with_capacity(2 * height);
        let mut heads = Vec::with_capacity(height);
        let mut tails = Vec::with_capacity(height);

        for level in 0..height {
            let head_idx = nodes.len();
            let tail_idx = head_idx + 1;
            let below = level.checked_sub(1);

            let mut head = SkipNode::new(T::min_value());
            head.next = Some(tail_idx);
            head.below = below.map(|lower| heads[lower]);

            let mut tail = SkipNode::new(T::max_value());
            tail.prev = Some(head_idx);
            tail.below = below.map(|lower| tails[lower]);

            nodes.push(Some(head));
            nodes.push(Some(tail));
            heads.push(head_idx);
            tails.push(tail_idx);
        }

        debug!(height, "created skip set");

        SkipSet {
            nodes,
            free: vec![],
            heads,
            tails,
            min_value: T::min_value(),
            max_value: T::max_value(),
            has_min: false,
            has_max: false,
            length: 0,
            levels,
        }
    }

    fn node(&self, idx: usize) -> &SkipNode<T> {
        self.nodes[idx]
            .as_ref()
            .expect("links only ever point at live nodes")
    }

    fn node_mut(&mut self, idx: usize) -> &mut SkipNode<T> {
        self.nodes[idx]
            .as_mut()
            .expect("links only ever point at live nodes")
    }

    fn next_of(&self, idx: usize) -> usize {
        self.node(idx)
            .next
            .expect("only tail sentinels lack a successor")
    }

    fn top_head(&self) -> usize {
        self.heads[self.height() - 1]
    }

    /// Flip a presence flag and keep the length in step. Returns whether the flag changed.
    fn update_flag(flag: &mut bool, length: &mut usize, present: bool) -> bool {
        if *flag == present {
            return false;
        }

        *flag = present;
        if present {
            *length += 1;
        } else {
            *length -= 1;
        }
        true
    }

    /// Find the top-most node holding `target`, or the node the search gave up on.
    ///
    /// The boundary values always resolve to their sentinels regardless of whether they are
    /// members. Callers consult `has_min`/`has_max` for those.
    fn locate(&self, target: &T) -> Located {
        if *target == self.min_value {
            return Located::MinSentinel;
        }
        if *target == self.max_value {
            return Located::MaxSentinel;
        }

        let mut current = self.top_head();
        while self.node(current).value < *target {
            let next = self.next_of(current);
            if self.node(next).value <= *target {
                // Skip ahead on this level
                current = next;
            } else {
                match self.node(current).below {
                    Some(below) => current = below,
                    None => return Located::Missing,
                }
            }
        }

        Located::Node(current)
    }

    /// Insert `value` on every level from the bottom up to a randomly drawn top level.
    fn insert_tower(&mut self, value: T) {
        let top = self.levels.random().min(self.height() - 1);
        trace!(top, "inserting tower");

        let mut current = self.top_head();
        let mut above: Link = None;
        for level in (0..self.height()).rev() {
            // Move to the last node on this level that is less than the value
            loop {
                let next = self.next_of(current);
                if self.node(next).value < value {
                    current = next;
                } else {
                    break;
                }
            }

            if level <= top {
                let created = self.splice_after(current, value.clone());
                if let Some(above_idx) = above {
                    self.node_mut(above_idx).below = Some(created);
                }
                above = Some(created);
            }

            if level > 0 {
                current = self
                    .node(current)
                    .below
                    .expect("every level above the bottom has a level below it");
            }
        }
    }

    /// Link a new node holding `value` directly after `prev` and return its index.
    fn splice_after(&mut self, prev: usize, value: T) -> usize {
        let next = self.next_of(prev);
        let mut node = SkipNode::new(value);
        node.prev = Some(prev);
        node.next = Some(next);

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        self.node_mut(prev).next = Some(idx);
        self.node_mut(next).prev = Some(idx);
        idx
    }

    /// Unlink and free the node at `top` and every node below it.
    fn remove_tower(&mut self, top: usize) {
        let mut current = Some(top);
        while let Some(idx) = current {
            let node = self.nodes[idx]
                .take()
                .expect("links only ever point at live nodes");
            let prev = node.prev.expect("only head sentinels lack a predecessor");
            let next = node.next.expect("only tail sentinels lack a successor");

            self.node_mut(prev).next = Some(next);
            self.node_mut(next).prev = Some(prev);
            self.free.push(idx);

            current = node.below;
        }
    }
}

impl<T> Default for SkipSet<T>
where
    T: Ord + Bounded + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, G> Extend<T> for SkipSet<T, G>
where
    T: Ord + Bounded + Clone + Debug,
    G: LevelGenerator,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for SkipSet<T>
where
    T: Ord + Bounded + Clone + Debug,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut skipset = Self::new();
        skipset.extend(iter);
        skipset
    }
}
