use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
};

/// Pending locations of a search, awaiting expansion.
///
/// Every search owns exactly one frontier for the duration of the call.
pub trait Frontier<T> {
    fn is_empty(&self) -> bool;

    /// Schedule `item`. Frontiers which do not order by priority ignore it.
    fn put(&mut self, item: T, priority: f64);

    /// Remove the next item, or `None` when the frontier is exhausted.
    fn get(&mut self) -> Option<T>;
}

/// First-in, first-out frontier.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    elements: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Queue {
            elements: VecDeque::new(),
        }
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn put(&mut self, item: T) {
        self.elements.push_back(item);
    }

    pub fn get(&mut self) -> Option<T> {
        self.elements.pop_front()
    }
}

impl<T> Frontier<T> for Queue<T> {
    fn is_empty(&self) -> bool {
        Queue::is_empty(self)
    }

    fn put(&mut self, item: T, _priority: f64) {
        Queue::put(self, item)
    }

    fn get(&mut self) -> Option<T> {
        Queue::get(self)
    }
}

/// Heap entry.
// https://doc.rust-lang.org/std/collections/binary_heap/#examples
#[derive(Debug, Clone)]
struct Entry<T> {
    priority: f64,
    sequence: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

// `BinaryHeap` is a max-heap; flip both keys so the smallest priority, and
// among equal priorities the earliest insertion, comes out first.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier.
///
/// Equal priorities come out in insertion order.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    elements: BinaryHeap<Entry<T>>,
    sequence: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        PriorityQueue {
            elements: BinaryHeap::new(),
            sequence: 0,
        }
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn put(&mut self, item: T, priority: f64) {
        self.elements.push(Entry {
            priority,
            sequence: self.sequence,
            item,
        });
        self.sequence += 1;
    }

    pub fn get(&mut self) -> Option<T> {
        self.elements.pop().map(|entry| entry.item)
    }
}

impl<T> Frontier<T> for PriorityQueue<T> {
    fn is_empty(&self) -> bool {
        PriorityQueue::is_empty(self)
    }

    fn put(&mut self, item: T, priority: f64) {
        PriorityQueue::put(self, item, priority)
    }

    fn get(&mut self) -> Option<T> {
        PriorityQueue::get(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(frontier: &mut impl Frontier<T>) -> Vec<T> {
        std::iter::from_fn(|| frontier.get()).collect()
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.get(), None);
        for item in ['a', 'b', 'c'] {
            queue.put(item);
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(drain(&mut queue), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_queue_ignores_priority() {
        let mut queue = Queue::new();
        Frontier::put(&mut queue, 1, 9.0);
        Frontier::put(&mut queue, 2, 0.0);
        assert_eq!(drain(&mut queue), vec![1, 2]);
    }

    #[test]
    fn test_priority_queue_pops_smallest_first() {
        let mut queue = PriorityQueue::new();
        queue.put("three", 3.0);
        queue.put("one", 1.0);
        queue.put("two", 2.0);
        queue.put("half", 0.5);
        assert_eq!(drain(&mut queue), vec!["half", "one", "two", "three"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_priority_queue_ties_in_insertion_order() {
        let mut queue = PriorityQueue::new();
        for item in 0..20 {
            queue.put(item, (item % 2) as f64);
        }
        let evens: Vec<_> = (0..20).filter(|n| n % 2 == 0).collect();
        let odds: Vec<_> = (0..20).filter(|n| n % 2 == 1).collect();
        assert_eq!(drain(&mut queue), [evens, odds].concat());
    }

    #[test]
    fn test_priority_queue_keeps_duplicates() {
        let mut queue = PriorityQueue::new();
        queue.put('x', 4.0);
        queue.put('x', 2.0);
        assert_eq!(queue.len(), 2);
        assert_eq!(drain(&mut queue), vec!['x', 'x']);
    }
}
