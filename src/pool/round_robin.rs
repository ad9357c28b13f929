use std::sync::atomic::{AtomicUsize, Ordering};

use super::Error;

/// Fixed set of slots handed out in round-robin order.
///
/// The cursor is atomic and kept within `[0, len)` by wrapping on every
/// advance, so the rotation stays fair even with parallel callers and the
/// stored value never grows unbounded.
pub(crate) struct RoundRobin<T> {
    slots: Vec<T>,
    cursor: AtomicUsize,
}

impl<T> RoundRobin<T> {
    pub(crate) fn new(slots: Vec<T>) -> Self {
        Self {
            slots,
            cursor: AtomicUsize::new(0),
        }
    }

    /// The next slot in rotation, starting from the first one.
    pub(crate) fn next_slot(&self) -> Result<&T, Error> {
        if self.slots.is_empty() {
            return Err(Error::EmptyPool);
        }
        let index = self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cursor| {
                Some((cursor + 1) % self.slots.len())
            })
            .unwrap_or(0);
        Ok(&self.slots[index])
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Current cursor position, i.e. the index the next call will hand out.
    #[cfg(test)]
    pub(crate) fn position(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::RoundRobin;
    use crate::pool::Error;

    #[test]
    fn rotation_is_periodic_starting_from_the_first_slot() {
        let pool_size = 5;
        let carousel = RoundRobin::new((0..pool_size).collect::<Vec<_>>());

        let handed_out: Vec<usize> = (0..pool_size * 3)
            .map(|_| *carousel.next_slot().unwrap())
            .collect();

        let expected: Vec<usize> = (0..pool_size * 3).map(|i| i % pool_size).collect();
        assert_eq!(expected, handed_out);
    }

    #[test]
    fn cursor_equals_calls_modulo_size() {
        let pool_size = 7;
        let carousel = RoundRobin::new((0..pool_size).collect::<Vec<_>>());

        for calls in 1..=pool_size * 2 + 3 {
            carousel.next_slot().unwrap();
            assert_eq!(calls % pool_size, carousel.position());
        }
    }

    #[test]
    fn empty_carousel_always_fails() {
        let carousel: RoundRobin<u32> = RoundRobin::new(vec![]);
        for _ in 0..3 {
            assert!(matches!(carousel.next_slot(), Err(Error::EmptyPool)));
        }
    }

    #[test]
    fn single_slot_is_handed_out_repeatedly() {
        let carousel = RoundRobin::new(vec!["only"]);
        for _ in 0..4 {
            assert_eq!("only", *carousel.next_slot().unwrap());
            assert_eq!(0, carousel.position());
        }
    }

    #[test]
    fn rotation_is_fair_across_threads() {
        use std::collections::HashMap;
        use std::sync::Arc;

        let pool_size = 4;
        let rounds = 25;
        let carousel = Arc::new(RoundRobin::new((0..pool_size).collect::<Vec<_>>()));

        let handles: Vec<_> = (0..pool_size)
            .map(|_| {
                let carousel = Arc::clone(&carousel);
                std::thread::spawn(move || {
                    (0..rounds)
                        .map(|_| *carousel.next_slot().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut tally: HashMap<usize, usize> = HashMap::new();
        for handle in handles {
            for slot in handle.join().unwrap() {
                *tally.entry(slot).or_default() += 1;
            }
        }

        // Every slot is handed out exactly as often as the others.
        for slot in 0..pool_size {
            assert_eq!(Some(&rounds), tally.get(&slot));
        }
    }
}
