use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;
use tracing::debug;

/// Minimum visible fraction of an element that counts as "in view".
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Reports how much of a registered element is currently visible.
pub trait IntersectionSource<K> {
    /// Visible fraction in `0.0..=1.0`, or `None` when the element is not
    /// laid out.
    fn visible_fraction(&self, element: &K) -> Option<f32>;
}

/// One-shot visibility watch over any number of elements.
///
/// Each watched element starts hidden and is revealed the first time a
/// report crosses its threshold; it is then no longer observed. Nothing ever
/// hides it again while it stays mounted.
#[derive(Debug, Clone)]
pub struct RevealOnView<K: Eq + Hash> {
    watching: IndexMap<K, f32>,
    revealed: HashMap<K, Instant>,
}

impl<K: Eq + Hash> Default for RevealOnView<K> {
    fn default() -> Self {
        Self {
            watching: IndexMap::new(),
            revealed: HashMap::new(),
        }
    }
}

impl<K> RevealOnView<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts observing `element`. Watching again remounts it hidden.
    pub fn watch(&mut self, element: K, threshold: f32) {
        let threshold = if threshold.is_nan() {
            REVEAL_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self.revealed.remove(&element);
        self.watching.insert(element, threshold);
    }

    /// Stops observing and forgets `element`. Safe to call repeatedly or for
    /// elements that were never watched.
    pub fn unwatch(&mut self, element: &K) {
        self.watching.shift_remove(element);
        self.revealed.remove(element);
    }

    /// Feeds one intersection report. Returns true only on the report that
    /// reveals the element.
    pub fn report(&mut self, element: &K, fraction: f32, now: Instant) -> bool {
        let Some(threshold) = self.watching.get(element).copied() else {
            return false;
        };
        if !(fraction > 0.0 && fraction >= threshold) {
            return false;
        }

        self.watching.shift_remove(element);
        self.revealed.insert(element.clone(), now);
        debug!(?element, fraction, "element revealed");
        true
    }

    /// Polls `source` for every watched element, returning those revealed by
    /// this sweep in watch order.
    pub fn sweep<S>(&mut self, source: &S, now: Instant) -> Vec<K>
    where
        S: IntersectionSource<K> + ?Sized,
    {
        let reports: Vec<(K, f32)> = self
            .watching
            .keys()
            .filter_map(|element| {
                source
                    .visible_fraction(element)
                    .map(|fraction| (element.clone(), fraction))
            })
            .collect();

        reports
            .into_iter()
            .filter_map(|(element, fraction)| {
                self.report(&element, fraction, now).then_some(element)
            })
            .collect()
    }

    pub fn is_revealed(&self, element: &K) -> bool {
        self.revealed.contains_key(element)
    }

    pub fn revealed_at(&self, element: &K) -> Option<Instant> {
        self.revealed.get(element).copied()
    }

    pub fn is_watching(&self, element: &K) -> bool {
        self.watching.contains_key(element)
    }

    pub fn watching_count(&self) -> usize {
        self.watching.len()
    }
}
