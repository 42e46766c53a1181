// Min-priority frontier for the shortest-path search.
//
// Entries are never updated in place. A location whose tentative distance
// improves is pushed again under its new key, and the outdated entry stays
// behind until it is popped; the search skips it then because the location
// has already been visited.

use std::collections::BTreeMap;

#[derive(Clone,Debug)]
pub struct Frontier<C:Ord+Clone,T> {
    map: BTreeMap<C,Vec<T>>,
    size: usize
}

impl<C:Ord+Clone,T> Frontier<C,T> {
    pub fn new() -> Self {
        Frontier {map: BTreeMap::new(), size: 0}
    }

    pub fn insert(&mut self, item: T, cost: C) {
        self.map.entry(cost).or_insert_with(Vec::new).push(item);
        self.size += 1;
    }

    /// Removes an entry with the smallest cost. Among equal costs the most
    /// recently inserted entry comes out first.
    pub fn remove(&mut self) -> Option<(T,C)> {
        let mut entry = self.map.first_entry()?;
        let cost = entry.key().clone();
        let item = entry.get_mut().pop()?;
        if entry.get().is_empty() {
            entry.remove_entry();
        }
        self.size -= 1;
        Some((item, cost))
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<C:Ord+Clone,T> Default for Frontier<C,T> {
    fn default() -> Self {
        Frontier::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::frontier::Frontier;

    #[test]
    fn smallest_cost_first() {
        let mut f = Frontier::new();
        f.insert("far", 9);
        f.insert("near", 1);
        f.insert("mid", 4);
        assert_eq!(f.len(), 3);
        assert_eq!(f.remove(), Some(("near", 1)));
        assert_eq!(f.remove(), Some(("mid", 4)));
        assert_eq!(f.remove(), Some(("far", 9)));
        assert_eq!(f.remove(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn stale_entries_stay_until_popped() {
        let mut f = Frontier::new();
        f.insert('a', 10);
        f.insert('a', 3);
        assert_eq!(f.len(), 2);
        assert_eq!(f.remove(), Some(('a', 3)));
        assert_eq!(f.remove(), Some(('a', 10)));
        assert_eq!(f.len(), 0);
    }

    #[test]
    fn equal_costs_pop_newest_first() {
        let mut f = Frontier::new();
        f.insert(1, 5);
        f.insert(2, 5);
        f.insert(3, 5);
        assert_eq!(f.remove(), Some((3, 5)));
        f.insert(4, 2);
        assert_eq!(f.remove(), Some((4, 2)));
        assert_eq!(f.remove(), Some((2, 5)));
        assert_eq!(f.remove(), Some((1, 5)));
        assert_eq!(f.len(), 0);
    }
}
