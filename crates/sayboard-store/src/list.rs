use sayboard_bridge::{project::Project, record::AudioRecord};

/// Entities kept in a [`ListStore`] expose the key used to find them again
/// after the server answers.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for AudioRecord {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for Project {
    fn key(&self) -> &str {
        &self.slug
    }
}

/// In-memory ordered mirror of a server-side collection.
///
/// Mutations are applied immediately and never wait for the server: creates
/// go to the front, edits replace in place, deletes remove before the server
/// confirms them. The order therefore reflects what this client observed,
/// not server timestamps.
#[derive(Debug, Clone)]
pub struct ListStore<T> {
    items: Vec<T>,
    ready: bool,
    loaded_count: usize,
}

impl<T> Default for ListStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            ready: false,
            loaded_count: 0,
        }
    }
}

impl<T: Keyed> ListStore<T> {
    /// Replaces the whole collection with a fresh server listing.
    ///
    /// Returns `true` only for the load that makes the store ready.
    pub fn load(&mut self, items: Vec<T>) -> bool {
        self.loaded_count = items.len();
        self.items = items;
        let became_ready = !self.ready;
        self.ready = true;
        became_ready
    }

    /// Whether the first load has happened. Tables show a loading state until
    /// then.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of entities in the last server listing.
    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.key() == key)
    }

    /// Places a freshly created entity at the top.
    pub fn insert_front(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Overwrites the entity whose key is `key`, keeping its position, and
    /// returns that position.
    ///
    /// When nothing matches (the entity was removed meanwhile) the new value
    /// is placed at the front instead and `None` is returned.
    pub fn replace(&mut self, key: &str, item: T) -> Option<usize> {
        match self.position(key) {
            Some(index) => {
                self.items[index] = item;
                Some(index)
            }
            None => {
                log::warn!("No entity with key {key:?} to replace, inserting at the front");
                self.insert_front(item);
                None
            }
        }
    }

    /// Removes the entity at `index` without waiting for the server.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Entities of the 1-based `page` when showing `per_page` rows at once.
    /// Out-of-range pages are empty.
    pub fn page(&self, page: usize, per_page: usize) -> &[T] {
        let per_page = per_page.max(1);
        let start = page.saturating_sub(1).saturating_mul(per_page);
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + per_page).min(self.items.len());
        &self.items[start..end]
    }

    /// Number of pages needed for all entities, at least one.
    pub fn page_count(&self, per_page: usize) -> usize {
        self.items.len().div_ceil(per_page.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, u32);

    impl Keyed for Row {
        fn key(&self) -> &str {
            self.0
        }
    }

    fn store(names: &[&'static str]) -> ListStore<Row> {
        let mut store = ListStore::default();
        store.load(names.iter().map(|&name| Row(name, 0)).collect());
        store
    }

    fn keys(store: &ListStore<Row>) -> Vec<&str> {
        store.items().iter().map(Keyed::key).collect()
    }

    #[test]
    fn ready_is_signalled_once() {
        let mut store = ListStore::<Row>::default();
        assert!(!store.is_ready());

        assert!(store.load(vec![Row("a", 0)]));
        assert!(!store.load(vec![Row("a", 0), Row("b", 0)]));
        assert!(store.is_ready());
        assert_eq!(store.loaded_count(), 2);
    }

    #[test]
    fn created_entity_lands_at_front_once() {
        let mut store = store(&["a", "b"]);
        store.insert_front(Row("new", 0));

        assert_eq!(keys(&store), ["new", "a", "b"]);
        assert_eq!(store.items().iter().filter(|row| row.0 == "new").count(), 1);
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut store = store(&["a", "b", "c"]);
        let index = store.replace("b", Row("b2", 1));

        assert_eq!(index, Some(1));
        assert_eq!(keys(&store), ["a", "b2", "c"]);
        assert_eq!(store.get(1), Some(&Row("b2", 1)));
    }

    #[test]
    fn edit_of_vanished_entity_goes_to_front() {
        let mut store = store(&["a", "b"]);

        assert_eq!(store.replace("zzz", Row("zzz", 1)), None);
        assert_eq!(keys(&store), ["zzz", "a", "b"]);
    }

    #[test]
    fn remove_at_index_two_of_five() {
        let mut store = store(&["r0", "r1", "r2", "r3", "r4"]);
        let removed = store.remove_at(2);

        assert_eq!(removed, Some(Row("r2", 0)));
        assert_eq!(store.len(), 4);
        assert_eq!(store.position("r2"), None);
        assert_eq!(store.remove_at(10), None);
    }

    #[test]
    fn pages_are_sliced() {
        let store = store(&["a", "b", "c", "d", "e"]);

        assert_eq!(store.page_count(2), 3);
        assert_eq!(store.page(1, 2).len(), 2);
        assert_eq!(store.page(3, 2), &[Row("e", 0)]);
        assert!(store.page(4, 2).is_empty());
        assert_eq!(ListStore::<Row>::default().page_count(25), 1);
    }
}
