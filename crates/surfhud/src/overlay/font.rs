use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::trace;

use crate::error::Result;

/// Font handles keyed by pixel size.
///
/// Entries are created on first use and never evicted; the overlay only asks
/// for a couple of sizes, so the map stays tiny for the life of the process.
#[derive(Debug)]
pub struct FontCache<F> {
    fonts: HashMap<i32, F>,
}

impl<F> Default for FontCache<F> {
    fn default() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }
}

impl<F> FontCache<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the font for `size`, creating it with `create` on a miss.
    pub fn get_or_create<C>(&mut self, size: i32, create: C) -> Result<&F>
    where
        C: FnOnce(i32) -> Result<F>,
    {
        match self.fonts.entry(size) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                trace!("Creating font for size {}", size);
                let font = create(size)?;
                Ok(entry.insert(font))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Take every cached font out, e.g. to release them at shutdown
    pub fn drain(&mut self) -> impl Iterator<Item = F> + '_ {
        self.fonts.drain().map(|(_, font)| font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_creates_once_per_size() {
        let mut cache = FontCache::new();
        let mut created = 0;

        for _ in 0..3 {
            let font = cache
                .get_or_create(14, |size| {
                    created += 1;
                    Ok(format!("Segoe UI {}", size))
                })
                .unwrap();
            assert_eq!(font, "Segoe UI 14");
        }

        assert_eq!(created, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sizes_are_independent() {
        let mut cache = FontCache::new();
        cache.get_or_create(14, |s| Ok(s * 10)).unwrap();
        cache.get_or_create(16, |s| Ok(s * 10)).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(*cache.get_or_create(16, |_| Ok(0)).unwrap(), 160);
    }

    #[test]
    fn test_failed_creation_is_not_cached() {
        let mut cache: FontCache<u32> = FontCache::new();
        assert!(cache
            .get_or_create(14, |_| Err(Error::Gdi("CreateFontIndirectW")))
            .is_err());
        assert!(cache.is_empty());

        assert_eq!(*cache.get_or_create(14, |_| Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_drain_empties_cache() {
        let mut cache = FontCache::new();
        cache.get_or_create(14, |_| Ok(1)).unwrap();
        cache.get_or_create(16, |_| Ok(2)).unwrap();

        let mut drained: Vec<_> = cache.drain().collect();
        drained.sort();
        assert_eq!(drained, vec![1, 2]);
        assert!(cache.is_empty());
    }
}
