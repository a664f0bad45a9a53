//! Domain side index: lower-cased domain name to record positions

use indexmap::IndexMap;

/// Groups record positions by case-folded domain.
///
/// Keys keep the order in which each domain was first seen. Every record is
/// indexed, including those the range tree cannot place.
#[derive(Debug, Clone, Default)]
pub struct DomainIndex {
    groups: IndexMap<String, Vec<usize>>,
}

impl DomainIndex {
    pub fn build<'a, I>(domains: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (position, domain) in domains.into_iter().enumerate() {
            groups.entry(domain.to_lowercase()).or_default().push(position);
        }
        Self { groups }
    }

    /// Positions of the records in `domain`, matched case-insensitively
    pub fn get(&self, domain: &str) -> &[usize] {
        self.groups
            .get(&domain.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Lower-cased domain keys in first-seen order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
