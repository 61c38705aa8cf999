#![forbid(unsafe_code)]

//! Ordered, key-unique collections of named sub-panels.

use panelkit_core::DefinedDims;

use crate::panel::Panel;

/// Named sub-panels rendered side by side as a bordered grid.
///
/// Keys are unique. Insertion order is the column order; inserting an
/// existing key replaces the panel in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    entries: Vec<(String, Panel)>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a panel. Returns the replaced panel, if any.
    pub fn insert(&mut self, key: impl Into<String>, panel: impl Into<Panel>) -> Option<Panel> {
        let key = key.into();
        let panel = panel.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, panel)),
            None => {
                self.entries.push((key, panel));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, panel: impl Into<Panel>) -> Self {
        self.insert(key, panel);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Panel> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, key: &str) -> Option<&Panel> {
        self.entries
            .iter()
            .find_map(|(k, p)| (k == key).then_some(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Panel)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.entries.iter().map(|(_, p)| p)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summed cropped widths and tallest cropped height of the sub-panels
    /// whose size is resolved. Drafts count as zero.
    pub fn total_subpanel_cropped_dims(&self) -> DefinedDims {
        self.sum_dims(|p| p.cropped_dims())
    }

    /// Like [`total_subpanel_cropped_dims`](Self::total_subpanel_cropped_dims),
    /// including titles.
    pub fn total_subpanel_outer_dims(&self) -> DefinedDims {
        self.sum_dims(|p| p.outer_dims())
    }

    fn sum_dims(&self, dims: impl Fn(&crate::panel::ResizedPanel) -> DefinedDims) -> DefinedDims {
        self.panels()
            .filter_map(Panel::resized)
            .map(dims)
            .fold(DefinedDims::ZERO, |acc, d| {
                DefinedDims::new(acc.width + d.width, acc.height.max(d.height))
            })
    }
}

impl<K: Into<String>, P: Into<Panel>> FromIterator<(K, P)> for Layout {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut layout = Self::new();
        for (key, panel) in iter {
            layout.insert(key, panel);
        }
        layout
    }
}
