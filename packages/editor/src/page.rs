//! # Page
//!
//! Owns the canonical ordered list of sections for the page being edited.
//!
//! Sections are kept sorted by `order`, and `order` is kept unique and dense
//! (`0..len`). Every change goes through [`Page::apply`], which validates the
//! mutation first, so lock rules hold no matter which UI path issued it.
//!
//! ## Lifecycle
//!
//! ```text
//! load → apply(mutation) … → (backend rejects) → apply(inverse)
//! ```

use pagecraft_common::Direction;
use pagecraft_content::{ComponentId, PageId, Section, SectionId};
use tracing::debug;

use crate::mutations::{MutationError, MutationResult, PageMutation};

/// Ordered sections of one page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,

    /// Increments on every effective mutation
    pub version: u64,

    sections: Vec<Section>,
}

impl Page {
    /// Build from stored sections, normalizing ranks to `0..len`
    pub fn new(id: PageId, mut sections: Vec<Section>) -> Self {
        sections.sort_by_key(|s| s.order);
        let mut page = Self {
            id,
            version: 0,
            sections,
        };
        page.renumber();
        page
    }

    pub fn empty(id: PageId) -> Self {
        Self::new(id, Vec::new())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// Sections a visitor of the published page would see
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_visible)
    }

    /// Sections on this page linked to `component`, in page order
    pub fn instances_of(&self, component: &ComponentId) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|s| s.linked_component() == Some(component))
            .map(|s| s.id.clone())
            .collect()
    }

    /// Validate without applying
    pub fn validate(&self, mutation: &PageMutation) -> Result<(), MutationError> {
        match mutation {
            PageMutation::Append { section } | PageMutation::Restore { section, .. } => {
                if self.section(&section.id).is_some() {
                    return Err(MutationError::DuplicateSection(section.id.clone()));
                }
                Ok(())
            }

            PageMutation::ToggleLock { id } => {
                self.require(id)?;
                Ok(())
            }

            PageMutation::Move { id, direction } => {
                let index = self.require_unlocked(id)?;
                if let Some(neighbour) = self.neighbour(index, *direction) {
                    let neighbour = &self.sections[neighbour];
                    if neighbour.is_locked {
                        return Err(MutationError::NeighbourLocked(neighbour.id.clone()));
                    }
                }
                Ok(())
            }

            PageMutation::SetContent { id, content }
            | PageMutation::Unlink { id, content }
            | PageMutation::Revert { id, content, .. } => {
                let index = self.require_unlocked(id)?;
                let expected = self.sections[index].kind();
                if content.kind() != expected {
                    return Err(MutationError::KindMismatch {
                        expected,
                        actual: content.kind(),
                    });
                }
                Ok(())
            }

            PageMutation::ToggleVisibility { id }
            | PageMutation::Delete { id }
            | PageMutation::SetStyle { id, .. } => {
                self.require_unlocked(id)?;
                Ok(())
            }
        }
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: &PageMutation) -> Result<MutationResult, MutationError> {
        self.validate(mutation)?;

        let changed = match mutation {
            PageMutation::Append { section } => {
                let mut section = section.clone();
                section.order = self.sections.len() as u32;
                self.sections.push(section);
                true
            }

            PageMutation::Restore { section, index } => {
                let index = (*index).min(self.sections.len());
                self.sections.insert(index, section.clone());
                self.renumber();
                true
            }

            PageMutation::Move { id, direction } => self.swap(id, *direction),

            PageMutation::ToggleVisibility { id } => {
                let section = self.section_mut(id)?;
                section.is_visible = !section.is_visible;
                true
            }

            PageMutation::ToggleLock { id } => {
                let section = self.section_mut(id)?;
                section.is_locked = !section.is_locked;
                true
            }

            PageMutation::Delete { id } => {
                self.sections.retain(|s| &s.id != id);
                self.renumber();
                true
            }

            PageMutation::SetContent { id, content } => {
                let section = self.section_mut(id)?;
                let changed = &section.content != content;
                section.content = content.clone();
                changed
            }

            PageMutation::SetStyle { id, style } => {
                let section = self.section_mut(id)?;
                let changed = &section.style_override != style;
                section.style_override = style.clone();
                changed
            }

            PageMutation::Unlink { id, content } => {
                let section = self.section_mut(id)?;
                section.content = content.clone();
                section.reusable_ref = None;
                true
            }

            PageMutation::Revert {
                id,
                content,
                style,
                link,
            } => {
                let section = self.section_mut(id)?;
                section.content = content.clone();
                section.style_override = style.clone();
                section.reusable_ref = link.clone();
                true
            }
        };

        if changed {
            self.version += 1;
            debug!(
                mutation = mutation.name(),
                section = %mutation.target(),
                version = self.version,
                "Applied page mutation"
            );
        }

        Ok(MutationResult {
            version: self.version,
            changed,
        })
    }

    /// Mutation that undoes `mutation` when applied right after it
    pub fn inverse(&self, mutation: &PageMutation) -> Result<PageMutation, MutationError> {
        let inverse = match mutation {
            PageMutation::Append { section } => PageMutation::Delete {
                id: section.id.clone(),
            },

            PageMutation::Restore { section, .. } => PageMutation::Delete {
                id: section.id.clone(),
            },

            PageMutation::Move { id, direction } => PageMutation::Move {
                id: id.clone(),
                direction: match direction {
                    Direction::Up => Direction::Down,
                    Direction::Down => Direction::Up,
                },
            },

            PageMutation::ToggleVisibility { .. } | PageMutation::ToggleLock { .. } => mutation.clone(),

            PageMutation::Delete { id } => {
                let index = self
                    .position(id)
                    .ok_or_else(|| MutationError::SectionNotFound(id.clone()))?;
                PageMutation::Restore {
                    section: self.sections[index].clone(),
                    index,
                }
            }

            PageMutation::SetContent { id, .. }
            | PageMutation::SetStyle { id, .. }
            | PageMutation::Unlink { id, .. }
            | PageMutation::Revert { id, .. } => {
                let section = self.require(id)?;
                PageMutation::Revert {
                    id: id.clone(),
                    content: section.content.clone(),
                    style: section.style_override.clone(),
                    link: section.reusable_ref.clone(),
                }
            }
        };
        Ok(inverse)
    }

    fn require(&self, id: &SectionId) -> Result<&Section, MutationError> {
        self.section(id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))
    }

    fn require_unlocked(&self, id: &SectionId) -> Result<usize, MutationError> {
        let index = self
            .position(id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))?;
        if self.sections[index].is_locked {
            return Err(MutationError::SectionLocked(id.clone()));
        }
        Ok(index)
    }

    fn section_mut(&mut self, id: &SectionId) -> Result<&mut Section, MutationError> {
        self.sections
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))
    }

    fn neighbour(&self, index: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => (index + 1 < self.sections.len()).then_some(index + 1),
        }
    }

    fn swap(&mut self, id: &SectionId, direction: Direction) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let Some(neighbour) = self.neighbour(index, direction) else {
            return false;
        };

        let rank = self.sections[index].order;
        self.sections[index].order = self.sections[neighbour].order;
        self.sections[neighbour].order = rank;
        self.sections.swap(index, neighbour);
        true
    }

    fn renumber(&mut self) {
        for (rank, section) in self.sections.iter_mut().enumerate() {
            section.order = rank as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_content::{Content, SectionKind};

    fn section(id: &str, kind: SectionKind, order: u32) -> Section {
        Section::new(SectionId::new(id), Content::default_for(kind), order)
    }

    fn page() -> Page {
        Page::new(
            PageId::new("home"),
            vec![
                section("c", SectionKind::Faq, 7),
                section("a", SectionKind::Hero, 2),
                section("b", SectionKind::Text, 5),
            ],
        )
    }

    fn ids(page: &Page) -> Vec<&str> {
        page.sections().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_new_sorts_and_densifies() {
        let page = page();
        assert_eq!(ids(&page), vec!["a", "b", "c"]);
        let orders: Vec<u32> = page.sections().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_move_swaps_only_the_pair() {
        let mut page = page();
        let result = page
            .apply(&PageMutation::Move { id: SectionId::new("c"), direction: Direction::Up })
            .unwrap();
        assert!(result.changed);
        assert_eq!(ids(&page), vec!["a", "c", "b"]);
        assert_eq!(page.section(&SectionId::new("a")).unwrap().order, 0);
        assert_eq!(page.section(&SectionId::new("c")).unwrap().order, 1);
        assert_eq!(page.section(&SectionId::new("b")).unwrap().order, 2);
    }

    #[test]
    fn test_move_at_boundary_is_noop() {
        let mut page = page();
        let before = page.clone();

        let up = page
            .apply(&PageMutation::Move { id: SectionId::new("a"), direction: Direction::Up })
            .unwrap();
        let down = page
            .apply(&PageMutation::Move { id: SectionId::new("c"), direction: Direction::Down })
            .unwrap();

        assert!(!up.changed && !down.changed);
        assert_eq!(page, before);
    }

    #[test]
    fn test_locked_section_refuses_mutations() {
        let mut page = page();
        let b = SectionId::new("b");
        page.apply(&PageMutation::ToggleLock { id: b.clone() }).unwrap();

        for mutation in [
            PageMutation::Delete { id: b.clone() },
            PageMutation::ToggleVisibility { id: b.clone() },
            PageMutation::Move { id: b.clone(), direction: Direction::Up },
            PageMutation::SetContent { id: b.clone(), content: Content::default_for(SectionKind::Text) },
            PageMutation::SetStyle { id: b.clone(), style: None },
        ] {
            assert_eq!(page.apply(&mutation), Err(MutationError::SectionLocked(b.clone())));
        }

        // Unlocking itself is still allowed
        page.apply(&PageMutation::ToggleLock { id: b.clone() }).unwrap();
        assert!(!page.section(&b).unwrap().is_locked);
    }

    #[test]
    fn test_move_cannot_displace_locked_neighbour() {
        let mut page = page();
        page.apply(&PageMutation::ToggleLock { id: SectionId::new("a") }).unwrap();

        let result = page.apply(&PageMutation::Move { id: SectionId::new("b"), direction: Direction::Up });
        assert_eq!(result, Err(MutationError::NeighbourLocked(SectionId::new("a"))));
    }

    #[test]
    fn test_content_kind_must_match() {
        let mut page = page();
        let result = page.apply(&PageMutation::SetContent {
            id: SectionId::new("a"),
            content: Content::default_for(SectionKind::Faq),
        });
        assert_eq!(
            result,
            Err(MutationError::KindMismatch { expected: SectionKind::Hero, actual: SectionKind::Faq })
        );
    }

    #[test]
    fn test_delete_and_inverse_restore() {
        let mut page = page();
        let delete = PageMutation::Delete { id: SectionId::new("b") };
        let inverse = page.inverse(&delete).unwrap();

        page.apply(&delete).unwrap();
        assert_eq!(ids(&page), vec!["a", "c"]);
        assert_eq!(page.section(&SectionId::new("c")).unwrap().order, 1);

        page.apply(&inverse).unwrap();
        assert_eq!(ids(&page), vec!["a", "b", "c"]);
        assert_eq!(page.section(&SectionId::new("c")).unwrap().order, 2);
    }

    #[test]
    fn test_setting_identical_content_is_unchanged() {
        let mut page = page();
        let result = page
            .apply(&PageMutation::SetContent {
                id: SectionId::new("a"),
                content: Content::default_for(SectionKind::Hero),
            })
            .unwrap();
        assert!(!result.changed);
        assert_eq!(page.version, 0);
    }
}
