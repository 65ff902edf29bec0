//! In-memory pack collection and the active word set derived from it.

use crate::csv::PackDraft;
use crate::error::{LibraryError, Result};
use crate::types::{Pack, Word};
use serde::{Deserialize, Serialize};

/// Counts reported after merging imported drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub words: usize,
}

/// Packs sharing a category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub packs: Vec<&'a Pack>,
}

impl CategoryGroup<'_> {
    pub fn all_enabled(&self) -> bool {
        !self.packs.is_empty() && self.packs.iter().all(|p| p.enabled)
    }
}

/// Whether a mutation touched the active word set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Only metadata or disabled packs changed.
    Packs,
    /// The active word set may differ; sessions must reload.
    ActiveWords,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackLibrary {
    packs: Vec<Pack>,
}

impl PackLibrary {
    pub fn new(packs: Vec<Pack>) -> Self {
        Self { packs }
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn get(&self, id: &str) -> Option<&Pack> {
        self.packs.iter().find(|p| p.id == id)
    }

    /// Words of all enabled packs, in pack order.
    pub fn active_words(&self) -> Vec<Word> {
        self.packs
            .iter()
            .filter(|p| p.enabled)
            .flat_map(|p| p.words.iter().cloned())
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.packs.iter().filter(|p| p.enabled).count()
    }

    /// Packs grouped by category label, in first-seen order.
    pub fn categories(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for pack in &self.packs {
            let label = pack.category_label();
            match groups.iter_mut().find(|g| g.category == label) {
                Some(group) => group.packs.push(pack),
                None => groups.push(CategoryGroup {
                    category: label,
                    packs: vec![pack],
                }),
            }
        }
        groups
    }

    /// Create an empty, disabled pack and return its id.
    pub fn add_pack(&mut self, name: &str, category: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyName);
        }
        let id = new_pack_id();
        self.packs.push(Pack {
            id: id.clone(),
            name: name.to_string(),
            category: category.trim().to_string(),
            words: Vec::new(),
            enabled: false,
        });
        Ok(id)
    }

    pub fn rename_pack(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyName);
        }
        self.pack_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn delete_pack(&mut self, id: &str) -> Result<Change> {
        let pos = self
            .packs
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LibraryError::PackNotFound(id.to_string()))?;
        let removed = self.packs.remove(pos);
        Ok(if removed.enabled {
            Change::ActiveWords
        } else {
            Change::Packs
        })
    }

    /// Delete every pack in `category`. Returns how many were removed.
    pub fn delete_category(&mut self, category: &str) -> usize {
        let before = self.packs.len();
        self.packs.retain(|p| p.category_label() != category);
        before - self.packs.len()
    }

    pub fn clear(&mut self) {
        self.packs.clear();
    }

    /// Flip one pack's enabled flag; returns the new value.
    pub fn toggle_pack(&mut self, id: &str) -> Result<bool> {
        let pack = self.pack_mut(id)?;
        pack.enabled = !pack.enabled;
        Ok(pack.enabled)
    }

    /// Enable every pack in `category`, or disable them all if they already
    /// are. Returns the new value, or `None` for an unknown category.
    pub fn toggle_category(&mut self, category: &str) -> Option<bool> {
        let all_enabled = self
            .categories()
            .into_iter()
            .find(|g| g.category == category)
            .map(|g| g.all_enabled())?;
        let enabled = !all_enabled;
        for pack in self
            .packs
            .iter_mut()
            .filter(|p| p.category_label() == category)
        {
            pack.enabled = enabled;
        }
        Some(enabled)
    }

    /// Add a word, or replace the word at `edit_index`. Fields are trimmed.
    pub fn save_word(&mut self, pack_id: &str, edit_index: Option<usize>, word: Word) -> Result<Change> {
        let word = Word::new(word.korean.trim(), word.english.trim());
        if !word.is_complete() {
            return Err(LibraryError::InvalidWord);
        }
        let pack = self.pack_mut(pack_id)?;
        match edit_index {
            Some(index) => {
                let slot = pack.words.get_mut(index).ok_or_else(|| LibraryError::WordNotFound {
                    pack_id: pack_id.to_string(),
                    index,
                })?;
                *slot = word;
            }
            None => pack.words.push(word),
        }
        Ok(change_for(pack))
    }

    pub fn remove_word(&mut self, pack_id: &str, index: usize) -> Result<Change> {
        let pack = self.pack_mut(pack_id)?;
        if index >= pack.words.len() {
            return Err(LibraryError::WordNotFound {
                pack_id: pack_id.to_string(),
                index,
            });
        }
        pack.words.remove(index);
        Ok(change_for(pack))
    }

    /// Merge imported drafts. A draft matching an existing pack by name and
    /// category replaces words with the same key and appends the rest; other
    /// drafts become new disabled packs.
    pub fn import(&mut self, drafts: Vec<PackDraft>) -> (ImportSummary, Change) {
        let mut summary = ImportSummary::default();
        let mut change = Change::Packs;

        for draft in drafts {
            summary.words += draft.words.len();
            match self
                .packs
                .iter_mut()
                .find(|p| p.name == draft.name && p.category == draft.category)
            {
                Some(pack) => {
                    for word in draft.words {
                        match pack.words.iter_mut().find(|w| w.korean == word.korean) {
                            Some(existing) => *existing = word,
                            None => pack.words.push(word),
                        }
                    }
                    if pack.enabled {
                        change = Change::ActiveWords;
                    }
                    summary.updated += 1;
                }
                None => {
                    self.packs.push(Pack {
                        id: new_pack_id(),
                        name: draft.name,
                        category: draft.category,
                        words: draft.words,
                        enabled: false,
                    });
                    summary.created += 1;
                }
            }
        }

        tracing::info!(
            created = summary.created,
            updated = summary.updated,
            words = summary.words,
            "imported packs"
        );
        (summary, change)
    }

    fn pack_mut(&mut self, id: &str) -> Result<&mut Pack> {
        self.packs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LibraryError::PackNotFound(id.to_string()))
    }
}

fn change_for(pack: &Pack) -> Change {
    if pack.enabled {
        Change::ActiveWords
    } else {
        Change::Packs
    }
}

fn new_pack_id() -> String {
    format!("pack-{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pack(id: &str, category: &str, enabled: bool, words: &[(&str, &str)]) -> Pack {
        Pack {
            id: id.into(),
            name: id.to_uppercase(),
            category: category.into(),
            words: words.iter().map(|(k, e)| Word::new(*k, *e)).collect(),
            enabled,
        }
    }

    fn library() -> PackLibrary {
        PackLibrary::new(vec![
            pack("b1", "TC3", true, &[("학기", "semester"), ("과목", "subject")]),
            pack("b2", "TC3", false, &[("교실", "classroom")]),
            pack("c1", "", true, &[("친구", "friend")]),
        ])
    }

    #[test]
    fn active_words_follow_pack_order() {
        let lib = library();
        let keys: Vec<String> = lib.active_words().into_iter().map(|w| w.korean).collect();
        assert_eq!(keys, vec!["학기", "과목", "친구"]);
        assert_eq!(lib.enabled_count(), 2);
    }

    #[test]
    fn categories_group_uncategorized() {
        let lib = library();
        let groups = lib.categories();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "TC3");
        assert_eq!(groups[0].packs.len(), 2);
        assert_eq!(groups[1].category, crate::types::UNCATEGORIZED);
    }

    #[test]
    fn toggle_category_enables_all_then_disables_all() {
        let mut lib = library();
        assert_eq!(lib.toggle_category("TC3"), Some(true));
        assert!(lib.packs().iter().filter(|p| p.category == "TC3").all(|p| p.enabled));
        assert_eq!(lib.toggle_category("TC3"), Some(false));
        assert!(lib.packs().iter().filter(|p| p.category == "TC3").all(|p| !p.enabled));
        assert_eq!(lib.toggle_category("nope"), None);
    }

    #[test]
    fn toggle_pack_flips_flag() {
        let mut lib = library();
        assert_eq!(lib.toggle_pack("b2"), Ok(true));
        assert_eq!(lib.active_words().len(), 4);
        assert_eq!(
            lib.toggle_pack("zz"),
            Err(LibraryError::PackNotFound("zz".into()))
        );
    }

    #[test]
    fn add_pack_starts_disabled_with_unique_id() {
        let mut lib = PackLibrary::default();
        let a = lib.add_pack("  Lesson 1 ", "TC3").unwrap();
        let b = lib.add_pack("Lesson 2", "").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("pack-"));
        assert_eq!(lib.get(&a).unwrap().name, "Lesson 1");
        assert!(!lib.get(&a).unwrap().enabled);
        assert_eq!(lib.add_pack(" ", "x"), Err(LibraryError::EmptyName));
    }

    #[test]
    fn rename_and_delete() {
        let mut lib = library();
        lib.rename_pack("b2", "Renamed").unwrap();
        assert_eq!(lib.get("b2").unwrap().name, "Renamed");
        assert_eq!(lib.delete_pack("b2"), Ok(Change::Packs));
        assert_eq!(lib.delete_pack("b1"), Ok(Change::ActiveWords));
        assert_eq!(lib.delete_category(crate::types::UNCATEGORIZED), 1);
        assert!(lib.packs().is_empty());
    }

    #[test]
    fn save_word_adds_edits_and_validates() {
        let mut lib = library();
        assert_eq!(
            lib.save_word("b2", None, Word::new(" 학교 ", " school ")),
            Ok(Change::Packs)
        );
        assert_eq!(lib.get("b2").unwrap().words[1], Word::new("학교", "school"));

        assert_eq!(
            lib.save_word("b1", Some(0), Word::new("학기", "term")),
            Ok(Change::ActiveWords)
        );
        assert_eq!(lib.get("b1").unwrap().words[0].english, "term");

        assert_eq!(
            lib.save_word("b1", Some(9), Word::new("x", "y")),
            Err(LibraryError::WordNotFound {
                pack_id: "b1".into(),
                index: 9
            })
        );
        assert_eq!(
            lib.save_word("b1", None, Word::new("x", "  ")),
            Err(LibraryError::InvalidWord)
        );
    }

    #[test]
    fn remove_word_by_index() {
        let mut lib = library();
        assert_eq!(lib.remove_word("b1", 0), Ok(Change::ActiveWords));
        assert_eq!(lib.get("b1").unwrap().words, vec![Word::new("과목", "subject")]);
        assert!(lib.remove_word("b1", 5).is_err());
    }

    #[test]
    fn import_merges_by_name_and_category() {
        let mut lib = library();
        let drafts = vec![
            PackDraft {
                category: "TC3".into(),
                name: "B1".into(),
                words: vec![Word::new("학기", "term"), Word::new("학교", "school")],
            },
            PackDraft {
                category: "TC4".into(),
                name: "B1".into(),
                words: vec![Word::new("친구", "friend")],
            },
        ];
        let (summary, change) = lib.import(drafts);
        assert_eq!(
            summary,
            ImportSummary {
                created: 1,
                updated: 1,
                words: 3
            }
        );
        assert_eq!(change, Change::ActiveWords);

        let b1 = lib.get("b1").unwrap();
        assert_eq!(
            b1.words,
            vec![
                Word::new("학기", "term"),
                Word::new("과목", "subject"),
                Word::new("학교", "school"),
            ]
        );
        let created = lib.packs().last().unwrap();
        assert_eq!(created.category, "TC4");
        assert!(!created.enabled);
    }
}
