use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify;
use crate::models::{Entry, EntryField, EntryKind, Glyph, StyleToken};

/// Ordered, id-keyed collection of dashboard entries of one kind. The
/// vector order is the display order and survives persistence verbatim.
///
/// Operations return a new registry rather than mutating in place; the
/// caller swaps the old value for the new one and persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new(entries: Vec<Entry>) -> Self {
        Registry { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append a fresh placeholder entry. UUIDs keep ids collision-free
    /// even for back-to-back additions.
    pub fn add(&self, kind: EntryKind) -> Registry {
        let mut entries = self.entries.clone();
        entries.push(Entry {
            id: Uuid::new_v4().to_string(),
            title: kind.placeholder_title().to_string(),
            url: String::new(),
            glyph: kind.default_glyph(),
            style: kind.default_style(),
        });
        Registry { entries }
    }

    /// Replace one field on the entry with the given id; unknown ids are
    /// a no-op. A url edit re-derives glyph and style, and re-derives the
    /// title only while it is still the kind's placeholder (or empty), so
    /// a user-chosen title is never clobbered.
    pub fn update_field(
        &self,
        kind: EntryKind,
        id: &str,
        field: EntryField,
        value: &str,
    ) -> Registry {
        let entries = self
            .entries
            .iter()
            .map(|e| {
                if e.id != id {
                    return e.clone();
                }
                let mut updated = e.clone();
                match field {
                    EntryField::Title => updated.title = value.to_string(),
                    EntryField::Url => {
                        updated.url = value.to_string();
                        let (glyph, style) = classify::classify(value);
                        updated.glyph = glyph;
                        updated.style = match kind {
                            EntryKind::Shortcut => style,
                            EntryKind::Assistant => style.coerce_solid(),
                        };
                        let is_placeholder =
                            updated.title == kind.placeholder_title() || updated.title.is_empty();
                        if is_placeholder {
                            if let Some(title) = classify::infer_title(value) {
                                updated.title = title;
                            }
                        }
                    }
                }
                updated
            })
            .collect();
        Registry { entries }
    }

    /// Remove the entry with the given id; unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> Registry {
        Registry {
            entries: self
                .entries
                .iter()
                .filter(|e| e.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Replace the display order wholesale. The supplied ids must be a
    /// permutation of the current ones; anything else leaves the registry
    /// unchanged.
    pub fn reorder(&self, ids: &[String]) -> Registry {
        let current: HashSet<&str> = self.entries.iter().map(|e| e.id.as_str()).collect();
        let supplied: HashSet<&str> = ids.iter().map(String::as_str).collect();
        if ids.len() != self.entries.len() || current != supplied {
            log::warn!("reorder rejected: ids are not a permutation of the registry");
            return self.clone();
        }
        let entries = ids
            .iter()
            .filter_map(|id| self.find(id).cloned())
            .collect();
        Registry { entries }
    }

    /// Swap two positions, for single-step moves from the TUI.
    pub fn swap(&self, a: usize, b: usize) -> Registry {
        if a >= self.entries.len() || b >= self.entries.len() {
            return self.clone();
        }
        let mut ids: Vec<String> = self.entries.iter().map(|e| e.id.clone()).collect();
        ids.swap(a, b);
        self.reorder(&ids)
    }
}

/// The four seed shortcuts shown on a fresh install. The GitHub seed
/// deliberately keeps its purple gradient even though the classifier
/// would pick the neutral one.
pub fn default_shortcuts() -> Registry {
    Registry::new(vec![
        seed("1", "GitHub", "https://github.com", Glyph::Github, StyleToken::PurpleIndigo),
        seed("2", "YouTube", "https://youtube.com", Glyph::Youtube, StyleToken::RedOrange),
        seed("3", "Twitter", "https://twitter.com", Glyph::Twitter, StyleToken::BlueSky),
        seed("4", "Gmail", "https://gmail.com", Glyph::Mail, StyleToken::EmeraldTeal),
    ])
}

/// The four seed assistant launchers.
pub fn default_assistants() -> Registry {
    Registry::new(vec![
        seed(
            "chatgpt",
            "ChatGPT",
            "https://chat.openai.com",
            Glyph::MessageSquare,
            StyleToken::SolidEmerald,
        ),
        seed(
            "gemini",
            "Gemini",
            "https://gemini.google.com",
            Glyph::Sparkles,
            StyleToken::SolidBlue,
        ),
        seed("claude", "Claude", "https://claude.ai", Glyph::Brain, StyleToken::SolidOrange),
        seed(
            "perplexity",
            "Perplexity",
            "https://www.perplexity.ai",
            Glyph::Zap,
            StyleToken::SolidTeal,
        ),
    ])
}

fn seed(id: &str, title: &str, url: &str, glyph: Glyph, style: StyleToken) -> Entry {
    Entry {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        glyph,
        style,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::default_assistants;
    use super::default_shortcuts;
    use super::Registry;
    use crate::classify;
    use crate::models::{EntryField, EntryKind, Glyph, StyleToken};

    #[test]
    fn add_appends_a_placeholder_with_a_fresh_id() {
        let reg = default_shortcuts();
        let next = reg.add(EntryKind::Shortcut);

        assert_eq!(next.len(), reg.len() + 1);
        let added = next.get(next.len() - 1).expect("added entry");
        assert_eq!(added.title, "New Site");
        assert_eq!(added.url, "");
        assert_eq!(added.glyph, Glyph::Globe);
        assert_eq!(added.style, StyleToken::GraySlate);
        assert!(next.entries()[..reg.len()]
            .iter()
            .all(|e| e.id != added.id));
    }

    #[test]
    fn repeated_adds_never_collide() {
        let mut reg = Registry::new(vec![]);
        for _ in 0..50 {
            reg = reg.add(EntryKind::Shortcut);
        }
        let mut ids: Vec<&str> = reg.entries().iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn add_then_delete_restores_the_previous_registry() {
        let reg = default_shortcuts();
        let next = reg.add(EntryKind::Shortcut);
        let added_id = next.get(next.len() - 1).expect("added").id.clone();
        assert_eq!(next.delete(&added_id), reg);
    }

    #[test]
    fn delete_of_an_unknown_id_is_a_noop() {
        let reg = default_shortcuts();
        assert_eq!(reg.delete("no-such-id"), reg);
    }

    #[test]
    fn url_edit_rederives_glyph_style_and_placeholder_title() {
        let reg = Registry::new(vec![]).add(EntryKind::Shortcut);
        let id = reg.get(0).expect("entry").id.clone();

        let next = reg.update_field(EntryKind::Shortcut, &id, EntryField::Url, "https://github.com");
        let entry = next.get(0).expect("entry");
        assert_eq!(entry.glyph, Glyph::Github);
        assert_eq!(entry.style, StyleToken::NeutralDark);
        assert_eq!(entry.title, "Github");
        assert_eq!((entry.glyph, entry.style), classify::classify(&entry.url));
    }

    #[test]
    fn url_edit_keeps_a_user_chosen_title() {
        let reg = Registry::new(vec![]).add(EntryKind::Shortcut);
        let id = reg.get(0).expect("entry").id.clone();

        let reg = reg.update_field(EntryKind::Shortcut, &id, EntryField::Title, "My Repos");
        let reg = reg.update_field(EntryKind::Shortcut, &id, EntryField::Url, "https://github.com");
        let entry = reg.get(0).expect("entry");
        assert_eq!(entry.title, "My Repos");
        assert_eq!(entry.glyph, Glyph::Github);
    }

    #[test]
    fn title_edit_never_touches_glyph_or_style() {
        let reg = default_shortcuts();
        let next = reg.update_field(EntryKind::Shortcut, "1", EntryField::Title, "Forge");
        let before = reg.get(0).expect("entry");
        let after = next.get(0).expect("entry");
        assert_eq!(after.title, "Forge");
        assert_eq!(after.glyph, before.glyph);
        assert_eq!(after.style, before.style);
    }

    #[test]
    fn update_of_an_unknown_id_is_a_noop() {
        let reg = default_shortcuts();
        assert_eq!(
            reg.update_field(EntryKind::Shortcut, "missing", EntryField::Url, "https://x.com"),
            reg
        );
    }

    #[test]
    fn assistant_url_edit_coerces_gradients_to_a_solid_badge() {
        let reg = Registry::new(vec![]).add(EntryKind::Assistant);
        let id = reg.get(0).expect("entry").id.clone();

        // github classifies to a gradient; assistants must stay solid.
        let next =
            reg.update_field(EntryKind::Assistant, &id, EntryField::Url, "https://github.com");
        let entry = next.get(0).expect("entry");
        assert!(entry.style.is_solid());
        assert_eq!(entry.style, StyleToken::SolidIndigo);
        assert_eq!(entry.title, "Github");

        // A chat provider keeps its own solid token.
        let next =
            next.update_field(EntryKind::Assistant, &id, EntryField::Url, "https://claude.ai");
        assert_eq!(next.get(0).expect("entry").style, StyleToken::SolidOrange);
    }

    #[test]
    fn reorder_permutes_without_changing_the_id_multiset() {
        let reg = default_shortcuts();
        let ids = vec![
            "3".to_string(),
            "1".to_string(),
            "4".to_string(),
            "2".to_string(),
        ];
        let next = reg.reorder(&ids);

        let ordered: Vec<&str> = next.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ordered, vec!["3", "1", "4", "2"]);

        let mut before: Vec<&str> = reg.entries().iter().map(|e| e.id.as_str()).collect();
        let mut after: Vec<&str> = next.entries().iter().map(|e| e.id.as_str()).collect();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn reorder_rejects_non_permutations() {
        let reg = default_shortcuts();
        // Dropped an id.
        assert_eq!(
            reg.reorder(&["1".to_string(), "2".to_string(), "3".to_string()]),
            reg
        );
        // Swapped one in.
        assert_eq!(
            reg.reorder(&[
                "1".to_string(),
                "2".to_string(),
                "3".to_string(),
                "intruder".to_string(),
            ]),
            reg
        );
    }

    #[test]
    fn swap_moves_one_step() {
        let reg = default_shortcuts();
        let next = reg.swap(0, 1);
        let ordered: Vec<&str> = next.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ordered, vec!["2", "1", "3", "4"]);
    }

    #[test]
    fn seed_collections_have_four_entries_each() {
        assert_eq!(default_shortcuts().len(), 4);
        assert_eq!(default_assistants().len(), 4);
        assert!(default_assistants()
            .entries()
            .iter()
            .all(|e| e.style.is_solid()));
    }
}
