use crate::lang::code::{Cell, Primitive};
use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
};

/// The runtime of a word in the dictionary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WordRuntime {
    /// The word is executed as soon as it is found, even while compiling.
    Immediate,

    /// The word is executed in immediate mode and compiled in compile mode.
    Normal,
}

/// Whether lookups can see the word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WordVisibility {
    Visible,

    /// Lookups skip the word.  Words under construction are always hidden.
    Hidden,
}

/// What happens when a word is executed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WordBehavior {
    /// A native operation of the virtual machine.
    Primitive(Primitive),

    /// A compiled definition starting at the given code memory address.  Executing it is a DOCOL
    /// into that address.
    Compiled(usize),
}

impl Display for WordBehavior {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WordBehavior::Primitive(primitive) => write!(f, "{}", primitive),
            WordBehavior::Compiled(address) => write!(f, "DOCOL {}", address),
        }
    }
}

/// The information stored in the dictionary for each word.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WordInfo {
    /// The name of the word.  Empty while the word is under construction.
    pub name: String,

    /// When should the word be executed?
    pub runtime: WordRuntime,

    /// Can lookups see the word?
    pub visibility: WordVisibility,

    pub behavior: WordBehavior,
}

impl WordInfo {
    pub fn new(
        name: String,
        runtime: WordRuntime,
        visibility: WordVisibility,
        behavior: WordBehavior,
    ) -> WordInfo {
        WordInfo {
            name,
            runtime,
            visibility,
            behavior,
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.runtime == WordRuntime::Immediate
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == WordVisibility::Hidden
    }

    /// Is this word implemented by the given primitive?
    pub fn is_primitive(&self, primitive: Primitive) -> bool {
        self.behavior == WordBehavior::Primitive(primitive)
    }
}

/// The dictionary of every word known to the interpreter.  Words are only ever appended, a word's
/// index is its identity for the rest of the session.  That index is what compiled code refers to,
/// so redefining a name only shadows it for future lookups.
#[derive(Default)]
pub struct Dictionary {
    words: Vec<WordInfo>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary { words: Vec::new() }
    }

    /// Append a new word and return its index.
    pub fn add(&mut self, info: WordInfo) -> usize {
        self.words.push(info);
        self.words.len() - 1
    }

    /// Find the most recent visible word with the given name.  Unnamed words are never matched.
    pub fn find(&self, name: &str) -> Option<(usize, &WordInfo)> {
        if name.is_empty() {
            return None;
        }

        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, word)| !word.is_hidden() && word.name == name)
    }

    /// Get a word by its index.
    pub fn get(&self, index: usize) -> Option<&WordInfo> {
        self.words.get(index)
    }

    /// Interpret a code memory cell as a dictionary index.
    pub fn resolve(&self, cell: Cell) -> Option<&WordInfo> {
        usize::try_from(cell).ok().and_then(|index| self.get(index))
    }

    /// The most recently added word.
    pub fn last(&self) -> Option<&WordInfo> {
        self.words.last()
    }

    /// Hide the most recently added word.  Returns false if the dictionary is empty.
    pub fn hide_last(&mut self) -> bool {
        self.set_last_visibility(WordVisibility::Hidden)
    }

    /// Reveal the most recently added word.  Returns false if the dictionary is empty.
    pub fn reveal_last(&mut self) -> bool {
        self.set_last_visibility(WordVisibility::Visible)
    }

    /// Give the most recently added word its name.  This only happens once, for a word that was
    /// created unnamed by `:`.  Returns false if there is no such word.
    pub fn name_last(&mut self, name: &str) -> bool {
        match self.words.last_mut() {
            Some(word) if word.name.is_empty() => {
                word.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    /// The names of all visible words, newest first.  A name that has been redefined is listed
    /// once.
    pub fn visible_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();

        self.words
            .iter()
            .rev()
            .filter(|word| !word.is_hidden() && !word.name.is_empty())
            .filter(|word| seen.insert(word.name.as_str()))
            .map(|word| word.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn set_last_visibility(&mut self, visibility: WordVisibility) -> bool {
        match self.words.last_mut() {
            Some(word) => {
                word.visibility = visibility;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(name: &str, behavior: WordBehavior) -> WordInfo {
        WordInfo::new(
            name.to_string(),
            WordRuntime::Normal,
            WordVisibility::Visible,
            behavior,
        )
    }

    #[test]
    fn find_returns_most_recent_visible_match() {
        let mut dictionary = Dictionary::new();

        let first = dictionary.add(word("inc", WordBehavior::Compiled(0)));
        let second = dictionary.add(word("inc", WordBehavior::Compiled(5)));

        let (found, info) = dictionary.find("inc").unwrap();
        assert_eq!(found, second);
        assert_eq!(info.behavior, WordBehavior::Compiled(5));

        assert!(dictionary.hide_last());
        assert_eq!(dictionary.find("inc").unwrap().0, first);

        assert!(dictionary.reveal_last());
        assert_eq!(dictionary.find("inc").unwrap().0, second);
    }

    #[test]
    fn unnamed_words_are_never_found() {
        let mut dictionary = Dictionary::new();
        let _ = dictionary.add(word("", WordBehavior::Compiled(0)));

        assert!(dictionary.find("").is_none());
        assert!(dictionary.visible_names().is_empty());
    }

    #[test]
    fn name_last_only_names_unnamed_words() {
        let mut dictionary = Dictionary::new();
        assert!(!dictionary.name_last("nothing"));

        let mut under_construction = word("", WordBehavior::Compiled(3));
        under_construction.visibility = WordVisibility::Hidden;
        let index = dictionary.add(under_construction);

        assert!(dictionary.name_last("double"));
        assert!(!dictionary.name_last("again"));
        assert_eq!(dictionary.get(index).unwrap().name, "double");

        // Still hidden until revealed.
        assert!(dictionary.find("double").is_none());
        let _ = dictionary.reveal_last();
        assert_eq!(dictionary.find("double").unwrap().0, index);
    }

    #[test]
    fn resolve_rejects_out_of_range_cells() {
        let mut dictionary = Dictionary::new();
        let _ = dictionary.add(word("dup", WordBehavior::Primitive(Primitive::Dup)));

        assert!(dictionary.resolve(0).is_some());
        assert!(dictionary.resolve(1).is_none());
        assert!(dictionary.resolve(-1).is_none());
    }

    #[test]
    fn visible_names_lists_newest_first_without_duplicates() {
        let mut dictionary = Dictionary::new();
        let _ = dictionary.add(word("dup", WordBehavior::Primitive(Primitive::Dup)));
        let _ = dictionary.add(word("+", WordBehavior::Primitive(Primitive::Add)));
        let _ = dictionary.add(word("dup", WordBehavior::Compiled(0)));

        assert_eq!(dictionary.visible_names(), vec!["dup", "+"]);
    }
}
