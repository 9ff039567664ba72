//! Reserved-word escaping
//!
//! Three independent tables are consulted, one per [`NameRole`]. A hit appends
//! a single `_`; a miss returns the input unchanged. Matching is literal and
//! case-sensitive.

use crate::Symbol;
use once_cell::sync::Lazy;
use shapegen_core::ReservedWordSettings;
use std::collections::HashSet;

/// Python builtins and `typing` names a generated type must not shadow.
static TYPE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "str",
        "int",
        "float",
        "bool",
        "bytes",
        "bytearray",
        "list",
        "dict",
        "set",
        "object",
        "type",
        "None",
        "True",
        "False",
        "Any",
        "Dict",
        "List",
        "Union",
        "Decimal",
    ]
    .into_iter()
    .collect()
});

/// Python keywords plus `self`, which every generated method binds.
static MEMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield", "self",
    ]
    .into_iter()
    .collect()
});

/// Error shapes carry a discriminant field named `code`.
static ERROR_MEMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| ["code"].into_iter().collect());

/// Which table an identifier is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRole {
    Type,
    Member,
    /// Members of shapes carrying the error trait, checked after [`NameRole::Member`]
    ErrorMember,
}

/// A set of reserved identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedWords {
    words: HashSet<String>,
}

impl ReservedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.words.contains(name)
    }

    pub fn escape(&self, name: &str) -> String {
        if self.contains(name) {
            format!("{name}_")
        } else {
            name.to_string()
        }
    }
}

/// Escapes identifiers per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escaper {
    types: ReservedWords,
    members: ReservedWords,
    error_members: ReservedWords,
}

impl Escaper {
    pub fn new(types: ReservedWords, members: ReservedWords, error_members: ReservedWords) -> Self {
        Self {
            types,
            members,
            error_members,
        }
    }

    /// Escaper with the built-in Python tables.
    pub fn builtin() -> Self {
        Self::new(
            ReservedWords::new(TYPE_WORDS.iter().copied()),
            ReservedWords::new(MEMBER_WORDS.iter().copied()),
            ReservedWords::new(ERROR_MEMBER_WORDS.iter().copied()),
        )
    }

    /// Built-in tables extended with user-supplied words.
    pub fn with_settings(settings: &ReservedWordSettings) -> Self {
        let mut escaper = Self::builtin();
        escaper.types.extend(settings.types.iter().cloned());
        escaper.members.extend(settings.members.iter().cloned());
        escaper
    }

    pub fn escape(&self, name: &str, role: NameRole) -> String {
        match role {
            NameRole::Type => self.types.escape(name),
            NameRole::Member => self.members.escape(name),
            NameRole::ErrorMember => self.error_members.escape(name),
        }
    }

    /// Escape a symbol's name against the type table.
    ///
    /// Symbols without a definition file name types the generator does not
    /// own and are returned untouched.
    pub fn escape_symbol(&self, symbol: Symbol) -> Symbol {
        if !symbol.has_definition_file() {
            return symbol;
        }
        let escaped = self.types.escape(symbol.name());
        if escaped == symbol.name() {
            symbol
        } else {
            symbol.renamed(escaped)
        }
    }

    /// Escape an already snake-cased member name. The error table is applied
    /// as a second pass when the owning shape is an error.
    pub fn escape_member_name(&self, name: &str, container_is_error: bool) -> String {
        let name = self.members.escape(name);
        if container_is_error {
            self.error_members.escape(&name)
        } else {
            name
        }
    }
}

impl Default for Escaper {
    fn default() -> Self {
        Self::builtin()
    }
}
