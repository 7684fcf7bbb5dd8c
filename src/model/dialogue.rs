//! Dialogue records and the decoded dialogue document.

use super::error::DocumentError;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// One line of dialogue. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueEntry {
    speaker_name: String,
    raw_text: String,
    avatar_name: Option<String>,
}

impl DialogueEntry {
    /// Create a dialogue entry.
    pub fn new(
        speaker_name: impl Into<String>,
        raw_text: impl Into<String>,
        avatar_name: Option<String>,
    ) -> Self {
        Self {
            speaker_name: speaker_name.into(),
            raw_text: raw_text.into(),
            avatar_name,
        }
    }

    /// Name of the speaking character.
    pub fn speaker_name(&self) -> &str {
        &self.speaker_name
    }

    /// Raw text, possibly containing `{glyph}` placeholders.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Avatar image name, if the speaker has one.
    pub fn avatar_name(&self) -> Option<&str> {
        self.avatar_name.as_deref()
    }
}

/// Which edge of a row an avatar is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarPosition {
    /// Avatar on the left, text to its right.
    Left,
    /// Avatar on the right, text to its left.
    Right,
}

/// Avatar placement for a speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarSpec {
    /// Image name in the catalog.
    pub name: String,
    /// Edge the avatar is drawn on.
    pub position: AvatarPosition,
}

impl AvatarSpec {
    /// Create an avatar spec.
    pub fn new(name: impl Into<String>, position: AvatarPosition) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Kind of image asset a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetKind {
    /// Inline glyph referenced as `{name}` in text.
    Glyph,
    /// Speaker avatar.
    Avatar,
}

/// An image the document declares, before it has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDecl {
    /// Catalog name.
    pub name: String,
    /// Where the image lives (URL or filesystem path).
    pub source: String,
    /// Glyph or avatar.
    pub kind: AssetKind,
}

// ===== Wire format =====

/// Dialogue document as delivered by the data endpoint.
///
/// ```json
/// {
///   "dialogue": [{ "name": "Sheldon", "text": "Hi {satisfied}" }],
///   "emojies":  [{ "name": "satisfied", "url": "https://..." }],
///   "avatars":  [{ "name": "Sheldon", "url": "https://...", "position": "left" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DialogueDocument {
    /// Ordered dialogue lines.
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    /// Declared inline glyphs.
    #[serde(default, alias = "emojis")]
    pub emojies: Vec<GlyphDecl>,
    /// Declared speaker avatars.
    #[serde(default)]
    pub avatars: Vec<AvatarDecl>,
}

/// One `dialogue` element.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DialogueLine {
    /// Speaker name.
    pub name: String,
    /// Raw text with glyph placeholders.
    pub text: String,
}

/// One `emojies` element.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GlyphDecl {
    /// Glyph name.
    pub name: String,
    /// Image location.
    #[serde(default)]
    pub url: String,
}

/// One `avatars` element.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AvatarDecl {
    /// Speaker name the avatar belongs to.
    pub name: String,
    /// Image location.
    #[serde(default)]
    pub url: String,
    /// Edge to draw on.
    pub position: AvatarPosition,
}

impl DialogueDocument {
    /// Decode a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Json` for malformed JSON or unknown avatar positions.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::Json {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
    }
}

/// Decoded structure the core consumes: entries, avatar lookup and glyph names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueSet {
    entries: Vec<DialogueEntry>,
    avatars: HashMap<String, AvatarSpec>,
    glyph_names: BTreeSet<String>,
    assets: Vec<AssetDecl>,
}

impl DialogueSet {
    /// Build from explicit parts.
    pub fn new(entries: Vec<DialogueEntry>, avatars: HashMap<String, AvatarSpec>) -> Self {
        Self {
            entries,
            avatars,
            glyph_names: BTreeSet::new(),
            assets: Vec::new(),
        }
    }

    /// Declare glyph names that `{name}` references may resolve to.
    pub fn with_glyph_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.glyph_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Derive the dialogue set from a decoded document.
    ///
    /// A speaker gets an avatar when an avatar with the speaker's name is declared.
    /// Later declarations of the same name replace earlier ones.
    pub fn from_document(document: DialogueDocument) -> Self {
        let mut avatars = HashMap::new();
        let mut assets = Vec::new();

        for decl in document.avatars {
            assets.push(AssetDecl {
                name: decl.name.clone(),
                source: decl.url,
                kind: AssetKind::Avatar,
            });
            avatars.insert(decl.name.clone(), AvatarSpec::new(decl.name, decl.position));
        }

        let mut glyph_names = BTreeSet::new();
        for decl in document.emojies {
            glyph_names.insert(decl.name.clone());
            assets.push(AssetDecl {
                name: decl.name,
                source: decl.url,
                kind: AssetKind::Glyph,
            });
        }

        let entries = document
            .dialogue
            .into_iter()
            .map(|line| {
                let avatar_name = avatars.contains_key(&line.name).then(|| line.name.clone());
                DialogueEntry::new(line.name, line.text, avatar_name)
            })
            .collect();

        Self {
            entries,
            avatars,
            glyph_names,
            assets,
        }
    }

    /// Ordered dialogue entries.
    pub fn entries(&self) -> &[DialogueEntry] {
        &self.entries
    }

    /// Avatar spec for an entry's speaker, if any.
    pub fn avatar_for(&self, entry: &DialogueEntry) -> Option<&AvatarSpec> {
        entry
            .avatar_name()
            .and_then(|name| self.avatars.get(name))
    }

    /// Declared glyph names.
    pub fn glyph_names(&self) -> &BTreeSet<String> {
        &self.glyph_names
    }

    /// Every declared image, avatars first.
    pub fn assets(&self) -> &[AssetDecl] {
        &self.assets
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
