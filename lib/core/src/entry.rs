use serde::{Deserialize, Deserializer, Serialize};

/// Text that is stored either as one string or as an ordered list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Single(String),
    Multiple(Vec<String>),
}

impl TextField {
    /// An empty string and an empty list both count as "not provided".
    pub fn is_empty(&self) -> bool {
        match self {
            TextField::Single(s) => s.is_empty(),
            TextField::Multiple(items) => items.is_empty(),
        }
    }

    /// First meaningful line, if any
    pub fn first(&self) -> Option<&str> {
        match self {
            TextField::Single(s) if !s.is_empty() => Some(s.as_str()),
            TextField::Single(_) => None,
            TextField::Multiple(items) => items.first().map(String::as_str),
        }
    }

    /// All lines in order; a single string yields itself unless empty
    pub fn lines(&self) -> Vec<&str> {
        match self {
            TextField::Single(s) if s.is_empty() => Vec::new(),
            TextField::Single(s) => vec![s.as_str()],
            TextField::Multiple(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for TextField {
    fn default() -> Self {
        TextField::Single(String::new())
    }
}

impl From<&str> for TextField {
    fn from(s: &str) -> Self {
        TextField::Single(s.to_string())
    }
}

impl From<String> for TextField {
    fn from(s: String) -> Self {
        TextField::Single(s)
    }
}

impl From<Vec<String>> for TextField {
    fn from(items: Vec<String>) -> Self {
        TextField::Multiple(items)
    }
}

impl From<Vec<&str>> for TextField {
    fn from(items: Vec<&str>) -> Self {
        TextField::Multiple(items.into_iter().map(str::to_string).collect())
    }
}

/// A named vocabulary item: description, examples, cross references and an
/// insertable snippet.
///
/// Snippets may contain `@k@` placeholder markers. They are stored and passed
/// through untouched; navigating between them is up to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippet: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: TextField,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: TextField,
    #[serde(default, alias = "seeAlso", deserialize_with = "null_as_default")]
    pub see_also: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snippet: String::new(),
            description: TextField::default(),
            examples: TextField::default(),
            see_also: Vec::new(),
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<TextField>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_examples(mut self, examples: impl Into<TextField>) -> Self {
        self.examples = examples.into();
        self
    }

    pub fn with_see_also<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.see_also = names.into_iter().map(Into::into).collect();
        self
    }

    /// Lay `user` over a copy of `self`, field by field.
    ///
    /// A user field only wins when it is non-empty, so an override that sets
    /// nothing but a snippet still inherits the official description,
    /// examples and cross references. The name always stays `self.name`.
    pub fn overlay(&self, user: &Entry) -> Entry {
        let mut merged = self.clone();
        if !user.description.is_empty() {
            merged.description = user.description.clone();
        }
        if !user.examples.is_empty() {
            merged.examples = user.examples.clone();
        }
        if !user.see_also.is_empty() {
            merged.see_also = user.see_also.clone();
        }
        if !user.snippet.is_empty() {
            merged.snippet = user.snippet.clone();
        }
        merged
    }

    /// Text to render as a preview: the first example, falling back to the
    /// name when `always_show_examples` is set.
    pub fn preview(&self, always_show_examples: bool) -> Option<&str> {
        match self.examples.first() {
            Some(example) => Some(example),
            None if always_show_examples => Some(self.name.as_str()),
            None => None,
        }
    }

    /// Text inserted on completion
    pub fn insert_text(&self, snippet_preferred: bool) -> &str {
        if snippet_preferred && !self.snippet.is_empty() {
            &self.snippet
        } else {
            &self.name
        }
    }
}
