use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Capability
/// what an `@omit` smart tag can take away from a catalog object
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum Capability {
    Create,
    Delete,
    Execute,
    Filter,
    Order,
    Read,
    Update,
}

impl Capability {
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Execute => "execute",
            Self::Filter => "filter",
            Self::Order => "order",
            Self::Read => "read",
            Self::Update => "update",
        }
    }

    /// Single-letter shorthand accepted in `@omit` lists.
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::Create => "c",
            Self::Delete => "d",
            Self::Execute => "x",
            Self::Filter => "f",
            Self::Order => "o",
            Self::Read => "r",
            Self::Update => "u",
        }
    }

    fn matches(self, item: &str) -> bool {
        let item = item.trim();

        item.eq_ignore_ascii_case(self.word()) || item.eq_ignore_ascii_case(self.letter())
    }
}

///
/// TagValue
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl TagValue {
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

///
/// Tags
///
/// Smart tags parsed from a catalog object's comment (`@filterable`,
/// `@omit execute,filter`, `@fieldName foo`).
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, TagValue>);

impl Tags {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: TagValue) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_flag(self, name: impl Into<String>) -> Self {
        self.with(name, TagValue::Flag(true))
    }

    /// True when the tag is present and not explicitly `false`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(TagValue::is_set)
    }

    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(TagValue::as_text)
    }

    /// Evaluate the `@omit` tag for one capability.
    ///
    /// A bare `@omit` omits everything; otherwise the tag lists the omitted
    /// capabilities, comma separated, by word or by letter.
    #[must_use]
    pub fn omits(&self, capability: Capability) -> bool {
        match self.0.get("omit") {
            None => false,
            Some(TagValue::Flag(flag)) => *flag,
            Some(TagValue::Text(text)) => text.split(',').any(|item| capability.matches(item)),
            Some(TagValue::List(items)) => items
                .iter()
                .flat_map(|item| item.split(','))
                .any(|item| capability.matches(item)),
        }
    }
}
