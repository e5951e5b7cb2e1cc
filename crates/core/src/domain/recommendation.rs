use std::fmt;

/// Every snippet of a search result, space-joined in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedText(String);

impl FlattenedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Model-written recommendation. Opaque to everything downstream of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation(String);

impl Recommendation {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
