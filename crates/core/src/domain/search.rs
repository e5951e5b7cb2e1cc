use anyhow::Context;
use serde_json::Value;

/// One node of a search-result tree.
///
/// Only `snippet` (string) and `list` (array) are meaningful on a record;
/// every other field is dropped at conversion time.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchNode {
    Record {
        snippet: Option<String>,
        list: Option<Vec<SearchNode>>,
    },
    Sequence(Vec<SearchNode>),
    Other,
}

impl From<&Value> for SearchNode {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(map) => SearchNode::Record {
                snippet: map
                    .get("snippet")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                list: map
                    .get("list")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().map(SearchNode::from).collect()),
            },
            Value::Array(items) => SearchNode::Sequence(items.iter().map(SearchNode::from).collect()),
            _ => SearchNode::Other,
        }
    }
}

/// Raw response body from the search provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    raw: Value,
}

impl SearchResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Parses a response body. An empty body becomes `null`; anything else must be JSON.
    pub fn from_body(body: &str) -> anyhow::Result<Self> {
        if body.trim().is_empty() {
            return Ok(Self::new(Value::Null));
        }
        let raw = serde_json::from_str::<Value>(body)
            .with_context(|| format!("search response is not valid JSON: {body}"))?;
        Ok(Self::new(raw))
    }

    /// Top-level `text_blocks`, or nothing when absent or not an array.
    pub fn text_blocks(&self) -> Vec<SearchNode> {
        self.raw
            .get("text_blocks")
            .and_then(Value::as_array)
            .map(|blocks| blocks.iter().map(SearchNode::from).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_only_typed_snippet_and_list() {
        let v = json!({"snippet": 42, "list": "nope", "title": "ignored"});
        assert_eq!(
            SearchNode::from(&v),
            SearchNode::Record {
                snippet: None,
                list: None
            }
        );
    }

    #[test]
    fn scalars_convert_to_other() {
        assert_eq!(SearchNode::from(&json!("text")), SearchNode::Other);
        assert_eq!(SearchNode::from(&json!(null)), SearchNode::Other);
    }

    #[test]
    fn empty_body_is_null() {
        let res = SearchResult::from_body("  \n").unwrap();
        assert_eq!(res, SearchResult::new(Value::Null));
        assert!(res.text_blocks().is_empty());
    }

    #[test]
    fn non_json_body_is_rejected() {
        assert!(SearchResult::from_body("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn text_blocks_of_wrong_type_are_empty() {
        let res = SearchResult::new(json!({"text_blocks": {"snippet": "A"}}));
        assert!(res.text_blocks().is_empty());
        let res = SearchResult::new(json!(["not", "an", "object"]));
        assert!(res.text_blocks().is_empty());
    }
}
