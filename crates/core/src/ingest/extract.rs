use crate::domain::recommendation::FlattenedText;
use crate::domain::search::{SearchNode, SearchResult};

/// Collects snippets depth-first, left to right. No deduplication.
pub fn extract_text(node: &SearchNode) -> Vec<&str> {
    let mut out = Vec::new();
    collect(node, &mut out);
    out
}

fn collect<'a>(node: &'a SearchNode, out: &mut Vec<&'a str>) {
    match node {
        SearchNode::Record { snippet, list } => {
            if let Some(snippet) = snippet {
                out.push(snippet);
            }
            for child in list.iter().flatten() {
                collect(child, out);
            }
        }
        SearchNode::Sequence(items) => {
            for child in items {
                collect(child, out);
            }
        }
        SearchNode::Other => {}
    }
}

/// Joins the snippets of every `text_blocks` entry with a single space.
pub fn combine_text_blocks(result: &SearchResult) -> FlattenedText {
    let blocks = result.text_blocks();
    let fragments: Vec<&str> = blocks.iter().flat_map(extract_text).collect();
    FlattenedText::new(fragments.join(" "))
}
