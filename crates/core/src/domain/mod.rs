pub mod recommendation;
pub mod search;
