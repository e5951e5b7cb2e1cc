pub mod extract;
pub mod serpapi;
