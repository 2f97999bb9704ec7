pub mod algorithm;
pub mod config;
pub mod node;
pub mod search_result;
pub mod tree;

pub use algorithm::{search, search_with_config};
pub use config::SearchConfig;
pub use node::{NodeId, SearchNode};
pub use search_result::{ChildStats, SearchReport};
pub use tree::SearchTree;
