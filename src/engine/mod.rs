mod options;
mod player;
mod search;

pub use options::EngineOptions;
pub use player::Player;
pub use search::SearchOptions;
