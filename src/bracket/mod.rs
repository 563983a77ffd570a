pub mod engine;
pub mod rules;
pub mod teams;
pub mod types;

pub use engine::{BracketEvent, transition};
pub use rules::create_bracket;
pub use teams::{SeededTeam, Team};
pub use types::{Bracket, ConferenceBracket, Matchup, RoundLocks};
