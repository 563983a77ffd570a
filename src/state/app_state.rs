use crate::app::MenuItem;
use crate::bracket::{Bracket, create_bracket};
use nfl_api::{Conference, PlayoffRound};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Bracket view state
// ---------------------------------------------------------------------------

/// The prediction bracket plus the user's position in it. All mutation of
/// the bracket itself goes through the engine via `App::dispatch`; this
/// struct only owns navigation.
#[derive(Debug)]
pub struct BracketState {
    pub bracket: Bracket,
    /// The round the user has navigated to.
    pub view_round: PlayoffRound,
    /// Ignored when view_round is the Super Bowl.
    pub selected_conference: Conference,
    /// Selected game index within the current round + conference.
    pub selected_game: usize,
}

impl Default for BracketState {
    fn default() -> Self {
        Self {
            bracket: create_bracket(""),
            view_round: PlayoffRound::WildCard,
            selected_conference: Conference::Afc,
            selected_game: 0,
        }
    }
}

impl BracketState {
    /// Swap in a different bracket and reset navigation.
    pub fn load(&mut self, bracket: Bracket) {
        self.bracket = bracket;
        self.view_round = PlayoffRound::WildCard;
        self.selected_conference = Conference::Afc;
        self.selected_game = 0;
    }

    pub fn navigate_round_next(&mut self) {
        if let Some(next) = self.view_round.next() {
            self.view_round = next;
            self.selected_game = 0;
        }
    }

    pub fn navigate_round_prev(&mut self) {
        if let Some(prev) = self.view_round.prev() {
            self.view_round = prev;
            self.selected_game = 0;
        }
    }

    pub fn navigate_game_down(&mut self) {
        let max = self.games_in_view().saturating_sub(1);
        if self.selected_game < max {
            self.selected_game += 1;
        }
    }

    pub fn navigate_game_up(&mut self) {
        self.selected_game = self.selected_game.saturating_sub(1);
    }

    pub fn cycle_conference(&mut self) {
        if self.view_round != PlayoffRound::SuperBowl {
            self.selected_conference = self.selected_conference.other();
            self.selected_game = 0;
        }
    }

    pub fn games_in_view(&self) -> usize {
        match self.view_round {
            PlayoffRound::WildCard => 3,
            PlayoffRound::Divisional => 2,
            PlayoffRound::Championship | PlayoffRound::SuperBowl => 1,
        }
    }

    /// The id of the currently selected matchup.
    pub fn selected_matchup_id(&self) -> Option<String> {
        let conference = self.bracket.conference(self.selected_conference);
        let matchup = match self.view_round {
            PlayoffRound::WildCard => conference.wild_card.get(self.selected_game)?,
            PlayoffRound::Divisional => conference.divisional.get(self.selected_game)?,
            PlayoffRound::Championship => &conference.championship,
            PlayoffRound::SuperBowl => &self.bracket.super_bowl,
        };
        Some(matchup.id.clone())
    }
}

// ---------------------------------------------------------------------------
// Metadata editor state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    BracketName,
    OwnerName,
    Subtitle,
}

impl EditTarget {
    pub fn label(&self) -> &'static str {
        match self {
            EditTarget::BracketName => "bracket name",
            EditTarget::OwnerName => "owner name",
            EditTarget::Subtitle => "subtitle",
        }
    }
}

/// Single-line text input for renaming the bracket, its owner or subtitle.
#[derive(Debug, Default)]
pub struct EditorState {
    pub target: Option<EditTarget>,
    pub buffer: String,
}

impl EditorState {
    pub fn open(&mut self, target: EditTarget, initial: &str) {
        self.target = Some(target);
        self.buffer = initial.to_owned();
    }

    pub fn close(&mut self) {
        self.target = None;
        self.buffer.clear();
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }
}

// ---------------------------------------------------------------------------
// Saved brackets state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SavedEntry {
    pub path: PathBuf,
    pub name: String,
    pub owner_name: String,
    pub updated_at: i64,
}

#[derive(Debug, Default)]
pub struct SavedBracketsState {
    pub entries: Vec<SavedEntry>,
    pub selected: usize,
    pub last_error: Option<String>,
}

impl SavedBracketsState {
    pub fn navigate_down(&mut self) {
        let max = self.entries.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Live games view state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LiveGamesState {
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// One-line feedback for the status bar ("bracket saved", etc).
    pub status: Option<String>,
    pub bracket: BracketState,
    pub editor: EditorState,
    pub saved: SavedBracketsState,
    pub live_games: LiveGamesState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            show_intro: true,
            ..Self::default()
        }
    }
}
