use crate::bracket::{Bracket, BracketEvent, transition};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, EditTarget, SavedEntry};
use log::{debug, warn};
use nfl_api::{LiveResults, PlayoffRound};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Bracket,
    LiveGames,
    Saved,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();
        let mut app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        // Restore the autosaved session, or an explicitly pointed-to
        // snapshot (file path or URL).
        let restored = match std::env::var("PBTUI_BRACKET_JSON") {
            Ok(source) if !source.trim().is_empty() => load_bracket_source(source.trim()),
            _ => load_current_bracket(),
        };
        match restored {
            Ok(bracket) => app.state.bracket.load(bracket),
            Err(e) => debug!("no bracket restored: {e}"),
        }

        app
    }

    /// The single mutation path: every bracket change goes through the
    /// engine, then the result is autosaved.
    pub fn dispatch(&mut self, event: BracketEvent) {
        let current = self.state.bracket.bracket.clone();
        self.state.bracket.bracket = transition(current, event);
        if let Err(e) = self.save_current_bracket() {
            warn!("autosave failed: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_live_results(&mut self, results: LiveResults) {
        self.state.last_error = None;
        let first_snapshot = self.state.bracket.bracket.live_results.is_none();
        self.dispatch(BracketEvent::SetLiveResults { results });

        // On the first snapshot, rounds that already contain final scores
        // start locked: facts beat stale predictions on first load. Each
        // lock toggle reconciles immediately.
        if first_snapshot {
            for round in PlayoffRound::ALL {
                let has_final = self
                    .state
                    .bracket
                    .bracket
                    .live_results
                    .as_ref()
                    .is_some_and(|r| r.has_completed_games(round));
                if has_final && !self.state.bracket.bracket.locked_rounds.is_locked(round) {
                    self.dispatch(BracketEvent::ToggleRoundLock { round });
                }
            }
        }
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.editor.close();
        if self.state.active_tab == MenuItem::Saved {
            self.refresh_saved_brackets();
        }
        if self.state.active_tab == MenuItem::LiveGames {
            self.state.live_games.scroll_offset = 0;
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    // -----------------------------------------------------------------------
    // Bracket navigation — delegated to BracketState
    // -----------------------------------------------------------------------

    pub fn bracket_next_round(&mut self) {
        self.state.bracket.navigate_round_next();
    }

    pub fn bracket_prev_round(&mut self) {
        self.state.bracket.navigate_round_prev();
    }

    pub fn bracket_game_down(&mut self) {
        self.state.bracket.navigate_game_down();
    }

    pub fn bracket_game_up(&mut self) {
        self.state.bracket.navigate_game_up();
    }

    pub fn bracket_cycle_conference(&mut self) {
        self.state.bracket.cycle_conference();
    }

    // -----------------------------------------------------------------------
    // Picks
    // -----------------------------------------------------------------------

    /// Record the home side of the selected matchup as its winner.
    pub fn pick_home(&mut self) {
        self.pick_side(true);
    }

    pub fn pick_away(&mut self) {
        self.pick_side(false);
    }

    fn pick_side(&mut self, home: bool) {
        if self.viewed_round_locked() {
            self.state.status = Some("round is locked to live results".to_owned());
            return;
        }
        let Some(matchup_id) = self.state.bracket.selected_matchup_id() else {
            return;
        };
        let Some(matchup) = self.state.bracket.bracket.find_matchup(&matchup_id) else {
            return;
        };
        let slot = if home { &matchup.home } else { &matchup.away };
        let Some(winner) = slot.clone() else {
            self.state.status = Some("that slot has no team yet".to_owned());
            return;
        };
        self.dispatch(BracketEvent::SelectWinner { matchup_id, winner });
    }

    pub fn clear_pick(&mut self) {
        if self.viewed_round_locked() {
            self.state.status = Some("round is locked to live results".to_owned());
            return;
        }
        if let Some(matchup_id) = self.state.bracket.selected_matchup_id() {
            self.dispatch(BracketEvent::ClearWinner { matchup_id });
        }
    }

    fn viewed_round_locked(&self) -> bool {
        self.state
            .bracket
            .bracket
            .locked_rounds
            .is_locked(self.state.bracket.view_round)
    }

    pub fn toggle_lock_viewed_round(&mut self) {
        let round = self.state.bracket.view_round;
        self.dispatch(BracketEvent::ToggleRoundLock { round });
        let locked = self.state.bracket.bracket.locked_rounds.is_locked(round);
        self.state.status = Some(format!(
            "{} {}",
            round.label(),
            if locked { "locked to live results" } else { "unlocked" }
        ));
    }

    pub fn apply_live_results_now(&mut self) {
        if self.state.bracket.bracket.live_results.is_none() {
            self.state.status = Some("no live results cached yet".to_owned());
            return;
        }
        self.dispatch(BracketEvent::ApplyLiveResults);
        self.state.status = Some("live results applied to locked rounds".to_owned());
    }

    pub fn reset_bracket(&mut self) {
        self.dispatch(BracketEvent::Reset);
        self.state.status = Some("bracket reset".to_owned());
    }

    // -----------------------------------------------------------------------
    // Metadata editor
    // -----------------------------------------------------------------------

    pub fn open_editor(&mut self, target: EditTarget) {
        let bracket = &self.state.bracket.bracket;
        let initial = match target {
            EditTarget::BracketName => bracket.name.clone(),
            EditTarget::OwnerName => bracket.owner_name.clone(),
            EditTarget::Subtitle => bracket.subtitle.clone().unwrap_or_default(),
        };
        self.state.editor.open(target, &initial);
    }

    pub fn editor_commit(&mut self) {
        let Some(target) = self.state.editor.target else {
            return;
        };
        let value = self.state.editor.buffer.trim().to_owned();
        let event = match target {
            EditTarget::BracketName => BracketEvent::SetName { name: value },
            EditTarget::OwnerName => BracketEvent::SetOwnerName { owner_name: value },
            EditTarget::Subtitle => BracketEvent::SetSubtitle {
                subtitle: if value.is_empty() { None } else { Some(value) },
            },
        };
        self.dispatch(event);
        self.state.editor.close();
    }

    pub fn editor_cancel(&mut self) {
        self.state.editor.close();
    }

    // -----------------------------------------------------------------------
    // Persistence — autosave, named snapshots, saved-brackets tab
    // -----------------------------------------------------------------------

    pub fn save_current_bracket(&self) -> Result<(), String> {
        write_bracket(&current_bracket_path(), &self.state.bracket.bracket)
    }

    /// Save the current bracket as a named snapshot under brackets/.
    pub fn save_bracket_snapshot(&mut self) -> Result<PathBuf, String> {
        let bracket = &self.state.bracket.bracket;
        let path = brackets_dir().join(format!("{}.json", bracket.id));
        write_bracket(&path, bracket)?;
        self.state.status = Some(format!("saved to {}", path.display()));
        Ok(path)
    }

    pub fn refresh_saved_brackets(&mut self) {
        self.state.saved.last_error = None;
        self.state.saved.selected = 0;
        self.state.saved.entries = match list_saved_brackets() {
            Ok(entries) => entries,
            Err(e) => {
                self.state.saved.last_error = Some(e);
                Vec::new()
            }
        };
    }

    /// Load the snapshot highlighted in the Saved tab into the session.
    pub fn load_selected_saved(&mut self) {
        let Some(entry) = self.state.saved.entries.get(self.state.saved.selected).cloned() else {
            return;
        };
        match load_bracket_source(&entry.path.display().to_string()) {
            Ok(bracket) => {
                self.dispatch(BracketEvent::Load {
                    bracket: Box::new(bracket),
                });
                self.state.status = Some(format!("loaded \"{}\"", display_name(&entry)));
                self.update_tab(MenuItem::Bracket);
            }
            Err(e) => self.state.saved.last_error = Some(e),
        }
    }
}

fn display_name(entry: &SavedEntry) -> String {
    if entry.name.is_empty() {
        format!("{}'s bracket", entry.owner_name)
    } else {
        entry.name.clone()
    }
}

// ---------------------------------------------------------------------------
// File layout: <config>/pbtui/current.json + <config>/pbtui/brackets/*.json
// ---------------------------------------------------------------------------

fn config_dir() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("pbtui");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join("pbtui");
    }
    PathBuf::from(".")
}

fn current_bracket_path() -> PathBuf {
    config_dir().join("current.json")
}

fn brackets_dir() -> PathBuf {
    config_dir().join("brackets")
}

fn write_bracket(path: &PathBuf, bracket: &Bracket) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
    }
    let payload = serde_json::to_string_pretty(bracket)
        .map_err(|e| format!("serialize bracket failed: {e}"))?;
    std::fs::write(path, payload).map_err(|e| format!("write bracket failed: {e}"))
}

fn load_current_bracket() -> Result<Bracket, String> {
    load_bracket_source(&current_bracket_path().display().to_string())
}

/// Load a bracket snapshot from a local path or an http(s) URL.
fn load_bracket_source(source: &str) -> Result<Bracket, String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let body = reqwest::blocking::get(source)
            .map_err(|e| format!("{source}: fetch failed: {e}"))?
            .text()
            .map_err(|e| format!("{source}: read body failed: {e}"))?;
        serde_json::from_str(&body).map_err(|e| format!("{source}: invalid bracket json: {e}"))
    } else {
        let content = std::fs::read_to_string(source)
            .map_err(|e| format!("{source}: read failed: {e}"))?;
        serde_json::from_str(&content).map_err(|e| format!("{source}: invalid bracket json: {e}"))
    }
}

fn list_saved_brackets() -> Result<Vec<SavedEntry>, String> {
    let dir = brackets_dir();
    let mut entries = Vec::new();
    let read_dir = match std::fs::read_dir(&dir) {
        Ok(read_dir) => read_dir,
        // No directory yet simply means nothing has been saved.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
        Err(e) => return Err(format!("{}: read dir failed: {e}", dir.display())),
    };

    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        let Ok(bracket) = serde_json::from_str::<Bracket>(&content) else {
            debug!("skipping unreadable snapshot {}", path.display());
            continue;
        };
        entries.push(SavedEntry {
            path,
            name: bracket.name,
            owner_name: bracket.owner_name,
            updated_at: bracket.updated_at,
        });
    }

    entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(entries)
}
