use crate::app::{App, MenuItem};
use crate::state::app_state::EditTarget;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    guard.state.status = None;

    if guard.state.show_intro {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) => guard.dismiss_intro(),
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            _ => {}
        }
        return;
    }

    // Metadata editor captures all input while open.
    if guard.state.editor.is_active() {
        match key_event.code {
            KeyCode::Enter => guard.editor_commit(),
            KeyCode::Esc => guard.editor_cancel(),
            KeyCode::Backspace => guard.state.editor.backspace(),
            Char(c) => guard.state.editor.push(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Bracket),
        (_, Char('2'), _) => guard.update_tab(MenuItem::LiveGames),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Saved),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Bracket navigation
        (MenuItem::Bracket, Char('l') | KeyCode::Right, _) => guard.bracket_next_round(),
        (MenuItem::Bracket, Char('h') | KeyCode::Left, _) => guard.bracket_prev_round(),
        (MenuItem::Bracket, Char('j') | KeyCode::Down, _) => guard.bracket_game_down(),
        (MenuItem::Bracket, Char('k') | KeyCode::Up, _) => guard.bracket_game_up(),
        (MenuItem::Bracket, Char('c') | KeyCode::Tab, _) => guard.bracket_cycle_conference(),

        // Picks
        (MenuItem::Bracket, Char('t'), _) => guard.pick_home(),
        (MenuItem::Bracket, Char('b'), _) => guard.pick_away(),
        (MenuItem::Bracket, Char('x'), _) => guard.clear_pick(),
        (MenuItem::Bracket, Char('L'), _) => guard.toggle_lock_viewed_round(),
        (MenuItem::Bracket, Char('a'), _) => guard.apply_live_results_now(),
        (MenuItem::Bracket, Char('R'), _) => guard.reset_bracket(),

        // Metadata + snapshots
        (MenuItem::Bracket, Char('n'), _) => guard.open_editor(EditTarget::BracketName),
        (MenuItem::Bracket, Char('o'), _) => guard.open_editor(EditTarget::OwnerName),
        (MenuItem::Bracket, Char('u'), _) => guard.open_editor(EditTarget::Subtitle),
        (MenuItem::Bracket, Char('s'), _) => {
            if let Err(e) = guard.save_bracket_snapshot() {
                guard.state.last_error = Some(e);
            }
        }

        // Manual scoreboard refresh
        (MenuItem::Bracket | MenuItem::LiveGames, Char('r'), _) => {
            drop(guard);
            let _ = network_requests
                .send(NetworkRequest::RefreshLiveResults)
                .await;
            return;
        }

        // Live games scrolling
        (MenuItem::LiveGames, Char('j') | KeyCode::Down, _) => {
            guard.state.live_games.scroll_offset =
                guard.state.live_games.scroll_offset.saturating_add(1);
        }
        (MenuItem::LiveGames, Char('k') | KeyCode::Up, _) => {
            guard.state.live_games.scroll_offset =
                guard.state.live_games.scroll_offset.saturating_sub(1);
        }

        // Saved brackets
        (MenuItem::Saved, Char('j') | KeyCode::Down, _) => guard.state.saved.navigate_down(),
        (MenuItem::Saved, Char('k') | KeyCode::Up, _) => guard.state.saved.navigate_up(),
        (MenuItem::Saved, KeyCode::Enter, _) => guard.load_selected_saved(),
        (MenuItem::Saved, Char('r'), _) => guard.refresh_saved_brackets(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
