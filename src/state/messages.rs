use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nfl_api::LiveResults;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    RefreshLiveResults,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Whole-snapshot replacement: a fetch either fully succeeds, or the
    /// previously cached snapshot stays as-is.
    LiveResultsLoaded { results: LiveResults },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
