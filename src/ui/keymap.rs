use crate::analytics_client::Fid;
use crate::selection::{ActivityMetric, Tab};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    NextTab,
    PreviousTab,
    SelectMetric(ActivityMetric),
    ToggleMetric,
    Refresh,
    OpenFidPrompt,
    SetFid(Fid),
    Quit,
}

/// Keys that act regardless of focus.
pub fn global_action(event: &KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}

pub fn dashboard_action(event: &KeyEvent) -> Option<Action> {
    if let Some(action) = global_action(event) {
        return Some(action);
    }

    let action = match event.code {
        KeyCode::Tab | KeyCode::Right => Action::NextTab,
        KeyCode::BackTab | KeyCode::Left => Action::PreviousTab,
        KeyCode::Char('1') => Action::SelectTab(Tab::Overview),
        KeyCode::Char('2') => Action::SelectTab(Tab::Audience),
        KeyCode::Char('3') => Action::SelectTab(Tab::Content),
        KeyCode::Char('4') => Action::SelectTab(Tab::Video),
        KeyCode::Char('m') => Action::ToggleMetric,
        KeyCode::Char('p') => Action::SelectMetric(ActivityMetric::PostCount),
        KeyCode::Char('e') => Action::SelectMetric(ActivityMetric::Engagements),
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('/') => Action::OpenFidPrompt,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}
