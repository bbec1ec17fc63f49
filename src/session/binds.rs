//! Key bindings: one table per mode, so the transition surface stays
//! auditable. Unknown keys map to nothing and are ignored by the caller.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Mode;
use super::event::Action;

/// Translates a physical key into a semantic action for the given mode.
///
/// `vim` enables vim-style navigation characters in the modes where
/// characters are not query input.
pub fn action_for(mode: Mode, vim: bool, key: &KeyEvent) -> Option<Action> {
    // Bindings that hold in every mode.
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Some(Action::Abort);
    }
    match key.code {
        KeyCode::F(1) => return Some(Action::ToggleHelp),
        KeyCode::F(2) => return Some(Action::ToggleAccessibility),
        _ => {}
    }

    match mode {
        Mode::Interactive => interactive_binds(key, vim),
        Mode::Search => search_binds(key),
        Mode::Preview => preview_binds(key, vim),
        Mode::Help => help_binds(key),
    }
}

fn navigation_binds(key: &KeyEvent, vim: bool) -> Option<Action> {
    if key.modifiers == KeyModifiers::CONTROL {
        if vim {
            match key.code {
                KeyCode::Char('d') => return Some(Action::PageDown(1)),
                KeyCode::Char('u') => return Some(Action::PageUp(1)),
                _ => {}
            }
        }
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Action::Up(1)),
        KeyCode::Down => Some(Action::Down(1)),
        KeyCode::PageUp => Some(Action::PageUp(1)),
        KeyCode::PageDown => Some(Action::PageDown(1)),
        KeyCode::Home => Some(Action::First),
        KeyCode::End => Some(Action::Last),
        KeyCode::Char('j') if vim => Some(Action::Down(1)),
        KeyCode::Char('k') if vim => Some(Action::Up(1)),
        KeyCode::Char('g') if vim => Some(Action::First),
        KeyCode::Char('G') if vim => Some(Action::Last),
        _ => None,
    }
}

fn interactive_binds(key: &KeyEvent, vim: bool) -> Option<Action> {
    if let Some(nav) = navigation_binds(key, vim) {
        return Some(nav);
    }
    if key.modifiers == KeyModifiers::CONTROL {
        return match key.code {
            KeyCode::Char('a') => Some(Action::SelectAll),
            KeyCode::Char('t') => Some(Action::ToggleAll),
            KeyCode::Char('x') => Some(Action::DeselectAll),
            KeyCode::Char('p') => Some(Action::TogglePreview),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter => Some(Action::Accept),
        KeyCode::Esc => Some(Action::Abort),
        KeyCode::Tab => Some(Action::Toggle),
        KeyCode::Char('/') => Some(Action::StartSearch),
        KeyCode::Char(c) if vim => match c {
            'q' => Some(Action::Abort),
            '?' => Some(Action::ToggleHelp),
            'p' => Some(Action::TogglePreview),
            ' ' => Some(Action::Toggle),
            _ => None,
        },
        // Without vim bindings, typing filters right away.
        KeyCode::Char(c) => Some(Action::AddChar(c)),
        _ => None,
    }
}

fn search_binds(key: &KeyEvent) -> Option<Action> {
    if let Some(nav) = navigation_binds(key, false) {
        return Some(nav);
    }
    if key.modifiers == KeyModifiers::CONTROL {
        return match key.code {
            KeyCode::Char('u') => Some(Action::ClearQuery),
            KeyCode::Char('p') => Some(Action::TogglePreview),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter => Some(Action::Accept),
        KeyCode::Esc => Some(Action::ClearQuery),
        KeyCode::Backspace => Some(Action::BackwardDeleteChar),
        KeyCode::Tab => Some(Action::Toggle),
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            Some(Action::AddChar(c))
        }
        _ => None,
    }
}

fn preview_binds(key: &KeyEvent, vim: bool) -> Option<Action> {
    if let Some(nav) = navigation_binds(key, vim) {
        return Some(nav);
    }
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('p') {
        return Some(Action::TogglePreview);
    }
    match key.code {
        KeyCode::Enter => Some(Action::Accept),
        KeyCode::Esc => Some(Action::TogglePreview),
        KeyCode::Char('p') if vim => Some(Action::TogglePreview),
        KeyCode::Char('q') if vim => Some(Action::Abort),
        _ => None,
    }
}

fn help_binds(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
        _ => None,
    }
}
