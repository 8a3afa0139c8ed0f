use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::player::Direction;

/// Frame loop state. Only a quit moves it, and nothing moves it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Done,
}

impl RunState {
    pub fn after(self, action: &Action) -> Self {
        match action {
            Action::Quit(_) => RunState::Done,
            _ => self,
        }
    }
}

/// What a window event means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the loop; carries the reason for the log.
    Quit(&'static str),
    Press(KeyCode),
    Release(KeyCode),
    /// Focus lost: release events may never arrive.
    ReleaseAll,
    Ignore,
}

pub fn classify_key(code: KeyCode, state: ElementState) -> Action {
    match state {
        ElementState::Pressed if is_quit_key(code) => Action::Quit("escape pressed"),
        ElementState::Pressed => Action::Press(code),
        ElementState::Released => Action::Release(code),
    }
}

/// Input classification for every event except redraws, which the app
/// handles itself.
pub fn classify(event: &WindowEvent) -> Action {
    match event {
        WindowEvent::CloseRequested => Action::Quit("window closed"),
        WindowEvent::Destroyed => Action::Quit("window destroyed"),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    ..
                },
            ..
        } => classify_key(*code, *state),
        WindowEvent::Focused(false) => Action::ReleaseAll,
        _ => Action::Ignore,
    }
}

/// Keys currently held, fed from press/release events and sampled once per frame.
#[derive(Debug, Default)]
pub struct Controls {
    keys_down: HashSet<KeyCode>,
}

impl Controls {
    pub fn press(&mut self, code: KeyCode) {
        self.keys_down.insert(code);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.keys_down.remove(&code);
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.keys_down.contains(&key_for(dir))
    }

    pub fn clear(&mut self) {
        self.keys_down.clear();
    }

    pub fn apply(&mut self, action: &Action) {
        match *action {
            Action::Press(code) => self.press(code),
            Action::Release(code) => self.release(code),
            Action::ReleaseAll => self.clear(),
            Action::Quit(_) | Action::Ignore => (),
        }
    }
}

#[inline]
pub fn key_for(dir: Direction) -> KeyCode {
    match dir {
        Direction::Left => KeyCode::ArrowLeft,
        Direction::Right => KeyCode::ArrowRight,
        Direction::Up => KeyCode::ArrowUp,
        Direction::Down => KeyCode::ArrowDown,
    }
}

#[inline]
pub fn is_quit_key(code: KeyCode) -> bool {
    code == KeyCode::Escape
}
