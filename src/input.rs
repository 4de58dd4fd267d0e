//! Input simulation module for mouse and keyboard control

use std::time::Duration;

#[cfg(windows)]
use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
#[cfg(windows)]
use std::thread;

use crate::error::InputError;
#[cfg(windows)]
use crate::utils::keybinds::KeyName;
use crate::utils::keybinds::resolve_key;
use crate::window::{focus_window, WindowHandle};

/// Synthetic keyboard and mouse input aimed at the game window
pub trait InputInjector {
    /// Bring the window to the foreground. `false` means it refused focus;
    /// callers log it and carry on.
    fn focus(&mut self, window: &WindowHandle) -> bool;
    fn send_key(&mut self, key: &str) -> Result<(), InputError>;
    /// Move the pointer to absolute screen coordinates
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), InputError>;
    fn right_click(&mut self) -> Result<(), InputError>;
}

/// Input backed by enigo and the Windows API
#[cfg(windows)]
pub struct EnigoInjector {
    enigo: Enigo,
    key_hold: Duration,
}

#[cfg(windows)]
impl EnigoInjector {
    /// `key_hold` is how long a key stays down in `send_key`
    pub fn new(key_hold: Duration) -> Result<Self, InputError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Backend(format!("{:?}", e)))?;
        Ok(Self { enigo, key_hold })
    }
}

#[cfg(windows)]
impl InputInjector for EnigoInjector {
    fn focus(&mut self, window: &WindowHandle) -> bool {
        focus_window(window)
    }

    fn send_key(&mut self, key: &str) -> Result<(), InputError> {
        let enigo_key = resolve_key(key)
            .map(to_enigo_key)
            .ok_or_else(|| InputError::UnknownKey(key.to_string()))?;

        self.enigo
            .key(enigo_key, Direction::Press)
            .map_err(|e| InputError::Injection(format!("press '{}': {:?}", key, e)))?;
        thread::sleep(self.key_hold);
        self.enigo
            .key(enigo_key, Direction::Release)
            .map_err(|e| InputError::Injection(format!("release '{}': {:?}", key, e)))
    }

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| InputError::Injection(format!("move to ({}, {}): {:?}", x, y, e)))
    }

    fn right_click(&mut self) -> Result<(), InputError> {
        self.enigo
            .button(Button::Right, Direction::Click)
            .map_err(|e| InputError::Injection(format!("right click: {:?}", e)))
    }
}

/// Map a validated key name onto enigo's key type
#[cfg(windows)]
fn to_enigo_key(key: KeyName) -> Key {
    match key {
        KeyName::Char(c) => Key::Unicode(c),
        KeyName::F(n) => match n {
            1 => Key::F1,
            2 => Key::F2,
            3 => Key::F3,
            4 => Key::F4,
            5 => Key::F5,
            6 => Key::F6,
            7 => Key::F7,
            8 => Key::F8,
            9 => Key::F9,
            10 => Key::F10,
            11 => Key::F11,
            _ => Key::F12,
        },
        KeyName::Escape => Key::Escape,
        KeyName::Enter => Key::Return,
        KeyName::Space => Key::Space,
        KeyName::Tab => Key::Tab,
        KeyName::Backspace => Key::Backspace,
        KeyName::Up => Key::UpArrow,
        KeyName::Down => Key::DownArrow,
        KeyName::Left => Key::LeftArrow,
        KeyName::Right => Key::RightArrow,
        KeyName::Home => Key::Home,
        KeyName::End => Key::End,
        KeyName::PageUp => Key::PageUp,
        KeyName::PageDown => Key::PageDown,
        KeyName::Delete => Key::Delete,
        KeyName::Shift => Key::Shift,
        KeyName::Control => Key::Control,
        KeyName::Alt => Key::Alt,
        KeyName::CapsLock => Key::CapsLock,
    }
}

/// Placeholder on platforms without input support
#[cfg(not(windows))]
pub struct EnigoInjector {
    _key_hold: Duration,
}

#[cfg(not(windows))]
impl EnigoInjector {
    pub fn new(_key_hold: Duration) -> Result<Self, InputError> {
        tracing::warn!("Input injection not implemented on this platform");
        Err(InputError::Unsupported)
    }
}

#[cfg(not(windows))]
impl InputInjector for EnigoInjector {
    fn focus(&mut self, window: &WindowHandle) -> bool {
        focus_window(window)
    }

    fn send_key(&mut self, key: &str) -> Result<(), InputError> {
        resolve_key(key).ok_or_else(|| InputError::UnknownKey(key.to_string()))?;
        Err(InputError::Unsupported)
    }

    fn move_cursor(&mut self, _x: i32, _y: i32) -> Result<(), InputError> {
        Err(InputError::Unsupported)
    }

    fn right_click(&mut self) -> Result<(), InputError> {
        Err(InputError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(windows)]
    use super::*;

    #[test]
    #[cfg(windows)]
    fn test_to_enigo_key() {
        assert_eq!(to_enigo_key(KeyName::Char('1')), Key::Unicode('1'));
        assert_eq!(to_enigo_key(KeyName::F(9)), Key::F9);
        assert_eq!(to_enigo_key(KeyName::Escape), Key::Escape);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_injector_unsupported() {
        use super::*;
        assert!(matches!(
            EnigoInjector::new(Duration::from_millis(1)),
            Err(InputError::Unsupported)
        ));
    }
}
