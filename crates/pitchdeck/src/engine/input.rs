use super::listeners::EventKind;

/// Keys the engine has bindings for. The host drops every other key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    ArrowUp,
    Space,
    F,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    ToggleFullscreen,
    /// Ask the platform to leave fullscreen without touching the optimistic flag.
    ExitFullscreen,
}

/// Key bindings: Right/Down/Space advance, Left/Up go back, F toggles
/// fullscreen, Escape leaves it.
pub fn binding(key: Key) -> Action {
    match key {
        Key::ArrowRight | Key::ArrowDown | Key::Space => Action::Next,
        Key::ArrowLeft | Key::ArrowUp => Action::Previous,
        Key::F => Action::ToggleFullscreen,
        Key::Escape => Action::ExitFullscreen,
    }
}

/// Notifications the host delivers from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    KeyPressed(Key),
    PointerMoved,
    FullscreenChanged(bool),
}

impl PlatformEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::KeyPressed(_) => EventKind::Keyboard,
            Self::PointerMoved => EventKind::PointerMove,
            Self::FullscreenChanged(_) => EventKind::FullscreenChange,
        }
    }
}

/// Side effects the engine asks the host to perform on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformRequest {
    EnterFullscreen,
    ExitFullscreen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(binding(Key::ArrowRight), Action::Next);
        assert_eq!(binding(Key::ArrowDown), Action::Next);
        assert_eq!(binding(Key::Space), Action::Next);
        assert_eq!(binding(Key::ArrowLeft), Action::Previous);
        assert_eq!(binding(Key::ArrowUp), Action::Previous);
        assert_eq!(binding(Key::F), Action::ToggleFullscreen);
        assert_eq!(binding(Key::Escape), Action::ExitFullscreen);
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(
            PlatformEvent::KeyPressed(Key::F).kind(),
            EventKind::Keyboard
        );
        assert_eq!(PlatformEvent::PointerMoved.kind(), EventKind::PointerMove);
        assert_eq!(
            PlatformEvent::FullscreenChanged(true).kind(),
            EventKind::FullscreenChange
        );
    }
}
