use winit::keyboard::Key;

/// Keyboard-triggered actions. Only the orbit toggle is wired up; the ball
/// controls listed in the instructions overlay have no behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    ToggleOrbit,
}

pub fn action_for_key(key: &Key) -> Option<ViewerAction> {
    match key {
        Key::Character(text) => action_for_character(text.as_str()),
        _ => None,
    }
}

fn action_for_character(text: &str) -> Option<ViewerAction> {
    match text {
        "o" | "O" => Some(ViewerAction::ToggleOrbit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::NamedKey;

    use super::*;

    #[test]
    fn o_toggles_orbit_in_either_case() {
        assert_eq!(
            action_for_key(&Key::Character("o".into())),
            Some(ViewerAction::ToggleOrbit)
        );
        assert_eq!(
            action_for_key(&Key::Character("O".into())),
            Some(ViewerAction::ToggleOrbit)
        );
    }

    #[test]
    fn other_keys_do_nothing() {
        assert_eq!(action_for_key(&Key::Character("r".into())), None);
        assert_eq!(action_for_key(&Key::Named(NamedKey::Space)), None);
        assert_eq!(action_for_key(&Key::Named(NamedKey::ArrowUp)), None);
    }
}
