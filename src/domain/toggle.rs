use strum::Display;

/// Fold state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum ToggleState {
    #[default]
    Collapsed,
    Expanded,
}

impl ToggleState {
    pub fn from_expanded(expanded: bool) -> Self {
        if expanded {
            ToggleState::Expanded
        } else {
            ToggleState::Collapsed
        }
    }

    pub fn is_expanded(self) -> bool {
        self == ToggleState::Expanded
    }

    pub fn toggled(self) -> Self {
        match self {
            ToggleState::Collapsed => ToggleState::Expanded,
            ToggleState::Expanded => ToggleState::Collapsed,
        }
    }
}
