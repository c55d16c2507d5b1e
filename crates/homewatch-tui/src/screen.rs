//! Screen identifier enum.

use std::fmt;

use homewatch_core::PanelId;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Alarm, // 1
    Entry,   // 2
    Kitchen, // 3
    Bedroom, // 4
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 4] = [Self::Alarm, Self::Entry, Self::Kitchen, Self::Bedroom];

    pub fn number(self) -> u8 {
        match self {
            Self::Alarm => 1,
            Self::Entry => 2,
            Self::Kitchen => 3,
            Self::Bedroom => 4,
        }
    }

    /// Screen from a numeric key (1-4). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Alarm),
            2 => Some(Self::Entry),
            3 => Some(Self::Kitchen),
            4 => Some(Self::Bedroom),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Alarm => "Alarm",
            Self::Entry => "Entry",
            Self::Kitchen => "Kitchen",
            Self::Bedroom => "Bedroom",
        }
    }

    /// Panels drawn on this screen.
    pub fn panels(self) -> &'static [PanelId] {
        match self {
            Self::Alarm => &[PanelId::AlarmState, PanelId::PeopleSeries, PanelId::AlarmEvents],
            Self::Entry => &[PanelId::Entry],
            Self::Kitchen => &[PanelId::Kitchen],
            Self::Bedroom => &[PanelId::Bedroom],
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
