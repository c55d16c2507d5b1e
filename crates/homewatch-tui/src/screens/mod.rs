//! Screen implementations. Each screen is a top-level Component.

pub mod alarm;
pub mod bedroom;
pub mod entry;
pub mod kitchen;

use crate::component::Component;
use crate::screen::ScreenId;

/// One component per [`ScreenId`].
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    ScreenId::ALL
        .iter()
        .map(|&id| {
            let screen: Box<dyn Component> = match id {
                ScreenId::Alarm => Box::new(alarm::AlarmScreen::new()),
                ScreenId::Entry => Box::new(entry::EntryScreen::new()),
                ScreenId::Kitchen => Box::new(kitchen::KitchenScreen::new()),
                ScreenId::Bedroom => Box::new(bedroom::BedroomScreen::new()),
            };
            (id, screen)
        })
        .collect()
}
