//! Maps view-selection triggers to derivation functions and pipes the result
//! into the renderer. Dispatch keeps no state between calls: the same trigger
//! always produces the same cards.

use std::fmt;

use tracing::debug;

use crate::derive::{filter_funded, filter_unfunded, search};
use crate::error::ViewError;
use crate::models::GameRecord;
use crate::render::{render, DisplaySurface};
use crate::store::RecordStore;

/// A request to show a particular view of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Trigger {
    #[default]
    ShowAll,
    ShowUnfunded,
    ShowFunded,
    Search(String),
}

impl Trigger {
    /// Event name used as the key in [`HANDLERS`].
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::ShowAll => "showAll",
            Trigger::ShowUnfunded => "showUnfunded",
            Trigger::ShowFunded => "showFunded",
            Trigger::Search(_) => "search",
        }
    }

    /// Text argument handed to the handler; only searches carry one.
    pub fn argument(&self) -> &str {
        match self {
            Trigger::Search(term) => term,
            _ => "",
        }
    }

    /// Build a trigger from an event name and its (possibly empty) argument.
    pub fn from_event(name: &str, argument: &str) -> Result<Self, ViewError> {
        match name {
            "showAll" => Ok(Trigger::ShowAll),
            "showUnfunded" => Ok(Trigger::ShowUnfunded),
            "showFunded" => Ok(Trigger::ShowFunded),
            "search" => Ok(Trigger::Search(argument.to_string())),
            other => Err(ViewError::UnknownTrigger(other.to_string())),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::ShowAll => write!(f, "All games"),
            Trigger::ShowUnfunded => write!(f, "Unfunded games"),
            Trigger::ShowFunded => write!(f, "Funded games"),
            Trigger::Search(term) => write!(f, "Search \"{term}\""),
        }
    }
}

/// Computes the records a view should show from the full collection and the
/// trigger argument.
pub type Handler = for<'a> fn(&'a [GameRecord], &str) -> Vec<&'a GameRecord>;

fn show_all<'a>(records: &'a [GameRecord], _: &str) -> Vec<&'a GameRecord> {
    records.iter().collect()
}

fn show_unfunded<'a>(records: &'a [GameRecord], _: &str) -> Vec<&'a GameRecord> {
    filter_unfunded(records)
}

fn show_funded<'a>(records: &'a [GameRecord], _: &str) -> Vec<&'a GameRecord> {
    filter_funded(records)
}

/// Every trigger the board understands, keyed by event name.
pub const HANDLERS: &[(&str, Handler)] = &[
    ("showAll", show_all),
    ("showUnfunded", show_unfunded),
    ("showFunded", show_funded),
    ("search", search),
];

/// Look up the handler registered for an event name.
pub fn handler_for(name: &str) -> Result<Handler, ViewError> {
    HANDLERS
        .iter()
        .find(|(event, _)| *event == name)
        .map(|(_, handler)| *handler)
        .ok_or_else(|| ViewError::UnknownTrigger(name.to_string()))
}

/// Glue between a record store and a display surface.
pub struct ViewController<'s> {
    store: &'s RecordStore,
}

impl<'s> ViewController<'s> {
    pub fn new(store: &'s RecordStore) -> Self {
        Self { store }
    }

    /// Records the trigger would show, without touching any surface.
    pub fn view(&self, trigger: &Trigger) -> Result<Vec<&'s GameRecord>, ViewError> {
        let handler = handler_for(trigger.name())?;
        let store: &'s RecordStore = self.store;
        Ok(handler(store.records(), trigger.argument()))
    }

    /// Render the trigger's view onto `surface`, returning the card count.
    pub fn dispatch<S>(&self, trigger: &Trigger, surface: &mut S) -> Result<usize, ViewError>
    where
        S: DisplaySurface + ?Sized,
    {
        let records = self.view(trigger)?;
        let shown = render(surface, records);
        debug!(trigger = trigger.name(), argument = trigger.argument(), shown, "rendered view");
        Ok(shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_trigger_has_a_handler() {
        for trigger in [
            Trigger::ShowAll,
            Trigger::ShowUnfunded,
            Trigger::ShowFunded,
            Trigger::Search("x".into()),
        ] {
            assert!(handler_for(trigger.name()).is_ok(), "{}", trigger.name());
            assert_eq!(
                Trigger::from_event(trigger.name(), trigger.argument()).unwrap(),
                trigger
            );
        }
        assert_eq!(HANDLERS.len(), 4);
    }

    #[test]
    fn unknown_event_is_rejected() {
        assert_eq!(
            Trigger::from_event("showEverything", "").unwrap_err(),
            ViewError::UnknownTrigger("showEverything".into())
        );
        assert!(handler_for("scroll").is_err());
    }
}
