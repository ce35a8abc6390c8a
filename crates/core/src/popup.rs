//! When popups become visible on the public site.

use std::collections::BTreeSet;

use crate::document::model::{Popup, PopupTrigger, TriggerKind};

impl PopupTrigger {
    /// Whether the popup should be showing, given the time since page load
    /// and how far the visitor has scrolled (0-100).
    ///
    /// A scroll trigger without a positive threshold never fires.
    pub fn is_due(&self, elapsed_ms: u64, scroll_percent: f64) -> bool {
        match self.kind {
            TriggerKind::Onload => elapsed_ms >= self.delay.unwrap_or(0),
            TriggerKind::Onscroll => match self.scroll_percentage {
                Some(threshold) if threshold > 0.0 => scroll_percent >= threshold,
                _ => false,
            },
        }
    }
}

/// Percentage of the scrollable height already scrolled past.
pub fn scroll_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 100.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Tracks which popups are on screen.
///
/// A popup opens at most once per page view; closing it keeps it closed.
#[derive(Debug, Default)]
pub struct PopupDisplay {
    visible: BTreeSet<String>,
    dismissed: BTreeSet<String>,
}

impl PopupDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open every popup whose trigger is due. Returns the ids opened by
    /// this call.
    pub fn tick(&mut self, popups: &[Popup], elapsed_ms: u64, scroll_percent: f64) -> Vec<String> {
        let mut opened = Vec::new();
        for popup in popups {
            if self.visible.contains(&popup.id) || self.dismissed.contains(&popup.id) {
                continue;
            }
            if popup.trigger.is_due(elapsed_ms, scroll_percent) {
                self.visible.insert(popup.id.clone());
                opened.push(popup.id.clone());
            }
        }
        opened
    }

    pub fn close(&mut self, popup_id: &str) {
        if self.visible.remove(popup_id) {
            self.dismissed.insert(popup_id.to_string());
        }
    }

    pub fn is_visible(&self, popup_id: &str) -> bool {
        self.visible.contains(popup_id)
    }

    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(String::as_str)
    }
}
