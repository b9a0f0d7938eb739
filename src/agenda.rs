//! The agenda, a month-or-day view over local calendar events

use chrono::{Duration, Local, NaiveDate};
use csscolorparser::Color;

use crate::event::Event;

/// The two ways the agenda can be displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgendaView {
    Month,
    Day,
}

/// A set of events and the UI state of the page that shows them
///
/// Every event is colored after its tag. The palette starts out from
/// [`crate::config::DEFAULT_TAG_COLORS`] and can grow at runtime with
/// [`Agenda::register_tag`]. Events whose tag is not in the palette fall back
/// to a neutral gray.
#[derive(Clone, Debug)]
pub struct Agenda {
    events: Vec<Event>,
    /// Tag names and their colors, in registration order
    palette: Vec<(String, Color)>,
    view: AgendaView,
    /// The day (or the month that contains it) the agenda is showing
    focus: NaiveDate,
}

impl Agenda {
    /// Creates an agenda focused on today, in month view
    pub fn new() -> Self {
        Self::new_with_focus(Local::now().date_naive())
    }

    /// Creates an agenda focused on an arbitrary day, in month view
    pub fn new_with_focus(focus: NaiveDate) -> Self {
        let palette = crate::config::DEFAULT_TAG_COLORS
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(tag, css)| {
                csscolorparser::parse(css).ok().map(|color| (tag.clone(), color))
            })
            .collect();

        Self {
            events: Vec::new(),
            palette,
            view: AgendaView::Month,
            focus,
        }
    }

    /// Every event, in insertion order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Adds an event, coloring it after its tag
    pub fn add_event(&mut self, mut event: Event) {
        let color = self.tag_color(event.tag());
        event.set_color(Some(color));
        self.events.push(event);
    }

    /// Replaces the event `id` with `event`, keeping the id and re-resolving the
    /// color in case the tag changed. Returns false in case this id does not exist
    pub fn update_event(&mut self, id: &str, mut event: Event) -> bool {
        let color = self.tag_color(event.tag());
        match self.events.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => {
                event.set_id(id.to_string());
                event.set_color(Some(color));
                *existing = event;
                true
            }
            None => false,
        }
    }

    /// Removes an event for good. Returns false in case this id does not exist
    pub fn remove_event(&mut self, id: &str) -> bool {
        match self.events.iter().position(|event| event.id() == id) {
            Some(index) => {
                self.events.remove(index);
                true
            }
            None => false,
        }
    }

    /// The events of a single day, earliest first
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .events
            .iter()
            .filter(|event| event.date() == date)
            .collect();
        events.sort_by_key(|event| event.time());
        events
    }

    /// The first `count` events in chronological order, no matter how far back
    /// or ahead they are
    pub fn upcoming(&self, count: usize) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by_key(|event| (event.date(), event.time()));
        events.truncate(count);
        events
    }

    pub fn view(&self) -> AgendaView {
        self.view
    }

    pub fn set_view(&mut self, view: AgendaView) {
        self.view = view;
    }

    pub fn focus(&self) -> NaiveDate {
        self.focus
    }

    pub fn set_focus(&mut self, focus: NaiveDate) {
        self.focus = focus;
    }

    pub fn next_day(&mut self) {
        self.focus = self.focus + Duration::days(1);
    }

    pub fn prev_day(&mut self) {
        self.focus = self.focus - Duration::days(1);
    }

    /// Jumps to a day and switches to day view, like clicking a cell of the month grid
    pub fn open_day(&mut self, date: NaiveDate) {
        self.focus = date;
        self.view = AgendaView::Day;
    }

    /// The color for a tag, or a neutral gray for tags the palette does not know
    pub fn tag_color(&self, tag: &str) -> Color {
        self.palette
            .iter()
            .find(|(known, _)| known == tag)
            .map(|(_, color)| color.clone())
            .unwrap_or_else(|| Color::new(0.5, 0.5, 0.5, 1.0))
    }

    /// Adds a tag to the palette. Returns false (and changes nothing) in case
    /// the tag is already registered
    pub fn register_tag(&mut self, tag: String, color: Color) -> bool {
        if self.palette.iter().any(|(known, _)| *known == tag) {
            return false;
        }
        self.palette.push((tag, color));
        true
    }

    /// Every known tag, in registration order
    pub fn tags(&self) -> Vec<&str> {
        self.palette.iter().map(|(tag, _)| tag.as_str()).collect()
    }
}

impl Default for Agenda {
    fn default() -> Self {
        Self::new()
    }
}
