//! Calendar events

use chrono::{NaiveDate, NaiveTime};
use csscolorparser::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A calendar event
///
/// The color is not chosen by the caller. [`crate::Agenda`] assigns one from its
/// tag palette when the event is added, so events of the same tag always show up
/// in the same color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Persistent, globally unique identifier for this event
    id: String,
    title: String,
    date: NaiveDate,
    time: NaiveTime,
    /// The tag this event is filed under ("work", "family", ...)
    tag: String,
    description: String,
    color: Option<Color>,
}

impl Event {
    /// Creates a brand new event. Its color stays unset until an agenda adopts it
    pub fn new(
        title: String,
        date: NaiveDate,
        time: NaiveTime,
        tag: String,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_hyphenated().to_string(),
            title,
            date,
            time,
            tag,
            description,
            color: None,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn time(&self) -> NaiveTime { self.time }
    pub fn tag(&self) -> &str { &self.tag }
    pub fn description(&self) -> &str { &self.description }
    pub fn color(&self) -> Option<&Color> { self.color.as_ref() }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }
    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = time;
    }
    pub fn set_tag(&mut self, tag: String) {
        self.tag = tag;
    }
    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
