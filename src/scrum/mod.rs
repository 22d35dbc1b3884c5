//! Scrum definitions and meeting history.
//!
//! A [`DailyScrum`] is the recurring meeting template the rest of the app
//! works with; each finished session leaves a [`History`] record on it.
//! Field names serialize as camelCase so the on-disk JSON matches the
//! shape other tooling expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::timer::ScrumTimer;

/// A configured recurring meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScrum {
    pub id: Uuid,
    pub title: String,
    pub attendees: Vec<String>,
    pub length_in_minutes: u64,
    pub color: ScrumColor,
    #[serde(default)]
    pub history: Vec<History>,
}

impl DailyScrum {
    pub fn new(
        title: impl Into<String>,
        attendees: Vec<String>,
        length_in_minutes: u64,
        color: ScrumColor,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            attendees,
            length_in_minutes,
            color,
            history: Vec::new(),
        }
    }

    /// A timer configured with this scrum's length and attendees.
    pub fn timer(&self) -> ScrumTimer {
        ScrumTimer::new(self.length_in_minutes, &self.attendees)
    }

    /// Record a finished meeting, newest first.
    pub fn record_history(&mut self, entry: History) {
        self.history.insert(0, entry);
    }

    /// Fixture scrums used by tests.
    pub fn sample() -> Vec<DailyScrum> {
        vec![
            DailyScrum::new(
                "Design",
                ["Cathy", "Daisy", "Simon", "Jonathan"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                10,
                ScrumColor::new(1.0, 0.6, 0.2),
            ),
            DailyScrum::new(
                "App Dev",
                ["Katie", "Gray", "Euna", "Luis", "Darla"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                5,
                ScrumColor::new(0.3, 0.5, 1.0),
            ),
        ]
    }
}

/// Summary of one completed meeting session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub attendees: Vec<String>,
    pub length_in_minutes: u64,
    pub transcript: String,
}

impl History {
    pub fn new(attendees: Vec<String>, length_in_minutes: u64, transcript: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            attendees,
            length_in_minutes,
            transcript,
        }
    }
}

/// Display color for a scrum, stored as RGB components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrumColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ScrumColor {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

impl Default for ScrumColor {
    fn default() -> Self {
        // The accent color new scrums get when no other is picked.
        Self::new(1.0, 0.576, 0.0)
    }
}

impl fmt::Display for ScrumColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ParseColorError(String);

impl FromStr for ScrumColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Self::new(
            byte(0..2)? as f64 / 255.0,
            byte(2..4)? as f64 / 255.0,
            byte(4..6)? as f64 / 255.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_prepends_newest_first() {
        let mut scrum = DailyScrum::new("Standup", vec!["A".into()], 5, ScrumColor::default());
        scrum.record_history(History::new(scrum.attendees.clone(), 5, String::new()));
        scrum.record_history(History::new(scrum.attendees.clone(), 2, "notes".into()));

        assert_eq!(scrum.history.len(), 2);
        assert_eq!(scrum.history[0].length_in_minutes, 2);
        assert_eq!(scrum.history[1].length_in_minutes, 5);
    }

    #[test]
    fn test_history_json_shape() {
        let entry = History::new(vec!["Kim".into(), "Bill".into()], 2, "hello".into());
        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("id").is_some());
        assert!(json.get("date").is_some());
        assert_eq!(json["lengthInMinutes"], 2);
        assert_eq!(json["transcript"], "hello");
        assert_eq!(json["attendees"][0], "Kim");

        // Dates must survive a round trip as ISO-8601.
        let back: History = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_color_hex_parsing() {
        let color: ScrumColor = "#ff9300".parse().unwrap();
        assert!((color.red - 1.0).abs() < 1e-9);
        assert_eq!(color.to_string(), "#ff9300");

        assert!("".parse::<ScrumColor>().is_err());
        assert!("#ff93".parse::<ScrumColor>().is_err());
        assert!("not-a-color".parse::<ScrumColor>().is_err());
    }

    #[tokio::test]
    async fn test_timer_from_scrum() {
        let scrum = DailyScrum::new(
            "Standup",
            vec!["A".into(), "B".into()],
            2,
            ScrumColor::default(),
        );
        let timer = scrum.timer();
        let speakers = timer.speakers().await;
        assert_eq!(speakers.len(), 2);
        assert_eq!(speakers[0].name, "A");
        assert_eq!(timer.seconds_remaining().await, 120);
    }
}
