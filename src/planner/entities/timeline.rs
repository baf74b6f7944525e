use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, ParseError};
use serde::{Deserialize, Serialize};

/// One entry of the wedding-day schedule.
///
/// The collection is kept ordered by [`TimelineEvent::starts_at`]; events
/// sharing a start keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "hora", with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(rename = "duracion", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "ubicacion", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "responsable", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "completado", default)]
    pub completed: bool,
}

impl TimelineEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            date,
            time,
            duration: None,
            location: None,
            owner: None,
            completed: false,
        }
    }

    /// Builds an event from `YYYY-MM-DD` and `HH:MM` strings.
    pub fn at(date: &str, time: &str, title: impl Into<String>) -> Result<Self, ParseError> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
        let time = parse_time(time)?;
        Ok(Self::new(title, date, time))
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

confirmable_record!(TimelineEvent, completed);

impl Entity for TimelineEvent {
    const KIND: CollectionKind = CollectionKind::Timeline;

    fn arrange(items: &mut Vec<Self>) {
        items.sort_by_key(TimelineEvent::starts_at);
    }

    fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    fn sample_data() -> Vec<Self> {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default();
        let hour = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default();
        vec![
            TimelineEvent {
                id: "1".to_string(),
                description: "Recepción de invitados y cocktail de bienvenida".to_string(),
                duration: Some("1 hora".to_string()),
                location: Some("Jardín del venue".to_string()),
                owner: Some("Wedding Planner".to_string()),
                ..TimelineEvent::new("Llegada de invitados", day, hour(16))
            },
            TimelineEvent {
                id: "2".to_string(),
                description: "Ceremonia civil en el altar principal".to_string(),
                duration: Some("45 minutos".to_string()),
                location: Some("Altar principal".to_string()),
                owner: Some("Oficiante".to_string()),
                ..TimelineEvent::new("Ceremonia de matrimonio", day, hour(17))
            },
            TimelineEvent {
                id: "3".to_string(),
                description: "Fotos familiares y de pareja".to_string(),
                duration: Some("1 hora".to_string()),
                location: Some("Jardines".to_string()),
                owner: Some("Fotógrafo principal".to_string()),
                ..TimelineEvent::new("Sesión de fotos", day, hour(18))
            },
        ]
    }
}

/// Accepts `HH:MM`, `HH:MM:SS` and `HH:MM:SS.fff`.
pub fn parse_time(raw: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S%.f"))
}

mod hh_mm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Whole minutes are written as `HH:MM`; anything finer keeps its seconds.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if time.second() == 0 && time.nanosecond() == 0 {
            "%H:%M"
        } else {
            "%H:%M:%S%.f"
        };
        serializer.serialize_str(&time.format(format).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
