use crate::core::Record;
use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RsvpStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "confirmado")]
    Confirmed,
    #[serde(rename = "rechazado")]
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "confirmado", default)]
    pub rsvp: RsvpStatus,
    #[serde(rename = "acompanantes", default)]
    pub companions: u32,
}

impl Guest {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            phone: None,
            rsvp: RsvpStatus::Pending,
            companions: 0,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Guest {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn is_completed(&self) -> bool {
        self.rsvp == RsvpStatus::Confirmed
    }
}

impl Entity for Guest {
    const KIND: CollectionKind = CollectionKind::Guests;

    /// Confirmed goes back to pending; pending and declined become confirmed.
    fn toggle_completed(&mut self) {
        self.rsvp = match self.rsvp {
            RsvpStatus::Confirmed => RsvpStatus::Pending,
            RsvpStatus::Pending | RsvpStatus::Declined => RsvpStatus::Confirmed,
        };
    }

    fn sample_data() -> Vec<Self> {
        vec![
            Guest {
                id: "1".to_string(),
                email: Some("maria@email.com".to_string()),
                rsvp: RsvpStatus::Confirmed,
                companions: 1,
                ..Guest::new("María", "García López")
            },
            Guest {
                id: "2".to_string(),
                email: Some("juan@email.com".to_string()),
                ..Guest::new("Juan", "Martínez Ruiz")
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_stored_field_names() {
        let guest = &Guest::sample_data()[0];
        let json = serde_json::to_value(guest).unwrap();
        assert_eq!(json["nombre"], "María");
        assert_eq!(json["confirmado"], "confirmado");
        assert_eq!(json["acompanantes"], 1);
        assert!(json.get("telefono").is_none());
    }

    #[test]
    fn test_missing_optional_fields_parse() {
        let guest: Guest =
            serde_json::from_str(r#"{"id":"5","nombre":"Ana","apellidos":"Sol"}"#).unwrap();
        assert_eq!(guest.rsvp, RsvpStatus::Pending);
        assert_eq!(guest.companions, 0);
        assert_eq!(guest.full_name(), "Ana Sol");
        assert!(!guest.is_completed());
    }

    #[test]
    fn test_only_confirmed_counts_as_completed() {
        let mut guest = Guest::new("Ana", "Sol");
        guest.rsvp = RsvpStatus::Declined;
        assert!(!guest.is_completed());
        guest.toggle_completed();
        assert_eq!(guest.rsvp, RsvpStatus::Confirmed);
        assert!(guest.is_completed());
        guest.toggle_completed();
        assert_eq!(guest.rsvp, RsvpStatus::Pending);
    }
}
