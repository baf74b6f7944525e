use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use serde::{Deserialize, Serialize};

/// A candidate location for the celebration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "contacto", default)]
    pub contact: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "capacidad", default)]
    pub capacity: u32,
    /// Free-form quote as entered, e.g. "€3,500".
    #[serde(rename = "precio", default)]
    pub price: String,
    #[serde(rename = "notas", default)]
    pub notes: String,
    #[serde(rename = "confirmado", default)]
    pub confirmed: bool,
}

impl Venue {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            address: address.into(),
            contact: String::new(),
            phone: String::new(),
            email: String::new(),
            capacity: 0,
            price: String::new(),
            notes: String::new(),
            confirmed: false,
        }
    }
}

confirmable_record!(Venue);

impl Entity for Venue {
    const KIND: CollectionKind = CollectionKind::Venues;

    fn toggle_completed(&mut self) {
        self.confirmed = !self.confirmed;
    }

    fn sample_data() -> Vec<Self> {
        vec![Venue {
            id: "1".to_string(),
            contact: "María González".to_string(),
            phone: "+34 123 456 789".to_string(),
            email: "eventos@losrosales.com".to_string(),
            capacity: 150,
            price: "€3,500".to_string(),
            notes: "Incluye decoración básica y jardines exteriores".to_string(),
            confirmed: true,
            ..Venue::new("Hacienda Los Rosales", "Calle Principal 123, Ciudad")
        }]
    }
}
