use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StylingServiceKind {
    #[serde(rename = "maquillaje")]
    Makeup,
    #[serde(rename = "peinado")]
    Hair,
    #[serde(rename = "manicure")]
    Manicure,
    #[serde(rename = "completo")]
    FullPackage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylingService {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tipo")]
    pub kind: StylingServiceKind,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "profesional", default, skip_serializing_if = "Option::is_none")]
    pub professional: Option<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "confirmado", default)]
    pub confirmed: bool,
    #[serde(rename = "duracion", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "ubicacion", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl StylingService {
    pub fn new(kind: StylingServiceKind, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            kind,
            name: name.into(),
            description: String::new(),
            professional: None,
            price: None,
            confirmed: false,
            duration: None,
            location: None,
        }
    }
}

confirmable_record!(StylingService);

impl Entity for StylingService {
    const KIND: CollectionKind = CollectionKind::Styling;
    const PRICED: bool = true;

    fn toggle_completed(&mut self) {
        self.confirmed = !self.confirmed;
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn sample_data() -> Vec<Self> {
        vec![
            StylingService {
                id: "1".to_string(),
                description: "Maquillaje, peinado y manicure para la novia".to_string(),
                professional: Some("María Belleza Studio".to_string()),
                price: Some(250000.0),
                confirmed: true,
                duration: Some("3 horas".to_string()),
                location: Some("A domicilio".to_string()),
                ..StylingService::new(StylingServiceKind::FullPackage, "Paquete completo novia")
            },
            StylingService {
                id: "2".to_string(),
                description: "Maquillaje para 3 damas de honor".to_string(),
                professional: Some("Glamour Beauty".to_string()),
                price: Some(150000.0),
                duration: Some("2 horas".to_string()),
                location: Some("Salón".to_string()),
                ..StylingService::new(StylingServiceKind::Makeup, "Maquillaje damas de honor")
            },
        ]
    }
}
