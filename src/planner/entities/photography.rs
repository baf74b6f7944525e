use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhotoServiceKind {
    #[serde(rename = "fotografia")]
    Photography,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "drone")]
    Drone,
    #[serde(rename = "album")]
    Album,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoService {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tipo")]
    pub kind: PhotoServiceKind,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fotografo", default, skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "confirmado", default)]
    pub confirmed: bool,
    #[serde(rename = "duracion", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "entregables", default, skip_serializing_if = "Option::is_none")]
    pub deliverables: Option<String>,
}

impl PhotoService {
    pub fn new(kind: PhotoServiceKind, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            kind,
            name: name.into(),
            description: String::new(),
            photographer: None,
            price: None,
            confirmed: false,
            duration: None,
            deliverables: None,
        }
    }
}

confirmable_record!(PhotoService);

impl Entity for PhotoService {
    const KIND: CollectionKind = CollectionKind::Photography;
    const PRICED: bool = true;

    fn toggle_completed(&mut self) {
        self.confirmed = !self.confirmed;
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn sample_data() -> Vec<Self> {
        vec![
            PhotoService {
                id: "1".to_string(),
                description: "Cobertura completa desde preparativos hasta la fiesta".to_string(),
                photographer: Some("Ana García Photography".to_string()),
                price: Some(800000.0),
                confirmed: true,
                duration: Some("8 horas".to_string()),
                deliverables: Some("300+ fotos editadas".to_string()),
                ..PhotoService::new(PhotoServiceKind::Photography, "Sesión completa de boda")
            },
            PhotoService {
                id: "2".to_string(),
                description: "Video de 3-5 minutos con highlights".to_string(),
                photographer: Some("Cinematografía Premium".to_string()),
                price: Some(500000.0),
                duration: Some("Todo el día".to_string()),
                deliverables: Some("Video editado + material crudo".to_string()),
                ..PhotoService::new(PhotoServiceKind::Video, "Video cinematográfico")
            },
        ]
    }
}
