use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloralArrangement {
    #[serde(default)]
    pub id: String,
    /// Arrangement type as entered (bouquet, centerpiece, arch...).
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "proveedor", default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "confirmado", default)]
    pub confirmed: bool,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FloralArrangement {
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            kind: kind.into(),
            description: description.into(),
            supplier: None,
            price: None,
            confirmed: false,
            notes: None,
        }
    }
}

confirmable_record!(FloralArrangement);

impl Entity for FloralArrangement {
    const KIND: CollectionKind = CollectionKind::Florals;
    const PRICED: bool = true;

    fn toggle_completed(&mut self) {
        self.confirmed = !self.confirmed;
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn sample_data() -> Vec<Self> {
        vec![
            FloralArrangement {
                id: "1".to_string(),
                supplier: Some("Floristería Bella".to_string()),
                price: Some(150000.0),
                confirmed: true,
                ..FloralArrangement::new("Bouquet de novia", "Rosas blancas y peonías")
            },
            FloralArrangement {
                id: "2".to_string(),
                supplier: Some("Flores del Campo".to_string()),
                price: Some(80000.0),
                ..FloralArrangement::new("Centros de mesa", "Arreglos con rosas y eucalipto")
            },
        ]
    }
}
