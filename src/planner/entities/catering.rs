use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuCourse {
    #[serde(rename = "entrada")]
    Starter,
    #[serde(rename = "plato_principal")]
    MainCourse,
    #[serde(rename = "postre")]
    Dessert,
    #[serde(rename = "bebida")]
    Drink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CateringItem {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tipo")]
    pub course: MenuCourse,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "proveedor", default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "confirmado", default)]
    pub confirmed: bool,
    #[serde(rename = "alergenos", default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<String>,
}

impl CateringItem {
    pub fn new(course: MenuCourse, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            course,
            name: name.into(),
            description: String::new(),
            supplier: None,
            price: None,
            confirmed: false,
            allergens: None,
        }
    }
}

confirmable_record!(CateringItem);

impl Entity for CateringItem {
    const KIND: CollectionKind = CollectionKind::Catering;
    const PRICED: bool = true;

    fn toggle_completed(&mut self) {
        self.confirmed = !self.confirmed;
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn sample_data() -> Vec<Self> {
        vec![
            CateringItem {
                id: "1".to_string(),
                description: "Con queso de cabra y nueces".to_string(),
                supplier: Some("Catering Premium".to_string()),
                price: Some(25000.0),
                confirmed: true,
                ..CateringItem::new(MenuCourse::Starter, "Ensalada de rúcula")
            },
            CateringItem {
                id: "2".to_string(),
                description: "Con vegetales al vapor".to_string(),
                supplier: Some("Catering Premium".to_string()),
                price: Some(45000.0),
                ..CateringItem::new(MenuCourse::MainCourse, "Salmón a la plancha")
            },
        ]
    }
}
