use crate::planner::collection::Entity;
use crate::planner::kind::CollectionKind;
use serde::{Deserialize, Serialize};

/// Part of the celebration a music booking covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicSlot {
    #[serde(rename = "ceremonia")]
    Ceremony,
    #[serde(rename = "cocktail")]
    Cocktail,
    #[serde(rename = "fiesta")]
    Party,
    #[serde(rename = "dj")]
    Dj,
    #[serde(rename = "banda_viva")]
    LiveBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicService {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tipo")]
    pub slot: MusicSlot,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "artista", default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "confirmado", default)]
    pub confirmed: bool,
    #[serde(rename = "duracion", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "genero", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl MusicService {
    pub fn new(slot: MusicSlot, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            slot,
            name: name.into(),
            description: String::new(),
            artist: None,
            price: None,
            confirmed: false,
            duration: None,
            genre: None,
        }
    }
}

confirmable_record!(MusicService);

impl Entity for MusicService {
    const KIND: CollectionKind = CollectionKind::Music;
    const PRICED: bool = true;

    fn toggle_completed(&mut self) {
        self.confirmed = !self.confirmed;
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn sample_data() -> Vec<Self> {
        vec![
            MusicService {
                id: "1".to_string(),
                description: "Cuarteto de cuerdas para la ceremonia".to_string(),
                artist: Some("Cuarteto Armonía".to_string()),
                price: Some(300000.0),
                confirmed: true,
                duration: Some("1 hora".to_string()),
                genre: Some("Clásica".to_string()),
                ..MusicService::new(MusicSlot::Ceremony, "Música clásica para ceremonia")
            },
            MusicService {
                id: "2".to_string(),
                description: "DJ profesional con equipo de sonido completo".to_string(),
                artist: Some("DJ Carlos Music".to_string()),
                price: Some(400000.0),
                duration: Some("6 horas".to_string()),
                genre: Some("Variado".to_string()),
                ..MusicService::new(MusicSlot::Party, "DJ para la recepción")
            },
        ]
    }
}
