use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion state of one dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionStatus {
    #[serde(rename = "Sin datos")]
    SinDatos,
    #[serde(rename = "Pendiente")]
    Pendiente,
    #[serde(rename = "En progreso")]
    EnProgreso,
    #[serde(rename = "Completado")]
    Completado,
}

impl SectionStatus {
    /// Checked in order: empty, all done, some done, none done.
    pub fn derive(completed: usize, total: usize) -> Self {
        if total == 0 {
            Self::SinDatos
        } else if completed == total {
            Self::Completado
        } else if completed > 0 {
            Self::EnProgreso
        } else {
            Self::Pendiente
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SinDatos => "Sin datos",
            Self::Pendiente => "Pendiente",
            Self::EnProgreso => "En progreso",
            Self::Completado => "Completado",
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionCounts {
    pub completed: usize,
    pub total: usize,
}

impl SectionCounts {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }
}

/// `completed / total * 100`, or `0` for an empty section.
pub fn progress_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSection {
    pub name: String,
    pub icon: String,
    pub completed_count: usize,
    pub total_count: usize,
    pub status: SectionStatus,
    pub progress_percent: f64,
}

impl AggregatedSection {
    pub fn compute(name: impl Into<String>, icon: impl Into<String>, counts: SectionCounts) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            completed_count: counts.completed,
            total_count: counts.total,
            status: SectionStatus::derive(counts.completed, counts.total),
            progress_percent: progress_percent(counts.completed, counts.total),
        }
    }

    /// Whole-percent figure shown next to the progress bar.
    pub fn display_percent(&self) -> u32 {
        display_percent(self.progress_percent)
    }

    /// Caption under the progress bar.
    pub fn progress_label(&self) -> String {
        if self.total_count > 0 && self.completed_count == self.total_count {
            "¡Completado!".to_string()
        } else {
            format!("{}% completado", self.display_percent())
        }
    }
}

/// Unweighted mean of every section's progress.
///
/// Empty sections take part in the mean with `0`. This lowers the figure for
/// plans that have not populated every section yet.
pub fn global_progress(sections: &[AggregatedSection]) -> f64 {
    if sections.is_empty() {
        return 0.0;
    }
    let sum: f64 = sections.iter().map(|s| s.progress_percent).sum();
    sum / sections.len() as f64
}

pub fn display_percent(percent: f64) -> u32 {
    percent.round().clamp(0.0, 100.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub sections: Vec<AggregatedSection>,
    pub global_progress: f64,
}

impl DashboardSnapshot {
    pub fn from_sections(sections: Vec<AggregatedSection>) -> Self {
        let global_progress = global_progress(&sections);
        Self {
            sections,
            global_progress,
        }
    }

    pub fn section(&self, name: &str) -> Option<&AggregatedSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn display_percent(&self) -> u32 {
        display_percent(self.global_progress)
    }
}
