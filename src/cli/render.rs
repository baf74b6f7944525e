use eventplan::{CollectionKind, CollectionStats, DashboardSnapshot, GuestHeadcount};

const BAR_WIDTH: usize = 20;

pub fn print_dashboard(snapshot: &DashboardSnapshot) {
    println!("Progreso general: {}%", snapshot.display_percent());
    println!("{}", bar(snapshot.global_progress));
    println!();

    for section in &snapshot.sections {
        println!(
            "{:<12} {:<11} {:>3}/{:<3} {} {}",
            section.name,
            section.status.label(),
            section.completed_count,
            section.total_count,
            bar(section.progress_percent),
            section.progress_label(),
        );
    }
}

pub fn print_stats(kind: CollectionKind, stats: &CollectionStats) {
    println!("{} ({})", kind.display_name(), kind.storage_key());
    println!("  total:      {}", stats.total);
    println!("  completed:  {}", stats.completed);
    println!("  pending:    {}", stats.pending());
    if let Some(budget) = stats.budget {
        println!("  budget:     {:.0}", budget);
    }
}

pub fn print_headcount(headcount: &GuestHeadcount) {
    println!("  confirmed:  {}", headcount.confirmed);
    println!("  declined:   {}", headcount.declined);
    println!("  awaiting:   {}", headcount.pending);
    println!("  companions: {}", headcount.companions);
    println!("  attendees:  {}", headcount.total_attendees());
}

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
