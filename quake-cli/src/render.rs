use colored::Colorize;
use quake_core::QuakeRecord;

/// One list row: colored magnitude badge, location, date and time, detail link.
pub fn line(record: &QuakeRecord) -> String {
    let (r, g, b) = record.severity().rgb();
    let badge = format!(" {} ", record.magnitude_label()).on_truecolor(r, g, b).white().bold();

    let mut row = format!(
        "{badge} {} {}  {} {}",
        record.secondary_location().dimmed(),
        record.primary_location().bold(),
        record.display_date(),
        record.display_time(),
    );

    if !record.detail_url().is_empty() {
        row.push_str(&format!("\n      {}", record.detail_url().underline()));
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_core::DisplayZone;

    #[test]
    fn row_contains_display_fields() {
        colored::control::set_override(false);

        let record = QuakeRecord::new(
            6.2,
            "32km SE of Town",
            1_000_000_000_000,
            "http://x",
            &DisplayZone::utc(),
        );

        assert_eq!(line(&record), " 6.2  32km SE of Town  Sep 09, 2001 1:46 AM\n      http://x");
    }

    #[test]
    fn row_without_url_is_single_line() {
        colored::control::set_override(false);

        let record = QuakeRecord::new(4.0, "Example Town", 0, "", &DisplayZone::utc());
        let row = line(&record);

        assert!(!row.contains('\n'));
        assert!(row.contains("Near the Example Town"));
    }
}
