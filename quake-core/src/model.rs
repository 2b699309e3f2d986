use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

pub const DEFAULT_FORMAT: &str = "geojson";
pub const DEFAULT_ORDER_BY: &str = "time";
pub const DEFAULT_MIN_MAGNITUDE: &str = "6.0";
pub const DEFAULT_LIMIT: &str = "20";

/// "MMM dd, yyyy"
const DATE_PATTERN: &str = "%b %d, %Y";
/// "h:mm a"
const TIME_PATTERN: &str = "%-I:%M %p";

/// Lead-in used when the place has no "<distance> of" prefix.
pub const NEAR_THE: &str = "Near the";

/// Query parameters sent to the event service. Values are passed through
/// verbatim; the service rejects what it does not understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuakeQuery {
    pub format: String,
    pub order_by: String,
    pub min_magnitude: String,
    pub limit: String,
}

impl Default for QuakeQuery {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            order_by: DEFAULT_ORDER_BY.to_string(),
            min_magnitude: DEFAULT_MIN_MAGNITUDE.to_string(),
            limit: DEFAULT_LIMIT.to_string(),
        }
    }
}

impl QuakeQuery {
    /// Parameters in the order they appear on the request URL.
    pub fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("format", self.format.as_str()),
            ("orderby", self.order_by.as_str()),
            ("minmag", self.min_magnitude.as_str()),
            ("limit", self.limit.as_str()),
        ]
    }
}

/// Time zone used to render the display date and time of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// Host zone.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn utc() -> Self {
        DisplayZone::Fixed(Utc.fix())
    }

    /// Returns `(date, time)` for an epoch-millisecond timestamp, or `None`
    /// when the timestamp is outside the representable range.
    pub fn format_millis(&self, epoch_millis: i64) -> Option<(String, String)> {
        let utc = DateTime::<Utc>::from_timestamp_millis(epoch_millis)?;

        let formatted = match self {
            DisplayZone::Local => render(utc.with_timezone(&Local)),
            DisplayZone::Fixed(offset) => render(utc.with_timezone(offset)),
        };

        Some(formatted)
    }
}

fn render<Tz: TimeZone>(at: DateTime<Tz>) -> (String, String)
where
    Tz::Offset: Display,
{
    (at.format(DATE_PATTERN).to_string(), at.format(TIME_PATTERN).to_string())
}

/// Color bucket for a magnitude: 1 covers everything below 2, 2..=9 map to
/// themselves, 10 covers 10 and above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Severity(u8);

const SEVERITY_COLORS: [&str; 10] = [
    "#4A7BA7", "#04B4B3", "#10CAC9", "#F5A623", "#FF7D50", "#FC6644", "#E75F40", "#E13A20",
    "#D93218", "#C03823",
];

impl Severity {
    pub fn from_magnitude(magnitude: f64) -> Self {
        let whole = magnitude.trunc();

        let index = if whole.is_nan() || whole < 2.0 {
            1
        } else if whole >= 10.0 {
            10
        } else {
            whole as u8
        };

        Severity(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Background color of the magnitude badge, as `#RRGGBB`.
    pub fn color_hex(self) -> &'static str {
        SEVERITY_COLORS[usize::from(self.0 - 1)]
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.color_hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

/// Splits a place such as "32km SE of Example Town" into
/// `("32km SE of", "Example Town")`. Places without " of " get the
/// "Near the" lead-in and keep their full text as the primary location.
pub fn split_place(place: &str) -> (String, String) {
    match place.find(" of ") {
        Some(at) => (place[..at + 3].to_string(), place[at + 4..].to_string()),
        None => (NEAR_THE.to_string(), place.to_string()),
    }
}

/// One earthquake event, with its display fields derived once at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeRecord {
    magnitude: f64,
    place: String,
    occurred_at_ms: i64,
    detail_url: String,
    display_date: String,
    display_time: String,
    primary_location: String,
    secondary_location: String,
    severity: Severity,
}

impl QuakeRecord {
    pub fn new(
        magnitude: f64,
        place: impl Into<String>,
        occurred_at_ms: i64,
        detail_url: impl Into<String>,
        zone: &DisplayZone,
    ) -> Self {
        let place = place.into();
        let (secondary_location, primary_location) = split_place(&place);

        let (display_date, display_time) =
            zone.format_millis(occurred_at_ms).unwrap_or_else(|| {
                tracing::warn!(occurred_at_ms, "timestamp out of range, leaving date blank");
                (String::new(), String::new())
            });

        Self {
            magnitude,
            place,
            occurred_at_ms,
            detail_url: detail_url.into(),
            display_date,
            display_time,
            primary_location,
            secondary_location,
            severity: Severity::from_magnitude(magnitude),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Magnitude with one decimal, e.g. "6.2".
    pub fn magnitude_label(&self) -> String {
        format!("{:.1}", self.magnitude)
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn occurred_at_ms(&self) -> i64 {
        self.occurred_at_ms
    }

    pub fn detail_url(&self) -> &str {
        &self.detail_url
    }

    pub fn display_date(&self) -> &str {
        &self.display_date
    }

    pub fn display_time(&self) -> &str {
        &self.display_time
    }

    pub fn primary_location(&self) -> &str {
        &self.primary_location
    }

    pub fn secondary_location(&self) -> &str {
        &self.secondary_location
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_place_with_offset() {
        let (secondary, primary) = split_place("32km SE of Example Town");
        assert_eq!(secondary, "32km SE of");
        assert_eq!(primary, "Example Town");
    }

    #[test]
    fn split_place_without_offset() {
        let (secondary, primary) = split_place("Example Town");
        assert_eq!(secondary, "Near the");
        assert_eq!(primary, "Example Town");
    }

    #[test]
    fn split_place_ignores_of_inside_words() {
        let (secondary, primary) = split_place("Profile Ridge");
        assert_eq!(secondary, NEAR_THE);
        assert_eq!(primary, "Profile Ridge");

        let (secondary, primary) = split_place("5km W of Gulf of Aqaba");
        assert_eq!(secondary, "5km W of");
        assert_eq!(primary, "Gulf of Aqaba");
    }

    #[test]
    fn split_empty_place() {
        assert_eq!(split_place(""), (NEAR_THE.to_string(), String::new()));
    }

    #[test]
    fn severity_buckets() {
        assert_eq!(Severity::from_magnitude(0.0).index(), 1);
        assert_eq!(Severity::from_magnitude(1.9).index(), 1);
        assert_eq!(Severity::from_magnitude(2.0).index(), 2);
        assert_eq!(Severity::from_magnitude(6.99).index(), 6);
        assert_eq!(Severity::from_magnitude(9.5).index(), 9);
        assert_eq!(Severity::from_magnitude(10.0).index(), 10);
        assert_eq!(Severity::from_magnitude(12.3).index(), 10);
    }

    #[test]
    fn severity_clamps_negative_and_nan() {
        assert_eq!(Severity::from_magnitude(-1.2).index(), 1);
        assert_eq!(Severity::from_magnitude(f64::NAN).index(), 1);
    }

    #[test]
    fn severity_colors() {
        assert_eq!(Severity::from_magnitude(1.0).color_hex(), "#4A7BA7");
        assert_eq!(Severity::from_magnitude(11.0).color_hex(), "#C03823");
        assert_eq!(Severity::from_magnitude(4.4).rgb(), (0xF5, 0xA6, 0x23));
    }

    #[test]
    fn record_derives_display_fields_in_utc() {
        let record = QuakeRecord::new(
            6.2,
            "32km SE of Town",
            1_000_000_000_000,
            "http://x",
            &DisplayZone::utc(),
        );

        assert_eq!(record.display_date(), "Sep 09, 2001");
        assert_eq!(record.display_time(), "1:46 AM");
        assert_eq!(record.primary_location(), "Town");
        assert_eq!(record.secondary_location(), "32km SE of");
        assert_eq!(record.severity().index(), 6);
        assert_eq!(record.magnitude_label(), "6.2");
    }

    #[test]
    fn record_with_fixed_offset_shifts_time() {
        let plus_nine = DisplayZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap());
        let record = QuakeRecord::new(5.0, "Tokyo", 1_000_000_000_000, "", &plus_nine);

        assert_eq!(record.display_date(), "Sep 09, 2001");
        assert_eq!(record.display_time(), "10:46 AM");
    }

    #[test]
    fn out_of_range_timestamp_leaves_display_blank() {
        let record = QuakeRecord::new(3.0, "Nowhere", i64::MAX, "", &DisplayZone::utc());
        assert_eq!(record.display_date(), "");
        assert_eq!(record.display_time(), "");
    }

    #[test]
    fn query_params_are_ordered() {
        let names: Vec<_> = QuakeQuery::default().params().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, ["format", "orderby", "minmag", "limit"]);
    }
}
