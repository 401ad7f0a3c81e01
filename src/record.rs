//! Typed incident record and its row representation.
//!
//! The write path (row construction) and the read path (JSON object
//! construction) share the single ordered [`FIELDS`] list, so there is
//! no runtime zipping of a header row against positional values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered field names of an incident row. The ID column is first.
pub const FIELDS: [&str; 13] = [
    "id",
    "timestamp_utc",
    "date",
    "time",
    "student_id",
    "location",
    "antecedent",
    "behavior",
    "consequence",
    "duration_sec",
    "intensity",
    "notes",
    "staff",
];

/// One behavioral incident, as stored and as served to the dashboard.
///
/// `duration_sec` and `intensity` serialize as JSON numbers; every
/// other field serializes as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique record ID, assigned by the allocator at creation only.
    pub id: String,
    /// Server-assigned creation instant.
    pub timestamp_utc: DateTime<Utc>,
    /// Incident date as entered on the form.
    pub date: String,
    /// Incident time as entered on the form.
    pub time: String,
    /// Student identifier or name; also the source of the ID prefix.
    pub student_id: String,
    /// Where the incident happened.
    pub location: String,
    /// What preceded the behavior.
    pub antecedent: String,
    /// The observed behavior.
    pub behavior: String,
    /// What followed the behavior.
    pub consequence: String,
    /// Duration in seconds.
    pub duration_sec: u32,
    /// Intensity rating.
    pub intensity: u32,
    /// Free-text notes.
    pub notes: String,
    /// Reporting staff member.
    pub staff: String,
}

/// Form payload for a new incident: the record fields minus the
/// server-assigned `id` and `timestamp_utc`.
///
/// Every field defaults when absent; the service coerces presence and
/// type but validates nothing further.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentInput {
    /// Incident date as entered on the form.
    #[serde(default)]
    pub date: String,
    /// Incident time as entered on the form.
    #[serde(default)]
    pub time: String,
    /// Student identifier or name.
    #[serde(default)]
    pub student_id: String,
    /// Where the incident happened.
    #[serde(default)]
    pub location: String,
    /// What preceded the behavior.
    #[serde(default)]
    pub antecedent: String,
    /// The observed behavior.
    #[serde(default)]
    pub behavior: String,
    /// What followed the behavior.
    #[serde(default)]
    pub consequence: String,
    /// Duration in seconds.
    #[serde(default)]
    pub duration_sec: u32,
    /// Intensity rating.
    #[serde(default)]
    pub intensity: u32,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Reporting staff member.
    #[serde(default)]
    pub staff: String,
}

impl Incident {
    /// Builds a finished record from a form payload plus the
    /// server-assigned ID and timestamp.
    #[must_use]
    pub fn from_input(id: String, timestamp_utc: DateTime<Utc>, input: IncidentInput) -> Self {
        Self {
            id,
            timestamp_utc,
            date: input.date,
            time: input.time,
            student_id: input.student_id,
            location: input.location,
            antecedent: input.antecedent,
            behavior: input.behavior,
            consequence: input.consequence,
            duration_sec: input.duration_sec,
            intensity: input.intensity,
            notes: input.notes,
            staff: input.staff,
        }
    }

    /// Returns the record as one row of field values in [`FIELDS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.timestamp_utc.to_rfc3339(),
            self.date.clone(),
            self.time.clone(),
            self.student_id.clone(),
            self.location.clone(),
            self.antecedent.clone(),
            self.behavior.clone(),
            self.consequence.clone(),
            self.duration_sec.to_string(),
            self.intensity.to_string(),
            self.notes.clone(),
            self.staff.clone(),
        ]
    }

    /// Parses one stored row back into a record, coercing the numeric
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the row has the wrong number of columns, the
    /// timestamp is not RFC 3339, or a numeric column holds something
    /// other than digits (empty cells coerce to 0).
    pub fn from_row(row: &[String]) -> Result<Self, String> {
        if row.len() != FIELDS.len() {
            return Err(format!("row has {} columns, expected {}", row.len(), FIELDS.len()));
        }
        let timestamp_utc = DateTime::parse_from_rfc3339(&row[1])
            .map_err(|e| format!("bad timestamp_utc {:?}: {e}", row[1]))?
            .with_timezone(&Utc);
        Ok(Self {
            id: row[0].clone(),
            timestamp_utc,
            date: row[2].clone(),
            time: row[3].clone(),
            student_id: row[4].clone(),
            location: row[5].clone(),
            antecedent: row[6].clone(),
            behavior: row[7].clone(),
            consequence: row[8].clone(),
            duration_sec: parse_count("duration_sec", &row[9])?,
            intensity: parse_count("intensity", &row[10])?,
            notes: row[11].clone(),
            staff: row[12].clone(),
        })
    }
}

/// Returns the header row shared by the write and read paths.
#[must_use]
pub fn header() -> Vec<String> {
    FIELDS.iter().map(ToString::to_string).collect()
}

fn parse_count(field: &str, value: &str) -> Result<u32, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|e| format!("bad {field} {value:?}: {e}"))
}
