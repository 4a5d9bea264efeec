//! Derived dashboard statistics.

use chrono::{DateTime, Duration, Utc};

use super::{Database, DbResult};
use crate::models::ClinicStats;

/// Length of the "recent" window for new patients and consultations.
const WINDOW_DAYS: i64 = 30;

impl Database {
    /// Dashboard counters as of `now`. `new_patients` and
    /// `recent_consultations` count records whose timestamp falls in
    /// `[now - 30d, now]`, inclusive at both bounds.
    pub fn clinic_stats(&self, now: DateTime<Utc>) -> DbResult<ClinicStats> {
        let window_start = now - Duration::days(WINDOW_DAYS);

        let created = self.column_timestamps("SELECT created_at FROM patients")?;
        let dates = self.column_timestamps("SELECT date FROM consultations")?;

        Ok(ClinicStats {
            total_patients: created.len(),
            new_patients: count_in_window(&created, window_start, now),
            total_consultations: dates.len(),
            recent_consultations: count_in_window(&dates, window_start, now),
        })
    }

    fn column_timestamps(&self, sql: &str) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn count_in_window(timestamps: &[String], start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
    timestamps
        .iter()
        .filter_map(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .filter(|t| *t >= start && *t <= end)
        .count()
}
