//! Seeded reference-data queries.

use super::{Database, DbResult};
use crate::models::UsageCount;

impl Database {
    /// Historical remedy usage tallies, in seed order.
    pub fn common_remedies(&self) -> DbResult<Vec<UsageCount>> {
        self.usage_counts("common_remedies")
    }

    /// Historical symptom tallies, in seed order.
    pub fn common_symptoms(&self) -> DbResult<Vec<UsageCount>> {
        self.usage_counts("common_symptoms")
    }

    fn usage_counts(&self, table: &str) -> DbResult<Vec<UsageCount>> {
        // Table name comes from the two callers above, never from input.
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT name, tally FROM {} ORDER BY rowid", table))?;

        let rows = stmt.query_map([], |row| {
            Ok(UsageCount {
                name: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
