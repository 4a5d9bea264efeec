//! Consultation database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Consultation, ConsultationFields, Remedy};

impl Database {
    /// Record a new consultation, minting its id and moving the patient's
    /// `last_visit` to the consultation date. Both writes and the counter
    /// bump land in one transaction.
    ///
    /// Callers resolve `patient_id` beforehand; an unresolved reference
    /// still trips the foreign key here.
    pub fn create_consultation(
        &mut self,
        fields: &ConsultationFields,
        ai_summary: Option<String>,
    ) -> DbResult<Consultation> {
        let remedies_json = serde_json::to_string(&fields.remedies)?;

        let tx = self.conn.transaction()?;

        let id = super::mint_id(&tx, "consultation", "C")?;
        tx.execute(
            r#"
            INSERT INTO consultations (
                id, patient_id, date, symptoms, ai_summary, diagnosis, remedies, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                id,
                fields.patient_id,
                fields.date,
                fields.symptoms,
                ai_summary,
                fields.diagnosis,
                remedies_json,
                fields.notes,
            ],
        )?;

        tx.execute(
            "UPDATE patients SET last_visit = ? WHERE id = ?",
            params![fields.date, fields.patient_id],
        )?;

        tx.commit()?;

        Ok(Consultation {
            id,
            patient_id: fields.patient_id.clone(),
            date: fields.date.clone(),
            symptoms: fields.symptoms.clone(),
            ai_summary,
            diagnosis: fields.diagnosis.clone(),
            remedies: fields.remedies.clone(),
            notes: fields.notes.clone(),
        })
    }

    /// Get a consultation by id.
    pub fn get_consultation(&self, id: &str) -> DbResult<Option<Consultation>> {
        self.conn
            .query_row(
                r#"
                SELECT id, patient_id, date, symptoms, ai_summary,
                       diagnosis, remedies, notes
                FROM consultations
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(ConsultationRow {
                        id: row.get(0)?,
                        patient_id: row.get(1)?,
                        date: row.get(2)?,
                        symptoms: row.get(3)?,
                        ai_summary: row.get(4)?,
                        diagnosis: row.get(5)?,
                        remedies: row.get(6)?,
                        notes: row.get(7)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all consultations in insertion order.
    pub fn list_consultations(&self) -> DbResult<Vec<Consultation>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, date, symptoms, ai_summary,
                   diagnosis, remedies, notes
            FROM consultations
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ConsultationRow {
                id: row.get(0)?,
                patient_id: row.get(1)?,
                date: row.get(2)?,
                symptoms: row.get(3)?,
                ai_summary: row.get(4)?,
                diagnosis: row.get(5)?,
                remedies: row.get(6)?,
                notes: row.get(7)?,
            })
        })?;

        let mut consultations = Vec::new();
        for row in rows {
            consultations.push(row?.try_into()?);
        }
        Ok(consultations)
    }

    /// List the consultations of one patient, insertion order. An unknown
    /// patient id simply yields an empty list.
    pub fn list_consultations_for_patient(&self, patient_id: &str) -> DbResult<Vec<Consultation>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, date, symptoms, ai_summary,
                   diagnosis, remedies, notes
            FROM consultations
            WHERE patient_id = ?
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([patient_id], |row| {
            Ok(ConsultationRow {
                id: row.get(0)?,
                patient_id: row.get(1)?,
                date: row.get(2)?,
                symptoms: row.get(3)?,
                ai_summary: row.get(4)?,
                diagnosis: row.get(5)?,
                remedies: row.get(6)?,
                notes: row.get(7)?,
            })
        })?;

        let mut consultations = Vec::new();
        for row in rows {
            consultations.push(row?.try_into()?);
        }
        Ok(consultations)
    }
}

/// Intermediate row struct for database mapping.
struct ConsultationRow {
    id: String,
    patient_id: String,
    date: String,
    symptoms: String,
    ai_summary: Option<String>,
    diagnosis: Option<String>,
    remedies: String,
    notes: Option<String>,
}

impl TryFrom<ConsultationRow> for Consultation {
    type Error = DbError;

    fn try_from(row: ConsultationRow) -> Result<Self, Self::Error> {
        let remedies: Vec<Remedy> = serde_json::from_str(&row.remedies)?;

        Ok(Consultation {
            id: row.id,
            patient_id: row.patient_id,
            date: row.date,
            symptoms: row.symptoms,
            ai_summary: row.ai_summary,
            diagnosis: row.diagnosis,
            remedies,
            notes: row.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, PatientFields};

    const NOW: &str = "2025-05-10T14:15:00+00:00";

    fn setup_db() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.create_patient(&PatientFields::new("Jane Smith", 42, Gender::Female), None, NOW)
            .unwrap();
        db
    }

    fn headache_fields(patient_id: &str, date: &str) -> ConsultationFields {
        ConsultationFields {
            patient_id: patient_id.into(),
            date: date.into(),
            symptoms: "Recurring frontal headaches, worse in the afternoon".into(),
            diagnosis: Some("Tension headache".into()),
            remedies: vec![Remedy::new(
                "Belladonna",
                "30C",
                "3 pellets",
                "Take 3 times daily for 5 days.",
            )],
            notes: Some("Follow-up in 2 weeks.".into()),
        }
    }

    #[test]
    fn test_create_and_get() {
        let mut db = setup_db();

        let fields = headache_fields("P001", "2025-06-01T09:00:00+00:00");
        let created = db
            .create_consultation(&fields, Some("Summary.".into()))
            .unwrap();
        assert_eq!(created.id, "C001");
        assert_eq!(created.ai_summary.as_deref(), Some("Summary."));

        let retrieved = db.get_consultation("C001").unwrap().unwrap();
        assert_eq!(retrieved, created);
        assert_eq!(retrieved.remedies.len(), 1);
        assert_eq!(retrieved.remedies[0].name, "Belladonna");
    }

    #[test]
    fn test_create_touches_last_visit() {
        let mut db = setup_db();

        let date = "2025-06-01T09:00:00+00:00";
        db.create_consultation(&headache_fields("P001", date), None)
            .unwrap();

        let patient = db.get_patient("P001").unwrap().unwrap();
        assert_eq!(patient.last_visit, date);
    }

    #[test]
    fn test_list_filter_by_patient() {
        let mut db = setup_db();
        db.create_patient(&PatientFields::new("John Doe", 35, Gender::Male), None, NOW)
            .unwrap();

        db.create_consultation(&headache_fields("P001", "2025-06-01T09:00:00+00:00"), None)
            .unwrap();
        db.create_consultation(&headache_fields("P002", "2025-06-02T09:00:00+00:00"), None)
            .unwrap();
        db.create_consultation(&headache_fields("P001", "2025-06-03T09:00:00+00:00"), None)
            .unwrap();

        let all = db.list_consultations().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "C001");
        assert_eq!(all[2].id, "C003");

        let janes = db.list_consultations_for_patient("P001").unwrap();
        assert_eq!(janes.len(), 2);
        assert!(janes.iter().all(|c| c.patient_id == "P001"));

        let unknown = db.list_consultations_for_patient("P999").unwrap();
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_get_missing_consultation() {
        let db = setup_db();
        assert!(db.get_consultation("C999").unwrap().is_none());
    }
}
