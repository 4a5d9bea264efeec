//! Patient database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Gender, Patient, PatientFields};

impl Database {
    /// Create a new patient, minting its id and linking it to its primary
    /// account when given. The insert, the dependent link and the counter
    /// bump land in one transaction.
    ///
    /// Callers resolve `primary_patient_id` beforehand; an unresolved
    /// reference still trips the foreign key here.
    pub fn create_patient(
        &mut self,
        fields: &PatientFields,
        primary_patient_id: Option<&str>,
        now: &str,
    ) -> DbResult<Patient> {
        let tx = self.conn.transaction()?;

        let id = super::mint_id(&tx, "patient", "P")?;
        let alternative_contacts_json = fields
            .alternative_contacts
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        tx.execute(
            r#"
            INSERT INTO patients (
                id, name, age, gender, contact, email, address,
                created_at, last_visit, primary_patient_id, alternative_contacts
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                id,
                fields.name,
                fields.age,
                gender_to_string(&fields.gender),
                fields.contact,
                fields.email,
                fields.address,
                now,
                now,
                primary_patient_id,
                alternative_contacts_json,
            ],
        )?;

        if let Some(primary_id) = primary_patient_id {
            let dependents_json: String = tx.query_row(
                "SELECT dependents FROM patients WHERE id = ?",
                [primary_id],
                |row| row.get(0),
            )?;
            let mut dependents: Vec<String> = serde_json::from_str(&dependents_json)?;
            dependents.push(id.clone());
            tx.execute(
                "UPDATE patients SET dependents = ? WHERE id = ?",
                params![serde_json::to_string(&dependents)?, primary_id],
            )?;
        }

        tx.commit()?;

        Ok(Patient {
            id,
            name: fields.name.clone(),
            age: fields.age,
            gender: fields.gender,
            contact: fields.contact.clone(),
            email: fields.email.clone(),
            address: fields.address.clone(),
            created_at: now.to_string(),
            last_visit: now.to_string(),
            primary_patient_id: primary_patient_id.map(String::from),
            dependents: Vec::new(),
            alternative_contacts: fields.alternative_contacts.clone(),
        })
    }

    /// Replace the mutable attributes of an existing patient. Identity
    /// fields, `last_visit` and relational links are left untouched.
    pub fn update_patient_fields(&self, id: &str, fields: &PatientFields) -> DbResult<bool> {
        let alternative_contacts_json = fields
            .alternative_contacts
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                age = ?3,
                gender = ?4,
                contact = ?5,
                email = ?6,
                address = ?7,
                alternative_contacts = ?8
            WHERE id = ?1
            "#,
            params![
                id,
                fields.name,
                fields.age,
                gender_to_string(&fields.gender),
                fields.contact,
                fields.email,
                fields.address,
                alternative_contacts_json,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, age, gender, contact, email, address,
                       created_at, last_visit, primary_patient_id,
                       dependents, alternative_contacts
                FROM patients
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(PatientRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        age: row.get(2)?,
                        gender: row.get(3)?,
                        contact: row.get(4)?,
                        email: row.get(5)?,
                        address: row.get(6)?,
                        created_at: row.get(7)?,
                        last_visit: row.get(8)?,
                        primary_patient_id: row.get(9)?,
                        dependents: row.get(10)?,
                        alternative_contacts: row.get(11)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all patients in insertion order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, age, gender, contact, email, address,
                   created_at, last_visit, primary_patient_id,
                   dependents, alternative_contacts
            FROM patients
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PatientRow {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                contact: row.get(4)?,
                email: row.get(5)?,
                address: row.get(6)?,
                created_at: row.get(7)?,
                last_visit: row.get(8)?,
                primary_patient_id: row.get(9)?,
                dependents: row.get(10)?,
                alternative_contacts: row.get(11)?,
            })
        })?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// List primary accounts (patients with no primary of their own).
    pub fn list_primary_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, age, gender, contact, email, address,
                   created_at, last_visit, primary_patient_id,
                   dependents, alternative_contacts
            FROM patients
            WHERE primary_patient_id IS NULL
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PatientRow {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                contact: row.get(4)?,
                email: row.get(5)?,
                address: row.get(6)?,
                created_at: row.get(7)?,
                last_visit: row.get(8)?,
                primary_patient_id: row.get(9)?,
                dependents: row.get(10)?,
                alternative_contacts: row.get(11)?,
            })
        })?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// Search patients by name or id (case-insensitive substring match).
    pub fn search_patients(&self, query: &str) -> DbResult<Vec<Patient>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, age, gender, contact, email, address,
                   created_at, last_visit, primary_patient_id,
                   dependents, alternative_contacts
            FROM patients
            WHERE name LIKE ?1 OR id LIKE ?1
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([pattern], |row| {
            Ok(PatientRow {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                contact: row.get(4)?,
                email: row.get(5)?,
                address: row.get(6)?,
                created_at: row.get(7)?,
                last_visit: row.get(8)?,
                primary_patient_id: row.get(9)?,
                dependents: row.get(10)?,
                alternative_contacts: row.get(11)?,
            })
        })?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// Set a patient's last visit date.
    pub fn set_last_visit(&self, id: &str, date: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE patients SET last_visit = ? WHERE id = ?",
            [date, id],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    age: u32,
    gender: String,
    contact: String,
    email: String,
    address: String,
    created_at: String,
    last_visit: String,
    primary_patient_id: Option<String>,
    dependents: String,
    alternative_contacts: Option<String>,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let dependents: Vec<String> = serde_json::from_str(&row.dependents)?;
        let alternative_contacts: Option<Vec<String>> = row
            .alternative_contacts
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let gender = string_to_gender(&row.gender)?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            age: row.age,
            gender,
            contact: row.contact,
            email: row.email,
            address: row.address,
            created_at: row.created_at,
            last_visit: row.last_visit,
            primary_patient_id: row.primary_patient_id,
            dependents,
            alternative_contacts,
        })
    }
}

fn gender_to_string(gender: &Gender) -> &'static str {
    gender.as_str()
}

fn string_to_gender(s: &str) -> Result<Gender, DbError> {
    match s {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        _ => Err(DbError::Constraint(format!("Unknown gender: {}", s))),
    }
}
