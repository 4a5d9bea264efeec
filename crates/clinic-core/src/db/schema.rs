//! SQLite schema definition.

/// Complete database schema for the clinic store, including the seeded
/// reference lists shown on the dashboard.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL CHECK (gender IN ('male', 'female', 'other')),
    contact TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    address TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    last_visit TEXT NOT NULL,
    primary_patient_id TEXT REFERENCES patients(id),  -- NULL for primary accounts
    dependents TEXT NOT NULL DEFAULT '[]',            -- JSON array of patient ids
    alternative_contacts TEXT                         -- JSON array of strings
);

CREATE INDEX IF NOT EXISTS idx_patients_primary ON patients(primary_patient_id);
CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Consultations
-- ============================================================================

CREATE TABLE IF NOT EXISTS consultations (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(id),
    date TEXT NOT NULL,
    symptoms TEXT NOT NULL,
    ai_summary TEXT,
    diagnosis TEXT,
    remedies TEXT NOT NULL DEFAULT '[]',              -- JSON array of Remedy
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_consultations_patient ON consultations(patient_id);
CREATE INDEX IF NOT EXISTS idx_consultations_date ON consultations(date);

-- ============================================================================
-- Id Counters
-- ============================================================================

-- Monotonic id source. Ids are minted from here, never from collection
-- length, so they stay unique even if deletion is ever added.
CREATE TABLE IF NOT EXISTS id_counters (
    kind TEXT PRIMARY KEY,
    next_seq INTEGER NOT NULL
);

INSERT OR IGNORE INTO id_counters (kind, next_seq) VALUES ('patient', 1);
INSERT OR IGNORE INTO id_counters (kind, next_seq) VALUES ('consultation', 1);

-- ============================================================================
-- Reference Data
-- ============================================================================

-- Historical usage tallies shown on the dashboard. Seeded reference lists,
-- not recomputed from the consultation log.
CREATE TABLE IF NOT EXISTS common_remedies (
    name TEXT PRIMARY KEY,
    tally INTEGER NOT NULL
);

INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Nux Vomica', 35);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Arnica Montana', 42);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Belladonna', 28);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Rhus Toxicodendron', 22);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Arsenicum Album', 18);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Bryonia', 24);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Pulsatilla', 31);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Lycopodium', 26);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Phosphorus', 19);
INSERT OR IGNORE INTO common_remedies (name, tally) VALUES ('Sulphur', 27);

CREATE TABLE IF NOT EXISTS common_symptoms (
    name TEXT PRIMARY KEY,
    tally INTEGER NOT NULL
);

INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Headache', 58);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Joint Pain', 43);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Anxiety', 39);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Digestive Issues', 47);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Fatigue', 62);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Allergies', 35);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Insomnia', 44);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Cough', 29);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Skin Rash', 25);
INSERT OR IGNORE INTO common_symptoms (name, tally) VALUES ('Fever', 31);
"#;
