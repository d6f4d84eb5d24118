//! Application constants for the 1000 Days report processor
//!
//! This module contains the closed code sets used by field kinds, the
//! error-code strings emitted by validation, storage table names, and
//! default values used throughout the application.

// =============================================================================
// Report Types
// =============================================================================

/// Registered report type codes, matched case-insensitively against the
/// leading token of each message
pub const REPORT_CODES: &[&str] = &[
    "PRE", "REF", "ANC", "DEP", "RISK", "RED", "BIR", "CHI", "DTH", "RES", "RAR", "NBC", "PNC",
    "CCM", "CMR", "CBN",
];

/// Required length of the national patient identifier token
pub const PATIENT_ID_LENGTH: usize = 16;

// =============================================================================
// Field Code Sets
// =============================================================================

/// Closed code sets accepted by field kinds that carry expectations
///
/// Declaration order is irrelevant: kinds hold these as true sets and
/// match membership case-insensitively.
pub mod codes {
    /// Pregnancy observation codes
    pub const PREGNANCY: &[&str] = &[
        "GS", "MU", "HD", "RM", "OL", "YG", "NR", "TO", "HW", "NT", "NH", "KX", "YJ", "LZ",
    ];

    /// Previous-pregnancy observation codes
    pub const PREVIOUS_PREGNANCY: &[&str] = &["GS", "MU", "HD", "RM"];

    /// General symptom codes
    pub const SYMPTOM: &[&str] = &[
        "AF", "CH", "CI", "CM", "IB", "DB", "DI", "DS", "FE", "FP", "HY", "JA", "MA", "NP", "NS",
        "OE", "PC", "RB", "SA", "SB", "VO",
    ];

    /// Red-alert symptom codes
    pub const RED_SYMPTOM: &[&str] = &[
        "AP", "CO", "HE", "LA", "MC", "PA", "PS", "SC", "SL", "UN",
    ];

    /// Care location codes
    pub const LOCATION: &[&str] = &["CL", "HO", "HP", "OR"];

    /// Toilet presence codes
    pub const TOILET: &[&str] = &["TO", "NT"];

    /// Hand-washing facility codes
    pub const HANDWASH: &[&str] = &["HW", "NH"];

    /// New-born care visit codes
    pub const NBC_VISIT: &[&str] = &["NBC1", "NBC2", "NBC3", "NBC4", "NBC5"];

    /// Gender codes
    pub const GENDER: &[&str] = &["BO", "GI"];

    /// Breast-feeding status codes
    pub const BREASTFEEDING: &[&str] = &["CBF", "EBF", "NB"];

    /// Intervention codes
    pub const INTERVENTION: &[&str] = &["PR", "AA", "AL", "AT", "NA", "PT", "TR"];

    /// Health status codes (mother and child)
    pub const HEALTH_STATUS: &[&str] = &["MW", "MS", "CW", "CS"];

    /// New-born health status codes
    pub const NEWBORN_HEALTH_STATUS: &[&str] = &["CW", "CS"];

    /// Mother health status codes
    pub const MOTHER_HEALTH_STATUS: &[&str] = &["MW", "MS"];

    /// Vaccination visit codes
    pub const VACCINATION: &[&str] = &["V1", "V2", "V3", "V4", "V5", "V6"];

    /// Vaccination completion codes
    pub const VACCINATION_COMPLETION: &[&str] = &["VC", "VI", "NV"];

    /// Death circumstance codes
    pub const DEATH: &[&str] = &["ND", "CD", "MD"];
}

// =============================================================================
// Validation Error Codes
// =============================================================================

/// Error code strings recorded by field validation and the parser engine
pub mod error_codes {
    /// A schema position expected a token and none remained
    pub const MISSING_FIELD: &str = "missing_field";

    /// Non-whitespace text remained after the schema was exhausted
    pub const SUPERFLUOUS_TEXT: &str = "superfluous_text";

    /// Two dates in one report are chronologically incoherent
    pub const INCOHERENT_DATE_PERIODS: &str = "incoherent_date_periods";

    /// A date token names a day that does not exist on the calendar
    pub const IMPOSSIBLE_DATE: &str = "impossible_date";

    /// A date token does not have the D.M.YYYY shape
    pub const BAD_DATE: &str = "bad_date";

    pub const BAD_PATIENT_ID: &str = "bad_patient_id";
    pub const BAD_PHONE_ID: &str = "bad_phone_id";
    pub const BAD_NUMBER: &str = "bad_number";
    pub const BAD_CODE: &str = "bad_code";
    pub const BAD_PREGNANCY_CODE: &str = "bad_pregnancy_code";
    pub const BAD_SYMPTOM_CODE: &str = "bad_symptom_code";
    pub const BAD_LOCATION_CODE: &str = "bad_location_code";
    pub const BAD_NUMBERED_VALUE: &str = "bad_numbered_value";
    pub const BAD_FLOAT_VALUE: &str = "bad_float_value";
    pub const BAD_TOILET_CODE: &str = "bad_toilet_code";
    pub const BAD_HANDWASH_CODE: &str = "bad_handwash_code";
    pub const BAD_ANC_VISIT: &str = "bad_anc_visit";
    pub const BAD_PNC_VISIT: &str = "bad_pnc_visit";
    pub const BAD_NBC_VISIT: &str = "bad_nbc_visit";
    pub const BAD_GENDER_CODE: &str = "bad_gender_code";
    pub const BAD_BREASTFEEDING_CODE: &str = "bad_breastfeeding_code";
    pub const BAD_INTERVENTION_CODE: &str = "bad_intervention_code";
    pub const BAD_HEALTH_STATUS: &str = "bad_health_status";
    pub const BAD_VACCINATION_CODE: &str = "bad_vaccination_code";
    pub const BAD_MUAC_VALUE: &str = "bad_muac_value";
    pub const BAD_DEATH_CODE: &str = "bad_death_code";
}

// =============================================================================
// Storage Tables
// =============================================================================

/// Entity names used by the report transfer layer
pub mod tables {
    /// Audit table receiving one row per parse error
    pub const FAILED_TRANSFERS: &str = "failed_transfers";

    /// Bookkeeping table receiving one row per treated log entry
    pub const TREATED_MESSAGES: &str = "treated_messages";

    /// Column referencing the principal row from auxiliary value rows
    pub const PRINCIPAL_COLUMN: &str = "principal";

    /// Column holding one repeatable-field value in auxiliary rows
    pub const VALUE_COLUMN: &str = "value";
}

// =============================================================================
// Batch Processing Defaults
// =============================================================================

/// Default number of log entries handled per batch
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Upper bound on parallel parse workers
pub const MAX_PARALLEL_WORKERS: usize = 100;

/// Date format of the message log `date` column
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";
