//! Field kind catalog for SMS report fields
//!
//! A field kind is a named, reusable validation and conversion rule: an
//! anchored token pattern, an optional closed set of accepted short codes,
//! a converter to a semantic value, and (for dates) a gap rule against the
//! reference date. Kinds are data-configured instances of a small fixed
//! set of converter templates rather than a type hierarchy, and are built
//! once at startup and shared immutably between schemas.

use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeSet;

use crate::app::models::FieldValue;
use crate::constants::{PATIENT_ID_LENGTH, codes, error_codes};

/// Conversion template applied to a token that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Keep the token verbatim
    Text,
    /// Parse the token as a whole number
    Int,
    /// Parse the token as a decimal number
    Float,
    /// Strip the leading alphabetic code prefix, parse the rest as a whole number
    PrefixedInt,
    /// Strip the leading alphabetic code prefix, parse the rest as a decimal
    PrefixedFloat,
    /// Parse a D.M.YYYY token into a calendar date
    Date,
}

/// Gap rule a date kind applies against the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// Any calendar-possible date is accepted
    Unconstrained,
    /// The date must precede the reference date (e.g. a last menstrual period)
    BeforeReference,
}

/// A named validation/conversion rule for one token position
#[derive(Debug)]
pub struct FieldKind {
    name: &'static str,
    pattern: Regex,
    converter: Converter,
    expectations: Option<BTreeSet<&'static str>>,
    error_code: &'static str,
    date_rule: DateRule,
}

impl FieldKind {
    fn new(
        name: &'static str,
        pattern: &str,
        converter: Converter,
        expectations: Option<&[&'static str]>,
        error_code: &'static str,
    ) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("field pattern is valid"),
            converter,
            expectations: expectations.map(|set| set.iter().copied().collect()),
            error_code,
            date_rule: DateRule::Unconstrained,
        }
    }

    fn date_kind(name: &'static str, date_rule: DateRule) -> Self {
        Self {
            date_rule,
            ..Self::new(
                name,
                r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$",
                Converter::Date,
                None,
                error_codes::BAD_DATE,
            )
        }
    }

    /// Identity of this kind; also the column name used when storing
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The error code this kind records for an illegal token
    pub fn error_code(&self) -> &'static str {
        self.error_code
    }

    /// The closed set of accepted short codes, if this kind carries one
    pub fn expectations(&self) -> Option<&BTreeSet<&'static str>> {
        self.expectations.as_ref()
    }

    /// Check a token for legality; an empty result means legal
    ///
    /// Checks are layered: shape first, then (for dates) calendar
    /// possibility and the gap rule, then expectation-set membership,
    /// then convertibility. The first failing layer reports and the rest
    /// are skipped, so an illegal token yields exactly one error code.
    pub fn is_legal(&self, token: &str, reference: NaiveDate) -> Vec<&'static str> {
        if !self.pattern.is_match(token) {
            return vec![self.error_code];
        }

        if self.converter == Converter::Date {
            let Some(date) = self.parse_date(token) else {
                return vec![error_codes::IMPOSSIBLE_DATE];
            };
            if self.date_rule == DateRule::BeforeReference && date >= reference {
                return vec![error_codes::INCOHERENT_DATE_PERIODS];
            }
        }

        if let Some(expected) = &self.expectations {
            if !expected.contains(token.to_uppercase().as_str()) {
                return vec![self.error_code];
            }
        }

        if self.convert(token).is_none() {
            return vec![self.error_code];
        }

        Vec::new()
    }

    /// Convert a token into its semantic value
    ///
    /// Total on every token [`FieldKind::is_legal`] accepts; returns
    /// `None` for tokens it would reject.
    pub fn convert(&self, token: &str) -> Option<FieldValue> {
        match self.converter {
            Converter::Text => Some(FieldValue::Text(token.to_string())),
            Converter::Int => token.parse().ok().map(FieldValue::Int),
            Converter::Float => token.parse().ok().map(FieldValue::Float),
            Converter::PrefixedInt => strip_code_prefix(token).parse().ok().map(FieldValue::Int),
            Converter::PrefixedFloat => {
                strip_code_prefix(token).parse().ok().map(FieldValue::Float)
            }
            Converter::Date => self.parse_date(token).map(FieldValue::Date),
        }
    }

    fn parse_date(&self, token: &str) -> Option<NaiveDate> {
        let captures = self.pattern.captures(token)?;
        let day: u32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let year: i32 = captures[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Drop the alphabetic code prefix from tokens like `WT50.5` or `NBC2`
fn strip_code_prefix(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_ascii_alphabetic())
        .collect()
}

// =============================================================================
// Catalog Constructors
// =============================================================================

impl FieldKind {
    /// The 16-character national patient identifier
    pub fn patient_id() -> Self {
        Self::new(
            "patient_id",
            &format!(r"^\S{{{}}}$", PATIENT_ID_LENGTH),
            Converter::Text,
            None,
            error_codes::BAD_PATIENT_ID,
        )
    }

    /// The alternative identifier incorporating a phone number
    pub fn phone_id() -> Self {
        Self::new(
            "phone_id",
            r"^0\d{15}$",
            Converter::Text,
            None,
            error_codes::BAD_PHONE_ID,
        )
    }

    /// A D.M.YYYY report date with no gap constraint
    pub fn report_date() -> Self {
        Self::date_kind("report_date", DateRule::Unconstrained)
    }

    /// Last-menstrual-period date; must precede the reference date
    pub fn lmp() -> Self {
        Self::date_kind("lmp", DateRule::BeforeReference)
    }

    /// A bare whole number
    pub fn number() -> Self {
        Self::new("number", r"^\d+$", Converter::Int, None, error_codes::BAD_NUMBER)
    }

    /// A plain short code with no expectation set
    pub fn code() -> Self {
        Self::new("code", r"^\w+$", Converter::Text, None, error_codes::BAD_CODE)
    }

    /// Number of pregnancies to date
    pub fn gravidity() -> Self {
        Self::new(
            "gravidity",
            r"^\d+$",
            Converter::Int,
            None,
            error_codes::BAD_NUMBER,
        )
    }

    /// Number of births to date
    pub fn parity() -> Self {
        Self::new("parity", r"^\d+$", Converter::Int, None, error_codes::BAD_NUMBER)
    }

    /// Pregnancy observation code
    pub fn pregnancy() -> Self {
        Self::new(
            "pregnancy",
            r"^\w+$",
            Converter::Text,
            Some(codes::PREGNANCY),
            error_codes::BAD_PREGNANCY_CODE,
        )
    }

    /// Previous-pregnancy observation code
    pub fn prev_pregnancy() -> Self {
        Self::new(
            "prev_pregnancy",
            r"^\w+$",
            Converter::Text,
            Some(codes::PREVIOUS_PREGNANCY),
            error_codes::BAD_PREGNANCY_CODE,
        )
    }

    /// General symptom code
    pub fn symptom() -> Self {
        Self::new(
            "symptom",
            r"^\w+$",
            Converter::Text,
            Some(codes::SYMPTOM),
            error_codes::BAD_SYMPTOM_CODE,
        )
    }

    /// Red-alert symptom code
    pub fn red_symptom() -> Self {
        Self::new(
            "red_symptom",
            r"^\w+$",
            Converter::Text,
            Some(codes::RED_SYMPTOM),
            error_codes::BAD_SYMPTOM_CODE,
        )
    }

    /// Care location code
    pub fn location() -> Self {
        Self::new(
            "location",
            r"^\w+$",
            Converter::Text,
            Some(codes::LOCATION),
            error_codes::BAD_LOCATION_CODE,
        )
    }

    /// Height measurement, e.g. `HT170`
    pub fn height() -> Self {
        Self::new(
            "height",
            r"^[A-Za-z]*\d+$",
            Converter::PrefixedInt,
            None,
            error_codes::BAD_NUMBERED_VALUE,
        )
    }

    /// Weight measurement, e.g. `WT50.5`
    pub fn weight() -> Self {
        Self::new(
            "weight",
            r"^[A-Za-z]*\d+(\.\d+)?$",
            Converter::PrefixedFloat,
            None,
            error_codes::BAD_FLOAT_VALUE,
        )
    }

    /// Toilet presence code
    pub fn toilet() -> Self {
        Self::new(
            "toilet",
            r"^\w+$",
            Converter::Text,
            Some(codes::TOILET),
            error_codes::BAD_TOILET_CODE,
        )
    }

    /// Hand-washing facility code
    pub fn handwash() -> Self {
        Self::new(
            "handwash",
            r"^\w+$",
            Converter::Text,
            Some(codes::HANDWASH),
            error_codes::BAD_HANDWASH_CODE,
        )
    }

    /// Ante-natal care visit number, e.g. `ANC2`
    pub fn anc_visit() -> Self {
        Self::new(
            "anc_visit",
            r"^[A-Za-z]*\d+$",
            Converter::PrefixedInt,
            None,
            error_codes::BAD_ANC_VISIT,
        )
    }

    /// Post-natal care visit number, e.g. `PNC1`
    pub fn pnc_visit() -> Self {
        Self::new(
            "pnc_visit",
            r"^[A-Za-z]*\d+$",
            Converter::PrefixedInt,
            None,
            error_codes::BAD_PNC_VISIT,
        )
    }

    /// New-born care visit number, restricted to `NBC1`..`NBC5`
    pub fn nbc_visit() -> Self {
        Self::new(
            "nbc_visit",
            r"^[A-Za-z]*\d+$",
            Converter::PrefixedInt,
            Some(codes::NBC_VISIT),
            error_codes::BAD_NBC_VISIT,
        )
    }

    /// Gender code
    pub fn gender() -> Self {
        Self::new(
            "gender",
            r"^\w+$",
            Converter::Text,
            Some(codes::GENDER),
            error_codes::BAD_GENDER_CODE,
        )
    }

    /// Breast-feeding status code
    pub fn breastfeeding() -> Self {
        Self::new(
            "breastfeeding",
            r"^\w+$",
            Converter::Text,
            Some(codes::BREASTFEEDING),
            error_codes::BAD_BREASTFEEDING_CODE,
        )
    }

    /// Intervention code
    pub fn intervention() -> Self {
        Self::new(
            "intervention",
            r"^\w+$",
            Converter::Text,
            Some(codes::INTERVENTION),
            error_codes::BAD_INTERVENTION_CODE,
        )
    }

    /// New-born care intervention code
    pub fn nbc_intervention() -> Self {
        Self::new(
            "nbc_intervention",
            r"^\w+$",
            Converter::Text,
            Some(codes::INTERVENTION),
            error_codes::BAD_INTERVENTION_CODE,
        )
    }

    /// General health status code
    pub fn health_status() -> Self {
        Self::new(
            "health_status",
            r"^\w+$",
            Converter::Text,
            Some(codes::HEALTH_STATUS),
            error_codes::BAD_HEALTH_STATUS,
        )
    }

    /// New-born health status code
    pub fn newborn_health_status() -> Self {
        Self::new(
            "newborn_health_status",
            r"^\w+$",
            Converter::Text,
            Some(codes::NEWBORN_HEALTH_STATUS),
            error_codes::BAD_HEALTH_STATUS,
        )
    }

    /// Mother health status code
    pub fn mother_health_status() -> Self {
        Self::new(
            "mother_health_status",
            r"^\w+$",
            Converter::Text,
            Some(codes::MOTHER_HEALTH_STATUS),
            error_codes::BAD_HEALTH_STATUS,
        )
    }

    /// Vaccination visit number, restricted to `V1`..`V6`
    pub fn vaccination() -> Self {
        Self::new(
            "vaccination",
            r"^[A-Za-z]*\d+$",
            Converter::PrefixedInt,
            Some(codes::VACCINATION),
            error_codes::BAD_VACCINATION_CODE,
        )
    }

    /// Vaccination completion checkpoint code
    pub fn vaccination_completion() -> Self {
        Self::new(
            "vaccination_completion",
            r"^\w+$",
            Converter::Text,
            Some(codes::VACCINATION_COMPLETION),
            error_codes::BAD_VACCINATION_CODE,
        )
    }

    /// Mid-upper-arm circumference, e.g. `MUAC12.5`
    pub fn muac() -> Self {
        Self::new(
            "muac",
            r"^(?i)MUAC\d+\.\d+$",
            Converter::PrefixedFloat,
            None,
            error_codes::BAD_MUAC_VALUE,
        )
    }

    /// Death circumstance code
    pub fn death() -> Self {
        Self::new(
            "death",
            r"^\w+$",
            Converter::Text,
            Some(codes::DEATH),
            error_codes::BAD_DEATH_CODE,
        )
    }
}
