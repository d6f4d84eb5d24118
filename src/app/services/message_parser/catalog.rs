//! Schema catalog mapping report codes to message schemas
//!
//! One schema exists per report type: an ordered sequence of field specs
//! identified by a short code, plus the type's semantic check. The
//! catalog is built once at process start and looked up case-insensitively
//! on the leading token of each message. An unmatched code is not an
//! error; it routes to the Unknown outcome.

use std::collections::HashMap;
use std::sync::Arc;

use super::field_kind::FieldKind;
use super::field_spec::FieldSpec;
use super::semantics::SemanticCheck;

/// Ordered field sequence for one report type
#[derive(Debug, Clone)]
pub struct MessageSchema {
    code: &'static str,
    report_name: &'static str,
    fields: Vec<FieldSpec>,
    semantic: SemanticCheck,
}

impl MessageSchema {
    /// Create a schema with no semantic check
    pub fn new(code: &'static str, report_name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self {
            code,
            report_name,
            fields,
            semantic: SemanticCheck::Unchecked,
        }
    }

    /// Attach a semantic check to this schema
    pub fn with_semantic_check(mut self, semantic: SemanticCheck) -> Self {
        self.semantic = semantic;
        self
    }

    /// The report type code (uppercase)
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Lowercase report name, used as the principal entity for storage
    pub fn report_name(&self) -> &'static str {
        self.report_name
    }

    /// Field specs in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The semantic check run once field-level validation is clean
    pub fn semantic_check(&self) -> SemanticCheck {
        self.semantic
    }
}

/// Case-insensitive registry of message schemas
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<String, Arc<MessageSchema>>,
}

impl SchemaCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its code, replacing any previous entry
    pub fn register(&mut self, schema: MessageSchema) {
        self.schemas
            .insert(schema.code().to_uppercase(), Arc::new(schema));
    }

    /// Look up the schema for a report code, case-insensitively
    pub fn lookup(&self, code: &str) -> Option<Arc<MessageSchema>> {
        self.schemas.get(&code.to_uppercase()).cloned()
    }

    /// Registered report codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.schemas.values().map(|s| s.code()).collect();
        codes.sort_unstable();
        codes
    }

    /// Iterate registered schemas in code order
    pub fn schemas(&self) -> impl Iterator<Item = &Arc<MessageSchema>> {
        let mut schemas: Vec<&Arc<MessageSchema>> = self.schemas.values().collect();
        schemas.sort_unstable_by_key(|s| s.code());
        schemas.into_iter()
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Build the standard 1000 Days catalog
    ///
    /// Field kinds are constructed once here and shared between the
    /// schemas that reference them.
    pub fn standard() -> Self {
        let patient_id = Arc::new(FieldKind::patient_id());
        let phone_id = Arc::new(FieldKind::phone_id());
        let report_date = Arc::new(FieldKind::report_date());
        let lmp = Arc::new(FieldKind::lmp());
        let number = Arc::new(FieldKind::number());
        let gravidity = Arc::new(FieldKind::gravidity());
        let parity = Arc::new(FieldKind::parity());
        let pregnancy = Arc::new(FieldKind::pregnancy());
        let symptom = Arc::new(FieldKind::symptom());
        let red_symptom = Arc::new(FieldKind::red_symptom());
        let location = Arc::new(FieldKind::location());
        let height = Arc::new(FieldKind::height());
        let weight = Arc::new(FieldKind::weight());
        let toilet = Arc::new(FieldKind::toilet());
        let handwash = Arc::new(FieldKind::handwash());
        let anc_visit = Arc::new(FieldKind::anc_visit());
        let pnc_visit = Arc::new(FieldKind::pnc_visit());
        let nbc_visit = Arc::new(FieldKind::nbc_visit());
        let gender = Arc::new(FieldKind::gender());
        let breastfeeding = Arc::new(FieldKind::breastfeeding());
        let intervention = Arc::new(FieldKind::intervention());
        let nbc_intervention = Arc::new(FieldKind::nbc_intervention());
        let newborn_health_status = Arc::new(FieldKind::newborn_health_status());
        let mother_health_status = Arc::new(FieldKind::mother_health_status());
        let vaccination = Arc::new(FieldKind::vaccination());
        let vaccination_completion = Arc::new(FieldKind::vaccination_completion());
        let muac = Arc::new(FieldKind::muac());
        let death = Arc::new(FieldKind::death());

        let mut catalog = Self::new();

        catalog.register(
            MessageSchema::new(
                "PRE",
                "pregnancy",
                vec![
                    FieldSpec::single(patient_id.clone()),
                    FieldSpec::single(lmp.clone()),
                    FieldSpec::single(report_date.clone()),
                    FieldSpec::single(gravidity.clone()),
                    FieldSpec::single(parity.clone()),
                    FieldSpec::many(pregnancy.clone()),
                    FieldSpec::many(symptom.clone()),
                    FieldSpec::single(location.clone()),
                    FieldSpec::single(weight.clone()),
                    FieldSpec::single(toilet.clone()),
                    FieldSpec::single(handwash.clone()),
                ],
            )
            .with_semantic_check(SemanticCheck::PregnancyDates),
        );

        catalog.register(MessageSchema::new(
            "REF",
            "referral",
            vec![FieldSpec::single(phone_id.clone())],
        ));

        catalog.register(MessageSchema::new(
            "ANC",
            "anc",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::single(anc_visit.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(location.clone()),
                FieldSpec::single(weight.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "DEP",
            "departure",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(report_date.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "RISK",
            "risk",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(location.clone()),
                FieldSpec::single(weight.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "RED",
            "red_alert",
            vec![
                FieldSpec::many(red_symptom.clone()),
                FieldSpec::single(location.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "BIR",
            "birth",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::single(gender.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(location.clone()),
                FieldSpec::single(breastfeeding.clone()),
                FieldSpec::single(weight.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "CHI",
            "child",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::single(vaccination.clone()),
                FieldSpec::single(vaccination_completion.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(location.clone()),
                FieldSpec::single(weight.clone()),
                FieldSpec::single(muac.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "DTH",
            "death",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::single(location.clone()),
                FieldSpec::single(death.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "RES",
            "result",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(location.clone()),
                FieldSpec::single(intervention.clone()),
                FieldSpec::single(mother_health_status.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "RAR",
            "red_result",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(location.clone()),
                FieldSpec::single(intervention.clone()),
                FieldSpec::single(mother_health_status.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "NBC",
            "newborn_care",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(nbc_visit.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(breastfeeding.clone()),
                FieldSpec::single(nbc_intervention.clone()),
                FieldSpec::single(newborn_health_status.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "PNC",
            "postnatal_care",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(pnc_visit.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(intervention.clone()),
                FieldSpec::single(mother_health_status.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "CCM",
            "case_management",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(intervention.clone()),
                FieldSpec::single(muac.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "CMR",
            "case_response",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::many(symptom.clone()),
                FieldSpec::single(intervention.clone()),
                FieldSpec::single(newborn_health_status.clone()),
            ],
        ));

        catalog.register(MessageSchema::new(
            "CBN",
            "nutrition",
            vec![
                FieldSpec::single(patient_id.clone()),
                FieldSpec::single(number.clone()),
                FieldSpec::single(report_date.clone()),
                FieldSpec::single(breastfeeding.clone()),
                FieldSpec::single(height.clone()),
                FieldSpec::single(weight.clone()),
                FieldSpec::single(muac.clone()),
            ],
        ));

        catalog
    }
}
