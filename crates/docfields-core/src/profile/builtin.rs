//! Built-in document profiles.

use super::rules::*;
use super::{DocumentKind, DocumentProfile, ExtractionRule, FieldSpec};
use crate::error::ProfileError;

/// Field set of a motor insurance schedule, in output order.
pub const INSURANCE_FIELDS: [&str; 20] = [
    "policy_number",
    "policy_holder_name",
    "insured_address",
    "vehicle_registration_number",
    "engine_number",
    "chassis_number",
    "make_model",
    "fuel_type",
    "cubic_capacity",
    "year_of_manufacture",
    "date_of_registration",
    "policy_start_date",
    "policy_end_date",
    "insurance_company",
    "premium_amount",
    "previous_insurer",
    "previous_policy_number",
    "nominee_name",
    "nominee_age",
    "nominee_relationship",
];

/// All built-in profiles in registration order.
pub fn builtin_profiles() -> Result<Vec<DocumentProfile>, ProfileError> {
    Ok(vec![shriram()?, reliance()?, bank_statement()?, generic()?])
}

fn spec(name: &str, rules: &[&ExtractionRule]) -> FieldSpec {
    FieldSpec::new(name).rules(rules.iter().map(|rule| (*rule).clone()))
}

/// Union of every insurance rule plus a broad alias table.
fn generic() -> Result<DocumentProfile, ProfileError> {
    DocumentProfile::builder("generic")
        .description("Motor insurance schedule, any insurer")
        .field(spec("policy_number", &[&POLICY_NO_INLINE, &POLICY_NUMBER_LABELED]))
        .field(spec(
            "policy_holder_name",
            &[&HOLDER_AFTER_INTERMEDIARY, &HOLDER_INSURED_NAME],
        ))
        .field(spec("insured_address", &[&ADDRESS_INSURED, &ADDRESS_COMMUNICATION]))
        .field(spec(
            "vehicle_registration_number",
            &[
                &REGISTRATION_LABELED,
                &REGISTRATION_MARK,
                &REGISTRATION_DASHED,
                &REGISTRATION_COMPACT,
            ],
        ))
        .field(spec(
            "engine_number",
            &[&ENGINE_COMBINED, &ENGINE_LABELED, &ENGINE_BEFORE_AMPERSAND],
        ))
        .field(spec(
            "chassis_number",
            &[&CHASSIS_COMBINED, &CHASSIS_LABELED, &CHASSIS_AFTER_AMPERSAND],
        ))
        .field(spec(
            "make_model",
            &[
                &MAKE_MODEL_SLASH_LABELED,
                &MAKE_MODEL_DASH_LABELED,
                &MAKE_MODEL_HONDA,
                &MAKE_MODEL_RENAULT,
            ],
        ))
        .field(spec(
            "fuel_type",
            &[&FUEL_LABELED, &FUEL_AFTER_BODY, &FUEL_IN_MAKE_MODEL],
        ))
        .field(spec("cubic_capacity", &[&CC_LABELED, &CC_BEFORE_YEAR]))
        .field(spec(
            "year_of_manufacture",
            &[
                &YEAR_MFG_MONTH,
                &YEAR_OF_MANF,
                &YEAR_AFTER_CC,
                &YEAR_MONTH_DASH,
                &YEAR_BEFORE_DATE,
            ],
        ))
        .field(spec(
            "date_of_registration",
            &[&REGISTRATION_DATE_LABELED, &FIRST_DATE],
        ))
        .field(spec("policy_start_date", &[&START_DATE_LABELED, &START_DATE]))
        .field(spec("policy_end_date", &[&END_DATE_LABELED, &END_DATE]))
        .field(spec("insurance_company", &[&INSURER_SHRIRAM, &INSURER_RELIANCE]))
        .field(spec("premium_amount", &[&PREMIUM_AMOUNT, &PREMIUM_TOTAL]))
        .field(spec("previous_insurer", &[&PREVIOUS_INSURER]))
        .field(spec("previous_policy_number", &[&PREVIOUS_POLICY]))
        .field(spec(
            "nominee_name",
            &[&NOMINEE_OWNER_DRIVER, &NOMINEE_NAME_LABELED],
        ))
        .field(spec("nominee_age", &[&NOMINEE_AGE]))
        .field(spec("nominee_relationship", &[&NOMINEE_RELATIONSHIP]))
        .aliases("policy_number", ["Policy Number", "Policy No."])
        .aliases(
            "policy_holder_name",
            ["Insured Name", "Name of Insured", "Policy Holder", "Proposer Name"],
        )
        .aliases(
            "insured_address",
            [
                "Communication Address & Place of Supply",
                "Communication Address",
                "Insured Address",
                "Address",
            ],
        )
        .aliases(
            "vehicle_registration_number",
            ["Registration No.", "Registration Number", "Registration Mark", "Vehicle No."],
        )
        .aliases("engine_number", ["Engine No.", "Engine Number"])
        .aliases("chassis_number", ["Chassis No.", "Chassis Number"])
        .aliases("make_model", ["Make / Model", "Make - Model", "Vehicle Make"])
        .aliases("fuel_type", ["Fuel Type", "Fuel"])
        .aliases("cubic_capacity", ["CC / HP / Watt", "Cubic Capacity"])
        .aliases(
            "year_of_manufacture",
            ["Mfg. Month & Year", "Year of Manufacture", "Year of Manf."],
        )
        .aliases("date_of_registration", ["Date of Registration", "Date of Regn."])
        .aliases("policy_start_date", ["Policy Start Date", "Risk Start Date"])
        .aliases("policy_end_date", ["Policy End Date", "Policy Expiry Date", "Risk End Date"])
        .aliases("insurance_company", ["Insurer", "Insurance Company", "Insurer Name"])
        .aliases(
            "premium_amount",
            ["Total Premium (₹)", "Total Premium", "Premium Amount"],
        )
        .aliases("previous_insurer", ["Previous Insurer", "Previous Insurer Name"])
        .aliases(
            "previous_policy_number",
            ["Previous Policy No.", "Previous Policy Number"],
        )
        .aliases(
            "nominee_name",
            ["Nominee Name", "Nominee", "Nominee for Owner/Driver"],
        )
        .aliases("nominee_age", ["Nominee Age"])
        .aliases("nominee_relationship", ["Nominee Relationship", "Relationship"])
        .build()
}

/// Shriram General Insurance two-wheeler schedule.
///
/// Values mostly appear unlabelled, in a fixed order: intermediary code and
/// name, registration and RTO, engine and chassis joined by `&`, capacity,
/// seating and year joined by `/`.
fn shriram() -> Result<DocumentProfile, ProfileError> {
    DocumentProfile::builder("shriram")
        .description("Shriram General Insurance motor schedule")
        .marker("SHRIRAM GENERAL INSURANCE")
        .field(spec("policy_number", &[&POLICY_NO_INLINE]))
        .field(spec("policy_holder_name", &[&HOLDER_AFTER_INTERMEDIARY]))
        .field(spec("insured_address", &[&ADDRESS_INSURED]))
        .field(spec(
            "vehicle_registration_number",
            &[&REGISTRATION_MARK, &REGISTRATION_DASHED],
        ))
        .field(spec(
            "engine_number",
            &[&ENGINE_COMBINED, &ENGINE_BEFORE_AMPERSAND],
        ))
        .field(spec(
            "chassis_number",
            &[&CHASSIS_COMBINED, &CHASSIS_AFTER_AMPERSAND],
        ))
        .field(spec(
            "make_model",
            &[&MAKE_MODEL_DASH_LABELED, &MAKE_MODEL_HONDA],
        ))
        .field(spec("fuel_type", &[&FUEL_LABELED, &FUEL_AFTER_BODY]))
        .field(spec("cubic_capacity", &[&CC_BEFORE_YEAR]))
        .field(spec(
            "year_of_manufacture",
            &[&YEAR_OF_MANF, &YEAR_AFTER_CC, &YEAR_BEFORE_DATE],
        ))
        .field(spec(
            "date_of_registration",
            &[&REGISTRATION_DATE_LABELED, &FIRST_DATE],
        ))
        .field(spec("policy_start_date", &[&START_DATE]))
        .field(spec("policy_end_date", &[&END_DATE]))
        .field(spec("insurance_company", &[&INSURER_SHRIRAM]))
        .field(spec("premium_amount", &[&PREMIUM_AMOUNT]))
        .field(spec("previous_insurer", &[&PREVIOUS_INSURER]))
        .field(spec("previous_policy_number", &[&PREVIOUS_POLICY]))
        .field(spec("nominee_name", &[&NOMINEE_OWNER_DRIVER]))
        .field(spec("nominee_age", &[&NOMINEE_AGE]))
        .field(spec("nominee_relationship", &[&NOMINEE_RELATIONSHIP]))
        .aliases("vehicle_registration_number", ["Registration Mark"])
        .aliases("date_of_registration", ["Date of Regn."])
        .aliases("year_of_manufacture", ["Year of Manf."])
        .aliases("nominee_name", ["Nominee for Owner/Driver"])
        .build()
}

/// Reliance General Insurance private car schedule: `Label: value` lines.
fn reliance() -> Result<DocumentProfile, ProfileError> {
    DocumentProfile::builder("reliance")
        .description("Reliance General Insurance motor schedule")
        .marker("RELIANCE GENERAL INSURANCE")
        .field(spec("policy_number", &[&POLICY_NUMBER_LABELED, &POLICY_NO_INLINE]))
        .field(spec("policy_holder_name", &[&HOLDER_INSURED_NAME]))
        .field(spec("insured_address", &[&ADDRESS_COMMUNICATION]))
        .field(spec(
            "vehicle_registration_number",
            &[&REGISTRATION_LABELED, &REGISTRATION_COMPACT],
        ))
        .field(spec("engine_number", &[&ENGINE_COMBINED, &ENGINE_LABELED]))
        .field(spec("chassis_number", &[&CHASSIS_COMBINED, &CHASSIS_LABELED]))
        .field(spec(
            "make_model",
            &[&MAKE_MODEL_SLASH_LABELED, &MAKE_MODEL_RENAULT],
        ))
        .field(spec("fuel_type", &[&FUEL_LABELED, &FUEL_IN_MAKE_MODEL]))
        .field(spec("cubic_capacity", &[&CC_LABELED]))
        .field(spec("year_of_manufacture", &[&YEAR_MFG_MONTH, &YEAR_MONTH_DASH]))
        .field(spec("date_of_registration", &[&REGISTRATION_DATE_LABELED]))
        .field(spec("policy_start_date", &[&START_DATE_LABELED, &START_DATE]))
        .field(spec("policy_end_date", &[&END_DATE_LABELED, &END_DATE]))
        .field(spec("insurance_company", &[&INSURER_RELIANCE]))
        .field(spec("premium_amount", &[&PREMIUM_TOTAL]))
        .field(spec("previous_insurer", &[&PREVIOUS_INSURER]))
        .field(spec("previous_policy_number", &[&PREVIOUS_POLICY]))
        .field(spec("nominee_name", &[&NOMINEE_NAME_LABELED]))
        .field(spec("nominee_age", &[&NOMINEE_AGE]))
        .field(spec("nominee_relationship", &[&NOMINEE_RELATIONSHIP]))
        .aliases("policy_number", ["Policy Number"])
        .aliases("policy_holder_name", ["Insured Name"])
        .aliases(
            "insured_address",
            ["Communication Address & Place of Supply", "Communication Address"],
        )
        .aliases("vehicle_registration_number", ["Registration No."])
        .aliases("make_model", ["Make / Model"])
        .aliases("cubic_capacity", ["CC / HP / Watt"])
        .aliases("year_of_manufacture", ["Mfg. Month & Year"])
        .aliases("premium_amount", ["Total Premium (₹)", "Total Premium"])
        .aliases("previous_insurer", ["Previous Insurer"])
        .aliases("previous_policy_number", ["Previous Policy No."])
        .aliases("nominee_name", ["Nominee Name"])
        .aliases("nominee_age", ["Nominee Age"])
        .aliases("nominee_relationship", ["Nominee Relationship"])
        .build()
}

/// Bank statements go through the transaction line parser, not field rules.
fn bank_statement() -> Result<DocumentProfile, ProfileError> {
    DocumentProfile::builder("bank-statement")
        .description("Bank account statement, one transaction per line")
        .kind(DocumentKind::BankStatement)
        .marker("STATEMENT OF ACCOUNT")
        .marker("ACCOUNT STATEMENT")
        .build()
}
