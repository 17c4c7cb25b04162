//! Shared extraction rules for insurance schedules.
//!
//! Profiles reference these statics instead of carrying their own copies, so a
//! fix to e.g. the registration-number shape applies to every institution.

use lazy_static::lazy_static;

use super::rule::ExtractionRule;

lazy_static! {
    // Policy number
    pub static ref POLICY_NO_INLINE: ExtractionRule = ExtractionRule::new(
        r"Policy\s*No\.?\s*:?\s*([0-9][0-9/]*)"
    );

    pub static ref POLICY_NUMBER_LABELED: ExtractionRule = ExtractionRule::new(
        r"Policy\s*Number\s*:?\s*([0-9][0-9/]*)"
    );

    // Policy holder
    pub static ref HOLDER_AFTER_INTERMEDIARY: ExtractionRule = ExtractionRule::new(
        r"\bIN-\d+[ \t]*/[ \t]*([A-Z .]+?)[ \t]*(?:GSTIN|Communication|$)"
    );

    pub static ref HOLDER_INSURED_NAME: ExtractionRule = ExtractionRule::new(
        r"Insured\s*Name\s*:[ \t]*([A-Z .]+?)[ \t]*(?:Communication|Mobile|Email|$)"
    );

    // Address
    pub static ref ADDRESS_INSURED: ExtractionRule = ExtractionRule::new(
        r"Insured\s*Address\s*(?:and\s*Contact\s*Details)?\s*:?[ \t]*([A-Z0-9 ,./&#()-]+?)[ \t]*(?:,\s*Mob|Mobile|Email|$)"
    );

    pub static ref ADDRESS_COMMUNICATION: ExtractionRule = ExtractionRule::new(
        r"Communication\s*Address[^:\n]*:[ \t]*([A-Z0-9 ,./&#()-]+?)[ \t]*(?:Mobile|Email|$)"
    );

    // Vehicle registration
    pub static ref REGISTRATION_LABELED: ExtractionRule = ExtractionRule::new(
        r"Registration\s*No\.?\s*:\s*([A-Z0-9-]+)"
    );

    pub static ref REGISTRATION_MARK: ExtractionRule = ExtractionRule::new(
        r"Registration\s*Mark[^:\n]*:[ \t]*([A-Z0-9][A-Z0-9 -]*[A-Z0-9])"
    );

    pub static ref REGISTRATION_DASHED: ExtractionRule = ExtractionRule::new(
        r"\b[A-Z]{2}\s*-\s*\d{1,2}\s*-\s*[A-Z]{1,3}\s*-\s*\d{1,4}\b"
    );

    pub static ref REGISTRATION_COMPACT: ExtractionRule = ExtractionRule::new(
        r"\b[A-Z]{2}\d{1,2}[A-Z]{1,3}\d{1,4}\b"
    );

    // Engine and chassis
    pub static ref ENGINE_COMBINED: ExtractionRule = ExtractionRule::new(
        r"Engine\s*No\.?\s*[&/]?\s*Chassis\s*No\.?\s*:\s*([A-Z0-9]+)"
    );

    pub static ref ENGINE_LABELED: ExtractionRule = ExtractionRule::new(
        r"Engine\s*(?:No\.?|Number)\s*:\s*([A-Z0-9]+)"
    );

    pub static ref ENGINE_BEFORE_AMPERSAND: ExtractionRule = ExtractionRule::new(
        r"\b(\d{10})[ \t]*&"
    );

    pub static ref CHASSIS_COMBINED: ExtractionRule = ExtractionRule::new(
        r"Engine\s*No\.?\s*[&/]?\s*Chassis\s*No\.?\s*:\s*[A-Z0-9]+[ \t]*[/&][ \t]*([A-Z0-9]+)"
    );

    pub static ref CHASSIS_LABELED: ExtractionRule = ExtractionRule::new(
        r"Chassis\s*(?:No\.?|Number)\s*:\s*([A-Z0-9]+)"
    );

    pub static ref CHASSIS_AFTER_AMPERSAND: ExtractionRule = ExtractionRule::new(
        r"&[ \t]*([A-Z0-9]{17})\b"
    );

    // Make and model
    pub static ref MAKE_MODEL_SLASH_LABELED: ExtractionRule = ExtractionRule::new(
        r"Make\s*/\s*Model\s*:[ \t]*([A-Z0-9 /.-]+?)[ \t]*$"
    );

    pub static ref MAKE_MODEL_DASH_LABELED: ExtractionRule = ExtractionRule::new(
        r"Make\s*-\s*Model\s*:[ \t]*([A-Z0-9 /.-]+?)[ \t]*$"
    );

    pub static ref MAKE_MODEL_HONDA: ExtractionRule = ExtractionRule::new(
        r"\bHONDA[ \t]*-[ \t]*[A-Z0-9 \t]+"
    );

    pub static ref MAKE_MODEL_RENAULT: ExtractionRule = ExtractionRule::new(
        r"\bRENAULT[ \t]*/[ \t]*[A-Z /]+"
    );

    // Fuel
    pub static ref FUEL_LABELED: ExtractionRule = ExtractionRule::new(
        r"Fuel\s*Type\s*:\s*([A-Z]+)"
    );

    pub static ref FUEL_AFTER_BODY: ExtractionRule = ExtractionRule::new(
        r"\b(?:SCOOTY|SCOOTER|MOTORCYCLE|CAR|SALOON|SUV)[ \t]*/[ \t]*(PETROL|DIESEL|CNG|LPG|ELECTRIC)\b"
    );

    pub static ref FUEL_IN_MAKE_MODEL: ExtractionRule = ExtractionRule::new(
        r"Make\s*/\s*Model\s*:[^\n]*?\b(PETROL|DIESEL|CNG|LPG|ELECTRIC)\b"
    );

    // Cubic capacity
    pub static ref CC_LABELED: ExtractionRule = ExtractionRule::new(
        r"(?:CC\s*/\s*HP\s*/\s*Watt|Cubic\s*Capacity)\s*:\s*(\d+)"
    );

    pub static ref CC_BEFORE_YEAR: ExtractionRule = ExtractionRule::new(
        r"\b(\d{2,4})[ \t]*/[ \t]*0[ \t]*/[ \t]*(?:19|20)\d{2}\b"
    );

    // Year of manufacture
    pub static ref YEAR_MFG_MONTH: ExtractionRule = ExtractionRule::new(
        r"Mfg\.?\s*Month\s*&\s*Year\s*:\s*[A-Z]{3}\s*-\s*((?:19|20)\d{2})"
    );

    pub static ref YEAR_OF_MANF: ExtractionRule = ExtractionRule::new(
        r"Year\s*of\s*Man(?:f|ufacture)\.?\s*:\s*((?:19|20)\d{2})"
    );

    pub static ref YEAR_AFTER_CC: ExtractionRule = ExtractionRule::new(
        r"\b\d{2,4}[ \t]*/[ \t]*0[ \t]*/[ \t]*((?:19|20)\d{2})\b"
    );

    pub static ref YEAR_MONTH_DASH: ExtractionRule = ExtractionRule::new(
        r"\b(?:JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)-((?:19|20)\d{2})\b"
    );

    pub static ref YEAR_BEFORE_DATE: ExtractionRule = ExtractionRule::new(
        r"\b((?:19|20)\d{2})\s+\d{2}/\d{2}/\d{4}\b"
    );

    // Dates
    pub static ref REGISTRATION_DATE_LABELED: ExtractionRule = ExtractionRule::new(
        r"Date\s*of\s*Reg(?:n|istration)\.?[^:\n]*:\s*(\d{2}[/-]\d{2}[/-]\d{4})"
    );

    pub static ref FIRST_DATE: ExtractionRule = ExtractionRule::new(
        r"\b(\d{2}/\d{2}/\d{4})\b"
    );

    pub static ref START_DATE: ExtractionRule = ExtractionRule::new(
        r"From\s*00:00\s*Hrs\s*(?:of|on)?\s*(\d{2}[/-]\d{2}[/-]\d{4})"
    );

    pub static ref START_DATE_LABELED: ExtractionRule = ExtractionRule::new(
        r"(?:Policy\s*)?Start\s*Date\s*:\s*(\d{2}[/-]\d{2}[/-]\d{4})"
    );

    pub static ref END_DATE: ExtractionRule = ExtractionRule::new(
        r"Midnight\s*(?:of|on)?\s*(\d{2}[/-]\d{2}[/-]\d{4})"
    );

    pub static ref END_DATE_LABELED: ExtractionRule = ExtractionRule::new(
        r"(?:Policy\s*)?(?:End|Expiry)\s*Date\s*:\s*(\d{2}[/-]\d{2}[/-]\d{4})"
    );

    // Insurer
    pub static ref INSURER_SHRIRAM: ExtractionRule = ExtractionRule::new(
        r"(SHRIRAM\s*GENERAL\s*INSURANCE\s*COMPANY\s*LIMITED)"
    );

    pub static ref INSURER_RELIANCE: ExtractionRule = ExtractionRule::new(
        r"(RELIANCE\s*GENERAL\s*INSURANCE(?:\s*COMPANY\s*LIMITED)?)"
    );

    // Premium
    pub static ref PREMIUM_AMOUNT: ExtractionRule = ExtractionRule::new(
        r"Premium\s*Amount\s*:?\s*(?:₹|Rs\.?|INR)?\s*([0-9][0-9,]*(?:\.\d{1,2})?)"
    );

    pub static ref PREMIUM_TOTAL: ExtractionRule = ExtractionRule::new(
        r"Total\s*Premium\s*(?:\((?:₹|Rs\.?|INR)\))?\s*:\s*(?:₹|Rs\.?|INR)?\s*([0-9][0-9,]*(?:\.\d{1,2})?)"
    );

    // Previous policy
    pub static ref PREVIOUS_INSURER: ExtractionRule = ExtractionRule::new(
        r"Previous\s*Insurer\s*:?[ \t]*([A-Z .&]+?)[ \t]*(?:Limited|Company|Ltd\b|$)"
    );

    pub static ref PREVIOUS_POLICY: ExtractionRule = ExtractionRule::new(
        r"Previous\s*Policy\s*(?:No\.?|Number)\s*:?\s*(\d[0-9/-]*)"
    );

    // Nominee
    pub static ref NOMINEE_OWNER_DRIVER: ExtractionRule = ExtractionRule::new(
        r"Nominee\s*for\s*Owner\s*/\s*Driver\s*:?[ \t]*([A-Z .]+?)[ \t]*(?:Nominee|Age|$)"
    );

    pub static ref NOMINEE_NAME_LABELED: ExtractionRule = ExtractionRule::new(
        r"Nominee\s*Name\s*:[ \t]*([A-Z .]+?)[ \t]*(?:Nominee|Age|$)"
    );

    pub static ref NOMINEE_AGE: ExtractionRule = ExtractionRule::new(
        r"Nominee\s*Age\s*:?\s*(\d{1,3})\b"
    );

    pub static ref NOMINEE_RELATIONSHIP: ExtractionRule = ExtractionRule::new(
        r"Nominee\s*Relationship\s*:?[ \t]*([A-Z ]+?)[ \t]*(?:Appointee|$)"
    );
}

/// Every shared rule, for compile checks.
pub fn all() -> Vec<&'static ExtractionRule> {
    let rules: &[&'static ExtractionRule] = &[
        &POLICY_NO_INLINE,
        &POLICY_NUMBER_LABELED,
        &HOLDER_AFTER_INTERMEDIARY,
        &HOLDER_INSURED_NAME,
        &ADDRESS_INSURED,
        &ADDRESS_COMMUNICATION,
        &REGISTRATION_LABELED,
        &REGISTRATION_MARK,
        &REGISTRATION_DASHED,
        &REGISTRATION_COMPACT,
        &ENGINE_COMBINED,
        &ENGINE_LABELED,
        &ENGINE_BEFORE_AMPERSAND,
        &CHASSIS_COMBINED,
        &CHASSIS_LABELED,
        &CHASSIS_AFTER_AMPERSAND,
        &MAKE_MODEL_SLASH_LABELED,
        &MAKE_MODEL_DASH_LABELED,
        &MAKE_MODEL_HONDA,
        &MAKE_MODEL_RENAULT,
        &FUEL_LABELED,
        &FUEL_AFTER_BODY,
        &FUEL_IN_MAKE_MODEL,
        &CC_LABELED,
        &CC_BEFORE_YEAR,
        &YEAR_MFG_MONTH,
        &YEAR_OF_MANF,
        &YEAR_AFTER_CC,
        &YEAR_MONTH_DASH,
        &YEAR_BEFORE_DATE,
        &REGISTRATION_DATE_LABELED,
        &FIRST_DATE,
        &START_DATE,
        &START_DATE_LABELED,
        &END_DATE,
        &END_DATE_LABELED,
        &INSURER_SHRIRAM,
        &INSURER_RELIANCE,
        &PREMIUM_AMOUNT,
        &PREMIUM_TOTAL,
        &PREVIOUS_INSURER,
        &PREVIOUS_POLICY,
        &NOMINEE_OWNER_DRIVER,
        &NOMINEE_NAME_LABELED,
        &NOMINEE_AGE,
        &NOMINEE_RELATIONSHIP,
    ];
    rules.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(rule: &ExtractionRule, text: &str) -> Option<String> {
        rule.evaluate(text).unwrap()
    }

    #[test]
    fn test_all_shared_rules_compile() {
        for rule in all() {
            assert!(rule.is_valid(), "pattern failed to compile: {}", rule.pattern());
        }
    }

    #[test]
    fn test_policy_number_shapes() {
        assert_eq!(
            eval(&POLICY_NO_INLINE, "Policy No. 10047/31/26/002595"),
            Some("10047/31/26/002595".to_string())
        );
        assert_eq!(eval(&POLICY_NO_INLINE, "Policy Number: 110322523470171735"), None);
        assert_eq!(
            eval(&POLICY_NUMBER_LABELED, "Policy Number: 110322523470171735"),
            Some("110322523470171735".to_string())
        );
    }

    #[test]
    fn test_registration_shapes() {
        assert_eq!(
            eval(&REGISTRATION_DASHED, "MH - 01 - SW - 3422 & MUMBAI CENTRAL"),
            Some("MH - 01 - SW - 3422".to_string())
        );
        assert_eq!(
            eval(&REGISTRATION_DASHED, "IN-23512287 / MR. ARPIT SRIVASTAVA"),
            None
        );
        assert_eq!(
            eval(&REGISTRATION_COMPACT, "Registration No.: MH12KE1128"),
            Some("MH12KE1128".to_string())
        );
        assert_eq!(
            eval(&REGISTRATION_LABELED, "Registration No.: MH12KE1128"),
            Some("MH12KE1128".to_string())
        );
    }

    #[test]
    fn test_engine_and_chassis_combined_label() {
        let line = "Engine No. / Chassis No.: D244587 / MEEHSRC85D7000947";
        assert_eq!(eval(&ENGINE_COMBINED, line), Some("D244587".to_string()));
        assert_eq!(
            eval(&CHASSIS_COMBINED, line),
            Some("MEEHSRC85D7000947".to_string())
        );
    }

    #[test]
    fn test_engine_and_chassis_ampersand_pair() {
        let line = "6655774488 & 99554411225544778";
        assert_eq!(eval(&ENGINE_BEFORE_AMPERSAND, line), Some("6655774488".to_string()));
        assert_eq!(
            eval(&CHASSIS_AFTER_AMPERSAND, line),
            Some("99554411225544778".to_string())
        );
    }

    #[test]
    fn test_make_model_stops_at_line_end() {
        let text = "HONDA - ACTIVA 5G STD BS4\nSCOOTY / PETROL";
        assert_eq!(
            eval(&MAKE_MODEL_HONDA, text),
            Some("HONDA - ACTIVA 5G STD BS4".to_string())
        );
        assert_eq!(eval(&FUEL_AFTER_BODY, text), Some("PETROL".to_string()));
    }

    #[test]
    fn test_fuel_inside_make_model() {
        let text = "Make / Model: RENAULT / DUSTER / PETROL RXE\nEngine No.: D244587";
        assert_eq!(
            eval(&MAKE_MODEL_SLASH_LABELED, text),
            Some("RENAULT / DUSTER / PETROL RXE".to_string())
        );
        assert_eq!(eval(&FUEL_IN_MAKE_MODEL, text), Some("PETROL".to_string()));
    }

    #[test]
    fn test_capacity_and_year_share_a_token() {
        let text = "110 / 0 / 2019\n27/08/2019";
        assert_eq!(eval(&CC_BEFORE_YEAR, text), Some("110".to_string()));
        assert_eq!(eval(&YEAR_AFTER_CC, text), Some("2019".to_string()));
        assert_eq!(eval(&FIRST_DATE, text), Some("27/08/2019".to_string()));
    }

    #[test]
    fn test_year_labels() {
        assert_eq!(
            eval(&YEAR_MFG_MONTH, "Mfg. Month & Year: JUL-2013"),
            Some("2013".to_string())
        );
        assert_eq!(
            eval(&YEAR_OF_MANF, "YEAR OF MANF.: 2017"),
            Some("2017".to_string())
        );
        assert_eq!(eval(&YEAR_MONTH_DASH, "AUG-2021"), Some("2021".to_string()));
    }

    #[test]
    fn test_policy_period() {
        let text = "Period of Insurance From 00:00 Hrs of 28/08/2019 to Midnight of 27/08/2020";
        assert_eq!(eval(&START_DATE, text), Some("28/08/2019".to_string()));
        assert_eq!(eval(&END_DATE, text), Some("27/08/2020".to_string()));
    }

    #[test]
    fn test_premium_shapes() {
        assert_eq!(eval(&PREMIUM_AMOUNT, "PREMIUM AMOUNT 1507"), Some("1507".to_string()));
        assert_eq!(
            eval(&PREMIUM_TOTAL, "Total Premium (₹): 9318"),
            Some("9318".to_string())
        );
        assert_eq!(
            eval(&PREMIUM_TOTAL, "Total Premium: Rs. 12,450.50"),
            Some("12,450.50".to_string())
        );
    }

    #[test]
    fn test_previous_policy() {
        let text = "Previous Insurer: Bajaj Allianz General Insurance Company Limited\nPrevious Policy No. 12345678";
        assert_eq!(
            eval(&PREVIOUS_INSURER, text),
            Some("Bajaj Allianz General Insurance".to_string())
        );
        assert_eq!(eval(&PREVIOUS_POLICY, text), Some("12345678".to_string()));
    }

    #[test]
    fn test_nominee_block() {
        let text = "Nominee for Owner/Driver RAHUL SHARMA Nominee Age 34\nNominee Relationship Brother Appointee NA";
        assert_eq!(
            eval(&NOMINEE_OWNER_DRIVER, text),
            Some("RAHUL SHARMA".to_string())
        );
        assert_eq!(eval(&NOMINEE_AGE, text), Some("34".to_string()));
        assert_eq!(eval(&NOMINEE_RELATIONSHIP, text), Some("Brother".to_string()));
    }

    #[test]
    fn test_holder_name_at_line_end() {
        assert_eq!(
            eval(&HOLDER_AFTER_INTERMEDIARY, "IN-23512287 / MR. ARPIT SRIVASTAVA\nInsured Address"),
            Some("MR. ARPIT SRIVASTAVA".to_string())
        );
        assert_eq!(
            eval(&HOLDER_INSURED_NAME, "Insured Name: Mr. BIJALE ANTESHWAR VIJAY\n"),
            Some("Mr. BIJALE ANTESHWAR VIJAY".to_string())
        );
    }
}
