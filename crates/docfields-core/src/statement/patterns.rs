//! Regex patterns for bank-statement lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Date shapes, tried in this order. Digits are ASCII only.
    pub static ref DATE_SLASH: Regex = Regex::new(
        r"\b(?P<d>[0-9]{1,2})/(?P<m>[0-9]{1,2})/(?P<y>[0-9]{4}|[0-9]{2})\b"
    ).unwrap();

    pub static ref DATE_DASH: Regex = Regex::new(
        r"\b(?P<d>[0-9]{1,2})-(?P<m>[0-9]{1,2})-(?P<y>[0-9]{4}|[0-9]{2})\b"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(?P<d>[0-9]{1,2})[ -]?(?P<mon>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t|tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[ ,-]*(?P<y>[0-9]{4}|[0-9]{2})\b"
    ).unwrap();

    pub static ref DATE_MONTH_NAME_DAY: Regex = Regex::new(
        r"(?i)\b(?P<mon>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t|tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[ -](?P<d>[0-9]{1,2})(?:st|nd|rd|th)?,?[ -](?P<y>[0-9]{4})\b"
    ).unwrap();

    pub static ref DATE_DOTTED: Regex = Regex::new(
        r"\b(?P<d>[0-9]{1,2})\.(?P<m>[0-9]{1,2})\.(?P<y>[0-9]{4}|[0-9]{2})\b"
    ).unwrap();

    // Amount shapes (value in `n`)
    pub static ref AMOUNT_CURRENCY: Regex = Regex::new(
        r"(?i)(?:₹|\bRs\.?|\bINR|\$)\s?(?P<n>[0-9][0-9,]*(?:\.[0-9]{1,2})?)"
    ).unwrap();

    pub static ref AMOUNT_GROUPED: Regex = Regex::new(
        r"\b(?P<n>[0-9]{1,3}(?:,[0-9]{2,3})+(?:\.[0-9]{1,2})?)\b"
    ).unwrap();

    pub static ref AMOUNT_PLAIN: Regex = Regex::new(
        r"\b(?P<n>[0-9]+\.[0-9]{2})\b"
    ).unwrap();

    // Reference shapes (value in `r`)
    pub static ref REF_CHEQUE: Regex = Regex::new(
        r"(?i)\b(?:CHQ|CHEQUE)\.?\s*(?:NO\.?|NUMBER|#)?\s*[:.]?\s*(?P<r>[0-9]{4,})"
    ).unwrap();

    pub static ref REF_UTR: Regex = Regex::new(
        r"(?i)\bUTR\s*(?:NO\.?)?\s*[:.]?\s*(?P<r>[A-Z0-9]{6,})"
    ).unwrap();

    pub static ref REF_LABELED: Regex = Regex::new(
        r"(?i)\bREF(?:ERENCE)?\b\.?\s*(?:NO\.?|#)?\s*[:.]?\s*(?P<r>[A-Z0-9][A-Z0-9/-]{3,})"
    ).unwrap();

    pub static ref REF_CHANNEL: Regex = Regex::new(
        r"(?i)\b(?:NEFT|RTGS|IMPS)[/: -]+(?P<r>[A-Z0-9]{6,})"
    ).unwrap();

    pub static ref REF_LONG_DIGITS: Regex = Regex::new(
        r"\b(?P<r>[0-9]{9,})\b"
    ).unwrap();

    // Debit/credit cues
    pub static ref DR_CR_MARKER: Regex = Regex::new(
        r"(?i)\b(?P<side>DR|CR)\b\.?"
    ).unwrap();

    pub static ref DEBIT_WORDS: Regex = Regex::new(
        r"(?i)\b(?:DEBIT|WITHDRAWAL|WDL|PAYMENT)\b"
    ).unwrap();

    pub static ref CREDIT_WORDS: Regex = Regex::new(
        r"(?i)\b(?:CREDIT|DEPOSIT|RECEIPT)\b"
    ).unwrap();

    // Description keywords used for single uncued amounts
    pub static ref CREDIT_HINTS: Regex = Regex::new(
        r"(?i)\b(?:SALARY|INTEREST|REFUND|CASHBACK|REVERSAL)\b|^BY\b"
    ).unwrap();

    pub static ref DEBIT_HINTS: Regex = Regex::new(
        r"(?i)\b(?:ATM|POS|CHARGES?|FEES?|EMI|BILL|PURCHASE)\b|^TO\b"
    ).unwrap();

    // Totals and carried balances
    pub static ref SUMMARY_ROW: Regex = Regex::new(
        r"(?i)\b(?:TOTAL|OPENING\s+BALANCE|CLOSING\s+BALANCE|BROUGHT\s+FORWARD|CARRIED\s+FORWARD)\b|\b[BC]/F\b"
    ).unwrap();

    // Characters dropped from descriptions
    pub static ref DESCRIPTION_DISALLOWED: Regex = Regex::new(
        r"[^\w\s/&.,'()@#:-]"
    ).unwrap();
}

/// Date patterns in priority order.
pub fn date_patterns() -> [&'static Regex; 5] {
    [
        &DATE_SLASH,
        &DATE_DASH,
        &DATE_DAY_MONTH_NAME,
        &DATE_MONTH_NAME_DAY,
        &DATE_DOTTED,
    ]
}

/// Amount patterns in priority order.
pub fn amount_patterns() -> [&'static Regex; 3] {
    [&AMOUNT_CURRENCY, &AMOUNT_GROUPED, &AMOUNT_PLAIN]
}

/// Reference patterns in priority order, each with whether its label is
/// removed from the description along with the number.
pub fn reference_patterns() -> [(&'static Regex, bool); 5] {
    [
        (&REF_CHEQUE, true),
        (&REF_UTR, true),
        (&REF_LABELED, true),
        (&REF_CHANNEL, false),
        (&REF_LONG_DIGITS, true),
    ]
}
