//! Fixed table of jurisdiction codes and the names Congress.gov uses for them.

use super::types::Jurisdiction;

const fn j(code: &'static str, name: &'static str) -> Jurisdiction {
    Jurisdiction { code, name }
}

/// The 50 states plus the District of Columbia.
pub const JURISDICTIONS: &[Jurisdiction] = &[
    j("AL", "Alabama"),
    j("AK", "Alaska"),
    j("AZ", "Arizona"),
    j("AR", "Arkansas"),
    j("CA", "California"),
    j("CO", "Colorado"),
    j("CT", "Connecticut"),
    j("DE", "Delaware"),
    j("FL", "Florida"),
    j("GA", "Georgia"),
    j("HI", "Hawaii"),
    j("ID", "Idaho"),
    j("IL", "Illinois"),
    j("IN", "Indiana"),
    j("IA", "Iowa"),
    j("KS", "Kansas"),
    j("KY", "Kentucky"),
    j("LA", "Louisiana"),
    j("ME", "Maine"),
    j("MD", "Maryland"),
    j("MA", "Massachusetts"),
    j("MI", "Michigan"),
    j("MN", "Minnesota"),
    j("MS", "Mississippi"),
    j("MO", "Missouri"),
    j("MT", "Montana"),
    j("NE", "Nebraska"),
    j("NV", "Nevada"),
    j("NH", "New Hampshire"),
    j("NJ", "New Jersey"),
    j("NM", "New Mexico"),
    j("NY", "New York"),
    j("NC", "North Carolina"),
    j("ND", "North Dakota"),
    j("OH", "Ohio"),
    j("OK", "Oklahoma"),
    j("OR", "Oregon"),
    j("PA", "Pennsylvania"),
    j("RI", "Rhode Island"),
    j("SC", "South Carolina"),
    j("SD", "South Dakota"),
    j("TN", "Tennessee"),
    j("TX", "Texas"),
    j("UT", "Utah"),
    j("VT", "Vermont"),
    j("VA", "Virginia"),
    j("WA", "Washington"),
    j("WV", "West Virginia"),
    j("WI", "Wisconsin"),
    j("WY", "Wyoming"),
    j("DC", "District of Columbia"),
];

/// Trim and upper-case a raw jurisdiction code.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Look up a jurisdiction by code, case-insensitively.
#[must_use]
pub fn find(code: &str) -> Option<&'static Jurisdiction> {
    let code = normalize_code(code);
    JURISDICTIONS.iter().find(|j| j.code == code)
}
