//! Conversion from upstream member records to the client shape.

use super::types::{ApiMember, Member};

/// Convert an upstream record into a client record.
///
/// Returns `None` unless the member is currently serving, meaning the last
/// entry of the term list (in list order) has no end year.
#[must_use]
pub fn normalize(api_member: &ApiMember) -> Option<Member> {
    let last_term = api_member.terms.item.last()?;
    if last_term.end_year.is_some() {
        return None;
    }

    let (first_name, last_name) = split_name(&api_member.name);

    Some(Member {
        id: api_member.bioguide_id.clone(),
        first_name,
        last_name,
        party: party_label(&api_member.party),
        district: district_label(api_member.district, &last_term.chamber),
    })
}

/// Split "Last, First Middle" into `(first, last)`.
///
/// Without a comma the whole name is treated as the last name.
#[must_use]
pub fn split_name(name: &str) -> (String, String) {
    match name.split_once(',') {
        Some((last, rest)) => {
            let first = rest.split_whitespace().next().unwrap_or_default();
            (first.to_string(), last.trim().to_string())
        }
        None => (String::new(), name.trim().to_string()),
    }
}

#[must_use]
pub fn party_label(party: &str) -> String {
    let abbreviation = match party {
        "" => return String::new(),
        "Democratic" => "D",
        "Republican" => "R",
        "Independent" => "I",
        "Libertarian" => "L",
        "Green" => "G",
        other => other,
    };
    format!("({abbreviation})")
}

#[must_use]
pub fn district_label(district: u32, chamber: &str) -> String {
    match district {
        0 if chamber.eq_ignore_ascii_case("Senate") => "Senator".to_string(),
        0 => "At-Large Rep.".to_string(),
        n => format!("District {n} Rep."),
    }
}
