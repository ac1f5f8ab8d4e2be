//! MTA-STS policy document parsing (RFC 8461 section 3.2).

use super::types::PolicyFields;

/// Parses a policy body of `key: value` lines.
///
/// Keys are matched case-sensitively as the RFC requires. Unknown keys, lines
/// without a colon and unparsable `max_age` values are ignored. `mx` may repeat.
pub fn parse_policy(body: &str) -> PolicyFields {
    let mut fields = PolicyFields::default();

    for line in body.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "version" => fields.version = Some(value.to_string()),
            "mode" => fields.mode = Some(value.to_string()),
            "max_age" => {
                if let Ok(max_age) = value.parse::<u64>() {
                    fields.max_age = Some(max_age);
                }
            }
            "mx" if !value.is_empty() => fields.mx.push(value.to_string()),
            _ => {}
        }
    }

    fields
}
