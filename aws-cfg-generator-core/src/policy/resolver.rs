//! Extraction of assumable role ARNs from a single policy document

use log::debug;

use super::{PolicyDocument, PolicyDocumentError};

/// Decode a policy document as IAM returns it (percent-encoded JSON) and
/// collect the roles it allows assuming.
pub fn resolve_encoded_policy(encoded: &str) -> Result<Vec<String>, PolicyDocumentError> {
    check_escapes(encoded)?;
    let decoded = percent_encoding::percent_decode_str(encoded).decode_utf8()?;
    resolve_policy_document(&decoded)
}

/// `percent_decode_str` passes malformed escapes through, so every `%` must
/// be followed by two hex digits.
fn check_escapes(encoded: &str) -> Result<(), PolicyDocumentError> {
    let bytes = encoded.as_bytes();
    for (position, _) in encoded.match_indices('%') {
        let valid = bytes
            .get(position + 1..position + 3)
            .is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(PolicyDocumentError::InvalidEscape { position });
        }
    }
    Ok(())
}

/// Collect the `Resource` entries of every statement that allows `sts:AssumeRole`.
///
/// Order follows the statements, then the resources inside each statement.
/// Duplicates are kept and no ARN validation happens here.
pub fn resolve_policy_document(json: &str) -> Result<Vec<String>, PolicyDocumentError> {
    let document: PolicyDocument = serde_json::from_str(json)?;

    let mut roles = Vec::new();
    for statement in document.statement.iter() {
        if !statement.allows_assume_role() {
            continue;
        }
        if statement.effect.is_none() {
            debug!("statement without Effect treated as Allow");
        }
        for resource in statement.resource.iter().flat_map(|r| r.iter()) {
            debug!("found assumable role {}", resource);
            roles.push(resource.clone());
        }
    }

    Ok(roles)
}
