//! String helpers for TypeScript identifiers

/// Uppercase the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `["basicManage", "medicalOrg"]` -> `basicManageMedicalOrg`
pub fn camel_join<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i == 0 {
            joined.push_str(segment);
        } else {
            joined.push_str(&capitalize(segment));
        }
    }
    joined
}

/// Identifier: a letter (any script), `_` or `$`, then letters, digits,
/// `_` or `$`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Property key as written in an interface body
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("medicalOrg"), "MedicalOrg");
        assert_eq!(capitalize("M"), "M");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_camel_join() {
        assert_eq!(camel_join(["basicManage", "medicalOrg"]), "basicManageMedicalOrg");
        assert_eq!(camel_join(["medicalOrg", "list"]), "medicalOrgList");
        assert_eq!(camel_join(["single"]), "single");
        assert_eq!(camel_join(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("orgId"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$ref"));
        assert!(is_identifier("机构信息"));
        assert!(is_identifier("OrgVo机构"));
        assert!(!is_identifier("x-request-id"));
        assert!(!is_identifier("机构 信息"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_property_key_quotes_when_needed() {
        assert_eq!(property_key("orgName"), "orgName");
        assert_eq!(property_key("x-trace-id"), "'x-trace-id'");
        assert_eq!(property_key("it's"), "'it\\'s'");
    }
}
