//! Identifier case conversions.
//!
//! Inputs are protobuf-style identifiers: `snake_case` field names and
//! `UpperCamel` method names, occasionally mixed.

/// `PageSize` / `pageSize` / `page_size` -> `page_size`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = true;
        }
    }
    out
}

/// `page_size` / `pageSize` -> `PageSize`.
pub fn to_upper_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `page_size` / `PageSize` -> `pageSize`.
pub fn to_lower_camel(name: &str) -> String {
    let camel = to_upper_camel(name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => camel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snake_case_from_camel() {
        assert_eq!(to_snake_case("PageSize"), "page_size");
        assert_eq!(to_snake_case("pageSize"), "page_size");
        assert_eq!(to_snake_case("page_size"), "page_size");
        assert_eq!(to_snake_case("Echo"), "echo");
    }

    #[test]
    fn snake_case_keeps_acronym_runs_together() {
        assert_eq!(to_snake_case("RPCStatus"), "rpcstatus");
        assert_eq!(to_snake_case("getHTTP"), "get_http");
    }

    #[test]
    fn upper_camel_from_snake() {
        assert_eq!(to_upper_camel("page_size"), "PageSize");
        assert_eq!(to_upper_camel("pageSize"), "PageSize");
        assert_eq!(to_upper_camel("name"), "Name");
    }

    #[test]
    fn lower_camel_from_both() {
        assert_eq!(to_lower_camel("page_size"), "pageSize");
        assert_eq!(to_lower_camel("PageSize"), "pageSize");
        assert_eq!(to_lower_camel(""), "");
    }
}
