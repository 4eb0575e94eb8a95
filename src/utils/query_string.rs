use urlencoding::encode;

/// Build a query string from key-value pairs.
pub fn build_query_string(pairs: &[(&str, String)]) -> String {
    let mut first = true;
    let mut out = String::new();
    for (k, v) in pairs {
        if !first {
            out.push('&');
        } else {
            first = false;
        }
        out.push_str(&encode(k));
        out.push('=');
        out.push_str(&encode(v));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::build_query_string;

    #[test]
    fn test_build_query_string() {
        let q = build_query_string(&[("page", "2".into()), ("ns", "a b".into())]);
        assert_eq!(q, "page=2&ns=a%20b");
        assert_eq!(build_query_string(&[]), "");
    }
}
