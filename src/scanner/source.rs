use url::Url;

const STRIPPED_PREFIXES: &[&str] = &["www.", "m.", "mobile."];

/// Display name of the retailer behind `url`, e.g. `https://www.amazon.in/dp/x`
/// becomes `Amazon`. `None` when the URL has no usable host.
pub fn source_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    domain_label(host)
}

/// Same as [`source_name`] for a bare domain such as `flipkart.com`.
pub fn domain_label(domain: &str) -> Option<String> {
    let mut host = domain.trim().trim_end_matches('.').to_lowercase();
    while let Some(prefix) = STRIPPED_PREFIXES.iter().find(|p| host.starts_with(**p)) {
        host = host[prefix.len()..].to_string();
    }

    let label = host.split('.').next().filter(|l| !l.is_empty())?;
    Some(capitalize(label))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_name_strips_www() {
        assert_eq!(
            source_name("https://www.amazon.in/dp/B0ABC"),
            Some("Amazon".to_string())
        );
    }

    #[test]
    fn test_source_name_strips_mobile_prefixes() {
        assert_eq!(
            source_name("https://m.snapdeal.com/product/1"),
            Some("Snapdeal".to_string())
        );
        assert_eq!(
            source_name("http://mobile.tatacliq.com/p"),
            Some("Tatacliq".to_string())
        );
    }

    #[test]
    fn test_source_name_bare_domain() {
        assert_eq!(
            source_name("https://flipkart.com/shoes"),
            Some("Flipkart".to_string())
        );
    }

    #[test]
    fn test_source_name_rejects_garbage() {
        assert_eq!(source_name("not a url"), None);
        assert_eq!(source_name(""), None);
    }

    #[test]
    fn test_domain_label() {
        assert_eq!(domain_label("WWW.Myntra.com"), Some("Myntra".to_string()));
        assert_eq!(domain_label(""), None);
    }
}
