/// Query for a single policy area, e.g. `"social policies of Acme"`.
///
/// The company name is interpolated as-is.
pub fn build_category_query(company_name: &str, policy_label: &str) -> String {
    format!("{} policies of {}", policy_label, company_name)
}

/// Query covering all three ESG areas at once.
pub fn build_combined_query(company_name: &str) -> String {
    format!(
        "Environmental, Social, Governance (ESG) policies of the {} Company",
        company_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_query() {
        assert_eq!(
            build_category_query("Acme", "ethical governance"),
            "ethical governance policies of Acme"
        );
    }

    #[test]
    fn test_combined_query() {
        assert_eq!(
            build_combined_query("Acme"),
            "Environmental, Social, Governance (ESG) policies of the Acme Company"
        );
    }

    #[test]
    fn test_company_name_is_not_escaped() {
        let query = build_combined_query("  \"Foo\" & {Bar}  ");
        assert!(query.contains("  \"Foo\" & {Bar}  "));
    }
}
