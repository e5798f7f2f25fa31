//! Cover page block.

use std::collections::BTreeMap;

use crate::config::CoverConfig;

/// Build the cover block for the selected components.
///
/// Components are listed by title in selection order; components without a
/// title are left off the cover. The connector line is placed before the
/// last title whenever more than one title is listed. All lines are markup
/// and may contain placeholders.
pub fn build_cover<S: AsRef<str>>(
    config: &CoverConfig,
    titles: &BTreeMap<String, String>,
    components: &[S],
) -> String {
    let listed: Vec<&str> = components
        .iter()
        .filter_map(|name| titles.get(name.as_ref().trim()))
        .map(String::as_str)
        .collect();

    let mut html = String::from("<div class=\"intro-page\">");
    push_line(&mut html, "cover-company", &config.company_line);
    push_line(&mut html, "cover-heading", &config.heading);

    let count = listed.len();
    for (i, title) in listed.iter().enumerate() {
        push_line(&mut html, "cover-component", title);
        if count > 1 && i == count - 2 {
            push_line(&mut html, "cover-connector", &config.connector);
        }
    }

    push_line(&mut html, "cover-trailer", &config.trailer);
    push_line(&mut html, "cover-date", &config.date_line);
    html.push_str("</div>");
    html
}

fn push_line(html: &mut String, class: &str, content: &str) {
    html.push_str("<div class=\"");
    html.push_str(class);
    html.push_str("\">");
    html.push_str(content);
    html.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssemblyConfig;

    fn cover(components: &[&str]) -> String {
        let config = AssemblyConfig::default();
        build_cover(&config.cover, &config.titles, components)
    }

    fn component_lines(html: &str) -> Vec<&str> {
        html.split("<div class=\"")
            .filter(|part| {
                part.starts_with("cover-component") || part.starts_with("cover-connector")
            })
            .filter_map(|part| part.split_once("\">"))
            .map(|(_, rest)| rest.trim_end_matches("</div>"))
            .collect()
    }

    #[test]
    fn test_single_component() {
        insta::assert_snapshot!(
            cover(&["Pre-Tax Premiums"]),
            @r#"<div class="intro-page"><div class="cover-company">{{company_name|upper}}</div><div class="cover-heading">CAFETERIA PLAN WITH</div><div class="cover-component">PREMIUM PAYMENT ARRANGEMENT</div><div class="cover-trailer">COMPONENTS</div><div class="cover-date">As Amended and Restated {{effective_date}}</div></div>"#
        );
    }

    #[test]
    fn test_two_components_joined() {
        assert_eq!(
            component_lines(&cover(&["Dependent Care Account", "Pre-Tax Premiums"])),
            vec!["DEPENDENT CARE ASSISTANCE PLAN", "AND", "PREMIUM PAYMENT ARRANGEMENT"]
        );
    }

    #[test]
    fn test_connector_precedes_last_title() {
        assert_eq!(
            component_lines(&cover(&[
                "Pre-Tax Premiums",
                "Health Savings Account (HSA)",
                "Dependent Care Account",
            ])),
            vec![
                "PREMIUM PAYMENT ARRANGEMENT",
                "HEALTH SAVINGS ACCOUNT",
                "AND",
                "DEPENDENT CARE ASSISTANCE PLAN",
            ]
        );
    }

    #[test]
    fn test_untitled_components_skipped() {
        assert_eq!(
            component_lines(&cover(&["Commuter Benefits", "Pre-Tax Premiums"])),
            vec!["PREMIUM PAYMENT ARRANGEMENT"]
        );
    }

    #[test]
    fn test_no_components() {
        let html = cover(&[]);
        assert!(component_lines(&html).is_empty());
        assert!(html.contains("CAFETERIA PLAN WITH"));
        assert!(html.contains("COMPONENTS"));
    }
}
