pub mod numeric;

use scraper::{ElementRef, Html, Selector};

use crate::db::CountryRecord;

/// How the candidate list was located. With the container selector each
/// candidate wraps the four field elements; with the heading fallback the
/// candidate *is* the name element.
#[derive(Clone, Copy)]
enum Anchor {
    Container,
    NameHeading,
}

struct FieldSelectors {
    name: Selector,
    capital: Selector,
    population: Selector,
    area: Selector,
}

impl FieldSelectors {
    fn new() -> Self {
        Self {
            name: Selector::parse(".country-name").unwrap(),
            capital: Selector::parse(".country-capital").unwrap(),
            population: Selector::parse(".country-population").unwrap(),
            area: Selector::parse(".country-area").unwrap(),
        }
    }
}

/// Extract up to `limit` country records in document order. Returns an
/// empty vec only when neither selector matches anything.
pub fn extract_countries(html: &str, limit: usize) -> Vec<CountryRecord> {
    let doc = Html::parse_document(html);
    let (candidates, anchor) = find_candidates(&doc);
    let fields = FieldSelectors::new();

    candidates
        .into_iter()
        .take(limit)
        .map(|card| extract_one(card, anchor, &fields))
        .collect()
}

fn find_candidates(doc: &Html) -> (Vec<ElementRef<'_>>, Anchor) {
    let container = Selector::parse("div.country").unwrap();
    let found: Vec<_> = doc.select(&container).collect();
    if !found.is_empty() {
        return (found, Anchor::Container);
    }
    let heading = Selector::parse("h3.country-name").unwrap();
    (doc.select(&heading).collect(), Anchor::NameHeading)
}

fn extract_one(card: ElementRef<'_>, anchor: Anchor, fields: &FieldSelectors) -> CountryRecord {
    // Sub-lookups only match descendants, so a fallback heading never
    // finds itself; its own text is the name.
    let name = field_text(card, &fields.name).or_else(|| match anchor {
        Anchor::NameHeading => non_empty(element_text(card)),
        Anchor::Container => None,
    });

    CountryRecord {
        country_name: name.unwrap_or_default(),
        capital: field_text(card, &fields.capital),
        population: field_text(card, &fields.population)
            .and_then(|t| numeric::normalize(Some(&t))),
        area: field_text(card, &fields.area).and_then(|t| numeric::normalize(Some(&t))),
    }
}

fn field_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .and_then(|el| non_empty(element_text(el)))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{name}.html")).unwrap()
    }

    #[test]
    fn countries_page_all_fields() {
        let records = extract_countries(&fixture("countries"), 20);
        assert_eq!(records.len(), 6);

        let andorra = &records[0];
        assert_eq!(andorra.country_name, "Andorra");
        assert_eq!(andorra.capital.as_deref(), Some("Andorra la Vella"));
        assert_eq!(andorra.population, Some(84_000));
        assert_eq!(andorra.area, Some(468));
    }

    #[test]
    fn document_order_preserved() {
        let records = extract_countries(&fixture("countries"), 20);
        let names: Vec<&str> = records.iter().map(|r| r.country_name.as_str()).collect();
        assert_eq!(
            names,
            ["Andorra", "United Arab Emirates", "Afghanistan", "Antigua and Barbuda", "Anguilla", "Albania"]
        );
    }

    #[test]
    fn limit_caps_candidates() {
        let records = extract_countries(&fixture("countries"), 4);
        assert_eq!(records.len(), 4);
        assert_eq!(records[3].country_name, "Antigua and Barbuda");
    }

    #[test]
    fn zero_records_when_nothing_matches() {
        let records = extract_countries(&fixture("no_countries"), 20);
        assert!(records.is_empty());
    }

    #[test]
    fn heading_fallback_uses_own_text() {
        let html = r#"
            <html><body>
                <h3 class="country-name">Andorra</h3>
                <h3 class="country-name">Albania</h3>
            </body></html>
        "#;
        let records = extract_countries(html, 20);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country_name, "Andorra");
        assert_eq!(records[0].capital, None);
        assert_eq!(records[0].population, None);
        assert_eq!(records[1].country_name, "Albania");
    }

    #[test]
    fn empty_card_yields_default_record() {
        let html = r#"<div class="country"></div>"#;
        let records = extract_countries(html, 20);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country_name, "");
        assert_eq!(records[0].capital, None);
        assert_eq!(records[0].population, None);
        assert_eq!(records[0].area, None);
    }

    #[test]
    fn blank_capital_is_none() {
        let html = r#"
            <div class="country">
                <h3 class="country-name">Nowhere</h3>
                <span class="country-capital">   </span>
                <span class="country-population">N/A</span>
            </div>
        "#;
        let records = extract_countries(html, 20);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country_name, "Nowhere");
        assert_eq!(records[0].capital, None);
        assert_eq!(records[0].population, None);
    }

    #[test]
    fn name_markup_noise_is_trimmed() {
        // The live page nests a flag icon inside the heading.
        let html = r#"
            <div class="country">
                <h3 class="country-name"><i class="flag-icon flag-icon-ad"></i>
                    Andorra
                </h3>
            </div>
        "#;
        let records = extract_countries(html, 20);
        assert_eq!(records[0].country_name, "Andorra");
    }
}
