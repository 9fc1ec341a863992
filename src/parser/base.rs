use log::trace;
use scraper::{ElementRef, Node};

/// Runs a fallible accessor for one output column and degrades a miss to an
/// empty string.
///
/// Every field accessor goes through here so that a missing node, a missing
/// attribute or an unexpected shape only ever blanks its own column.
pub fn field<F>(name: &str, accessor: F) -> String
where
    F: FnOnce() -> Option<String>,
{
    accessor().unwrap_or_else(|| {
        trace!("Field `{}` not found in document, using default", name);
        String::new()
    })
}

/// Concatenated, trimmed text of an element and its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of each direct child of `element`, text nodes and elements alike.
pub fn child_texts(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(text.trim().to_string()),
            Node::Element(_) => ElementRef::wrap(node).map(element_text),
            _ => None,
        })
        .collect()
}

/// First element sibling following `element`, skipping text and comments.
pub fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// A word is any run of alphabetic characters, so `"they're"` becomes
/// `"They'Re"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// The `index`-th whitespace separated token, or an empty string.
pub fn nth_token(value: &str, index: usize) -> String {
    value
        .split_whitespace()
        .nth(index)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_field_defaults_to_empty() {
        assert_eq!(field("missing", || None), "");
        assert_eq!(field("present", || Some("x".to_string())), "x");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("PAIN RELIEF"), "Pain Relief");
        assert_eq!(title_case("allopathy"), "Allopathy");
        assert_eq!(title_case("they're 2x-strong"), "They'Re 2X-Strong");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_nth_token() {
        assert_eq!(nth_token("strip of 15 tablets", 1), "of");
        assert_eq!(nth_token("Dolo 650 Tablet", 0), "Dolo");
        assert_eq!(nth_token("single", 1), "");
        assert_eq!(nth_token("", 0), "");
    }

    #[test]
    fn test_next_element_skips_text_nodes() {
        let doc = Html::parse_fragment("<div><h2>Heading</h2>\n  some text <p>Body</p></div>");
        let heading = doc
            .select(&Selector::parse("h2").unwrap())
            .next()
            .unwrap();
        let next = next_element(heading).unwrap();
        assert_eq!(next.value().name(), "p");
        assert_eq!(element_text(next), "Body");
    }

    #[test]
    fn test_child_texts_covers_text_and_elements() {
        let doc = Html::parse_fragment("<div id=\"w\">Alcohol<span>UNSAFE</span><!-- c --></div>");
        let div = doc
            .select(&Selector::parse("#w").unwrap())
            .next()
            .unwrap();
        assert_eq!(child_texts(div), vec!["Alcohol".to_string(), "UNSAFE".to_string()]);
    }
}
