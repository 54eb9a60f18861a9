use ::scraper::{ElementRef, Html, Node, Selector};
use once_cell::sync::Lazy;

// Preferred content roots, most specific first.
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "article",
        "main",
        "[role='main']",
        "#content",
        "#main",
        ".post-content",
        ".entry-content",
        ".content",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("Failed to parse content selector"))
    .collect()
});

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "svg", "canvas", "nav", "header",
    "footer", "aside", "form", "button", "select", "head",
];

// Matched against whole id/class tokens, or their last `-`/`_` segment.
const BOILERPLATE_MARKERS: &[&str] = &[
    "nav", "navbar", "menu", "sidebar", "footer", "breadcrumb", "breadcrumbs", "advert",
    "ads", "share", "social",
];

const BOILERPLATE_TOKENS: &[&str] = &["cookie-banner", "cookie-notice", "cookie-consent"];

// State modifiers describe the layout around a block, not the block itself.
const MODIFIER_PREFIXES: &[&str] = &["has-", "has_", "is-", "is_", "js-", "js_", "no-", "with-"];
const MODIFIER_SUFFIXES: &[&str] = &["-open", "-active", "-closed", "-visible"];

static PROSE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, h1, h2, h3, h4, h5, h6").expect("Failed to parse prose selector")
});

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul",
    "ol", "dl", "dt", "dd", "blockquote", "pre", "table", "thead", "tbody", "tr", "td", "th",
    "caption", "figure", "figcaption", "address", "hr", "body",
];

/// Extracts the readable body text of an HTML document.
///
/// Navigation, scripts and other page furniture are dropped. Each paragraph
/// of surviving text lands on its own line with whitespace collapsed.
pub fn extract_main_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let preferred = CONTENT_SELECTORS.iter().find_map(|selector| {
        document
            .select(selector)
            .find(|candidate| !inside_boilerplate(*candidate))
    });
    if let Some(root) = preferred {
        if let Some(text) = render(root) {
            return Some(text);
        }
    }

    match document.select(&BODY_SELECTOR).next() {
        Some(body) => render(body),
        None => render(document.root_element()),
    }
}

fn render(root: ElementRef<'_>) -> Option<String> {
    let mut out = Paragraphs::default();
    walk(root, &mut out);
    let text = out.finish();
    (!text.is_empty()).then_some(text)
}

fn walk(element: ElementRef<'_>, out: &mut Paragraphs) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push(text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_boilerplate(child) {
                    continue;
                }
                let name = child.value().name();
                if name == "br" {
                    out.break_paragraph();
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.break_paragraph();
                }
                walk(child, out);
                if block {
                    out.break_paragraph();
                }
            }
            _ => {}
        }
    }
}

fn inside_boilerplate(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(is_boilerplate)
}

fn is_boilerplate(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if SKIPPED_TAGS.contains(&value.name()) {
        return true;
    }
    if value.attr("hidden").is_some() || value.attr("aria-hidden") == Some("true") {
        return true;
    }
    if value.attr("role").is_some_and(|role| role == "navigation") {
        return true;
    }

    // Containers holding paragraphs or headings are page wrappers, whatever
    // their class says.
    let marked = value
        .id()
        .into_iter()
        .chain(value.classes())
        .any(is_boilerplate_name);
    marked && element.select(&PROSE_SELECTOR).next().is_none()
}

fn is_boilerplate_name(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    if BOILERPLATE_TOKENS.contains(&name.as_str()) {
        return true;
    }
    if MODIFIER_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        || MODIFIER_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
    {
        return false;
    }
    let last = name.rsplit(['-', '_']).next().unwrap_or(&name);
    BOILERPLATE_MARKERS.contains(&last)
}

#[derive(Default)]
struct Paragraphs {
    done: Vec<String>,
    current: String,
}

impl Paragraphs {
    fn push(&mut self, text: &str) {
        self.current.push_str(text);
    }

    fn break_paragraph(&mut self) {
        let collapsed = self.current.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            self.done.push(collapsed);
        }
        self.current.clear();
    }

    fn finish(mut self) -> String {
        self.break_paragraph();
        self.done.join("\n")
    }
}
