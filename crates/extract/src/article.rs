use scraper::{ElementRef, Html, Selector};

/// Elements whose text never belongs to the article body.
const SKIPPED: &[&str] = &[
  "script", "style", "noscript", "template", "nav", "aside", "header", "footer", "form",
  "button", "svg", "iframe",
];

const CONTAINERS: &str = "article, main, [role=main], section, div, td";

/// Title and plain-text body of a web page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
  pub title: String,
  pub text: String,
}

impl Article {
  /// Title followed by body, as one string.
  #[must_use]
  pub fn full_text(&self) -> String {
    format!("{} {}", self.title, self.text)
  }
}

/// Pull the main content out of an HTML page.
///
/// The body is taken from the container holding the most paragraph text
/// directly; pages without paragraphs fall back to all visible body text.
#[must_use]
pub fn extract_article(html: &str) -> Article {
  let document = Html::parse_document(html);

  Article {
    title: title(&document),
    text: body(&document),
  }
}

fn selector(css: &str) -> Selector {
  // Only called with the literal selectors in this module.
  Selector::parse(css).unwrap_or_else(|err| panic!("invalid selector {css:?}: {err}"))
}

fn title(document: &Html) -> String {
  let og_title = selector(r#"meta[property="og:title"]"#);
  if let Some(content) = document
    .select(&og_title)
    .find_map(|meta| meta.value().attr("content"))
    .map(collapse_whitespace)
    .filter(|t| !t.is_empty())
  {
    return content;
  }

  for css in ["title", "h1"] {
    let sel = selector(css);
    if let Some(text) = document
      .select(&sel)
      .map(|el| collapse_whitespace(&el.text().collect::<String>()))
      .find(|t| !t.is_empty())
    {
      return text;
    }
  }

  String::new()
}

fn body(document: &Html) -> String {
  let containers = selector(CONTAINERS);

  let mut best: Option<(usize, ElementRef<'_>)> = None;
  for candidate in document.select(&containers) {
    let score = paragraph_score(candidate);
    if score > 0 && best.is_none_or(|(top, _)| score > top) {
      best = Some((score, candidate));
    }
  }

  match best {
    Some((_, container)) => visible_text(container),
    None => {
      let body = selector("body");
      document
        .select(&body)
        .next()
        .map(visible_text)
        .unwrap_or_default()
    }
  }
}

/// Length of the text in the element's direct `<p>` children.
fn paragraph_score(element: ElementRef<'_>) -> usize {
  element
    .children()
    .filter_map(ElementRef::wrap)
    .filter(|child| child.value().name() == "p")
    .map(|p| visible_text(p).len())
    .sum()
}

fn visible_text(root: ElementRef<'_>) -> String {
  let mut out = String::new();

  for node in root.descendants() {
    let Some(text) = node.value().as_text() else {
      continue;
    };
    let hidden = node
      .ancestors()
      .take_while(|ancestor| ancestor.id() != root.id())
      .filter_map(ElementRef::wrap)
      .any(|ancestor| SKIPPED.contains(&ancestor.value().name()));
    if !hidden {
      out.push_str(text);
      out.push(' ');
    }
  }

  collapse_whitespace(&out)
}

fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
