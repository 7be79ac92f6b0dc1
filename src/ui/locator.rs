use std::fmt;

/// A Playwright selector, built up from chained segments (`a >> b`).
///
/// Locators are plain values: nothing touches the page until one is handed
/// to a [`Browser`](super::driver::Browser) method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    segments: Vec<String>,
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator {
            segments: vec![selector.into()],
        }
    }

    /// ARIA role selector, with an optional case-insensitive name pattern:
    /// `role=link[name=/categories/i]`.
    pub fn role(role: &str, name: Option<&str>) -> Self {
        let selector = match name {
            Some(name) => format!("role={role}[name=/{}/i]", escape_regex(name)),
            None => format!("role={role}"),
        };
        Locator::css(selector)
    }

    /// Elements whose text contains `text`, ignoring case.
    pub fn text(text: &str) -> Self {
        Locator::css(format!("text={text}"))
    }

    /// Narrow the last segment to elements containing `text`. Only meaningful
    /// on CSS segments; selector lists are grouped with `:is()` first.
    pub fn has_text(mut self, text: &str) -> Self {
        if let Some(last) = self.segments.last_mut() {
            *last = format!(":is({last}):has-text({})", quote(text));
        }
        self
    }

    /// Descendants of this locator matching `selector`.
    pub fn locate(&self, selector: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(selector.into());
        Locator { segments }
    }

    pub fn nth(&self, index: i32) -> Self {
        self.locate(format!("nth={index}"))
    }

    pub fn first(&self) -> Self {
        self.nth(0)
    }

    pub fn last(&self) -> Self {
        self.nth(-1)
    }

    /// The selector string sent to Playwright.
    pub fn selector(&self) -> String {
        self.segments.join(" >> ")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn escape_regex(text: &str) -> String {
    regex::escape(text).replace('/', "\\/")
}
