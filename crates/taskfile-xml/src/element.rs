//! Minimal ordered element tree built by the node builder and serialized by the writers.

/// One XML element with ordered attributes.
///
/// Setting an attribute that already exists replaces its value in place, so
/// attribute order is the order of first insertion. Equality compares
/// content only, not whether the tree has been flattened.
#[derive(Debug, Clone, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    tail: Option<String>,
    children: Vec<Element>,
    flattened: bool,
}

impl Element {
    /// Empty element named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set or replace an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(index).1)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Character data before the first child.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the character data.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Character data following the closing tag, inside the parent.
    #[must_use]
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Replace the character data following the closing tag.
    pub fn set_tail(&mut self, tail: impl Into<String>) {
        self.tail = Some(tail.into());
    }

    /// Child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// First child named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All children named `name`.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Append a child.
    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Append a new empty child and return it.
    pub fn sub_element(&mut self, name: impl Into<String>) -> &mut Self {
        let index = self.children.len();
        self.children.push(Self::new(name));
        &mut self.children[index]
    }

    /// Lay the tree out one element per line, children indented two spaces
    /// per level.
    ///
    /// Non-empty text is wrapped in newlines; readers strip exactly one
    /// leading and one trailing newline. Flattening twice is a no-op, but
    /// children added after flattening are left as they are.
    pub fn flatten(&mut self) {
        if self.flattened {
            return;
        }
        self.layout(0);
        self.tail = Some("\n".to_owned());
    }

    fn layout(&mut self, depth: usize) {
        self.flattened = true;
        match self.text.take() {
            Some(text) if !text.is_empty() => self.text = Some(format!("\n{text}\n")),
            _ if !self.children.is_empty() => self.text = Some(line_break(depth + 1)),
            _ => {}
        }
        let last = self.children.len().saturating_sub(1);
        for (index, child) in self.children.iter_mut().enumerate() {
            child.layout(depth + 1);
            child.tail = Some(line_break(if index == last { depth } else { depth + 1 }));
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.text == other.text
            && self.tail == other.tail
            && self.children == other.children
    }
}

fn line_break(depth: usize) -> String {
    let mut out = String::with_capacity(1 + depth * 2);
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
    out
}
