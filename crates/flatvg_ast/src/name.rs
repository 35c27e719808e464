//! Qualified names of elements and attributes

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A name with an optional namespace prefix, such as `xlink:href`
pub struct QualName {
    /// The prefix before the colon, if any
    pub prefix: Option<String>,
    /// The name after the colon
    pub local: String,
}

impl QualName {
    /// Creates a name from an optional prefix and local name
    pub fn new(prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(String::from),
            local: local.to_string(),
        }
    }

    /// Splits a qualified name at it's first colon.
    ///
    /// ```
    /// use flatvg_ast::name::QualName;
    ///
    /// let name = QualName::parse("sodipodi:nodetypes");
    /// assert_eq!(name.prefix.as_deref(), Some("sodipodi"));
    /// assert_eq!(name.local, "nodetypes");
    /// ```
    pub fn parse(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => Self::new(Some(prefix), local),
            None => Self::new(None, name),
        }
    }

    /// Whether the name is equal to the given qualified name string
    pub fn matches(&self, name: &str) -> bool {
        match &self.prefix {
            Some(prefix) => name
                .split_once(':')
                .is_some_and(|(p, l)| p == prefix && l == self.local),
            None => name == self.local,
        }
    }
}

impl std::fmt::Display for QualName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
            f.write_str(":")?;
        }
        f.write_str(&self.local)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An attribute of an element
pub struct Attribute {
    /// The qualified name of the attribute
    pub name: QualName,
    /// The namespace uri the prefix was bound to when parsed
    pub namespace: Option<String>,
    /// The raw value of the attribute
    pub value: String,
}

impl Attribute {
    /// Creates an attribute without a namespace uri
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::parse(name),
            namespace: None,
            value: value.into(),
        }
    }
}

#[test]
fn qual_name() {
    assert!(QualName::parse("xlink:href").matches("xlink:href"));
    assert!(!QualName::parse("xlink:href").matches("href"));
    assert!(QualName::parse("href").matches("href"));
    assert!(!QualName::parse("href").matches("xlink:href"));
    assert_eq!(QualName::new(Some(""), "d").to_string(), "d");
    assert_eq!(QualName::parse("inkscape:label").to_string(), "inkscape:label");
}
