//! Declarations of the `style` attribute

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// An ordered mapping of property names to values, as declared in a `style` attribute.
///
/// Serializing preserves the order properties were declared in.
///
/// ```
/// use flatvg_parse::style::StyleMap;
///
/// let mut style = StyleMap::parse("fill: red; stroke-width: 2px");
/// style.set("stroke-width", "4");
/// assert_eq!(style.to_string(), "fill:red;stroke-width:4");
/// ```
pub struct StyleMap(Vec<(String, String)>);

impl StyleMap {
    /// Parses the declarations of a style attribute.
    ///
    /// Values are kept as written, including any quotes, functions, or `!important`.
    /// Declarations that aren't of the form `name: value` are ignored, and later declarations
    /// override earlier ones of the same name.
    pub fn parse(value: &str) -> Self {
        let input = &mut cssparser::ParserInput::new(value);
        let parser = &mut cssparser::Parser::new(input);
        let mut map = Self::default();
        while !parser.is_exhausted() {
            let declaration = parser.parse_until_after::<_, _, ()>(
                cssparser::Delimiter::Semicolon,
                |parser| {
                    let name = parser.expect_ident()?.to_string();
                    parser.expect_colon()?;
                    let start = parser.position();
                    while parser.next().is_ok() {}
                    Ok((name, parser.slice_from(start).trim().to_string()))
                },
            );
            match declaration {
                Ok((name, value)) if !value.is_empty() => map.set(&name, value),
                Ok((name, _)) => log::debug!("ignoring style `{name}` with no value"),
                Err(err) => log::debug!("ignoring invalid style declaration: {:?}", err.kind),
            }
        }
        map
    }

    /// Returns the value of the given property
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets the value of a property, keeping it's position if already declared
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, old)) => *old = value,
            None => self.0.push((name.to_string(), value)),
        }
    }
}

impl std::fmt::Display for StyleMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            f.write_str(name)?;
            f.write_str(":")?;
            f.write_str(value)?;
        }
        Ok(())
    }
}

#[test]
fn style_map() {
    let style = StyleMap::parse(" fill:url(#a) ; ;stroke : none;garbage; stroke:blue;");
    assert_eq!(style.get("fill"), Some("url(#a)"));
    assert_eq!(style.get("stroke"), Some("blue"));
    assert_eq!(style.get("garbage"), None);
    assert_eq!(style.to_string(), "fill:url(#a);stroke:blue");

    let mut style = style;
    style.set("font-size", "12");
    style.set("fill", "none");
    assert_eq!(style.to_string(), "fill:none;stroke:blue;font-size:12");
    assert_eq!(StyleMap::parse("").to_string(), "");
}

#[test]
fn nested_separators() {
    let source = "font-family:'A;B';stroke-width:1;fill:url(data:image/png;base64,AA==)";
    let mut style = StyleMap::parse(source);
    assert_eq!(style.get("font-family"), Some("'A;B'"));
    assert_eq!(style.get("fill"), Some("url(data:image/png;base64,AA==)"));
    assert_eq!(style.to_string(), source);

    style.set("stroke-width", "2");
    assert_eq!(
        style.to_string(),
        "font-family:'A;B';stroke-width:2;fill:url(data:image/png;base64,AA==)"
    );

    let style = StyleMap::parse("/* a; b */ fill: rgb(0, 0, 0) !important; stroke:");
    assert_eq!(style.get("fill"), Some("rgb(0, 0, 0) !important"));
    assert_eq!(style.get("stroke"), None);
}
