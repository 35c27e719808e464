/*!
A streaming XML writer, based on the [xmlwriter](https://docs.rs/xmlwriter/latest/xmlwriter/index.html)
crate with some modifications.

- Errors instead of panicking
- Writes processing instructions anywhere before the document element
- Text can be written verbatim within elements with mixed content

### Example

```rust
use flatvg_ast::xmlwriter::*;

fn main() -> Result {
    let opt = Options {
        use_single_quote: true,
        ..Options::default()
    };

    let mut w = XmlWriter::new(Vec::<u8>::new(), opt);
    w.start_element("svg")?;
    w.write_attribute("xmlns", "http://www.w3.org/2000/svg")?;
    w.start_element("path")?;
    w.write_attribute("d", "M0 0 C0 0 10 0 10 0")?;
    w.end_element()?;

    assert_eq!(
        String::from_utf8(w.end_document()?).unwrap(),
"<svg xmlns='http://www.w3.org/2000/svg'>
    <path d='M0 0 C0 0 10 0 10 0'/>
</svg>
"
    );
    Ok(())
}
```
*/
use std::{
    fmt::{self, Display},
    io::{self, Write},
    result,
    str::FromStr,
};

/// A result from serializing a document.
pub type Result = result::Result<(), Error>;

/// An error while serializing a document.
#[derive(Debug)]
pub enum Error {
    /// An error while running an io operation.
    IO(io::Error),
    /// An error after writing to string.
    UTF8(std::string::FromUtf8Error),
    /// Attempted to write attribute before `start_element()` or after the element's content.
    AttributeWrittenBeforeElement,
    /// Attempted to write text before `start_element()`.
    TextBeforeElement,
}

/// An XML node indention.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Indent {
    /// Disable indention and new lines.
    None,
    /// Indent with spaces. Preferred range is 0..4.
    Spaces(u8),
    /// Indent with tabs.
    Tabs,
}

/// An XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// # Examples
    ///
    /// `Indent::None`
    /// Before:
    ///
    /// ```text
    /// <svg>
    ///     <rect fill="red"/>
    /// </svg>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <svg><rect fill="red"/></svg>
    /// ```
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Write self-closing tags when element is empty.
    ///
    /// Default: enabled
    pub enable_self_closing: bool,
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Options {
            use_single_quote: false,
            indent: Indent::Spaces(4),
            enable_self_closing: true,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum State {
    Empty,
    Document,
    Attributes,
}

#[derive(Clone, Debug)]
struct DepthData {
    element_name: String,
    has_children: bool,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Escape {
    AttributeValue,
    Text,
}

/// An XML writer.
#[derive(Clone, Debug)]
pub struct XmlWriter<W: Write> {
    writer: W,
    state: State,
    preserve_whitespaces: bool,
    depth_stack: Vec<DepthData>,
    opt: Options,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a new `XmlWriter`, writing data in the writer.
    #[inline]
    pub fn new(writer: W, opt: Options) -> Self {
        XmlWriter {
            writer,
            state: State::Empty,
            preserve_whitespaces: false,
            depth_stack: Vec::new(),
            opt,
        }
    }

    /// Writes a processing instruction, such as `<?xml-stylesheet href="a.css"?>`
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_processing_instruction(&mut self, target: &str, value: Option<&str>) -> Result {
        self.write_node_start()?;
        self.write_raw(b"<?")?;
        self.write_raw(target.as_bytes())?;
        if let Some(value) = value {
            self.write_raw(b" ")?;
            self.write_raw(value.as_bytes())?;
        }
        self.write_raw(b"?>")?;
        self.state = State::Document;
        Ok(())
    }

    /// Writes a comment string.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_comment(&mut self, text: &str) -> Result {
        self.write_node_start()?;
        self.write_raw(b"<!--")?;
        self.write_raw(text.as_bytes())?;
        self.write_raw(b"-->")?;
        self.state = State::Document;
        Ok(())
    }

    /// Starts writing a new element.
    ///
    /// This method writes only the `<tag-name` part.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn start_element(&mut self, name: &str) -> Result {
        self.write_node_start()?;
        self.write_raw(b"<")?;
        self.write_raw(name.as_bytes())?;
        self.depth_stack.push(DepthData {
            element_name: name.to_string(),
            has_children: false,
        });
        self.state = State::Attributes;
        Ok(())
    }

    /// Writes an attribute.
    ///
    /// Any occurrence of `&<>` and the quote character in the value will be escaped.
    ///
    /// # Errors
    ///
    /// - When called before `start_element()`.
    /// - When called after the element's content is written.
    pub fn write_attribute<V: Display + ?Sized>(&mut self, name: &str, value: &V) -> Result {
        if self.state != State::Attributes {
            return Err(Error::AttributeWrittenBeforeElement);
        }

        self.write_raw(b" ")?;
        self.write_raw(name.as_bytes())?;
        self.write_raw(b"=")?;
        self.write_quote()?;
        self.write_escaped(&value.to_string(), Escape::AttributeValue)?;
        self.write_quote()
    }

    /// Sets the preserve whitespaces flag.
    ///
    /// - If set, text nodes and elements will be written as is.
    /// - If not set, nodes will be written on new, indented lines.
    ///
    /// Can be set at any moment.
    pub fn set_preserve_whitespaces(&mut self, preserve: bool) {
        self.preserve_whitespaces = preserve;
    }

    /// Whether text nodes are being written as is
    pub fn preserves_whitespaces(&self) -> bool {
        self.preserve_whitespaces
    }

    /// Writes a text node.
    ///
    /// `><&` will be escaped.
    ///
    /// # Errors
    ///
    /// - When called not after `start_element()`.
    pub fn write_text(&mut self, text: &str) -> Result {
        if self.depth_stack.is_empty() {
            return Err(Error::TextBeforeElement);
        }

        self.write_node_start()?;
        self.write_escaped(text, Escape::Text)?;
        self.state = State::Document;
        Ok(())
    }

    /// Closes an open element.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn end_element(&mut self) -> Result {
        if let Some(depth) = self.depth_stack.pop() {
            if depth.has_children || !self.opt.enable_self_closing {
                if !depth.has_children {
                    self.write_raw(b">")?;
                }

                if depth.has_children && !self.preserve_whitespaces {
                    self.write_new_line()?;
                    self.write_node_indent()?;
                }

                self.write_raw(b"</")?;
                self.write_raw(depth.element_name.as_bytes())?;
                self.write_raw(b">")?;
            } else {
                self.write_raw(b"/>")?;
            }
        }

        self.state = State::Document;
        Ok(())
    }

    /// Closes all open elements and returns back the writer.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn end_document(mut self) -> result::Result<W, Error> {
        while !self.depth_stack.is_empty() {
            self.end_element()?;
        }

        if self.state != State::Empty {
            self.write_new_line()?;
        }

        Ok(self.writer)
    }

    /// Closes the parent's start tag and moves to a new, indented line
    fn write_node_start(&mut self) -> Result {
        if self.state == State::Attributes {
            self.write_open_element()?;
        }

        if self.state != State::Empty && !self.preserve_whitespaces {
            self.write_new_line()?;
        }

        if !self.preserve_whitespaces {
            self.write_node_indent()?;
        }
        Ok(())
    }

    // Writes the end of the current opening element, so `>`.
    fn write_open_element(&mut self) -> Result {
        if let Some(depth) = self.depth_stack.last_mut() {
            depth.has_children = true;
            self.writer.write_all(b">").map_err(Error::IO)?;

            self.state = State::Document;
        }
        Ok(())
    }

    fn write_escaped(&mut self, s: &str, escape: Escape) -> Result {
        let escape_quotes = escape == Escape::AttributeValue;
        let mut part_start_pos = 0;
        for (byte_pos, byte) in s.bytes().enumerate() {
            let escaped_char: Option<&[u8]> = match byte {
                b'&' => Some(b"&amp;"),
                b'>' => Some(b"&gt;"),
                b'<' => Some(b"&lt;"),
                b'"' if escape_quotes && !self.opt.use_single_quote => Some(b"&quot;"),
                b'\'' if escape_quotes && self.opt.use_single_quote => Some(b"&apos;"),
                _ => None,
            };
            if let Some(escaped_char) = escaped_char {
                self.write_raw(s[part_start_pos..byte_pos].as_bytes())?;
                self.write_raw(escaped_char)?;
                part_start_pos = byte_pos + 1;
            }
        }
        self.write_raw(s[part_start_pos..].as_bytes())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result {
        self.writer.write_all(bytes).map_err(Error::IO)
    }

    #[inline]
    fn write_quote(&mut self) -> Result {
        let quote = if self.opt.use_single_quote { b'\'' } else { b'"' };
        self.write_raw(&[quote])
    }

    fn write_node_indent(&mut self) -> Result {
        if self.opt.indent == Indent::None || self.preserve_whitespaces {
            return Ok(());
        }

        for _ in 0..self.depth_stack.len() {
            match self.opt.indent {
                Indent::None => {}
                Indent::Spaces(n) => {
                    for _ in 0..n {
                        self.write_raw(b" ")?;
                    }
                }
                Indent::Tabs => self.write_raw(b"\t")?,
            }
        }
        Ok(())
    }

    fn write_new_line(&mut self) -> Result {
        if self.opt.indent != Indent::None && !self.preserve_whitespaces {
            self.write_raw(b"\n")?;
        }
        Ok(())
    }
}

impl FromStr for Indent {
    type Err = String;

    /// Parses `none`, `tabs`, or a number of spaces
    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "tabs" => Ok(Self::Tabs),
            _ => s
                .parse()
                .map(Self::Spaces)
                .map_err(|_| format!("expected `none`, `tabs`, or a number of spaces, found `{s}`")),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO(err) => err.fmt(f),
            Self::UTF8(err) => err.fmt(f),
            Self::AttributeWrittenBeforeElement => {
                "Attempted to write attribute before `start_element()` or after it's content."
                    .fmt(f)
            }
            Self::TextBeforeElement => "Attempted to write text before `start_element()`.".fmt(f),
        }
    }
}
impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    fn finish(w: XmlWriter<Vec<u8>>) -> String {
        String::from_utf8(w.end_document().unwrap()).unwrap()
    }

    #[test]
    fn nesting() {
        let mut w = XmlWriter::new(vec![], Options::default());
        w.start_element("svg").unwrap();
        w.start_element("g").unwrap();
        w.start_element("rect").unwrap();
        assert_eq!(finish(w), "<svg>\n    <g>\n        <rect/>\n    </g>\n</svg>\n");
    }

    #[test]
    fn escaping() {
        let mut w = XmlWriter::new(vec![], Options::default());
        w.start_element("text").unwrap();
        w.write_attribute("data-x", "a\"b&c").unwrap();
        w.set_preserve_whitespaces(true);
        w.write_text("1 < 2").unwrap();
        w.end_element().unwrap();
        w.set_preserve_whitespaces(false);
        assert_eq!(finish(w), "<text data-x=\"a&quot;b&amp;c\">1 &lt; 2</text>\n");
    }

    #[test]
    fn attribute_after_content() {
        let mut w = XmlWriter::new(vec![], Options::default());
        w.start_element("svg").unwrap();
        w.start_element("g").unwrap();
        w.end_element().unwrap();
        assert!(matches!(
            w.write_attribute("x", "1"),
            Err(Error::AttributeWrittenBeforeElement)
        ));
    }

    #[test]
    fn indent() {
        assert_eq!("none".parse::<Indent>(), Ok(Indent::None));
        assert_eq!("tabs".parse::<Indent>(), Ok(Indent::Tabs));
        assert_eq!("2".parse::<Indent>(), Ok(Indent::Spaces(2)));
        assert!("two".parse::<Indent>().is_err());

        let mut w = XmlWriter::new(
            vec![],
            Options {
                indent: Indent::None,
                ..Options::default()
            },
        );
        w.start_element("svg").unwrap();
        w.start_element("g").unwrap();
        assert_eq!(finish(w), "<svg><g/></svg>");
    }
}
