//! flatvg path is a library used for parsing and rewriting SVG path data.
//!
//! Use the [Path](Path) struct for parsing and serializing, with the [`Parse`] trait.
//! It is made up of individual command [Data](command::Data).
//!
//! To apply an arbitrary affine transform, convert the path to a [`CubicPath`] with
//! [`Path::to_cubic`]. Every segment of a cubic path is a cubic Bézier curve, so mapping the
//! points of each segment through the transform gives an exact result.
//!
//! ```
//! use flatvg_parse::{transform::Matrix, Parse};
//! use flatvg_path::Path;
//!
//! let path = Path::parse_string("M 0 0 h 10").unwrap();
//! let mut cubic = path.to_cubic();
//! cubic.transform(&Matrix::scale(2.0, 2.0));
//! assert_eq!(Path::from(cubic).to_string(), "M0 0 C0 0 20 0 20 0");
//! ```
pub mod absolute;
pub mod command;
pub mod cubic;
pub mod parser;

pub use cubic::{CubicPath, Subpath};
pub use flatvg_parse::error::{Error, PathError};
pub use flatvg_parse::Parse;

#[derive(Debug, Clone, PartialEq, Default)]
/// A path is a set of commands
pub struct Path(pub Vec<command::Data>);

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, command) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            command.fmt(f)?;
        }
        Ok(())
    }
}

impl From<Path> for String {
    fn from(value: Path) -> Self {
        format!("{value}")
    }
}

#[test]
fn test_path_display() {
    let path = Path::parse_string("M 10,50 C 20,30 40,50 60,70 10,20 30,40 50,60 z").unwrap();
    assert_eq!(
        path.to_string(),
        "M10 50 C20 30 40 50 60 70 10 20 30 40 50 60 Z"
    );
    assert_eq!(Path::default().to_string(), "");
}
