//! Lists of numbers, such as the `dx` and `dy` attributes of text
use crate::{error::Error, number::format_number, Parse, Parser};

#[derive(Debug, Clone, PartialEq, Default)]
/// A list of numbers separated by whitespace or commas.
///
/// A sign following a digit starts a new number, unless it follows an exponent marker.
///
/// ```
/// use flatvg_parse::{list::NumberList, Parse};
///
/// let list = NumberList::parse_string("1,2 3-4 1e-1").unwrap();
/// assert_eq!(list.0, vec![1.0, 2.0, 3.0, -4.0, 0.1]);
/// ```
pub struct NumberList(pub Vec<f64>);

fn is_separator(char: char) -> bool {
    char.is_whitespace() || char == ','
}

impl<'input> Parse<'input> for NumberList {
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>> {
        let mut numbers = vec![];
        input.skip_matches(is_separator);
        while !input.is_empty() {
            numbers.push(f64::parse(input)?);
            input.skip_matches(is_separator);
        }
        Ok(Self(numbers))
    }
}

impl NumberList {
    /// Multiplies each number of the list by the given factor
    pub fn scale(&mut self, factor: f64) {
        self.0.iter_mut().for_each(|n| *n *= factor);
    }
}

impl std::fmt::Display for NumberList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&format_number(*n))?;
        }
        Ok(())
    }
}

#[test]
fn number_list() {
    assert_eq!(NumberList::parse_string(""), Ok(NumberList(vec![])));
    assert_eq!(
        NumberList::parse_string(" 1 , 2,,3 "),
        Ok(NumberList(vec![1.0, 2.0, 3.0]))
    );
    assert_eq!(
        NumberList::parse_string("1.5e-2-3"),
        Ok(NumberList(vec![0.015, -3.0]))
    );
    assert_eq!(
        NumberList::parse_string("-1-2"),
        Ok(NumberList(vec![-1.0, -2.0]))
    );
    assert!(NumberList::parse_string("1 two").is_err());

    let mut list = NumberList(vec![1.0, -2.5, 0.0]);
    list.scale(2.0);
    assert_eq!(list.to_string(), "2 -5 0");
}
