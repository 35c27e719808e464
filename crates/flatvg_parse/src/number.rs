//! Parsing and formatting for number values
use crate::{error::Error, Parse, Parser};

impl<'input> Parse<'input> for f64 {
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>> {
        input.skip_whitespace();

        let cursor = input.cursor();
        if let Ok('-' | '+') = input.current() {
            input.advance();
        }
        input.skip_matches(|char| char.is_ascii_digit());
        input.skip_char('.');
        input.skip_matches(|char| char.is_ascii_digit());

        if let Ok('e' | 'E') = input.current() {
            let exponent_start = input.cursor();
            input.advance();
            if let Ok('x' | 'm') = input.current() {
                // `ex` and `em` are units, not exponents
                input.rewind_to(exponent_start);
            } else {
                if let Ok('-' | '+') = input.current() {
                    input.advance();
                }
                let digits = input.take_matches(|char| char.is_ascii_digit());
                if digits.is_empty() {
                    return Err(Error::InvalidNumber);
                }
            }
        }

        let number: f64 = input
            .slice_from(cursor)
            .parse()
            .map_err(|_| Error::InvalidNumber)?;
        if number.is_finite() {
            Ok(number)
        } else {
            Err(Error::InvalidNumber)
        }
    }
}

/// Formats a number into it's shortest round-trippable form, as used in attribute values.
///
/// Integral values are written without a fraction and negative zero is written as `0`.
///
/// ```
/// use flatvg_parse::number::format_number;
///
/// assert_eq!(format_number(20.0), "20");
/// assert_eq!(format_number(-0.5), "-0.5");
/// ```
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return String::from("0");
    }
    let mut s = ryu::Buffer::new().format(n).to_owned();
    if let Some(integer) = s.strip_suffix(".0") {
        s = integer.to_owned();
    }
    s
}

/// Rounds a number to the given count of decimal places
pub fn round_to(n: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (n * factor).round() / factor
}

#[test]
fn float() {
    assert_eq!(f64::parse_string("0"), Ok(0.0));
    assert_eq!(f64::parse_string("1"), Ok(1.0));
    assert_eq!(f64::parse_string("-1"), Ok(-1.0));
    assert_eq!(f64::parse_string(" -1 "), Ok(-1.0));
    assert_eq!(f64::parse_string(".4"), Ok(0.4));
    assert_eq!(f64::parse_string("-.4"), Ok(-0.4));
    assert_eq!(f64::parse_string("123456.123456"), Ok(123_456.123_456));
    assert_eq!(f64::parse_string("+10"), Ok(10.0));
    assert_eq!(f64::parse_string("1e2"), Ok(100.0));
    assert_eq!(f64::parse_string("1e+2"), Ok(100.0));
    assert_eq!(f64::parse_string("1E2"), Ok(100.0));
    assert_eq!(f64::parse_string("1e-2"), Ok(0.01));
    assert_eq!(f64::parse_string("0."), Ok(0.0));
    assert_eq!(f64::parse_string("1.3e-2"), Ok(0.013));

    assert_eq!(f64::parse_string("-.4text"), Err(Error::ExpectedDone));
    assert_eq!(f64::parse_string("-.01 4"), Err(Error::ExpectedDone));
    assert_eq!(f64::parse_string("1ex"), Err(Error::ExpectedDone));
    assert_eq!(f64::parse_string("1em"), Err(Error::ExpectedDone));
    assert_eq!(f64::parse_string("1e"), Err(Error::InvalidNumber));
    assert_eq!(f64::parse_string("--1"), Err(Error::InvalidNumber));
    assert_eq!(f64::parse_string("q"), Err(Error::InvalidNumber));
    assert_eq!(f64::parse_string(""), Err(Error::InvalidNumber));
    assert_eq!(f64::parse_string("-"), Err(Error::InvalidNumber));
    assert_eq!(f64::parse_string("."), Err(Error::InvalidNumber));
    assert_eq!(
        f64::parse_string("99999999e99999999"),
        Err(Error::InvalidNumber)
    );
}

#[test]
fn float_sequence() {
    let mut parser = Parser::new("3-4.5.5");
    assert_eq!(f64::parse(&mut parser), Ok(3.0));
    assert_eq!(f64::parse(&mut parser), Ok(-4.5));
    assert_eq!(f64::parse(&mut parser), Ok(0.5));
    assert!(parser.is_empty());
}

#[test]
fn format() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(10.0), "10");
    assert_eq!(format_number(-2.5), "-2.5");
    assert_eq!(format_number(0.125), "0.125");
    assert_eq!(round_to(45.000_000_4, 6), 45.0);
    assert_eq!(round_to(2.071_067_811_865, 6), 2.071_068);
}
