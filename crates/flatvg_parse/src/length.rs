//! Lengths with units and their conversion to user units
use crate::{error::Error, Parse, Parser};

/// User units in a single inch, as defined by CSS
pub const PX_PER_IN: f64 = 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// The unit of a length
pub enum Unit {
    /// A unitless length, equivalent to px
    #[default]
    None,
    /// px
    Px,
    /// pt
    Pt,
    /// pc
    Pc,
    /// mm
    Mm,
    /// cm
    Cm,
    /// in
    In,
    /// Q, a quarter millimetre
    Q,
    /// em, relative to the font size
    Em,
    /// ex, relative to the x-height
    Ex,
    /// %, relative to the viewport or parent
    Percent,
}

impl Unit {
    /// The number of user units that fit within one of this unit.
    ///
    /// # Errors
    ///
    /// If the unit is relative to some layout context
    pub fn px_factor<'a>(self) -> Result<f64, Error<'a>> {
        Ok(match self {
            Self::None | Self::Px => 1.0,
            Self::Pt => PX_PER_IN / 72.0,
            Self::Pc => PX_PER_IN / 6.0,
            Self::Mm => PX_PER_IN / 25.4,
            Self::Cm => PX_PER_IN / 2.54,
            Self::In => PX_PER_IN,
            Self::Q => PX_PER_IN / 101.6,
            Self::Em | Self::Ex | Self::Percent => {
                return Err(Error::UnsupportedUnit(self.as_str()))
            }
        })
    }

    /// Returns the serialized form of the unit
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::In => "in",
            Self::Q => "Q",
            Self::Em => "em",
            Self::Ex => "ex",
            Self::Percent => "%",
        }
    }
}

impl<'input> Parse<'input> for Unit {
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>> {
        if input.current() == Ok('%') {
            input.advance();
            return Ok(Self::Percent);
        }
        let cursor = input.cursor();
        let ident = input.take_matches(|char| char.is_ascii_alphabetic());
        Ok(match ident {
            "" => Self::None,
            "px" => Self::Px,
            "pt" => Self::Pt,
            "pc" => Self::Pc,
            "mm" => Self::Mm,
            "cm" => Self::Cm,
            "in" => Self::In,
            "Q" | "q" => Self::Q,
            "em" => Self::Em,
            "ex" => Self::Ex,
            _ => {
                input.rewind_to(cursor);
                return Err(Error::ExpectedIdent {
                    expected: "a length unit",
                    received: ident,
                });
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// A number followed by an optional unit, such as `12pt`
pub struct Length {
    /// The numeric part of the length
    pub number: f64,
    /// The unit of the length
    pub unit: Unit,
}

impl<'input> Parse<'input> for Length {
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>> {
        let number = f64::parse(input)?;
        let unit = Unit::parse(input)?;
        Ok(Self { number, unit })
    }
}

impl Length {
    /// Converts the length into a number of `reference` units.
    ///
    /// # Errors
    ///
    /// If either unit is relative to some layout context
    pub fn to_user_units<'a>(&self, reference: Unit) -> Result<f64, Error<'a>> {
        Ok(self.number * self.unit.px_factor()? / reference.px_factor()?)
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::number::format_number(self.number))?;
        f.write_str(self.unit.as_str())
    }
}

/// Parses a length and converts it into a number of `reference` units.
///
/// # Errors
///
/// If the value isn't a length, or either unit is relative to some layout context
///
/// ```
/// use flatvg_parse::length::{convert_length, Unit};
///
/// assert_eq!(convert_length("1in", Unit::Px), Ok(96.0));
/// assert_eq!(convert_length("3", Unit::Px), Ok(3.0));
/// assert!(convert_length("50%", Unit::Px).is_err());
/// ```
pub fn convert_length(value: &str, reference: Unit) -> Result<f64, Error<'_>> {
    Length::parse_string(value)?.to_user_units(reference)
}

#[test]
fn length() {
    assert_eq!(
        Length::parse_string("12pt"),
        Ok(Length {
            number: 12.0,
            unit: Unit::Pt
        })
    );
    assert_eq!(
        Length::parse_string(" 2.5 "),
        Ok(Length {
            number: 2.5,
            unit: Unit::None
        })
    );
    assert_eq!(
        Length::parse_string("1em"),
        Ok(Length {
            number: 1.0,
            unit: Unit::Em
        })
    );
    assert!(Length::parse_string("inherit").is_err());
    assert!(Length::parse_string("1 px").is_err());
    assert!(Length::parse_string("1furlong").is_err());
}

#[test]
fn conversion() {
    assert!((convert_length("12pt", Unit::Px).unwrap() - 16.0).abs() < 1e-9);
    assert_eq!(convert_length("2pc", Unit::Px), Ok(32.0));
    assert_eq!(convert_length("96px", Unit::In), Ok(1.0));
    assert!((convert_length("2.54cm", Unit::Px).unwrap() - 96.0).abs() < 1e-9);
    assert!((convert_length("25.4mm", Unit::Px).unwrap() - 96.0).abs() < 1e-9);
    assert_eq!(convert_length("1em", Unit::Px), Err(Error::UnsupportedUnit("em")));
    assert_eq!(convert_length("10%", Unit::Px), Err(Error::UnsupportedUnit("%")));
}
