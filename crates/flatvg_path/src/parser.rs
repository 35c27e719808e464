//! Parsing of path data into commands
use flatvg_parse::{
    error::{Error, PathError},
    Parse, Parser,
};

use crate::{command, Path};

fn is_command(char: char) -> bool {
    command::ID::try_from(char).is_ok()
}

/// Reads a single arc flag, which may be written without a separator before the next argument
fn parse_flag<'input>(input: &mut Parser<'input>) -> Result<f64, Error<'input>> {
    match input.current() {
        Ok('0') => {
            input.advance();
            Ok(0.0)
        }
        Ok('1') => {
            input.advance();
            Ok(1.0)
        }
        _ => Err(Error::Path(PathError::InvalidArcFlag)),
    }
}

fn parse_args<'input>(
    input: &mut Parser<'input>,
    id: &command::ID,
) -> Result<[f64; 7], Error<'input>> {
    let mut args = [0.0; 7];
    let is_arc = id.is_arc();
    for (i, arg) in args.iter_mut().take(id.args()).enumerate() {
        if i > 0 {
            input.skip_comma_and_whitespace();
        }
        if input.current().map_or(true, is_command) {
            return Err(Error::Path(PathError::MissingArguments(id.into())));
        }
        *arg = if is_arc && (i == 3 || i == 4) {
            parse_flag(input)?
        } else {
            f64::parse(input)?
        };
    }
    Ok(args)
}

impl<'input> Parse<'input> for Path {
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>> {
        let mut data = vec![];
        let mut current: Option<command::ID> = None;
        loop {
            input.skip_whitespace();
            if input.is_empty() {
                break;
            }
            let id = if let Ok(id) = input.current().and_then(|char| {
                command::ID::try_from(char).map_err(|()| Error::Path(PathError::NoCommand))
            }) {
                input.advance();
                if current.is_none() && !matches!(id, command::ID::MoveTo | command::ID::MoveBy) {
                    return Err(Error::Path(PathError::InvalidFirstCommand));
                }
                id
            } else {
                match &current {
                    None | Some(command::ID::ClosePath) => {
                        return Err(Error::Path(PathError::NoCommand))
                    }
                    Some(previous) => command::ID::Implicit(Box::new(previous.next_implicit())),
                }
            };

            input.skip_whitespace();
            let args = parse_args(input, &id)?;
            data.push(command::Data::from((&id, args)));
            input.skip_comma_and_whitespace();
            current = Some(id);
        }
        Ok(Path(data))
    }
}

#[cfg(test)]
mod test {
    use flatvg_parse::{
        error::{Error, PathError},
        Parse,
    };
    use pretty_assertions::assert_eq;

    use crate::{command::Data, Path};

    #[test]
    fn parse() {
        assert_eq!(
            Path::parse_string("M 10,50 L20 30 40 50"),
            Ok(Path(vec![
                Data::MoveTo([10.0, 50.0]),
                Data::LineTo([20.0, 30.0]),
                Data::Implicit(Box::new(Data::LineTo([40.0, 50.0]))),
            ]))
        );
        assert_eq!(
            Path::parse_string("m1 2 3 4z"),
            Ok(Path(vec![
                Data::MoveBy([1.0, 2.0]),
                Data::Implicit(Box::new(Data::LineBy([3.0, 4.0]))),
                Data::ClosePath,
            ]))
        );
        assert_eq!(
            Path::parse_string("M10 50C1 2 3 4 5 6.5.1.2.3.4.5-5e-7"),
            Ok(Path(vec![
                Data::MoveTo([10.0, 50.0]),
                Data::CubicBezierTo([1.0, 2.0, 3.0, 4.0, 5.0, 6.5]),
                Data::Implicit(Box::new(Data::CubicBezierTo([
                    0.1, 0.2, 0.3, 0.4, 0.5, -5e-7
                ]))),
            ]))
        );
        assert_eq!(
            Path::parse_string("M0 0a25,25 -30 0,1 50,25A1 1 0 1150 60"),
            Ok(Path(vec![
                Data::MoveTo([0.0, 0.0]),
                Data::ArcBy([25.0, 25.0, -30.0, 0.0, 1.0, 50.0, 25.0]),
                Data::ArcTo([1.0, 1.0, 0.0, 1.0, 1.0, 50.0, 60.0]),
            ]))
        );
        assert_eq!(Path::parse_string(""), Ok(Path(vec![])));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Path::parse_string("0,0"),
            Err(Error::Path(PathError::NoCommand))
        );
        assert_eq!(
            Path::parse_string("L0,0"),
            Err(Error::Path(PathError::InvalidFirstCommand))
        );
        assert_eq!(
            Path::parse_string("m1"),
            Err(Error::Path(PathError::MissingArguments('m')))
        );
        assert_eq!(
            Path::parse_string("M0 0 L1 Z"),
            Err(Error::Path(PathError::MissingArguments('L')))
        );
        assert_eq!(
            Path::parse_string("M0 0 A1 1 0 2 0 5 5"),
            Err(Error::Path(PathError::InvalidArcFlag))
        );
        assert_eq!(
            Path::parse_string("M0 0Z 1 1"),
            Err(Error::Path(PathError::NoCommand))
        );
        assert!(Path::parse_string("M0 0 L1 x").is_err());
    }
}
