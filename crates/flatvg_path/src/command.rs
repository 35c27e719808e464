//! Definitions for the commands of path data.
use flatvg_parse::number::format_number;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
/// Data for a path command
pub enum Data {
    /// M
    /// Move the current point to coordinate `x`, `y`. Any subsequent coordinate pair(s) are
    /// interpreted as parameter(s) for implicit absolute `LineTo` (L) command(s)
    MoveTo([f64; 2]),
    /// m
    MoveBy([f64; 2]),
    /// Z or z
    ClosePath,
    /// L
    LineTo([f64; 2]),
    /// l
    LineBy([f64; 2]),
    /// H
    HorizontalLineTo([f64; 1]),
    /// h
    HorizontalLineBy([f64; 1]),
    /// V
    VerticalLineTo([f64; 1]),
    /// v
    VerticalLineBy([f64; 1]),
    /// C
    CubicBezierTo([f64; 6]),
    /// c
    CubicBezierBy([f64; 6]),
    /// S
    SmoothBezierTo([f64; 4]),
    /// s
    SmoothBezierBy([f64; 4]),
    /// Q
    QuadraticBezierTo([f64; 4]),
    /// q
    QuadraticBezierBy([f64; 4]),
    /// T
    SmoothQuadraticBezierTo([f64; 2]),
    /// t
    SmoothQuadraticBezierBy([f64; 2]),
    /// A
    ArcTo([f64; 7]),
    /// a
    ArcBy([f64; 7]),
    /// An implicit command, which should match the previous command
    Implicit(Box<Data>),
}

#[derive(Clone, Debug, PartialEq)]
/// A type of path command.
pub enum ID {
    /// M
    MoveTo,
    /// m
    MoveBy,
    /// Z or z
    ClosePath,
    /// L
    LineTo,
    /// l
    LineBy,
    /// H
    HorizontalLineTo,
    /// h
    HorizontalLineBy,
    /// V
    VerticalLineTo,
    /// v
    VerticalLineBy,
    /// C
    CubicBezierTo,
    /// c
    CubicBezierBy,
    /// S
    SmoothBezierTo,
    /// s
    SmoothBezierBy,
    /// Q
    QuadraticBezierTo,
    /// q
    QuadraticBezierBy,
    /// T
    SmoothQuadraticBezierTo,
    /// t
    SmoothQuadraticBezierBy,
    /// A
    ArcTo,
    /// a
    ArcBy,
    /// An implicit command, which should match the previous command
    Implicit(Box<ID>),
}

impl Data {
    /// Returns the id for the command
    pub fn id(&self) -> ID {
        match self {
            Self::MoveTo(..) => ID::MoveTo,
            Self::MoveBy(..) => ID::MoveBy,
            Self::ClosePath => ID::ClosePath,
            Self::LineTo(..) => ID::LineTo,
            Self::LineBy(..) => ID::LineBy,
            Self::HorizontalLineTo(..) => ID::HorizontalLineTo,
            Self::HorizontalLineBy(..) => ID::HorizontalLineBy,
            Self::VerticalLineTo(..) => ID::VerticalLineTo,
            Self::VerticalLineBy(..) => ID::VerticalLineBy,
            Self::CubicBezierTo(..) => ID::CubicBezierTo,
            Self::CubicBezierBy(..) => ID::CubicBezierBy,
            Self::SmoothBezierTo(..) => ID::SmoothBezierTo,
            Self::SmoothBezierBy(..) => ID::SmoothBezierBy,
            Self::QuadraticBezierTo(..) => ID::QuadraticBezierTo,
            Self::QuadraticBezierBy(..) => ID::QuadraticBezierBy,
            Self::SmoothQuadraticBezierTo(..) => ID::SmoothQuadraticBezierTo,
            Self::SmoothQuadraticBezierBy(..) => ID::SmoothQuadraticBezierBy,
            Self::ArcTo(..) => ID::ArcTo,
            Self::ArcBy(..) => ID::ArcBy,
            Self::Implicit(command) => ID::Implicit(Box::new(command.id())),
        }
    }

    /// Returns the arguments for the command
    pub fn args(&self) -> &[f64] {
        match self {
            Self::MoveTo(a)
            | Self::MoveBy(a)
            | Self::LineTo(a)
            | Self::LineBy(a)
            | Self::SmoothQuadraticBezierTo(a)
            | Self::SmoothQuadraticBezierBy(a) => a,
            Self::ClosePath => &[],
            Self::HorizontalLineTo(a)
            | Self::HorizontalLineBy(a)
            | Self::VerticalLineTo(a)
            | Self::VerticalLineBy(a) => a,
            Self::SmoothBezierTo(a)
            | Self::SmoothBezierBy(a)
            | Self::QuadraticBezierTo(a)
            | Self::QuadraticBezierBy(a) => a,
            Self::CubicBezierTo(a) | Self::CubicBezierBy(a) => a,
            Self::ArcTo(a) | Self::ArcBy(a) => a,
            Self::Implicit(a) => a.args(),
        }
    }

    /// Returns whether the command is implicit
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit(_))
    }

    /// Returns the command, converting from implicit if necessary
    pub fn as_explicit(&self) -> &Self {
        if let Self::Implicit(inner) = self {
            return inner.as_explicit();
        }
        self
    }

    /// Returns whether the command goes to an absolute position.
    pub fn is_to(&self) -> bool {
        match self {
            Self::MoveTo(_)
            | Self::ClosePath
            | Self::LineTo(_)
            | Self::HorizontalLineTo(_)
            | Self::VerticalLineTo(_)
            | Self::CubicBezierTo(_)
            | Self::SmoothBezierTo(_)
            | Self::QuadraticBezierTo(_)
            | Self::SmoothQuadraticBezierTo(_)
            | Self::ArcTo(_) => true,
            Self::Implicit(c) => c.is_to(),
            _ => false,
        }
    }
}

impl From<(&ID, [f64; 7])> for Data {
    fn from(value: (&ID, [f64; 7])) -> Self {
        let (command_id, args) = value;
        match command_id {
            ID::MoveTo => Self::MoveTo([args[0], args[1]]),
            ID::MoveBy => Self::MoveBy([args[0], args[1]]),
            ID::ClosePath => Self::ClosePath,
            ID::LineTo => Self::LineTo([args[0], args[1]]),
            ID::LineBy => Self::LineBy([args[0], args[1]]),
            ID::HorizontalLineTo => Self::HorizontalLineTo([args[0]]),
            ID::HorizontalLineBy => Self::HorizontalLineBy([args[0]]),
            ID::VerticalLineTo => Self::VerticalLineTo([args[0]]),
            ID::VerticalLineBy => Self::VerticalLineBy([args[0]]),
            ID::CubicBezierTo => {
                Self::CubicBezierTo([args[0], args[1], args[2], args[3], args[4], args[5]])
            }
            ID::CubicBezierBy => {
                Self::CubicBezierBy([args[0], args[1], args[2], args[3], args[4], args[5]])
            }
            ID::SmoothBezierTo => Self::SmoothBezierTo([args[0], args[1], args[2], args[3]]),
            ID::SmoothBezierBy => Self::SmoothBezierBy([args[0], args[1], args[2], args[3]]),
            ID::QuadraticBezierTo => Self::QuadraticBezierTo([args[0], args[1], args[2], args[3]]),
            ID::QuadraticBezierBy => Self::QuadraticBezierBy([args[0], args[1], args[2], args[3]]),
            ID::SmoothQuadraticBezierTo => Self::SmoothQuadraticBezierTo([args[0], args[1]]),
            ID::SmoothQuadraticBezierBy => Self::SmoothQuadraticBezierBy([args[0], args[1]]),
            ID::ArcTo => Self::ArcTo(args),
            ID::ArcBy => Self::ArcBy(args),
            ID::Implicit(command) => Data::Implicit(Box::new(Data::from((command.as_ref(), args)))),
        }
    }
}

impl std::fmt::Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.id().fmt(f)?;
        for (i, arg) in self.args().iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            f.write_str(&format_number(*arg))?;
        }
        Ok(())
    }
}

impl ID {
    /// Returns the length of a command's arguments
    pub fn args(&self) -> usize {
        match self {
            Self::ClosePath => 0,
            Self::HorizontalLineTo
            | Self::HorizontalLineBy
            | Self::VerticalLineTo
            | Self::VerticalLineBy => 1,
            Self::LineTo
            | Self::LineBy
            | Self::MoveTo
            | Self::MoveBy
            | Self::SmoothQuadraticBezierTo
            | Self::SmoothQuadraticBezierBy => 2,
            Self::SmoothBezierTo
            | Self::SmoothBezierBy
            | Self::QuadraticBezierTo
            | Self::QuadraticBezierBy => 4,
            Self::CubicBezierTo | Self::CubicBezierBy => 6,
            Self::ArcTo | Self::ArcBy => 7,
            Self::Implicit(command) => command.args(),
        }
    }

    /// Returns whether the command is implicit, based on the previous command.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit(_))
    }

    /// Returns whether the command is an arc, which has flags for arguments
    pub fn is_arc(&self) -> bool {
        match self {
            Self::ArcTo | Self::ArcBy => true,
            Self::Implicit(c) => c.is_arc(),
            _ => false,
        }
    }

    #[must_use]
    /// Returns the expected command to follow this one if it's implicit
    pub fn next_implicit(&self) -> Self {
        match self {
            Self::MoveTo => Self::LineTo,
            Self::MoveBy => Self::LineBy,
            Self::Implicit(c) => c.next_implicit(),
            c => c.clone(),
        }
    }
}

impl TryFrom<char> for ID {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'M' => Ok(Self::MoveTo),
            'm' => Ok(Self::MoveBy),
            'L' => Ok(Self::LineTo),
            'l' => Ok(Self::LineBy),
            'H' => Ok(Self::HorizontalLineTo),
            'h' => Ok(Self::HorizontalLineBy),
            'V' => Ok(Self::VerticalLineTo),
            'v' => Ok(Self::VerticalLineBy),
            'C' => Ok(Self::CubicBezierTo),
            'c' => Ok(Self::CubicBezierBy),
            'S' => Ok(Self::SmoothBezierTo),
            's' => Ok(Self::SmoothBezierBy),
            'Q' => Ok(Self::QuadraticBezierTo),
            'q' => Ok(Self::QuadraticBezierBy),
            'T' => Ok(Self::SmoothQuadraticBezierTo),
            't' => Ok(Self::SmoothQuadraticBezierBy),
            'A' => Ok(Self::ArcTo),
            'a' => Ok(Self::ArcBy),
            'Z' | 'z' => Ok(Self::ClosePath),
            _ => Err(()),
        }
    }
}

impl From<&ID> for char {
    fn from(value: &ID) -> Self {
        match value {
            ID::MoveTo => 'M',
            ID::MoveBy => 'm',
            ID::ClosePath => 'Z',
            ID::LineTo => 'L',
            ID::LineBy => 'l',
            ID::HorizontalLineTo => 'H',
            ID::HorizontalLineBy => 'h',
            ID::VerticalLineTo => 'V',
            ID::VerticalLineBy => 'v',
            ID::CubicBezierTo => 'C',
            ID::CubicBezierBy => 'c',
            ID::SmoothBezierTo => 'S',
            ID::SmoothBezierBy => 's',
            ID::QuadraticBezierTo => 'Q',
            ID::QuadraticBezierBy => 'q',
            ID::SmoothQuadraticBezierTo => 'T',
            ID::SmoothQuadraticBezierBy => 't',
            ID::ArcTo => 'A',
            ID::ArcBy => 'a',
            ID::Implicit(c) => c.as_ref().into(),
        }
    }
}

impl std::fmt::Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_implicit() {
            return Ok(());
        }
        f.write_char(self.into())
    }
}

#[test]
fn display() {
    assert_eq!(Data::MoveTo([10.0, -0.5]).to_string(), "M10 -0.5");
    assert_eq!(Data::ClosePath.to_string(), "Z");
    assert_eq!(
        Data::Implicit(Box::new(Data::LineTo([1.0, 2.0]))).to_string(),
        "1 2"
    );
    assert_eq!(ID::try_from('z'), Ok(ID::ClosePath));
    assert_eq!(ID::MoveBy.next_implicit(), ID::LineBy);
    assert!(ID::Implicit(Box::new(ID::ArcTo)).is_arc());
}
