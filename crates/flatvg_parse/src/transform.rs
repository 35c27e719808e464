//! The `transform` attribute and the affine matrix it resolves to
use crate::{error::Error, number::format_number, Parse, Parser};

#[derive(Debug, Clone, Copy, PartialEq)]
/// A 2D affine transform of six coefficients, equivalent to
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[allow(missing_docs)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The transform which maps every point to itself
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a matrix from it's six coefficients
    #[allow(clippy::many_single_char_names)]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Creates a translation
    pub const fn translate(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Creates a scale about the origin
    pub const fn scale(x: f64, y: f64) -> Self {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Creates a rotation of `angle` degrees about the point `cx`, `cy`
    pub fn rotate(angle: f64, cx: f64, cy: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(
            cos,
            sin,
            -sin,
            cos,
            (1.0 - cos) * cx + sin * cy,
            (1.0 - cos) * cy - sin * cx,
        )
    }

    /// Creates a skew of `angle` degrees along the x-axis
    pub fn skew_x(angle: f64) -> Self {
        Self::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    /// Creates a skew of `angle` degrees along the y-axis
    pub fn skew_y(angle: f64) -> Self {
        Self::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    #[must_use]
    /// Composes the matrices such that `other` is applied first, then `self`
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Maps a point through the transform
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Maps a vector through the transform, ignoring translation
    pub fn apply_vector(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y, self.b * x + self.d * y)
    }

    /// Whether each coefficient is within `tolerance` of the identity's
    pub fn is_identity(&self, tolerance: f64) -> bool {
        (self.a - 1.0).abs() <= tolerance
            && self.b.abs() <= tolerance
            && self.c.abs() <= tolerance
            && (self.d - 1.0).abs() <= tolerance
            && self.e.abs() <= tolerance
            && self.f.abs() <= tolerance
    }

    /// `ad - bc`
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The factor a length grows by, averaged over the axes as the square root of the area scale
    pub fn area_scale(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    /// The length a unit vector along the x-axis is mapped to
    pub fn scale_x(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// The length a unit vector along the y-axis is mapped to
    pub fn scale_y(&self) -> f64 {
        self.c.hypot(self.d)
    }

    /// The angle, in degrees, the x-axis is rotated by
    pub fn rotation_degrees(&self) -> f64 {
        self.b.atan2(self.a).to_degrees()
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "matrix({},{},{},{},{},{})",
            format_number(self.a),
            format_number(self.b),
            format_number(self.c),
            format_number(self.d),
            format_number(self.e),
            format_number(self.f),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A single function of a transform list
pub enum Transform {
    /// A transformation as the matrix of six values
    Matrix(Matrix),
    /// A positional transformation in an `x` and/or `y` direction
    Translate(f64, f64),
    /// A size transformation in an `x` and/or `y` direction
    Scale(f64, f64),
    /// A rotational transform by `a` degrees around an `x` and `y` origin
    Rotate(f64, f64, f64),
    /// A skew transform in the `x` direction
    SkewX(f64),
    /// A skew transform in the `y` direction
    SkewY(f64),
}

impl Transform {
    /// Returns the matrix equivalent of the transform
    pub fn to_matrix(&self) -> Matrix {
        match *self {
            Self::Matrix(matrix) => matrix,
            Self::Translate(x, y) => Matrix::translate(x, y),
            Self::Scale(x, y) => Matrix::scale(x, y),
            Self::Rotate(angle, cx, cy) => Matrix::rotate(angle, cx, cy),
            Self::SkewX(angle) => Matrix::skew_x(angle),
            Self::SkewY(angle) => Matrix::skew_y(angle),
        }
    }
}

impl<'input> Parse<'input> for Transform {
    #[allow(clippy::many_single_char_names)]
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>> {
        let function = input.expect_ident()?;
        input.skip_whitespace();
        input.expect_char('(')?;
        input.skip_whitespace();
        let transform = match function {
            "matrix" => {
                let mut args = [0.0; 6];
                for (i, arg) in args.iter_mut().enumerate() {
                    if i > 0 {
                        input.skip_comma_and_whitespace();
                    }
                    *arg = f64::parse(input)?;
                }
                let [a, b, c, d, e, f] = args;
                Self::Matrix(Matrix::new(a, b, c, d, e, f))
            }
            "translate" => {
                let x = f64::parse(input)?;
                input.skip_comma_and_whitespace();
                let y = input.try_parse(f64::parse).unwrap_or(0.0);
                Self::Translate(x, y)
            }
            "scale" => {
                let x = f64::parse(input)?;
                input.skip_comma_and_whitespace();
                let y = input.try_parse(f64::parse).unwrap_or(x);
                Self::Scale(x, y)
            }
            "rotate" => {
                let angle = f64::parse(input)?;
                input.skip_comma_and_whitespace();
                if let Ok(x) = input.try_parse(f64::parse) {
                    input.skip_comma_and_whitespace();
                    let y = f64::parse(input)?;
                    Self::Rotate(angle, x, y)
                } else {
                    Self::Rotate(angle, 0.0, 0.0)
                }
            }
            "skewX" => Self::SkewX(f64::parse(input)?),
            "skewY" => Self::SkewY(f64::parse(input)?),
            _ => return Err(Error::UnknownTransform(function)),
        };
        input.skip_whitespace();
        input.expect_char(')')?;
        Ok(transform)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// A list of transform definitions applied to an element and it's children.
///
/// An empty list is equivalent to the identity.
///
/// ```
/// use flatvg_parse::{transform::{Matrix, TransformList}, Parse};
///
/// let list = TransformList::parse_string("translate(10) scale(2)").unwrap();
/// assert_eq!(list.to_matrix(), Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 0.0));
/// ```
pub struct TransformList(pub Vec<Transform>);

impl<'input> Parse<'input> for TransformList {
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>> {
        let mut result = Vec::new();
        loop {
            input.skip_comma_and_whitespace();
            if input.is_empty() {
                return Ok(Self(result));
            }
            result.push(Transform::parse(input)?);
        }
    }
}

impl TransformList {
    /// Folds the list into a single matrix, where the first item is the outermost transform
    pub fn to_matrix(&self) -> Matrix {
        self.0
            .iter()
            .fold(Matrix::IDENTITY, |acc, item| acc.multiply(&item.to_matrix()))
    }
}

#[cfg(test)]
fn assert_matrix_eq(left: &Matrix, right: &Matrix) {
    let close = |l: f64, r: f64| (l - r).abs() < 1e-9;
    assert!(
        close(left.a, right.a)
            && close(left.b, right.b)
            && close(left.c, right.c)
            && close(left.d, right.d)
            && close(left.e, right.e)
            && close(left.f, right.f),
        "{left} != {right}"
    );
}

#[test]
fn transform_list() {
    assert_eq!(TransformList::parse_string(""), Ok(TransformList(vec![])));
    assert_eq!(
        TransformList::parse_string("translate(10)"),
        Ok(TransformList(vec![Transform::Translate(10.0, 0.0)]))
    );
    assert_eq!(
        TransformList::parse_string(" scale( 2 ) , rotate(45 1,2)"),
        Ok(TransformList(vec![
            Transform::Scale(2.0, 2.0),
            Transform::Rotate(45.0, 1.0, 2.0)
        ]))
    );
    assert_eq!(
        TransformList::parse_string("matrix(1 0 0 1 5-5)"),
        Ok(TransformList(vec![Transform::Matrix(Matrix::new(
            1.0, 0.0, 0.0, 1.0, 5.0, -5.0
        ))]))
    );
    assert_eq!(
        TransformList::parse_string("skewX (30)skewY(10)").map(|list| list.0.len()),
        Ok(2)
    );

    assert_eq!(
        TransformList::parse_string("spin(45)"),
        Err(Error::UnknownTransform("spin"))
    );
    assert!(TransformList::parse_string("translate(10").is_err());
    assert!(TransformList::parse_string("matrix(1 0 0 1 5)").is_err());
    assert!(TransformList::parse_string("scale()").is_err());
}

#[test]
fn matrix() {
    let list = TransformList::parse_string("translate(10,0) scale(2,2)").unwrap();
    let matrix = list.to_matrix();
    assert_eq!(matrix, Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 0.0));
    assert_eq!(matrix.apply(5.0, 5.0), (20.0, 10.0));
    assert_eq!(matrix.apply_vector(5.0, 5.0), (10.0, 10.0));
    assert_eq!(matrix.area_scale(), 2.0);
    assert_eq!(matrix.to_string(), "matrix(2,0,0,2,10,0)");

    let rotate = Matrix::rotate(90.0, 0.0, 0.0);
    assert!((rotate.rotation_degrees() - 90.0).abs() < 1e-9);
    assert!((rotate.scale_x() - 1.0).abs() < 1e-9);
    assert!((rotate.area_scale() - 1.0).abs() < 1e-9);
    assert_matrix_eq(
        &Matrix::rotate(90.0, 5.0, 5.0),
        &Matrix::translate(5.0, 5.0)
            .multiply(&rotate)
            .multiply(&Matrix::translate(-5.0, -5.0)),
    );

    assert!(Matrix::IDENTITY.is_identity(0.0));
    assert!(Matrix::translate(1e-7, 0.0).is_identity(1e-6));
    assert!(!Matrix::scale(1.1, 1.0).is_identity(1e-6));
    assert_eq!(Matrix::scale(2.0, 3.0).determinant(), 6.0);
}
