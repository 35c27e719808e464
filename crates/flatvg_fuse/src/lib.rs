/*!
Flattens the `transform` attributes of an SVG document into the geometry of it's shapes.

Each element's transform is composed with it's ancestors' and removed, then the element's own
attributes (path data, coordinates, radii, stroke widths, and so on) are rewritten so that it's
drawn the same as before.

Where an element can't describe the result with it's attributes alone, such as a rotated rect
or an `<image>`, a residual transform is kept and a [`Warning`] may be reported.

# Example

```
use flatvg_ast::{parse::parse, serialize::{to_string, Indent, Options}};
use flatvg_fuse::{FuseTransforms, Warning};

let document = parse(r#"<svg xmlns="http://www.w3.org/2000/svg">
    <g transform="translate(10,0) scale(2,2)">
        <circle r="10" cx="5" cy="5"/>
    </g>
</svg>"#).unwrap();
let root = document.document_element().unwrap();

let mut warnings: Vec<Warning> = vec![];
FuseTransforms::default().run(&root, &mut warnings).unwrap();

let options = Options { indent: Indent::None, ..Options::default() };
assert_eq!(
    to_string(&document, options).unwrap(),
    r#"<svg xmlns="http://www.w3.org/2000/svg"><g><circle r="20" cx="20" cy="10"/></g></svg>"#
);
assert!(warnings.is_empty());
```
*/
mod error;
mod index;
mod scale;
mod shape;
mod update;
mod walk;
mod warning;

use std::collections::HashMap;

use flatvg_ast::element::Element;
use flatvg_parse::transform::Matrix;
use serde::{Deserialize, Serialize};

pub use crate::{
    error::Error,
    shape::{ShapeKind, Unsupported},
    walk::compose,
    warning::{LogWarnings, Warning, Warnings},
};
use crate::{index::IdIndex, walk::Walker};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Applies the transforms of elements to their geometry, removing the `transform` in the
/// process.
///
/// # Correctness
///
/// Paths, polygons, polylines, and translated or uniformly scaled circles and ellipses are
/// fused exactly.
///
/// Rects and text keep any rotation as a residual `rotate` transform. Circles and ellipses
/// under a skew or rotation are replaced by the closest fitting ellipse, with a warning.
///
/// Length valued styles such as `stroke-width` are scaled uniformly, so a non-uniform scale
/// may visually change the stroke.
///
/// # Errors
///
/// When the document contains a malformed `transform` or path data. Elements fused before the
/// error keep their changes.
///
/// Elements with geometry that can't be converted to user units, such as a `width` of `100%`,
/// keep the transform instead and a warning is reported.
pub struct FuseTransforms {
    /// The ids of elements to start fusing from. Each starts with no inherited transform.
    ///
    /// When not specified, the whole document is fused.
    #[serde(default)]
    pub select: Option<Vec<String>>,
    /// Whether to remove `sodipodi` and `inkscape` attributes from paths.
    #[serde(default = "default_remove_editor_data")]
    pub remove_editor_data: bool,
}

fn default_remove_editor_data() -> bool {
    true
}

impl Default for FuseTransforms {
    fn default() -> Self {
        Self {
            select: None,
            remove_editor_data: default_remove_editor_data(),
        }
    }
}

impl FuseTransforms {
    /// Fuses the transforms of the document `root`, or of the selected elements within it.
    ///
    /// # Errors
    ///
    /// If a selected id doesn't exist, or the document contains a malformed `transform` or path
    /// data.
    pub fn run(&self, root: &Element, warnings: &mut impl Warnings) -> Result<(), Error> {
        let index = IdIndex::new(root);
        let starts = match &self.select {
            Some(ids) => ids
                .iter()
                .map(|id| {
                    index
                        .get(id)
                        .cloned()
                        .ok_or_else(|| Error::UnknownSelection(id.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![root.clone()],
        };

        let mut walker = Walker {
            options: self,
            index,
            warnings,
            gradients: HashMap::new(),
        };
        for start in starts {
            walker.fuse(&start, &Matrix::IDENTITY)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod test {
    use flatvg_ast::{
        element::Element,
        node::Ref,
        parse::parse,
        serialize::{to_string, Indent, Options},
    };
    use pretty_assertions::assert_eq;

    use crate::{Error, FuseTransforms, Warning};

    struct Fused {
        document: Ref,
        warnings: Vec<Warning>,
    }

    impl Fused {
        fn get(&self, id: &str) -> Element {
            let root = self.document.document_element().unwrap();
            std::iter::once(root.clone())
                .chain(root.descendants())
                .find(|element| element.id().as_deref() == Some(id))
                .unwrap()
        }

        fn number(&self, id: &str, name: &str) -> f64 {
            self.get(id).get_attribute(name).unwrap().parse().unwrap()
        }

        fn serialize(&self) -> String {
            let options = Options {
                indent: Indent::None,
                ..Options::default()
            };
            to_string(&self.document, options).unwrap()
        }
    }

    fn fuse_with(options: &FuseTransforms, svg: &str) -> anyhow::Result<Fused> {
        let document = parse(svg)?;
        let root = document
            .document_element()
            .ok_or_else(|| anyhow::anyhow!("document has no root element"))?;
        let mut warnings: Vec<Warning> = vec![];
        options.run(&root, &mut warnings)?;
        Ok(Fused { document, warnings })
    }

    fn fuse(svg: &str) -> anyhow::Result<Fused> {
        fuse_with(&FuseTransforms::default(), svg)
    }

    #[test]
    fn nested_groups() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g transform="translate(10,0) scale(2,2)"><circle r="10" cx="5" cy="5"/></g></svg>"#,
        )?;
        insta::assert_snapshot!(
            fused.serialize(),
            @r#"<svg xmlns="http://www.w3.org/2000/svg"><g><circle r="20" cx="20" cy="10"/></g></svg>"#
        );
        assert!(fused.warnings.is_empty());

        // the same transform split across more ancestors
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" transform="translate(10,0)"><g transform="scale(2)"><g><circle id="c" r="10" cx="5" cy="5"/></g></g></svg>"#,
        )?;
        assert_eq!(fused.number("c", "cx"), 20.0);
        assert_eq!(fused.number("c", "cy"), 10.0);
        assert_eq!(fused.number("c", "r"), 20.0);
        Ok(())
    }

    #[test]
    fn rotated_rect() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="r" x="0" y="0" width="10" height="10" transform="rotate(45)"/></svg>"#,
        )?;
        let close = |left: f64, right: f64| (left - right).abs() < 1e-9;
        assert!(close(fused.number("r", "width"), 10.0));
        assert!(close(fused.number("r", "height"), 10.0));
        assert!(close(fused.number("r", "x"), -5.0));
        assert!(close(fused.number("r", "y"), 50_f64.sqrt() - 5.0));
        assert_eq!(
            fused.get("r").get_attribute("transform").as_deref(),
            Some("rotate(45,0,7.071068)")
        );
        assert!(fused.warnings.is_empty());
        Ok(())
    }

    #[test]
    fn radial_gradient() -> anyhow::Result<()> {
        let fused = fuse(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
    <defs>
        <radialGradient id="g" gradientUnits="userSpaceOnUse" cx="0" cy="0" r="1"/>
    </defs>
    <circle id="c" cx="0" cy="0" r="1" fill="url(#g)" transform="scale(2)"/>
</svg>"##,
        )?;
        let gradient = fused.get("g");
        assert_eq!(gradient.get_attribute("cx").as_deref(), Some("0"));
        assert_eq!(gradient.get_attribute("cy").as_deref(), Some("0"));
        assert_eq!(gradient.get_attribute("r").as_deref(), Some("2"));
        assert!(!gradient.has_attribute("gradientTransform"));
        assert_eq!(fused.number("c", "r"), 2.0);
        Ok(())
    }

    #[test]
    fn object_bounding_box_gradient() -> anyhow::Result<()> {
        let fused = fuse(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
    <radialGradient id="g" cx="0.5" cy="0.5" r="0.5" gradientTransform="scale(2)"/>
    <circle cx="0" cy="0" r="1" style="fill:url(#g)" transform="scale(2)"/>
    <circle cx="0" cy="0" r="1" fill="url(#missing)" transform="scale(2)"/>
</svg>"##,
        )?;
        let gradient = fused.get("g");
        assert_eq!(gradient.get_attribute("r").as_deref(), Some("0.5"));
        assert_eq!(
            gradient.get_attribute("gradientTransform").as_deref(),
            Some("scale(2)")
        );
        assert!(fused.warnings.is_empty());
        Ok(())
    }

    #[test]
    fn shared_gradient() -> anyhow::Result<()> {
        let fused = fuse(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
    <radialGradient id="g" gradientUnits="userSpaceOnUse" cx="0" cy="0" r="1"/>
    <g transform="scale(2)">
        <circle id="a" r="1" fill="url(#g)"/>
        <circle id="b" r="1" fill="url(#g)"/>
    </g>
    <circle id="c" r="1" fill="url(#g)" transform="scale(3)"/>
</svg>"##,
        )?;
        assert_eq!(fused.get("g").get_attribute("r").as_deref(), Some("2"));
        assert_eq!(fused.number("a", "r"), 2.0);
        assert_eq!(fused.number("b", "r"), 2.0);
        assert_eq!(fused.number("c", "r"), 3.0);
        assert_eq!(
            fused.warnings,
            vec![Warning::GradientResolution {
                id: Some(String::from("c")),
                reason: String::from("#g is shared with a shape under a different transform"),
            }]
        );
        Ok(())
    }

    #[test]
    fn gradient_warning() -> anyhow::Result<()> {
        let fused = fuse(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
    <linearGradient id="g" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="50%" y2="0"/>
    <circle id="c" cx="0" cy="0" r="1" fill="url(#g)" transform="translate(1)"/>
</svg>"##,
        )?;
        assert_eq!(fused.number("c", "cx"), 1.0);
        assert_eq!(fused.get("g").get_attribute("x2").as_deref(), Some("50%"));
        assert_eq!(fused.warnings.len(), 1);
        assert!(matches!(
            &fused.warnings[0],
            Warning::GradientResolution { id: Some(id), .. } if id == "c"
        ));
        Ok(())
    }

    #[test]
    fn unsupported_element() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><image id="i" href="a.png" transform="scale(2)"/></svg>"#,
        )?;
        insta::assert_snapshot!(
            fused.serialize(),
            @r#"<svg xmlns="http://www.w3.org/2000/svg"><image id="i" href="a.png" transform="matrix(2,0,0,2,0,0)"/></svg>"#
        );
        assert_eq!(
            fused.warnings,
            vec![Warning::UnsupportedElement {
                tag: String::from("image"),
                id: Some(String::from("i")),
            }]
        );
        Ok(())
    }

    #[test]
    fn unsupported_children_are_fused() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><clipPath id="clip" transform="translate(1,1)"><rect id="r" width="1" height="1"/></clipPath></svg>"#,
        )?;
        assert_eq!(
            fused.get("clip").get_attribute("transform").as_deref(),
            Some("matrix(1,0,0,1,1,1)")
        );
        assert_eq!(fused.number("r", "x"), 1.0);
        assert_eq!(fused.number("r", "y"), 1.0);
        Ok(())
    }

    #[test]
    fn unconvertible_lengths() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g transform="translate(5,5)"><rect id="r" width="100%" height="100%"><title>background</title></rect><path d="M0 0 L1 1"/></g></svg>"#,
        )?;
        insta::assert_snapshot!(
            fused.serialize(),
            @r#"<svg xmlns="http://www.w3.org/2000/svg"><g><rect id="r" width="100%" height="100%" transform="matrix(1,0,0,1,5,5)"><title>background</title></rect><path d="M5 5 C5 5 6 6 6 6"/></g></svg>"#
        );
        assert_eq!(
            fused.warnings,
            vec![Warning::UnconvertibleLength {
                tag: String::from("rect"),
                id: Some(String::from("r")),
                attribute: String::from("width"),
                value: String::from("100%"),
            }]
        );
        Ok(())
    }

    #[test]
    fn shapes() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
    <g transform="scale(2)" stroke-width="1">
        <path d="M0 0 L10 0" stroke-width="2" style="fill:none;stroke-width:3px"/>
        <polyline points="0,0 10,0 10,10"/>
        <text x="10" y="20" dx="1,2" style="font-size:12px">Hello <tspan dy="1">world</tspan></text>
    </g>
</svg>"#,
        )?;
        insta::assert_snapshot!(
            fused.serialize(),
            @r#"<svg xmlns="http://www.w3.org/2000/svg"><g stroke-width="2"><path d="M0 0 C0 0 20 0 20 0" stroke-width="4" style="fill:none;stroke-width:6"/><polyline points="0,0 20,0 20,20"/><text x="20" y="40" dx="2 4" style="font-size:24">Hello <tspan dy="2" x="40" y="80">world</tspan></text></g></svg>"#
        );
        Ok(())
    }

    #[test]
    fn quoted_style() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path id="p" transform="scale(2)" d="M0 0 L1 1" style="font-family:'A;B';stroke-width:1"/></svg>"#,
        )?;
        assert_eq!(
            fused.get("p").get_attribute("style").as_deref(),
            Some("font-family:'A;B';stroke-width:2")
        );
        Ok(())
    }

    #[test]
    fn circle_promotion() -> anyhow::Result<()> {
        let fused = fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><circle id="c" r="1" transform="scale(2,1)"/><circle id="d" cx="1" r="1" transform="rotate(90) scale(3)"/></svg>"#,
        )?;
        let promoted = fused.get("c");
        assert_eq!(promoted.local_name(), "ellipse");
        assert!(!promoted.has_attribute("r"));
        assert_eq!(fused.number("c", "rx"), 2.0);
        assert_eq!(fused.number("c", "ry"), 1.0);

        let rotated = fused.get("d");
        assert_eq!(rotated.local_name(), "circle");
        assert!((fused.number("d", "r") - 3.0).abs() < 1e-9);
        assert!(fused.number("d", "cx").abs() < 1e-9);
        assert!((fused.number("d", "cy") - 3.0).abs() < 1e-9);

        assert_eq!(
            fused.warnings,
            vec![Warning::ApproximateShape {
                tag: String::from("circle"),
                id: Some(String::from("c")),
            }]
        );
        Ok(())
    }

    #[test]
    fn idempotent() -> anyhow::Result<()> {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><g stroke-width="2"><path d="M0 0 L10 10"/><circle cx="1" cy="1" r="1"/><rect width="5" height="5"/></g></svg>"#;
        let fused = fuse(svg)?;
        assert_eq!(fused.serialize(), svg);
        Ok(())
    }

    #[test]
    fn editor_data() -> anyhow::Result<()> {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"><path d="M0 0" sodipodi:nodetypes="cc" inkscape:label="line"/><rect inkscape:label="box"/></svg>"#;
        let fused = fuse(svg)?;
        let root = fused.document.document_element().unwrap();
        let children = root.children();
        assert_eq!(children[0].attributes().len(), 1);
        assert!(children[1].has_attribute("inkscape:label"));

        let options = FuseTransforms {
            remove_editor_data: false,
            ..FuseTransforms::default()
        };
        let fused = fuse_with(&options, svg)?;
        let root = fused.document.document_element().unwrap();
        assert_eq!(root.children()[0].attributes().len(), 3);
        Ok(())
    }

    #[test]
    fn selection() -> anyhow::Result<()> {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" transform="scale(10)"><rect id="a" width="1" height="1" transform="translate(1)"/><rect id="b" width="1" height="1" transform="translate(1)"/></svg>"#;
        let options: FuseTransforms = serde_json::from_str(r#"{ "select": ["b"] }"#)?;
        assert!(options.remove_editor_data);

        let fused = fuse_with(&options, svg)?;
        assert!(fused.get("a").has_attribute("transform"));
        assert!(!fused.get("b").has_attribute("transform"));
        assert_eq!(fused.number("b", "x"), 1.0);

        let options = FuseTransforms {
            select: Some(vec![String::from("c")]),
            ..FuseTransforms::default()
        };
        let document = parse(svg)?;
        let root = document.document_element().unwrap();
        assert_eq!(
            options.run(&root, &mut Vec::<Warning>::new()),
            Err(Error::UnknownSelection(String::from("c")))
        );
        Ok(())
    }

    #[test]
    fn fatal_errors() -> anyhow::Result<()> {
        let document = parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="a" width="1" transform="translate(1)"/><path d="L 0 0" transform="scale(2)"/><rect id="b" width="1" transform="translate(1)"/></svg>"#,
        )?;
        let root = document.document_element().unwrap();
        let result = FuseTransforms::default().run(&root, &mut Vec::<Warning>::new());
        assert!(matches!(result, Err(Error::PathData { .. })));

        // elements before the error stay fused
        let children = root.children();
        assert!(!children[0].has_attribute("transform"));
        assert!(children[2].has_attribute("transform"));
        Ok(())
    }
}
