use std::path::PathBuf;

use anyhow::anyhow;
use flatvg_ast::{
    node::Ref,
    parse::parse,
    serialize::{Indent, Options},
};
use flatvg_fuse::{FuseTransforms, LogWarnings, Warnings};

use crate::{
    args::RunCommand,
    config::Config,
    walk::{Output, Walk},
};

#[derive(clap::Args, Debug)]
/// Fuses the transforms of the given SVG documents into the geometry of their shapes.
pub struct Fuse {
    /// The target paths to fuse
    #[clap(value_parser)]
    pub paths: Vec<PathBuf>,
    /// Whether to write to the specified file or directory.
    /// Will use the input if flag is given without a value.
    /// Defaults to stdout.
    #[clap(long, short, num_args(0..=1))]
    pub output: Option<Vec<PathBuf>>,
    /// A path to the specified config.
    /// If no config is specified the current config will be printed instead.
    #[clap(long, short, num_args(0..=1))]
    pub config: Option<Vec<PathBuf>>,
    /// The id of an element to start fusing from, instead of the whole document.
    /// Can be given multiple times.
    #[clap(long, short)]
    pub select: Vec<String>,
    /// If the path is a directory, whether to walk through and fuse it's subdirectories
    #[clap(long, short, default_value = "false")]
    pub recursive: bool,
    /// Search through hidden files and directories
    #[clap(long, short = '.', default_value = "false")]
    pub hidden: bool,
    /// Walk through files ignored by `.gitignore` and `.ignore` files
    #[clap(long, default_value = "false")]
    pub no_ignore: bool,
    /// Sets the approximate number of threads to use. A value of 0 (default) will automatically determine the appropriate number
    #[clap(long, short, default_value = "0")]
    pub threads: usize,
    /// Controls whether the output is indented with tabs or spaces.
    ///
    /// Accepts `none`, `tabs`, or a number
    #[clap(long, short, default_value = "none")]
    pub pretty: Indent,
}

impl RunCommand for Fuse {
    fn run(self, config: Config) -> anyhow::Result<()> {
        let Some(config) = self.handle_config(config)? else {
            return Ok(());
        };

        let mut options = config.fuse.unwrap_or_default();
        if !self.select.is_empty() {
            options.select = Some(self.select.clone());
        }
        self.walk(options)
    }
}

impl Fuse {
    /// Sets up directory walker and uses it to fuse each file.
    ///
    /// # Errors
    ///
    /// When invalid options are given
    pub fn walk(self, options: FuseTransforms) -> anyhow::Result<()> {
        let walk = Walk {
            paths: &self.paths,
            output: self.output.as_ref().and_then(|output| output.first()),
            in_place: self.output.as_ref().is_some_and(Vec::is_empty),
            recursive: self.recursive,
            hidden: self.hidden,
            no_ignore: self.no_ignore,
            threads: self.threads,
        };
        let format_options = Options {
            indent: self.pretty,
            ..Options::default()
        };
        walk.run(move || {
            let options = options.clone();
            Box::new(move |source, path, output| {
                let name = path.map_or_else(|| String::from("stdin"), |path| {
                    path.to_string_lossy().to_string()
                });
                let mut warnings = LogWarnings {
                    source: Some(name.clone()),
                };
                let result = fuse(source, &options, &mut warnings).and_then(|document| {
                    Output {
                        options: format_options,
                        document,
                        input: path,
                        destination: output,
                    }
                    .output()
                });
                if let Err(err) = result {
                    eprintln!("{name}: {err}");
                }
            })
        })
    }

    fn handle_config(&self, config: Config) -> anyhow::Result<Option<Config>> {
        let Some(config_paths) = &self.config else {
            log::debug!("using inferred config");
            return Ok(Some(config));
        };
        if let Some(config_path) = config_paths.first() {
            log::debug!("using specified config");
            let file = std::fs::read_to_string(config_path)?;
            Config::parse(&file).map(Some)
        } else {
            log::debug!("printing config");
            serde_json::to_writer(
                std::io::stdout(),
                &Config {
                    fuse: Some(config.fuse.unwrap_or_default()),
                },
            )?;
            Ok(None)
        }
    }
}

/// Parses the source and fuses it's transforms, returning the document
fn fuse(
    source: &str,
    options: &FuseTransforms,
    warnings: &mut impl Warnings,
) -> anyhow::Result<Ref> {
    let document = parse(source)?;
    let root = document
        .document_element()
        .ok_or_else(|| anyhow!("Document has no root element"))?;
    options.run(&root, warnings)?;
    Ok(document)
}

#[cfg(test)]
mod test {
    use flatvg_ast::serialize::{to_string, Indent, Options};
    use flatvg_fuse::{FuseTransforms, Warning};

    #[test]
    fn fuse() -> anyhow::Result<()> {
        let mut warnings: Vec<Warning> = vec![];
        let document = super::fuse(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg">
    <g transform="translate(5,5)">
        <path d="M0 0 L1 1"/>
        <use href="#a"/>
    </g>
</svg>"##,
            &FuseTransforms::default(),
            &mut warnings,
        )?;
        let options = Options {
            indent: Indent::Spaces(2),
            ..Options::default()
        };
        insta::assert_snapshot!(to_string(&document, options)?.trim_end(), @r##"
        <svg xmlns="http://www.w3.org/2000/svg">
          <g>
            <path d="M5 5 C5 5 6 6 6 6"/>
            <use href="#a" transform="matrix(1,0,0,1,5,5)"/>
          </g>
        </svg>
        "##);
        pretty_assertions::assert_eq!(
            warnings,
            vec![Warning::UnsupportedElement {
                tag: String::from("use"),
                id: None,
            }]
        );
        Ok(())
    }

    #[test]
    fn output_without_value() {
        use clap::Parser;

        use crate::args::{Args, Command};

        let args = Args::try_parse_from(["flatvg", "fuse", "icon.svg", "-o"]).unwrap();
        let Command::Fuse(fuse) = args.command;
        assert_eq!(fuse.paths, vec![std::path::PathBuf::from("icon.svg")]);
        assert_eq!(fuse.output, Some(vec![]));
    }

    #[test]
    fn invalid() {
        let mut warnings: Vec<Warning> = vec![];
        assert!(super::fuse("<svg", &FuseTransforms::default(), &mut warnings).is_err());
        assert!(super::fuse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0 L" transform="scale(2)"/></svg>"#,
            &FuseTransforms::default(),
            &mut warnings,
        )
        .is_err());
    }
}
