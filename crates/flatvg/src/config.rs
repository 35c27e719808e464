//! Types for the configuration file usable by flatvg
use std::{env::current_dir, fs::read_to_string, path::PathBuf};

use anyhow::Context;
use etcetera::{choose_base_strategy, BaseStrategy};
use flatvg_fuse::FuseTransforms;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
/// The config for the CLI usage of flatvg
pub struct Config {
    /// The options for fusing transforms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuse: Option<FuseTransforms>,
}

impl Config {
    fn load_local() -> std::io::Result<(String, PathBuf)> {
        let mut path = current_dir()?;
        path.push("flatvgrc.json");
        Ok((read_to_string(&path)?, path))
    }

    fn load_base() -> std::io::Result<(String, PathBuf)> {
        let mut path = choose_base_strategy()
            .map_err(|err| std::io::Error::other(err.to_string()))?
            .config_dir();
        path.push("flatvg");
        path.push("config.json");
        Ok((read_to_string(&path)?, path))
    }

    /// Tries loading the configuration from well-known paths, falling back to the default
    /// configuration when there is none.
    ///
    /// # Errors
    /// When the config exists but cannot be parsed
    pub fn load() -> anyhow::Result<Self> {
        let Ok((file, path)) = Self::load_local().or_else(|_| Self::load_base()) else {
            log::debug!("no config found, using default");
            return Ok(Self::default());
        };
        log::debug!("using config at {}", path.display());
        Self::parse(&file)
            .with_context(|| format!("Configuration at {} cannot be parsed", path.display()))
    }

    /// Parses the configuration from a json string
    ///
    /// # Errors
    /// When the json is invalid or doesn't match the shape of the config
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[test]
fn serde() -> anyhow::Result<()> {
    let config = Config::parse(
        r#"{
        "fuse": {
            "select": ["layer1"],
            "removeEditorData": false
        }
    }"#,
    )?;
    assert_eq!(
        config,
        Config {
            fuse: Some(FuseTransforms {
                select: Some(vec![String::from("layer1")]),
                remove_editor_data: false,
            }),
        }
    );

    assert_eq!(Config::parse("{}")?, Config::default());
    assert_eq!(
        serde_json::to_string(&Config {
            fuse: Some(FuseTransforms::default())
        })?,
        r#"{"fuse":{"select":null,"removeEditorData":true}}"#
    );
    assert!(Config::parse(r#"{ "fuse": { "select": "layer1" } }"#).is_err());
    Ok(())
}
