use colored::Colorize;
use iro::color::{Color, ColorId};
use iro::raster::Convert;
use iro::{export_png, rasterize, BinReader, Rgb555, Rgb555Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "iro.toml";
const MAX_INTENSITY: u32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub format: ColorId,
    pub brighten: Option<u32>,
    pub darken: Option<u32>,
    pub output: Option<String>,
}

mod color_format {
    use iro::color::{Color, ColorId};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<ColorId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(value.name()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserialize: D) -> Result<Option<ColorId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserialize)?;
        match s {
            Some(s) => match ColorId::from(s.as_str()) {
                ColorId::Invalid => Err(serde::de::Error::custom(format!(
                    "unknown color format `{s}`"
                ))),
                id => Ok(Some(id)),
            },
            None => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct ConfigFile {
    render: RenderSettings,
}

/// The `[render]` table of `iro.toml`. Every key is optional so that
/// command-line flags can fill in or override it.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, with = "color_format", skip_serializing_if = "Option::is_none")]
    pub format: Option<ColorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brighten: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub darken: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl RenderSettings {
    /// Values set in `overrides` win.
    pub fn merge(self, overrides: RenderSettings) -> RenderSettings {
        RenderSettings {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            format: overrides.format.or(self.format),
            brighten: overrides.brighten.or(self.brighten),
            darken: overrides.darken.or(self.darken),
            output: overrides.output.or(self.output),
        }
    }
}

impl TryFrom<RenderSettings> for Config {
    type Error = Error;

    fn try_from(settings: RenderSettings) -> Result<Self, Self::Error> {
        let RenderSettings {
            width,
            height,
            format,
            brighten,
            darken,
            output,
        } = settings;

        let width =
            width.ok_or_else(|| Error::ConfigError("render.width is required".to_string()))?;
        let height =
            height.ok_or_else(|| Error::ConfigError("render.height is required".to_string()))?;

        let format = format.unwrap_or(Rgb555::ID);
        if format != Rgb555::ID {
            return Err(Error::ConfigError(format!(
                "unsupported color format `{format}`"
            )));
        }

        if brighten.is_some() && darken.is_some() {
            return Err(Error::ConfigError(
                "render.brighten and render.darken cannot both be set".to_string(),
            ));
        }

        for (key, value) in [("brighten", brighten), ("darken", darken)] {
            if let Some(value) = value {
                if value > MAX_INTENSITY {
                    return Err(Error::ConfigError(format!(
                        "render.{key} must be between 0 and {MAX_INTENSITY}, got {value}"
                    )));
                }
            }
        }

        Ok(Config {
            width,
            height,
            format,
            brighten,
            darken,
            output,
        })
    }
}

impl Config {
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let config_file = ConfigFile {
            render: RenderSettings {
                width: Some(self.width),
                height: Some(self.height),
                format: Some(self.format),
                brighten: self.brighten,
                darken: self.darken,
                output: self.output.clone(),
            },
        };

        toml::to_string_pretty(&config_file)
    }

    fn adjust(&self, color: Rgb555) -> Rgb555 {
        match (self.brighten, self.darken) {
            (Some(intensity), _) => color.brighten(intensity),
            (None, Some(intensity)) => color.darken(intensity),
            (None, None) => color,
        }
    }
}

/// Reads the `[render]` table. A relative `output` is taken relative to the
/// config file's directory.
pub fn load_config(path: &Path) -> Result<RenderSettings, Error> {
    let str = std::fs::read_to_string(path)?;
    let config_file =
        toml::from_str::<ConfigFile>(&str).map_err(|e| Error::ConfigError(e.to_string()))?;

    let mut settings = config_file.render;
    let rebased = match (&settings.output, path.parent()) {
        (Some(output), Some(dir)) if Path::new(output).is_relative() => {
            Some(dir.join(output).to_string_lossy().into_owned())
        }
        _ => None,
    };
    if rebased.is_some() {
        settings.output = rebased;
    }

    Ok(settings)
}

/// Combines the config file with command-line `overrides`.
///
/// Without an explicit `config` path, `iro.toml` next to `input` is used if present.
pub fn resolve_config(
    input: &Path,
    config: Option<&Path>,
    overrides: RenderSettings,
) -> Result<Config, Error> {
    let from_file = match config {
        Some(path) => load_config(path)?,
        None => {
            let candidate = input.with_file_name(CONFIG_FILE_NAME);
            if candidate.is_file() {
                load_config(&candidate)?
            } else {
                RenderSettings::default()
            }
        }
    };

    from_file.merge(overrides).try_into()
}

pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("png")
}

pub fn render(input: &Path, output: &Path, config: Option<&Path>) -> Result<(), Error> {
    let config = resolve_config(input, config, RenderSettings::default())?;
    render_with_config(input, output, config)
}

pub fn render_with_config(input: &Path, output: &Path, cfg: Config) -> Result<(), Error> {
    let data = std::fs::read(input)?;
    let pixels = Rgb555Parser::read(&data)?;

    let expected = cfg.width as usize * cfg.height as usize;
    if pixels.len() > expected {
        eprintln!(
            "{} {} {}",
            "Ignoring".dimmed(),
            (pixels.len() - expected).to_string().dimmed(),
            "trailing pixels".dimmed()
        );
    }

    let adjust = |color: Rgb555| cfg.adjust(color).to_rgba();
    let convert: Option<Convert> = match (cfg.brighten, cfg.darken) {
        (None, None) => None,
        _ => Some(&adjust),
    };

    let img = rasterize(&pixels, cfg.width, cfg.height, convert)?;
    std::fs::write(output, export_png(&img)?)?;

    println!(
        "+ Rendered {}x{} {}",
        cfg.width,
        cfg.height,
        cfg.format.to_string().green()
    );

    Ok(())
}

#[derive(Debug)]
pub enum Error {
    IOError(std::io::Error),
    ConfigError(String),
    ColorError(iro::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IOError(err) => write!(f, "{err:?}"),
            Error::ConfigError(err) => write!(f, "{err}"),
            Error::ColorError(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

impl From<iro::Error> for Error {
    fn from(err: iro::Error) -> Self {
        Error::ColorError(err)
    }
}
