use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use mkpdf_core::{BuiltinFont, Color, Orientation, PageSize, PdfError};
use thiserror::Error;

const DEFAULT_TEXT: &str = "Hello World!";
const DEFAULT_FONT: &str = "Arial";
const DEFAULT_FONT_SIZE: f64 = 12.0;
const DEFAULT_PAGE_SIZE: &str = "a4";
const DEFAULT_TEXT_COLOR: &str = "0,0,0";
const MAX_ELLIPSES: u32 = 10_000;
const MAX_FONT_SIZE: f64 = 1000.0;

#[derive(Parser, Debug)]
#[command(
    name = "mkpdf",
    version,
    about = "Create a PDF and store it in the file given on the command line."
)]
pub struct CliArgs {
    /// File to write the PDF to.
    output: PathBuf,

    /// Text written centered in the top cell.
    #[arg(long, env = "MKPDF_TEXT", default_value = DEFAULT_TEXT)]
    text: String,

    /// Font family: Arial, Helvetica, Times, Courier, Symbol or ZapfDingbats.
    #[arg(long, env = "MKPDF_FONT", default_value = DEFAULT_FONT)]
    font: String,

    /// Font style: any combination of B (bold) and I (italic).
    #[arg(long, env = "MKPDF_STYLE", default_value = "")]
    style: String,

    /// Font size in points, up to 1000.
    #[arg(long, env = "MKPDF_FONT_SIZE", default_value_t = DEFAULT_FONT_SIZE)]
    font_size: f64,

    /// Number of pseudo-random ellipses drawn behind the text.
    #[arg(long, env = "MKPDF_ELLIPSES", default_value_t = 0)]
    ellipses: u32,

    /// Offset mixed into the ellipse hash.
    #[arg(long, env = "MKPDF_SEED", default_value_t = 0)]
    seed: u32,

    /// Page format: a3, a4, a5, letter or legal.
    #[arg(long, env = "MKPDF_PAGE_SIZE", default_value = DEFAULT_PAGE_SIZE)]
    page_size: String,

    #[arg(
        long,
        env = "MKPDF_LANDSCAPE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    landscape: bool,

    /// Text color as "r,g,b" with components 0-255.
    #[arg(long, env = "MKPDF_TEXT_COLOR", default_value = DEFAULT_TEXT_COLOR)]
    text_color: String,

    #[arg(long, env = "MKPDF_TITLE")]
    title: Option<String>,

    #[arg(long, env = "MKPDF_AUTHOR")]
    author: Option<String>,

    /// Flate-compress page content.
    #[arg(
        long,
        env = "MKPDF_COMPRESS",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    compress: bool,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Validated settings for one rendering run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub output: PathBuf,
    pub text: String,
    pub font: BuiltinFont,
    pub font_size: f64,
    pub ellipse_count: u32,
    pub seed: u32,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub text_color: Color,
    pub title: Option<String>,
    pub author: Option<String>,
    pub compress: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("output path must not be empty")]
    EmptyOutput,

    #[error("invalid {name} value: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error(transparent)]
    Font(#[from] PdfError),
}

impl RenderConfig {
    /// Plain hello-world settings writing to `output`.
    #[cfg(test)]
    pub fn hello(output: impl Into<PathBuf>) -> Self {
        RenderConfig {
            output: output.into(),
            text: DEFAULT_TEXT.to_string(),
            font: BuiltinFont::Helvetica,
            font_size: DEFAULT_FONT_SIZE,
            ellipse_count: 0,
            seed: 0,
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            text_color: Color::BLACK,
            title: None,
            author: None,
            compress: false,
        }
    }
}

impl TryFrom<CliArgs> for RenderConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.output.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutput);
        }

        if !(args.font_size > 0.0 && args.font_size <= MAX_FONT_SIZE) {
            return Err(ConfigError::InvalidSetting {
                name: "font size",
                value: args.font_size.to_string(),
            });
        }

        if args.ellipses > MAX_ELLIPSES {
            return Err(ConfigError::InvalidSetting {
                name: "ellipse count",
                value: args.ellipses.to_string(),
            });
        }

        let font = BuiltinFont::resolve(&args.font, &args.style)?;

        let page_size =
            PageSize::from_name(&args.page_size).ok_or_else(|| ConfigError::InvalidSetting {
                name: "page size",
                value: args.page_size.clone(),
            })?;

        let text_color = parse_rgb8(&args.text_color).ok_or_else(|| ConfigError::InvalidSetting {
            name: "text color",
            value: args.text_color.clone(),
        })?;

        let orientation = if args.landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };

        Ok(RenderConfig {
            output: args.output,
            text: args.text,
            font,
            font_size: args.font_size,
            ellipse_count: args.ellipses,
            seed: args.seed,
            page_size,
            orientation,
            text_color,
            title: args.title.filter(|v| !v.trim().is_empty()),
            author: args.author.filter(|v| !v.trim().is_empty()),
            compress: args.compress,
        })
    }
}

/// Parse "r,g,b" with each component in 0-255.
fn parse_rgb8(value: &str) -> Option<Color> {
    let parts: Vec<u8> = value
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts[..] {
        [r, g, b] => Some(Color::from_rgb8(r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<RenderConfig, ConfigError> {
        let argv = ["mkpdf", "out.pdf"].iter().chain(extra);
        let args = CliArgs::try_parse_from(argv).expect("arguments should parse");
        RenderConfig::try_from(args)
    }

    #[test]
    fn defaults_match_hello_script() {
        let config = parse(&[]).expect("config should build");
        assert_eq!(config, RenderConfig::hello("out.pdf"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--text",
            "Bonjour",
            "--font",
            "times",
            "--style",
            "BI",
            "--font-size",
            "18",
            "--ellipses",
            "40",
            "--seed",
            "7",
            "--page-size",
            "letter",
            "--landscape",
            "--text-color",
            "255, 0, 0",
            "--title",
            "Demo",
            "--compress",
        ])
        .expect("config should build");

        assert_eq!(config.text, "Bonjour");
        assert_eq!(config.font, BuiltinFont::TimesBoldItalic);
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.ellipse_count, 40);
        assert_eq!(config.seed, 7);
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.text_color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(config.title.as_deref(), Some("Demo"));
        assert!(config.compress);
    }

    #[test]
    fn missing_output_is_a_usage_error() {
        assert!(CliArgs::try_parse_from(["mkpdf"]).is_err());
    }

    #[test]
    fn rejects_bad_font_size() {
        assert!(matches!(
            parse(&["--font-size", "0"]),
            Err(ConfigError::InvalidSetting { name: "font size", .. })
        ));
        assert!(parse(&["--font-size", "NaN"]).is_err());
        assert!(parse(&["--font-size", "inf"]).is_err());
    }

    #[test]
    fn font_size_is_capped() {
        assert_eq!(parse(&["--font-size", "1000"]).expect("at the cap").font_size, 1000.0);
        assert!(matches!(
            parse(&["--font-size", "1000.5"]),
            Err(ConfigError::InvalidSetting { name: "font size", .. })
        ));
        assert!(parse(&["--font-size", "1e308"]).is_err());
    }

    #[test]
    fn rejects_unknown_font() {
        let err = parse(&["--font", "Papyrus"]).unwrap_err();
        assert!(matches!(err, ConfigError::Font(PdfError::UnknownFont { .. })));
        assert!(err.to_string().contains("Papyrus"));
    }

    #[test]
    fn rejects_bad_page_size_and_color() {
        assert!(parse(&["--page-size", "b5"]).is_err());
        assert!(parse(&["--text-color", "1,2"]).is_err());
        assert!(parse(&["--text-color", "1,2,300"]).is_err());
        assert!(parse(&["--text-color", "red"]).is_err());
    }

    #[test]
    fn rejects_too_many_ellipses() {
        assert!(parse(&["--ellipses", "10000"]).is_ok());
        assert!(parse(&["--ellipses", "10001"]).is_err());
    }

    #[test]
    fn blank_title_is_dropped() {
        let config = parse(&["--title", "  "]).expect("config should build");
        assert_eq!(config.title, None);
    }
}
