use std::path::PathBuf;

use clap::Parser;

/// Build a glyph atlas from a font, dump it to PNG and preview a line of text.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "glint-studio", version)]
pub struct StudioArgs {
    /// TrueType / OpenType font file.
    pub font: PathBuf,

    /// Line of text to render.
    #[arg(long, default_value = "Glint atlas 0123")]
    pub text: String,

    /// Pixel size.
    #[arg(long, default_value_t = 32.0, value_parser = parse_pixel_size)]
    pub size: f32,

    /// Square atlas edge length in pixels.
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..=16384))]
    pub atlas: u32,

    /// Output directory for PNGs.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Also upload into a headless wgpu texture.
    #[arg(long)]
    pub gpu: bool,
}

fn parse_pixel_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if size.is_finite() && size > 0.0 && size <= 1024.0 {
        Ok(size)
    } else {
        Err(format!("expected a pixel size in (0, 1024], got {s}"))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<StudioArgs, clap::Error> {
        StudioArgs::try_parse_from(std::iter::once("glint-studio").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_valid() {
        StudioArgs::command().debug_assert();
    }

    #[test]
    fn font_only_uses_defaults() {
        let a = parse(&["font.ttf"]).unwrap();
        assert_eq!(a.font, PathBuf::from("font.ttf"));
        assert_eq!(a.text, "Glint atlas 0123");
        assert_eq!(a.size, 32.0);
        assert_eq!(a.atlas, 512);
        assert_eq!(a.out, PathBuf::from("."));
        assert!(!a.gpu);
    }

    #[test]
    fn all_options() {
        let a = parse(&["--size", "18.5", "f.otf", "--text", "hi", "--atlas", "256", "--out", "o", "--gpu"])
            .unwrap();
        assert_eq!(a.size, 18.5);
        assert_eq!(a.text, "hi");
        assert_eq!(a.atlas, 256);
        assert_eq!(a.out, PathBuf::from("o"));
        assert!(a.gpu);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.ttf", "b.ttf"]).is_err());
        assert!(parse(&["a.ttf", "--size"]).is_err());
        assert!(parse(&["a.ttf", "--size", "-4"]).is_err());
        assert!(parse(&["a.ttf", "--size", "1e30"]).is_err());
        assert!(parse(&["a.ttf", "--size", "NaN"]).is_err());
        assert!(parse(&["a.ttf", "--atlas", "0"]).is_err());
        assert!(parse(&["a.ttf", "--wat"]).is_err());
    }
}
