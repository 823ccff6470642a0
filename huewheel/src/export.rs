//! Headless rendering of the wheel to an image file, and the command line that asks for it.

use huewheel_core::{wheel::WheelImage, Hsv};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Open the color window.
    Run,
    /// Render the wheel for `color` into a PNG at `path`.
    Export {
        path: std::path::PathBuf,
        color: Hsv,
    },
}

/// Parse arguments (excluding the program name). Accepts `--export <path> [--hsv h,s,v]`, or nothing.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Command> {
    let mut path = None;
    let mut color = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--export" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--export needs a path"))?;
                path = Some(std::path::PathBuf::from(value));
            }
            "--hsv" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--hsv needs a color"))?;
                color = Some(parse_hsv(&value)?);
            }
            other => anyhow::bail!("unknown argument {other:?}"),
        }
    }
    match (path, color) {
        (Some(path), color) => Ok(Command::Export {
            path,
            color: color.unwrap_or(Hsv::new(0.0, 1.0, 1.0)),
        }),
        (None, Some(_)) => anyhow::bail!("--hsv only makes sense with --export"),
        (None, None) => Ok(Command::Run),
    }
}

/// Parse `h,s,v` with each component a float. Out of range values are normalized.
pub fn parse_hsv(value: &str) -> anyhow::Result<Hsv> {
    let mut components = value.split(',').map(|component| component.trim().parse::<f32>());
    let mut next = |name: &str| -> anyhow::Result<f32> {
        components
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing {name} in {value:?}"))?
            .map_err(|e| anyhow::anyhow!("bad {name} in {value:?}: {e}"))
    };
    let color = Hsv::new(next("hue")?, next("saturation")?, next("value")?);
    if components.next().is_some() {
        anyhow::bail!("too many components in {value:?}");
    }
    Ok(color.normalized())
}

/// Render the wheel for `color` and write it to `path` as a PNG.
pub fn export_png(path: &std::path::Path, color: Hsv) -> anyhow::Result<()> {
    let wheel = WheelImage::rendered(color);
    let [width, height] = wheel.size();
    let buffer = image::RgbaImage::from_raw(
        width.try_into()?,
        height.try_into()?,
        wheel.as_bytes().to_vec(),
    )
    .ok_or_else(|| anyhow::anyhow!("wheel buffer doesn't match its size"))?;
    buffer.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("wrote wheel for {color:?} to {path:?}");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{export_png, parse_args, parse_hsv, Command};
    use huewheel_core::Hsv;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|&arg| arg.to_owned()).collect()
    }

    #[test]
    fn hsv_strings() {
        assert_eq!(
            parse_hsv("0.25, 0.5,1").unwrap(),
            Hsv::new(0.25, 0.5, 1.0)
        );
        assert_eq!(
            parse_hsv("1.5,1.2,-0.3").unwrap(),
            Hsv::new(0.5, 1.0, 0.0)
        );
        assert!(parse_hsv("0.1,0.2").is_err());
        assert!(parse_hsv("0.1,0.2,0.3,0.4").is_err());
        assert!(parse_hsv("red,0.2,0.3").is_err());
    }
    #[test]
    fn arguments() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Run);
        assert_eq!(
            parse_args(args(&["--export", "out.png", "--hsv", "0.5,0.5,0.5"])).unwrap(),
            Command::Export {
                path: "out.png".into(),
                color: Hsv::new(0.5, 0.5, 0.5)
            }
        );
        assert!(matches!(
            parse_args(args(&["--export", "out.png"])).unwrap(),
            Command::Export { .. }
        ));
        assert!(parse_args(args(&["--export"])).is_err());
        assert!(parse_args(args(&["--hsv", "0,0,0"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
    }
    #[test]
    fn writes_png() {
        let path = std::env::temp_dir().join(format!("huewheel-test-{}.png", std::process::id()));
        export_png(&path, Hsv::new(0.1, 0.8, 0.9)).unwrap();
        let read = image::open(&path).unwrap().into_rgba8();
        let _ = std::fs::remove_file(&path);

        assert_eq!(read.dimensions(), (256, 256));
        // Corner is clipped, hue ring is opaque.
        assert_eq!(read.get_pixel(0, 0).0[3], 0);
        assert_eq!(read.get_pixel(241, 128).0[3], 255);
    }
}
