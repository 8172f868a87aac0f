//! Command line front end
//!
//! ```text
//! wallsplit preview --image IMG --layout LAYOUT [--out preview.png]
//! wallsplit fit     --image IMG --layout LAYOUT
//! wallsplit export  --image IMG --layout LAYOUT [--out wallpapers.zip]
//!
//! common: [--events EVENTS.json] [--scale F] [--offset X,Y] [--width PX]
//!         [--config CONFIG.json]
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};

use crate::capture::image::SourceImage;
use crate::capture::layout;
use crate::config::WallsplitConfig;
use crate::domain::{FitReport, Point};
use crate::export::deliver;
use crate::session::{Session, messages};

const USAGE: &str = "\
Usage: wallsplit <preview|fit|export> --image <file> --layout <file> [options]

Options:
  --events <file>   replay pointer/wheel events (JSON) before rendering
  --scale <f>       start from this zoom factor (> 0)
  --offset <x,y>    start from this group offset in millimeters
  --width <px>      preview canvas width
  --config <file>   read settings from this file instead of the default
  --out <file>      output path (preview PNG or export archive)
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Preview,
    Fit,
    Export,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(Command::Preview),
            "fit" => Ok(Command::Fit),
            "export" => Ok(Command::Export),
            other => bail!("Unknown command {other:?}\n\n{USAGE}"),
        }
    }
}

/// Group offset given as `x,y` millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
struct OffsetArg(Point);

impl FromStr for OffsetArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .with_context(|| format!("Offset must look like X,Y, got {s:?}"))?;
        let x: f64 = x.trim().parse().with_context(|| format!("Bad offset x {x:?}"))?;
        let y: f64 = y.trim().parse().with_context(|| format!("Bad offset y {y:?}"))?;
        Ok(OffsetArg(Point::new(x, y)))
    }
}

#[derive(Debug)]
struct Args {
    command: Command,
    image: PathBuf,
    layout: PathBuf,
    events: Option<PathBuf>,
    scale: Option<f64>,
    offset: Option<OffsetArg>,
    width: Option<u32>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: pico_args::Arguments) -> anyhow::Result<Self> {
        if args.contains(["-h", "--help"]) {
            print!("{USAGE}");
            std::process::exit(0);
        }

        let command = args
            .subcommand()?
            .with_context(|| format!("Missing command\n\n{USAGE}"))?
            .parse()?;
        let parsed = Self {
            command,
            image: args.value_from_str("--image")?,
            layout: args.value_from_str("--layout")?,
            events: args.opt_value_from_str("--events")?,
            scale: args.opt_value_from_str("--scale")?,
            offset: args.opt_value_from_str("--offset")?,
            width: args.opt_value_from_str("--width")?,
            config: args.opt_value_from_str("--config")?,
            out: args.opt_value_from_str("--out")?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            bail!("Unexpected arguments: {rest:?}\n\n{USAGE}");
        }
        Ok(parsed)
    }
}

fn print_reports(reports: &[FitReport]) {
    for report in reports {
        println!("{report}");
    }
}

pub async fn run(args: pico_args::Arguments) -> anyhow::Result<()> {
    let args = Args::parse(args)?;
    log::debug!("{:?}", args);

    let config = match &args.config {
        Some(path) => WallsplitConfig::load_from(path),
        None => WallsplitConfig::load(),
    };

    let mut session = Session::new(&config);
    if let Some(width) = args.width {
        session.set_preview_width(width);
    }

    // A decode failure never reaches the session
    let image = SourceImage::load(&args.image)?;
    session.load_image(image);
    session.load_layout(layout::load_layout(&args.layout)?);

    if args.scale.is_some() || args.offset.is_some() {
        let scale = args.scale.unwrap_or(1.0);
        let offset = args.offset.map_or(Point::ORIGIN, |o| o.0);
        session.set_view(scale, offset)?;
    }

    let events = match &args.events {
        Some(path) => messages::load_events(path)?,
        None => Vec::new(),
    };

    match args.command {
        Command::Preview => {
            let mut surface = session
                .preview_surface()
                .context("Preview canvas could not be allocated")?;
            let mut reports = session.render(&mut surface);
            let mut redraws = 0usize;
            for msg in events {
                if let Some(fresh) = session.handle(msg, &mut surface) {
                    reports = fresh;
                    redraws += 1;
                }
            }
            log::debug!("Replayed events with {} redraws", redraws);

            let out = args.out.unwrap_or_else(|| PathBuf::from("preview.png"));
            surface
                .to_rgba()
                .save(&out)
                .with_context(|| format!("Failed to save preview {}", out.display()))?;
            print_reports(&reports);
            println!("Preview written to {}", out.display());
        }
        Command::Fit => {
            for msg in events {
                session.update(msg);
            }
            print_reports(&session.fit_reports());
        }
        Command::Export => {
            for msg in events {
                session.update(msg);
            }
            let view = session.view();
            log::info!(
                "Exporting with scale {} offset ({}, {}) mm",
                view.scale(),
                view.group_offset_mm.x,
                view.group_offset_mm.y
            );

            let blob = match session.export_archive().await {
                Ok(Some(blob)) => blob,
                Ok(None) => {
                    println!("Nothing to export");
                    return Ok(());
                }
                Err(err) => {
                    log::error!("Export failed: {:?}", err);
                    return Err(err);
                }
            };
            let path = deliver::archive_path(&config, args.out)?;
            let path = deliver::deliver(&blob, &path)?;
            print_reports(&session.fit_reports());
            println!("Exported {} monitors to {}", session.monitors().len(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(list: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    #[test]
    fn test_parse_full_command_line() {
        let parsed = Args::parse(args(&[
            "export", "--image", "in.jpg", "--layout", "l.json", "--scale", "2.5", "--offset",
            "10, 20.5", "--out", "x.zip",
        ]))
        .unwrap();
        assert_eq!(parsed.command, Command::Export);
        assert_eq!(parsed.image, PathBuf::from("in.jpg"));
        assert_eq!(parsed.scale, Some(2.5));
        assert_eq!(parsed.offset, Some(OffsetArg(Point::new(10.0, 20.5))));
        assert_eq!(parsed.out, Some(PathBuf::from("x.zip")));
        assert!(parsed.events.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_command_and_missing_inputs() {
        assert!(Args::parse(args(&["explode", "--image", "a", "--layout", "b"])).is_err());
        assert!(Args::parse(args(&["fit", "--image", "a"])).is_err());
        assert!(Args::parse(args(&["fit", "--image", "a", "--layout", "b", "--bogus"])).is_err());
    }

    #[test]
    fn test_offset_arg() {
        assert!("1;2".parse::<OffsetArg>().is_err());
        assert!("a,2".parse::<OffsetArg>().is_err());
        assert_eq!("3,4".parse::<OffsetArg>().unwrap(), OffsetArg(Point::new(3.0, 4.0)));
    }

    #[tokio::test]
    async fn test_export_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("wall.png");
        image::RgbaImage::from_pixel(400, 200, image::Rgba([9, 9, 9, 255]))
            .save(&image)
            .unwrap();
        let layout = dir.path().join("layout.json");
        std::fs::write(
            &layout,
            r#"[
                { "name": "R", "offset": [5000, 0], "mm": [5000, 5000], "px": [20, 20] },
                { "name": "L", "offset": [0, 0], "mm": [5000, 5000], "px": [20, 20] }
            ]"#,
        )
        .unwrap();
        let events = dir.path().join("events.json");
        std::fs::write(&events, r#"[{ "type": "wheel", "delta_y": 1 }]"#).unwrap();
        let out = dir.path().join("out.zip");

        let missing_config = dir.path().join("missing-config.json");
        let list = [
            "export",
            "--image",
            image.to_str().unwrap(),
            "--layout",
            layout.to_str().unwrap(),
            "--events",
            events.to_str().unwrap(),
            "--config",
            missing_config.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ];
        run(args(&list)).await.unwrap();

        let names = crate::export::archive::entry_names(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(names, ["wallpaper_01_L_20x20.png", "wallpaper_02_R_20x20.png"]);
    }

    #[tokio::test]
    async fn test_preview_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("wall.png");
        image::RgbaImage::from_pixel(100, 50, image::Rgba([0, 0, 0, 255]))
            .save(&image)
            .unwrap();
        let layout = dir.path().join("layout.json");
        std::fs::write(
            &layout,
            r#"[{ "name": "M", "offset": [0, 0], "mm": [600, 340], "px": [1920, 1080] }]"#,
        )
        .unwrap();
        let out = dir.path().join("preview.png");

        let missing_config = dir.path().join("missing-config.json");
        let list = [
            "preview",
            "--image",
            image.to_str().unwrap(),
            "--layout",
            layout.to_str().unwrap(),
            "--width",
            "200",
            "--config",
            missing_config.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ];
        run(args(&list)).await.unwrap();

        let written = image::open(&out).unwrap();
        assert_eq!((written.width(), written.height()), (200, 100));
    }
}
