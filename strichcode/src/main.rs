mod config;
mod errors;


use std::ffi::OsString;
use std::path::{Path, PathBuf};

use strichcode_bitmap::compose;
use strichcode_render_text::{DEFAULT_SIZE_PX, TextRenderer};
use strichcode_symbology::{Barcode, Symbology};
use tracing::{debug, info};

use crate::config::{Config, find_config};
use crate::errors::GeneralError;


const USAGE: &str = "Usage: strichcode SYMBOLOGY CODE [OUTPUT] [--config CONFIG.json]";


#[derive(Clone, Debug, Eq, PartialEq)]
struct Arguments {
    symbology: Symbology,
    code: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
}


fn os_to_string(value: OsString, what: &str) -> Result<String, GeneralError> {
    value.into_string()
        .map_err(|v| GeneralError::Usage(format!("{} {:?} is not valid UTF-8\n{}", what, v, USAGE)))
}


/// Parses the command-line arguments, not including the program name.
fn parse_args<I: IntoIterator<Item = OsString>>(args: I) -> Result<Arguments, GeneralError> {
    let mut positional: Vec<OsString> = Vec::with_capacity(3);
    let mut config_path = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => return Err(GeneralError::Usage(format!("--config requires a file name\n{}", USAGE))),
            }
        } else if arg == "--help" || arg == "-h" {
            return Err(GeneralError::Usage(USAGE.to_owned()));
        } else {
            positional.push(arg);
        }
    }

    if positional.len() < 2 || positional.len() > 3 {
        return Err(GeneralError::Usage(USAGE.to_owned()));
    }

    let mut positional = positional.into_iter();
    let symbology_name = positional.next()
        .map(|s| os_to_string(s, "symbology"))
        .transpose()?
        .unwrap_or_default();
    let code = positional.next()
        .map(|s| os_to_string(s, "code"))
        .transpose()?
        .unwrap_or_default();
    let output = positional.next()
        .map(PathBuf::from);

    let symbology: Symbology = symbology_name.parse()?;

    Ok(Arguments {
        symbology,
        code,
        output,
        config_path,
    })
}


fn is_text_output(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}


fn write_file(path: &Path, contents: &[u8]) -> Result<(), GeneralError> {
    std::fs::write(path, contents)
        .map_err(|e| GeneralError::Io { path: path.to_owned(), error: e })
}


/// Renders the barcode as a PNG image according to the configuration.
fn render_png(barcode: &Barcode, config: &Config) -> Result<Vec<u8>, GeneralError> {
    let font_data = match (&config.font_path, config.caption) {
        (Some(font_path), true) => {
            let data = std::fs::read(font_path)
                .map_err(|e| GeneralError::Io { path: font_path.clone(), error: e })?;
            Some((font_path, data))
        },
        (None, true) => {
            debug!("no font configured; drawing {:?} without caption", barcode);
            None
        },
        (_, false) => None,
    };
    let renderer = match &font_data {
        Some((font_path, data)) => {
            let r = TextRenderer::new(data, DEFAULT_SIZE_PX)
                .ok_or_else(|| GeneralError::FontLoading(font_path.to_path_buf()))?;
            Some(r)
        },
        None => None,
    };

    let image = compose(barcode, renderer.as_ref())?;
    let rendered = image.render(&config.render_options());
    let png = rendered.to_png()?;
    Ok(png)
}


fn run(args: Arguments, config: &Config) -> Result<(), GeneralError> {
    let barcode = Barcode::new(args.symbology, &args.code)?;
    info!("encoded {:?}", barcode);

    match &args.output {
        None => {
            println!("{}", barcode.code());
            println!("{}", barcode.bit_string());
        },
        Some(path) if is_text_output(path) => {
            write_file(path, barcode.as_bytes())?;
        },
        Some(path) => {
            let png = render_png(&barcode, config)?;
            write_file(path, &png)?;
        },
    }
    Ok(())
}


fn load_and_run() -> Result<(), GeneralError> {
    let args = parse_args(std::env::args_os().skip(1))?;
    let config = find_config(args.config_path.as_deref(), Path::new("."))?;
    run(args, &config)
}


fn main() {
    // set up tracing
    let (stderr_non_blocking, guard) = tracing_appender::non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(stderr_non_blocking)
        .init();

    let result = load_and_run();

    // flush pending log output before exiting
    drop(guard);

    std::process::exit(
        match result {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{}", e);
                e.exit_code()
            },
        }
    )
}


#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    use strichcode_symbology::{BarcodeError, Symbology};

    use super::{Arguments, is_text_output, parse_args, run};
    use crate::config::Config;
    use crate::errors::GeneralError;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(os_args(&["ean13", "400638133393"])).unwrap();
        assert_eq!(args, Arguments {
            symbology: Symbology::Ean13,
            code: "400638133393".to_owned(),
            output: None,
            config_path: None,
        });

        let args = parse_args(os_args(&["--config", "my.json", "CODE39", "abc", "out.png"])).unwrap();
        assert_eq!(args.symbology, Symbology::Code39);
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
        assert_eq!(args.config_path, Some(PathBuf::from("my.json")));
    }

    #[test]
    fn test_parse_args_usage_errors() {
        for args in [&[][..], &["ean13"][..], &["ean13", "1", "a", "b"][..], &["--help"][..], &["ean13", "1", "--config"][..]] {
            let err = parse_args(os_args(args)).unwrap_err();
            assert!(matches!(err, GeneralError::Usage(_)), "{:?}", args);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_parse_args_unknown_symbology() {
        let err = parse_args(os_args(&["upc", "123"])).unwrap_err();
        assert!(matches!(err, GeneralError::Barcode(BarcodeError::UnknownSymbology(_))));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_is_text_output() {
        assert!(is_text_output(&PathBuf::from("code.txt")));
        assert!(is_text_output(&PathBuf::from("CODE.TXT")));
        assert!(!is_text_output(&PathBuf::from("code.png")));
        assert!(!is_text_output(&PathBuf::from("txt")));
    }

    #[test]
    fn test_run_writes_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.txt");
        let args = Arguments {
            symbology: Symbology::Jan,
            code: "450638133393".to_owned(),
            output: Some(path.clone()),
            config_path: None,
        };
        run(args, &Config::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "4506381333936");
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        let args = Arguments {
            symbology: Symbology::Ean8,
            code: "0123456".to_owned(),
            output: Some(path.clone()),
            config_path: None,
        };
        run(args, &Config::default()).unwrap();
        let png = std::fs::read(&path).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_run_missing_font() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            font_path: Some(dir.path().join("missing.ttf")),
            ..Config::default()
        };
        let args = Arguments {
            symbology: Symbology::Ean13,
            code: "400638133393".to_owned(),
            output: Some(dir.path().join("code.png")),
            config_path: None,
        };
        assert!(matches!(run(args, &config), Err(GeneralError::Io { .. })));
    }

    #[test]
    fn test_run_invalid_font() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = dir.path().join("font.ttf");
        std::fs::write(&font_path, b"not a font").unwrap();
        let config = Config {
            font_path: Some(font_path),
            ..Config::default()
        };
        let args = Arguments {
            symbology: Symbology::Code39,
            code: "abc".to_owned(),
            output: Some(dir.path().join("code.png")),
            config_path: None,
        };
        assert!(matches!(run(args, &config), Err(GeneralError::FontLoading(_))));
    }

    #[test]
    fn test_run_invalid_code() {
        let args = Arguments {
            symbology: Symbology::Jan,
            code: "400638133393".to_owned(),
            output: None,
            config_path: None,
        };
        assert!(matches!(
            run(args, &Config::default()),
            Err(GeneralError::Barcode(BarcodeError::InvalidFormat { .. })),
        ));
    }
}
