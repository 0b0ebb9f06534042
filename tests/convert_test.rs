//! End-to-end conversion of picture files into C64 containers.

mod common;

use c64_bitmap::palette::{BLUE, WHITE};
use common::{assert_file_size, assert_load_address, fixtures, TestWorkspace};
use image2c64::error::AppError;
use image2c64::models::{OutputFormat, Packaging};
use pretty_assertions::assert_eq;

#[test]
fn test_hires_art_studio() {
    let ws = TestWorkspace::new();
    let input = ws.picture("blue.png", &fixtures::flat(320, 200, BLUE));
    let mut options = ws.options(OutputFormat::Hires);
    options.output = Some(ws.path("blue.art"));

    let failed = ws.converter(options).run(&[input]).unwrap();

    assert_eq!(failed, 0);
    let bytes = assert_file_size(&ws.path("blue.art"), 9002);
    assert_load_address(&bytes, 0x2000);
    // single-color chars repeat the color in both nibbles
    assert!(bytes[8002..].iter().all(|&b| b == BLUE << 4 | BLUE));
}

#[test]
fn test_default_output_name_is_prg() {
    let ws = TestWorkspace::new();
    let input = ws.picture("pic.png", &fixtures::flat(160, 200, WHITE));

    let failed = ws.converter(ws.options(OutputFormat::Koala)).run(&[input]).unwrap();

    assert_eq!(failed, 0);
    assert_file_size(&ws.path("pic.prg"), 10003);
}

#[test]
fn test_koala_from_full_width_picture() {
    let ws = TestWorkspace::new();
    let input = ws.picture("wide.png", &fixtures::wide_multicolor());
    let mut options = ws.options(OutputFormat::Multi);
    options.output = Some(ws.path("wide.kla"));

    let failed = ws.converter(options).run(&[input]).unwrap();

    assert_eq!(failed, 0);
    let bytes = assert_file_size(&ws.path("wide.kla"), 10003);
    assert_load_address(&bytes, 0x6000);
    // most frequent color becomes the background
    assert_eq!(bytes[10002], BLUE);
}

#[test]
fn test_executables() {
    let ws = TestWorkspace::new();
    let hires = ws.picture("h.png", &fixtures::flat(320, 200, BLUE));
    let multi = ws.picture("m.png", &fixtures::flat(160, 200, BLUE));

    let mut options = ws.options(OutputFormat::Hires);
    options.packaging = Packaging::Executable;
    options.border = Some(WHITE);
    assert_eq!(ws.converter(options).run(&[hires]).unwrap(), 0);

    let mut options = ws.options(OutputFormat::Koala);
    options.packaging = Packaging::Executable;
    assert_eq!(ws.converter(options).run(&[multi]).unwrap(), 0);

    let bytes = assert_file_size(&ws.path("h.prg"), 14145);
    assert_load_address(&bytes, 0x0801);
    assert_eq!(bytes[19], WHITE, "border patched into the display routine");

    let bytes = assert_file_size(&ws.path("m.prg"), 14145);
    assert_eq!(bytes[38], BLUE, "background patched into the display routine");
}

#[test]
fn test_raw_multicolor_files() {
    let ws = TestWorkspace::new();
    let input = ws.picture("logo.png", &fixtures::flat(160, 200, BLUE));
    let mut options = ws.options(OutputFormat::Multi);
    options.packaging = Packaging::Raw;

    assert_eq!(ws.converter(options).run(&[input]).unwrap(), 0);

    assert_file_size(&ws.path("logo_bitmap.raw"), 8000);
    assert_file_size(&ws.path("logo_screen.raw"), 1000);
    assert_file_size(&ws.path("logo_color-ram.raw"), 1000);
    assert_eq!(assert_file_size(&ws.path("logo_bg.raw"), 1), vec![BLUE]);
}

#[test]
fn test_raw_hires_files() {
    let ws = TestWorkspace::new();
    let input = ws.picture("logo.png", &fixtures::flat(320, 200, BLUE));
    let mut options = ws.options(OutputFormat::Hires);
    options.packaging = Packaging::Raw;

    assert_eq!(ws.converter(options).run(&[input]).unwrap(), 0);

    assert_file_size(&ws.path("logo_bitmap.raw"), 8000);
    assert_file_size(&ws.path("logo_screen.raw"), 1000);
    assert!(!ws.path("logo_color-ram.raw").exists());
    assert!(!ws.path("logo_bg.raw").exists());
}

#[test]
fn test_batch_into_new_directory() {
    let ws = TestWorkspace::new();
    let a = ws.picture("a.png", &fixtures::flat(320, 200, BLUE));
    let b = ws.picture("b.bmp", &fixtures::flat(320, 200, WHITE));
    let mut options = ws.options(OutputFormat::Hires);
    options.output = Some(ws.path("out"));

    assert_eq!(ws.converter(options).run(&[a, b]).unwrap(), 0);

    assert_file_size(&ws.path("out/a.prg"), 9002);
    assert_file_size(&ws.path("out/b.prg"), 9002);
}

#[test]
fn test_batch_output_must_be_directory() {
    let ws = TestWorkspace::new();
    let a = ws.picture("a.png", &fixtures::flat(320, 200, BLUE));
    let b = ws.picture("b.png", &fixtures::flat(320, 200, BLUE));
    std::fs::write(ws.path("out"), b"not a directory").unwrap();
    let mut options = ws.options(OutputFormat::Hires);
    options.output = Some(ws.path("out"));

    let result = ws.converter(options).run(&[a, b]);

    assert!(matches!(result, Err(AppError::NotADirectory(_))));
}

#[test]
fn test_failures_are_counted_per_image() {
    let ws = TestWorkspace::new();
    let good = ws.picture("good.png", &fixtures::flat(320, 200, BLUE));
    let small = ws.picture("small.png", &fixtures::flat(100, 100, BLUE));
    let missing = ws.path("missing.png");
    let mut options = ws.options(OutputFormat::Hires);
    options.output = Some(ws.path("out"));

    let failed = ws.converter(options).run(&[missing, small, good]).unwrap();

    assert_eq!(failed, 2);
    assert!(ws.path("out/good.prg").exists());
    assert!(!ws.path("out/small.prg").exists());
}

#[test]
fn test_wrong_size_is_reported() {
    let ws = TestWorkspace::new();
    let small = ws.picture("small.png", &fixtures::flat(100, 100, BLUE));
    let converter = ws.converter(ws.options(OutputFormat::Hires));

    let error = converter.convert_file(&small, &ws.path("small.prg")).unwrap_err();

    assert!(
        error.to_string().contains("wrong picture dimensions: 100x100"),
        "unexpected error: {error}"
    );
}

#[test]
fn test_existing_output_is_overwritten() {
    let ws = TestWorkspace::new();
    let input = ws.picture("pic.png", &fixtures::flat(320, 200, BLUE));
    std::fs::write(ws.path("pic.prg"), b"old").unwrap();

    assert_eq!(ws.converter(ws.options(OutputFormat::Hires)).run(&[input]).unwrap(), 0);

    assert_file_size(&ws.path("pic.prg"), 9002);
}
