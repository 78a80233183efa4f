use std::collections::HashSet;
use std::fs;
use std::path::Path;

use palletqr::{generate, Error, GenerationRequest, LabelPayload, Manifest, OutputFormat};

fn request(outdir: &Path, quantity: i64) -> GenerationRequest {
    GenerationRequest {
        pallet_id: "PAL001".into(),
        item_id: "ITM123".into(),
        name: "Caja de tornillos".into(),
        quantity,
        outdir: outdir.to_path_buf(),
        format: OutputFormat::Png,
    }
}

fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_three_labels_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let outdir = dir.path().join("qrs");

    let summary = generate(&request(&outdir, 3)).unwrap();

    assert_eq!(summary.count, 3);
    assert_eq!(
        png_files(&outdir),
        vec![
            "qr_PAL001_ITM123_1.png",
            "qr_PAL001_ITM123_2.png",
            "qr_PAL001_ITM123_3.png",
        ]
    );

    let manifest = Manifest::load(&outdir.join("manifest.json")).unwrap();
    let ids: Vec<&str> = manifest
        .entries()
        .iter()
        .map(|e| e.item_id_full.as_str())
        .collect();
    assert_eq!(ids, vec!["PAL001_ITM123_1", "PAL001_ITM123_2", "PAL001_ITM123_3"]);
    assert_eq!(manifest.entries()[2].file, outdir.join("qr_PAL001_ITM123_3.png"));
}

#[test]
fn test_padding_follows_quantity_width() {
    let dir = tempfile::tempdir().unwrap();

    let summary = generate(&request(dir.path(), 100)).unwrap();

    let files = png_files(dir.path());
    assert_eq!(files.len(), 100);
    assert_eq!(files[0], "qr_PAL001_ITM123_001.png");
    assert_eq!(files[99], "qr_PAL001_ITM123_100.png");

    // Lexicographic order of names matches generation order.
    let names: Vec<String> = summary
        .entries
        .iter()
        .map(|e| e.file.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, files);

    let unique: HashSet<&str> = summary.entries.iter().map(|e| e.item_id_full.as_str()).collect();
    assert_eq!(unique.len(), 100);
}

#[test]
fn test_images_carry_the_payload_size() {
    let dir = tempfile::tempdir().unwrap();
    let summary = generate(&request(dir.path(), 2)).unwrap();

    let img = image::open(&summary.entries[0].file).unwrap();
    assert_eq!(img.width(), img.height());
    // Whole modules of 10 px, 4-module border on both sides, version >= 1.
    assert_eq!(img.width() % 10, 0);
    let modules = img.width() / 10 - 8;
    assert!(modules >= 21);
    assert_eq!((modules - 17) % 4, 0);
}

#[test]
fn test_rerun_rewrites_manifest_identically() {
    let dir = tempfile::tempdir().unwrap();
    let req = request(dir.path(), 5);

    generate(&req).unwrap();
    let first = fs::read(dir.path().join("manifest.json")).unwrap();
    let first_image = fs::read(dir.path().join("qr_PAL001_ITM123_4.png")).unwrap();

    generate(&req).unwrap();
    let second = fs::read(dir.path().join("manifest.json")).unwrap();
    let second_image = fs::read(dir.path().join("qr_PAL001_ITM123_4.png")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_image, second_image);
    assert_eq!(png_files(dir.path()).len(), 5);
}

#[test]
fn test_zero_quantity_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let outdir = dir.path().join("never");

    let err = generate(&request(&outdir, 0)).unwrap_err();

    assert!(matches!(err, Error::Validation(0)));
    assert!(!outdir.exists());
}

#[test]
fn test_manifest_keeps_non_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = request(dir.path(), 1);
    req.pallet_id = "PALÑ".into();

    generate(&req).unwrap();

    let text = fs::read_to_string(dir.path().join("manifest.json")).unwrap();
    assert!(text.contains("\"item_id_full\": \"PALÑ_ITM123_1\""));
    assert!(text.starts_with("[\n  {\n    \"index\": 1,"));
}

#[test]
fn test_payload_matches_manifest_entry() {
    let dir = tempfile::tempdir().unwrap();
    let summary = generate(&request(dir.path(), 9)).unwrap();

    let entry = &summary.entries[8];
    let payload = LabelPayload::new("PAL001", "ITM123", "Caja de tornillos", 9, 1);
    assert_eq!(payload.item_id_full, entry.item_id_full);
    assert_eq!(
        LabelPayload::parse(&payload.to_json().unwrap()).unwrap().sequence(),
        Some(entry.index)
    );
}

#[cfg(unix)]
#[test]
fn test_unwritable_outdir_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, b"not a directory").unwrap();

    let err = generate(&request(&blocker.join("qrs"), 2)).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
