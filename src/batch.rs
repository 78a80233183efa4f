use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::manifest::{Manifest, ManifestEntry};
use crate::payload::{sequence_width, LabelPayload};
use crate::render::{self, RenderOptions};
use crate::request::{GenerationRequest, OutputFormat};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub count: u64,
    pub outdir: PathBuf,
    pub manifest_path: PathBuf,
    pub entries: Vec<ManifestEntry>,
}

impl BatchSummary {
    /// The two lines printed after a successful run, with absolute paths.
    pub fn report(&self) -> Result<String> {
        let outdir = std::path::absolute(&self.outdir)?;
        let manifest = std::path::absolute(&self.manifest_path)?;
        Ok(format!(
            "✅ {} QR(s) generated in: {}\n🧾 Manifest: {}",
            self.count,
            outdir.display(),
            manifest.display()
        ))
    }
}

/// Writes one numbered QR label per unit plus `manifest.json`.
#[derive(Debug, Clone, Default)]
pub struct BatchGenerator {
    options: RenderOptions,
    preview: bool,
}

impl BatchGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Also print each code to stdout as it is written.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Runs the batch in ascending sequence order.
    ///
    /// A non-positive quantity fails before anything touches the disk. Any
    /// I/O error aborts the run as-is: images already written stay in place
    /// and no manifest is produced.
    pub fn run(&self, request: &GenerationRequest) -> Result<BatchSummary> {
        if request.quantity <= 0 {
            return Err(Error::Validation(request.quantity));
        }
        let quantity = request.quantity as u64;
        let width = sequence_width(quantity);

        fs::create_dir_all(&request.outdir)?;
        info!(
            pallet_id = %request.pallet_id,
            item_id = %request.item_id,
            quantity,
            outdir = %request.outdir.display(),
            "generating QR batch"
        );

        let mut manifest = Manifest::for_quantity(quantity);
        for index in 1..=quantity {
            let payload = LabelPayload::new(
                &request.pallet_id,
                &request.item_id,
                &request.name,
                index,
                width,
            );
            let file = self.write_label(&payload, &request.outdir, request.format)?;
            debug!(index, item_id_full = %payload.item_id_full, file = %file.display(), "wrote label");

            manifest.push(ManifestEntry {
                index,
                item_id_full: payload.item_id_full,
                file,
            });
        }

        let manifest_path = manifest.write(&request.outdir)?;
        info!(count = quantity, manifest = %manifest_path.display(), "batch complete");

        Ok(BatchSummary {
            count: quantity,
            outdir: request.outdir.clone(),
            manifest_path,
            entries: manifest.into_entries(),
        })
    }

    fn write_label(&self, payload: &LabelPayload, outdir: &Path, format: OutputFormat) -> Result<PathBuf> {
        let qr = render::encode(&payload.to_json()?, self.options.ecc)?;
        let path = outdir.join(format!("qr_{}.{}", payload.item_id_full, format.extension()));

        match format {
            OutputFormat::Png => render::to_image_buffer(&qr, &self.options)?.save(&path)?,
            OutputFormat::Svg => fs::write(&path, render::to_svg_string(&qr, self.options.border))?,
        }
        if self.preview {
            render::print_qr(&qr, self.options.border)?;
        }

        Ok(path)
    }
}

/// Runs a batch with the default rendering parameters: error correction
/// Medium, 10 pixels per module, a 4-module border.
pub fn generate(request: &GenerationRequest) -> Result<BatchSummary> {
    BatchGenerator::new().run(request)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_rejects_non_positive_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("qrs");

        for quantity in [0, -1] {
            let err = generate(&request(&outdir, quantity)).unwrap_err();
            assert!(matches!(err, Error::Validation(q) if q == quantity));
        }
        assert!(!outdir.exists());
    }

    #[test]
    fn test_entries_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate(&request(dir.path(), 12)).unwrap();

        assert_eq!(summary.count, 12);
        let indexes: Vec<u64> = summary.entries.iter().map(|e| e.index).collect();
        assert_eq!(indexes, (1..=12).collect::<Vec<_>>());
        assert_eq!(summary.entries[0].item_id_full, "PAL001_ITM123_01");
        assert_eq!(summary.entries[11].item_id_full, "PAL001_ITM123_12");
        assert_eq!(summary.manifest_path, dir.path().join("manifest.json"));
    }

    #[test]
    fn test_report_uses_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let summary = BatchSummary {
            count: 3,
            outdir: PathBuf::from("qrs"),
            manifest_path: PathBuf::from("qrs").join("manifest.json"),
            entries: Vec::new(),
        };
        let report = summary.report().unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            lines[0],
            format!("✅ 3 QR(s) generated in: {}", cwd.join("qrs").display())
        );
        assert_eq!(
            lines[1],
            format!("🧾 Manifest: {}", cwd.join("qrs").join("manifest.json").display())
        );

        let summary = generate(&request(dir.path(), 1)).unwrap();
        let report = summary.report().unwrap();
        assert!(report.contains(&dir.path().join("manifest.json").display().to_string()));
    }

    #[test]
    fn test_svg_labels() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path(), 2);
        req.format = OutputFormat::Svg;

        let summary = generate(&req).unwrap();
        let file = &summary.entries[1].file;
        assert_eq!(file, &dir.path().join("qr_PAL001_ITM123_2.svg"));
        assert!(fs::read_to_string(file).unwrap().contains("<svg"));
    }

    #[test]
    fn test_custom_options() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            box_size: 2,
            border: 1,
            ..RenderOptions::default()
        };
        let summary = BatchGenerator::new()
            .with_options(options)
            .run(&request(dir.path(), 1))
            .unwrap();

        let img = image::open(&summary.entries[0].file).unwrap();
        assert_eq!(img.width() % 2, 0);
        assert_eq!(img.width(), img.height());
    }
}
