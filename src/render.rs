use std::io::{self, Write};

use image::{ImageBuffer, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::{Error, Result};

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    #[default]
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    fn level(self) -> EcLevel {
        match self {
            QrCodeEcc::Low => EcLevel::L,
            QrCodeEcc::Medium => EcLevel::M,
            QrCodeEcc::Quartile => EcLevel::Q,
            QrCodeEcc::High => EcLevel::H,
        }
    }
}

/// Robustness and raster parameters shared by every label in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub ecc: QrCodeEcc,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ecc: QrCodeEcc::Medium,
            box_size: 10,
            border: 4,
        }
    }
}

/// Encodes `text` at the smallest version (starting from 1) that fits it.
pub fn encode(text: &str, ecc: QrCodeEcc) -> Result<QrCode> {
    QrCode::with_error_correction_level(text.as_bytes(), ecc.level())
        .map_err(|e| Error::Encode(e.to_string()))
}

fn is_dark(qr: &QrCode, x: i64, y: i64) -> bool {
    let size = qr.width() as i64;
    (0..size).contains(&x) && (0..size).contains(&y) && qr[(x as usize, y as usize)] == Color::Dark
}

/// Side length in pixels of the rasterized code, or `None` if it does not fit a `u32`.
fn image_side(modules: usize, border: u32, box_size: u32) -> Option<u32> {
    u32::try_from(modules)
        .ok()?
        .checked_add(border.checked_mul(2)?)?
        .checked_mul(box_size)
}

/// Rasterizes a QR code to a black-on-white grayscale image.
///
/// The image is `(modules + 2 * border) * box_size` pixels on each side. A
/// side that would not fit a `u32` is reported as [`Error::ImageTooLarge`].
pub fn to_image_buffer(qr: &QrCode, options: &RenderOptions) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>> {
    let border = i64::from(options.border);
    let box_size = options.box_size.max(1);
    let size = image_side(qr.width(), options.border, box_size).ok_or(Error::ImageTooLarge {
        modules: qr.width(),
        border: options.border,
        box_size,
    })?;
    let mut img = ImageBuffer::new(size, size);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = i64::from(x / box_size) - border;
        let qr_y = i64::from(y / box_size) - border;
        *pixel = if is_dark(qr, qr_x, qr_y) {
            Luma([0u8]) // Black
        } else {
            Luma([255u8]) // White
        };
    }

    Ok(img)
}

/// Renders the code as an SVG document.
///
/// Each module is one user unit, so the `viewBox` is `modules + 2 * border`
/// units wide and viewers scale it to the display size. `border` is the quiet
/// zone in modules. Output always uses `\n` newlines.
pub fn to_svg_string(qr: &QrCode, border: u32) -> String {
    let size = qr.width() as i64;
    let border = i64::from(border);
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    let dimension = size + border * 2;
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..size {
        for x in 0..size {
            if is_dark(qr, x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Writes the QR code as block characters, two columns per module.
pub fn write_ascii<W: Write>(qr: &QrCode, border: u32, out: &mut W) -> io::Result<()> {
    let size = qr.width() as i64;
    let border = i64::from(border);
    for y in -border..size + border {
        for x in -border..size + border {
            let c = if is_dark(qr, x, y) { '█' } else { ' ' };
            write!(out, "{0}{0}", c)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

/// Prints the given QR code to the console.
pub fn print_qr(qr: &QrCode, border: u32) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_ascii(qr, border, &mut lock)
}
