use crate::domain::model::ProfileImage;
use crate::utils::error::{Result, SiteError};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::io::ErrorKind;
use std::path::Path;

const OPAQUE: u8 = 255;
const TRANSPARENT: u8 = 0;

/// 判斷像素中心是否落在邊界框內切橢圓之中（含邊界）
///
/// 以 `a = w/2`、`b = h/2` 為半軸，像素中心 `(x+0.5, y+0.5)` 需滿足
/// `((cx-a)/a)^2 + ((cy-b)/b)^2 <= 1`。代入兩倍偏移 `dx = 2x+1-w` 後同乘 `w^2 * h^2`，
/// 以整數計算，邊界上的像素不受浮點誤差影響。
pub fn is_inside_ellipse(width: u32, height: u32, x: u32, y: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }

    let w = i128::from(width);
    let h = i128::from(height);
    let dx = 2 * i128::from(x) + 1 - w;
    let dy = 2 * i128::from(y) + 1 - h;

    let lhs = (dx * dx)
        .saturating_mul(h * h)
        .saturating_add((dy * dy).saturating_mul(w * w));
    lhs <= (w * w).saturating_mul(h * h)
}

/// 純函式：RGB 保持不變，只改寫 alpha
pub fn apply_ellipse_mask(mut pixels: RgbaImage) -> RgbaImage {
    let (width, height) = pixels.dimensions();

    for (x, y, pixel) in pixels.enumerate_pixels_mut() {
        pixel[3] = if is_inside_ellipse(width, height, x, y) {
            OPAQUE
        } else {
            TRANSPARENT
        };
    }

    pixels
}

impl ProfileImage {
    /// 讀取圖片並套用橢圓遮罩。檔案不存在或無法解碼時直接失敗，不提供預設圖。
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let reader = image::io::Reader::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SiteError::ImageNotFound {
                path: path_str.clone(),
            },
            _ => SiteError::ImageDecode {
                path: path_str.clone(),
                source: image::ImageError::IoError(e),
            },
        })?;

        // 依內容判斷格式，不相信副檔名
        let decoded = reader
            .with_guessed_format()
            .map_err(|e| SiteError::ImageDecode {
                path: path_str.clone(),
                source: image::ImageError::IoError(e),
            })?
            .decode()
            .map_err(|source| SiteError::ImageDecode {
                path: path_str.clone(),
                source,
            })?;

        let pixels = apply_ellipse_mask(decoded.to_rgba8());
        let (width, height) = pixels.dimensions();

        tracing::debug!("Masked profile image {} ({}x{})", path_str, width, height);

        Ok(Self {
            source_path: path.to_path_buf(),
            width,
            height,
            pixels,
        })
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels.get_pixel(x, y)[3])
        } else {
            None
        }
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer).write_image(
            self.pixels.as_raw(),
            self.width,
            self.height,
            ColorType::Rgba8,
        )?;
        Ok(buffer)
    }

    pub fn to_data_uri(&self) -> Result<String> {
        let png = self.to_png_bytes()?;
        Ok(format!(
            "data:image/png;base64,{}",
            BASE64_STANDARD.encode(png)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        })
    }

    #[test]
    fn test_square_midpoints_opaque_corners_transparent() {
        for n in [4u32, 5, 10, 64, 101] {
            let masked = apply_ellipse_mask(gradient(n, n));
            let mid = n / 2;

            assert_eq!(masked.get_pixel(mid, 0)[3], 255, "top midpoint n={}", n);
            assert_eq!(masked.get_pixel(0, mid)[3], 255, "left midpoint n={}", n);
            assert_eq!(masked.get_pixel(n - 1, mid)[3], 255, "right midpoint n={}", n);
            assert_eq!(masked.get_pixel(mid, n - 1)[3], 255, "bottom midpoint n={}", n);

            for (x, y) in [(0, 0), (n - 1, 0), (0, n - 1), (n - 1, n - 1)] {
                assert_eq!(masked.get_pixel(x, y)[3], 0, "corner ({},{}) n={}", x, y, n);
            }
        }
    }

    #[test]
    fn test_rectangle_200x100() {
        let masked = apply_ellipse_mask(gradient(200, 100));

        assert_eq!(masked.get_pixel(100, 50)[3], 255);
        assert_eq!(masked.get_pixel(0, 0)[3], 0);
        assert_eq!(masked.get_pixel(100, 0)[3], 255);
        assert_eq!(masked.get_pixel(0, 50)[3], 255);
        // 在半徑 100 的圓內，但在橢圓外
        assert_eq!(masked.get_pixel(20, 10)[3], 0);
    }

    #[test]
    fn test_rectangle_matches_ellipse_equation() {
        let (w, h) = (37u32, 91u32);
        let masked = apply_ellipse_mask(gradient(w, h));
        let (a, b) = (f64::from(w) / 2.0, f64::from(h) / 2.0);

        for (x, y, pixel) in masked.enumerate_pixels() {
            let cx = f64::from(x) + 0.5;
            let cy = f64::from(y) + 0.5;
            let value = ((cx - a) / a).powi(2) + ((cy - b) / b).powi(2);
            // 只檢查離邊界夠遠的點，邊界本身由整數測試涵蓋
            if (value - 1.0).abs() > 1e-9 {
                assert_eq!(pixel[3] == 255, value < 1.0, "pixel ({},{})", x, y);
            }
        }
    }

    #[test]
    fn test_rgb_channels_are_preserved() {
        let source = gradient(50, 30);
        let masked = apply_ellipse_mask(source.clone());

        for (original, out) in source.pixels().zip(masked.pixels()) {
            assert_eq!(original[0], out[0]);
            assert_eq!(original[1], out[1]);
            assert_eq!(original[2], out[2]);
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        RgbImage::from_pixel(40, 20, Rgb([10, 20, 30])).save(&path).unwrap();

        let image = ProfileImage::load(&path).unwrap();
        assert_eq!((image.width, image.height), (40, 20));
        assert_eq!(image.alpha_at(20, 10), Some(255));
        assert_eq!(image.alpha_at(0, 0), Some(0));
        assert_eq!(image.alpha_at(40, 0), None);
        assert_eq!(image.pixels.get_pixel(20, 10).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_format_detected_from_content() {
        let dir = TempDir::new().unwrap();
        let png_path = dir.path().join("photo.png");
        RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])).save(&png_path).unwrap();

        // PNG 內容但副檔名是 .jpg
        let jpg_named = dir.path().join("logo.jpg");
        std::fs::copy(&png_path, &jpg_named).unwrap();

        assert!(ProfileImage::load(&jpg_named).is_ok());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ProfileImage::load("does/not/exist.jpg").unwrap_err();
        assert!(matches!(err, SiteError::ImageNotFound { .. }));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"definitely not an image").unwrap();

        let err = ProfileImage::load(file.path()).unwrap_err();
        assert!(matches!(err, SiteError::ImageDecode { .. }));
    }

    #[test]
    fn test_data_uri_decodes_back_to_masked_image() {
        let image = ProfileImage {
            source_path: "memory".into(),
            width: 16,
            height: 8,
            pixels: apply_ellipse_mask(gradient(16, 8)),
        };

        let uri = image.to_data_uri().unwrap();
        let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = BASE64_STANDARD.decode(encoded).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(decoded, image.pixels);
    }
}
