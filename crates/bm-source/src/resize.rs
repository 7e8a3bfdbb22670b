use anyhow::{Context, Result};
use bm_core::config::Scaler;
use bm_core::error::CoreError;
use bm_core::frame::FrameBuffer;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// Dimensions cibles en préservant le ratio quand un axe est `<= 0`.
///
/// Retourne `None` si aucun redimensionnement n'est demandé.
///
/// # Example
/// ```
/// use bm_source::resize::prepare_size;
/// assert_eq!(prepare_size(200, 0, (100, 50)), Some((200, 100)));
/// assert_eq!(prepare_size(-1, 25, (100, 50)), Some((50, 25)));
/// assert_eq!(prepare_size(0, 0, (100, 50)), None);
/// ```
#[must_use]
pub fn prepare_size(target_width: i32, target_height: i32, orig: (u32, u32)) -> Option<(u32, u32)> {
    if target_width <= 0 && target_height <= 0 {
        return None;
    }
    let (ow, oh) = (f64::from(orig.0), f64::from(orig.1));

    // Un axe dérivé ne descend pas sous 1 pixel.
    let width = if target_width <= 0 {
        (ow * (f64::from(target_height) / oh)).round().max(1.0)
    } else {
        f64::from(target_width)
    };
    let height = if target_height <= 0 {
        (oh * (width / ow)).round().max(1.0)
    } else {
        f64::from(target_height)
    };

    Some((width as u32, height as u32))
}

fn resize_alg(scaler: Scaler) -> ResizeAlg {
    match scaler {
        Scaler::NearestNeighbor => ResizeAlg::Nearest,
        Scaler::ApproxBiLinear => ResizeAlg::Interpolation(FilterType::Bilinear),
        Scaler::BiLinear => ResizeAlg::Convolution(FilterType::Bilinear),
        Scaler::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
    }
}

/// Resizer wrappant fast_image_resize, configuré pour un [`Scaler`].
///
/// # Example
/// ```
/// use bm_core::config::Scaler;
/// use bm_source::resize::Resizer;
/// let r = Resizer::new(Scaler::BiLinear);
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Copie de la source : fast_image_resize veut un `&mut` dessus.
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a resizer for the given scaler.
    #[must_use]
    pub fn new(scaler: Scaler) -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(resize_alg(scaler)),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if either buffer has invalid dimensions or the
    /// resize operation fails.
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }
}

/// Redimensionne `src` en une nouvelle frame `width`×`height`.
///
/// # Errors
/// Returns `InvalidDimensions` for a zero-sized target, or the resizer's
/// error.
///
/// # Example
/// ```
/// use bm_core::config::Scaler;
/// use bm_core::frame::FrameBuffer;
/// use bm_source::resize::resize_frame;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 25, Scaler::CatmullRom).unwrap();
/// assert_eq!((dst.width, dst.height), (50, 25));
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32, scaler: Scaler) -> Result<FrameBuffer> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height }.into());
    }
    log::debug!(
        "Redimensionnement {}×{} → {width}×{height} ({scaler})",
        src.width,
        src.height
    );
    let mut dst = FrameBuffer::new(width, height);
    let mut resizer = Resizer::new(scaler);
    resizer.resize_into(src, &mut dst)?;
    Ok(dst)
}
