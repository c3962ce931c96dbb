use colors_transform::Color;

use crate::calibration::SpatialPoint;
use crate::points::PointSeries;

pub struct HeatmapConfig {
    /// Diameter in pixels of the area a single point contributes to.
    pub dot_size: u32,
    pub opacity: u8,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            dot_size: 30,
            opacity: 128,
        }
    }
}

/// Integer bounding rectangle of a point series, in map pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn of(points: &PointSeries) -> Result<Self, crate::Error> {
        let first = points.points.first().ok_or(crate::Error::EmptyPointSeries)?;

        let (lo, hi) = points.points.iter().fold((*first, *first), |(lo, hi), p| {
            (
                SpatialPoint::new(lo.x.min(p.x), lo.y.min(p.y)),
                SpatialPoint::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });

        Ok(Self {
            min_x: lo.x as i64,
            min_y: lo.y as i64,
            max_x: hi.x as i64,
            max_y: hi.y as i64,
        })
    }

    pub fn width(&self) -> u64 {
        self.max_x.saturating_sub(self.min_x).max(0) as u64
    }

    pub fn height(&self) -> u64 {
        self.max_y.saturating_sub(self.min_y).max(0) as u64
    }

    /// The part of the rectangle that lies on a canvas of `canvas_size`, in
    /// canvas coordinates. `None` if nothing of it is visible.
    pub fn visible(&self, canvas_size: (u32, u32)) -> Option<Window> {
        let x_start = self.min_x.max(0);
        let y_start = self.min_y.max(0);
        let x_end = self.max_x.min(i64::from(canvas_size.0));
        let y_end = self.max_y.min(i64::from(canvas_size.1));

        if x_end <= x_start || y_end <= y_start {
            return None;
        }

        Some(Window {
            x: u32::try_from(x_start).ok()?,
            y: u32::try_from(y_start).ok()?,
            width: u32::try_from(x_end - x_start).ok()?,
            height: u32::try_from(y_end - y_start).ok()?,
        })
    }
}

/// Rectangular region of a density field that is actually stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The points that actually feed the density field.
///
/// The first point is skipped. It is most likely a leftover placeholder from
/// an older version of the pipeline, but the rendered output depends on it, so
/// it stays. The Y axis is negated because the field is laid out bottom to top.
pub fn density_samples(points: &PointSeries) -> Vec<SpatialPoint> {
    points
        .points
        .iter()
        .skip(1)
        .map(|p| SpatialPoint::new(p.x, -p.y))
        .collect()
}

pub struct DensityField {
    origin: (f64, f64),
    width: u32,
    height: u32,
    samples: usize,
    values: Vec<f32>,
}

impl DensityField {
    pub fn build(width: u32, height: u32, samples: &[SpatialPoint], dot_size: u32) -> Self {
        Self::build_window(
            (u64::from(width), u64::from(height)),
            (0, 0),
            (width, height),
            samples,
            dot_size,
        )
    }

    /// Only stores the `size` cells starting at `origin`, both relative to the
    /// top left corner of the full field.
    pub fn build_window(
        extent: (u64, u64),
        origin: (u64, u64),
        size: (u32, u32),
        samples: &[SpatialPoint],
        dot_size: u32,
    ) -> Self {
        let (width, height) = extent;

        let mut field = Self {
            origin: (origin.0 as f64, origin.1 as f64),
            width: size.0,
            height: size.1,
            samples: samples.len(),
            values: vec![0.0; size.0 as usize * size.1 as usize],
        };

        if samples.is_empty() || field.values.is_empty() {
            return field;
        }

        let (lo, hi) = samples.iter().fold((samples[0], samples[0]), |(lo, hi), p| {
            (
                SpatialPoint::new(lo.x.min(p.x), lo.y.min(p.y)),
                SpatialPoint::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });

        let radius = (dot_size as f64 / 2.0).max(1.0);
        let usable_x = (width as f64 - dot_size as f64).max(0.0);
        let usable_y = (height as f64 - dot_size as f64).max(0.0);

        for sample in samples {
            let nx = normalize(sample.x, lo.x, hi.x);
            let ny = normalize(sample.y, lo.y, hi.y);

            // Flip Y back so that the field is stored top to bottom like the image
            let cx = nx * usable_x + (dot_size / 2) as f64;
            let cy = (1.0 - ny) * usable_y + (dot_size / 2) as f64;

            field.add_dot(cx - field.origin.0, cy - field.origin.1, radius);
        }

        field
    }

    fn add_dot(&mut self, cx: f64, cy: f64, radius: f64) {
        let x_start = (cx - radius).floor().max(0.0) as u32;
        let y_start = (cy - radius).floor().max(0.0) as u32;
        let x_end = ((cx + radius).ceil().max(0.0) as u32).min(self.width);
        let y_end = ((cy + radius).ceil().max(0.0) as u32).min(self.height);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let distance = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
                if distance >= radius {
                    continue;
                }

                let intensity = (1.0 - distance / radius) as f32;
                let idx = self.offset(x, y);
                let cell = &mut self.values[idx];
                *cell += intensity * (1.0 - *cell);
            }
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(self.offset(x, y)).copied()
    }

    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }

    pub fn colorize(&self, opacity: u8) -> image::RgbaImage {
        let mut buffer = image::RgbaImage::new(self.width, self.height);

        tracing::trace!("Colorizing density field: {}x{}", self.width, self.height);

        for (x, y, pixel) in buffer.enumerate_pixels_mut() {
            let value = self.values[self.offset(x, y)];
            if value > 0.0 {
                *pixel = fire(value, opacity);
            }
        }

        buffer
    }
}

fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.5
    }
}

/// Warm gradient: pale yellow for sparse areas, deep red for dense ones.
fn fire(value: f32, opacity: u8) -> image::Rgba<u8> {
    let value = value.clamp(0.0, 1.0);

    let hue = 60.0 * (1.0 - value);
    let lightness = 45.0 + 35.0 * (1.0 - value);
    let rgb = colors_transform::Hsl::from(hue, 100.0, lightness).to_rgb();

    let alpha = (value * 1.5).min(1.0) * opacity as f32;

    image::Rgba([
        rgb.get_red().round() as u8,
        rgb.get_green().round() as u8,
        rgb.get_blue().round() as u8,
        alpha.round() as u8,
    ])
}

pub struct HeatmapRenderer {
    config: HeatmapConfig,
}

impl HeatmapRenderer {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    /// Draws `base` onto a canvas of `canvas_size` and puts the density of
    /// `points` on top of it, anchored at the points' bounding rectangle.
    pub fn render(
        &self,
        points: &PointSeries,
        base: &image::DynamicImage,
        canvas_size: (u32, u32),
    ) -> Result<image::RgbaImage, crate::Error> {
        let bounds = Bounds::of(points)?;
        let samples = density_samples(points);

        tracing::debug!(
            "Rendering {} samples within {:?} on {}x{}",
            samples.len(),
            bounds,
            canvas_size.0,
            canvas_size.1
        );

        let mut canvas = image::RgbaImage::new(canvas_size.0, canvas_size.1);
        image::imageops::overlay(&mut canvas, &base.to_rgba8(), 0, 0);

        let visible = match bounds.visible(canvas_size) {
            Some(v) => v,
            None => {
                tracing::debug!("Density field lies outside of the canvas");
                return Ok(canvas);
            }
        };

        // The field's top left corner sits at the bounds' minimum
        let origin = (
            i64::from(visible.x).saturating_sub(bounds.min_x) as u64,
            i64::from(visible.y).saturating_sub(bounds.min_y) as u64,
        );
        let field = DensityField::build_window(
            (bounds.width(), bounds.height()),
            origin,
            (visible.width, visible.height),
            &samples,
            self.config.dot_size,
        );

        let overlay = field.colorize(self.config.opacity);
        image::imageops::overlay(
            &mut canvas,
            &overlay,
            i64::from(visible.x),
            i64::from(visible.y),
        );

        Ok(canvas)
    }
}
