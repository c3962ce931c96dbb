use super::*;

pub const JPEG_QUALITY: u8 = 90;

pub struct HeatmapAnalysis {
    maps_dir: std::path::PathBuf,
    renderer: analysis::heatmap::HeatmapRenderer,
}

impl HeatmapAnalysis {
    pub fn new<P>(maps_dir: P) -> Self
    where
        P: Into<std::path::PathBuf>,
    {
        Self {
            maps_dir: maps_dir.into(),
            renderer: analysis::heatmap::HeatmapRenderer::new(Default::default()),
        }
    }

    fn overview(&self, map: &str) -> Result<image::DynamicImage, crate::RunError> {
        let path = self.maps_dir.join(format!("{}.jpg", map));
        tracing::debug!("Loading overview {:?}", path);

        Ok(image::open(path)?)
    }
}

impl Analysis for HeatmapAnalysis {
    #[tracing::instrument(name = "Heatmap", skip(self, input), fields(nickname = %input.nickname))]
    fn analyse(&self, input: &AnalysisInput) -> Result<Deferred, crate::RunError> {
        tracing::info!("Generating HEATMAPs");

        let mut collector = analysis::points::PointCollector::new(input.nickname.clone(), input.calibration);
        for event in input.events.iter() {
            collector.apply(event)?;
        }
        let (kill_points, death_points) = collector.into_series();

        let overview = self.overview(&input.map)?;
        let canvas_size = (overview.width(), overview.height());

        let mut images = Vec::with_capacity(2);
        for (kind, points) in [("deaths", &death_points), ("kills", &kill_points)] {
            let rendered = self.renderer.render(points, &overview, canvas_size)?;
            let name = format!("{}-{}-{}.jpg", input.match_id, input.nickname, kind);

            tracing::debug!("Encoding {} from {} points", name, points.len());
            images.push((name, encode_jpeg(rendered)?));
        }

        Ok(Box::new(move |sinks| {
            Box::pin(async move {
                for (name, content) in images {
                    sinks
                        .storage
                        .upload(name.clone(), content, "image/jpeg")
                        .await
                        .map_err(|reason| crate::RunError::Upload { name: name.clone(), reason })?;

                    tracing::info!("Uploaded {}", name);
                }

                Ok(())
            })
        }))
    }
}

/// JPEG has no alpha channel, transparent parts of the canvas end up black.
pub fn encode_jpeg(image: image::RgbaImage) -> Result<Vec<u8>, crate::RunError> {
    let rgb = image::DynamicImage::ImageRgba8(image).to_rgb8();

    let mut buffer = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    encoder.encode_image(&rgb)?;

    Ok(buffer)
}
