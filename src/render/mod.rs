// Presentation layer: turns an Analysis into images, charts and HTML
pub mod chart;
pub mod cloud_raster;
pub mod html;
pub mod plain;
pub mod word_cloud;

pub use chart::{render_chart, ChartKind};
pub use cloud_raster::{CloudImage, WordCloudRenderer};
pub use html::Artifacts;

use crate::config::{ChartConfig, VizConfig};
use crate::pipeline::Analysis;
use crate::types::Result;

/// Long-lived renderer state; the font is loaded once.
pub struct Reporter {
    cloud: WordCloudRenderer,
    chart: ChartConfig,
}

impl Reporter {
    pub fn new(config: &VizConfig) -> Self {
        Self {
            cloud: WordCloudRenderer::new(config.cloud.clone()),
            chart: config.chart.clone(),
        }
    }

    pub fn with_renderer(cloud: WordCloudRenderer, chart: ChartConfig) -> Self {
        Self { cloud, chart }
    }

    pub fn artifacts(&self, analysis: &Analysis) -> Result<Artifacts> {
        Ok(Artifacts {
            cloud: self.cloud.render(&analysis.ranked)?,
            scatter_svg: render_chart(&analysis.ranked, ChartKind::Scatter, &self.chart),
            line_svg: render_chart(&analysis.ranked, ChartKind::Line, &self.chart),
        })
    }

    pub fn fragment(&self, analysis: &Analysis) -> Result<String> {
        Ok(html::result_fragment(analysis, &self.artifacts(analysis)?))
    }

    pub fn standalone(&self, analysis: &Analysis) -> Result<String> {
        Ok(html::standalone_report(analysis, &self.artifacts(analysis)?))
    }
}
