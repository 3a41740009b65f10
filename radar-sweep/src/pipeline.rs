//! Scan → segment → render in one call

use crate::config::AppConfig;
use crate::drivers::{Display, SensorSource};
use crate::error::Result;
use crate::render::Renderer;
use crate::scanner::{ScanLimits, ScanReport, Scanner};
use crate::segmenter::{Segmentation, Segmenter};
use log::info;

/// Everything one sweep produced
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub report: ScanReport,
    pub segmentation: Segmentation,
    /// Segments drawn on the display
    pub drawn: usize,
}

/// The three sweep stages wired together.
#[derive(Debug, Clone)]
pub struct Pipeline {
    scanner: Scanner,
    segmenter: Segmenter,
    renderer: Renderer,
}

impl Pipeline {
    /// Build the stages from an application config
    pub fn new(config: &AppConfig, limits: ScanLimits) -> Self {
        Self {
            scanner: Scanner::new(config.sweep.clone()).with_limits(limits),
            segmenter: Segmenter::new(config.sweep.clone()),
            renderer: Renderer::new(config.display.clone()),
        }
    }

    /// Sweep once, segment the result and draw it.
    pub fn run<S, D>(&self, source: &mut S, display: &mut D) -> Result<SweepResult>
    where
        S: SensorSource,
        D: Display + ?Sized,
    {
        let report = self.scanner.run(source)?;
        let segmentation = self.segmenter.segment(&report.scan);
        let drawn = self.renderer.render(&segmentation.objects, display);

        let threshold = self.scanner.config().min_distance;
        info!(
            "{} of {} samples below {} cm; {} objects ({} rejected as noise, {} over capacity)",
            report.scan.count_below(threshold),
            report.scan.len(),
            threshold,
            segmentation.count,
            segmentation.rejected,
            segmentation.dropped
        );

        Ok(SweepResult {
            report,
            segmentation,
            drawn,
        })
    }
}
