use crate::core::frame::FrameDecoder;
use crate::core::registry::ZoneRegistry;
use crate::core::render::Renderer;
use crate::domain::model::TopologyRecord;
use crate::utils::error::{Result, TopologyError};
use crate::utils::monitor::PhaseMonitor;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// `None` disables the frame size check.
    pub max_frame_length: Option<usize>,
    /// Emit zones ordered by name instead of registry order.
    pub sort_zones: bool,
    pub monitor: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub zone_records: u64,
    pub skipped_records: u64,
    pub zones: usize,
    pub renders: usize,
}

/// Runs the build phase over the whole input, then the emit phase.
pub struct TopologyEngine {
    renderer: Renderer,
    options: EngineOptions,
}

impl TopologyEngine {
    pub fn new(renderer: Renderer, options: EngineOptions) -> Self {
        Self { renderer, options }
    }

    /// Drains `input` into a registry. Any framing or decode error aborts.
    pub fn build<R: BufRead>(&self, input: R, summary: &mut RunSummary) -> Result<ZoneRegistry> {
        let mut registry = ZoneRegistry::new();
        let mut decoder = FrameDecoder::new(input, self.options.max_frame_length);

        while let Some(payload) = decoder.next_frame()? {
            let record: TopologyRecord =
                serde_json::from_slice(&payload).map_err(|source| TopologyError::RecordDecode {
                    frame: decoder.frames_read(),
                    source,
                })?;

            if registry.record(record) {
                summary.zone_records += 1;
            } else {
                summary.skipped_records += 1;
            }
        }

        summary.frames = decoder.frames_read();
        summary.zones = registry.len();
        tracing::debug!(
            "Read {} frames ({} bytes): {} zone records, {} skipped, {} distinct zones",
            summary.frames,
            decoder.bytes_read(),
            summary.zone_records,
            summary.skipped_records,
            summary.zones
        );

        Ok(registry)
    }

    /// Renders every zone of `registry` into `out`. Returns the render count.
    pub fn emit<W: Write>(&self, registry: &ZoneRegistry, out: &mut W) -> Result<usize> {
        let mut renders = 0;

        if self.options.sort_zones {
            for (zone, role, endpoints) in registry.sorted_zones() {
                tracing::trace!("Emitting {} zone {:?}", role, zone);
                renders += self.renderer.render_zone(zone, role, endpoints, out)?;
            }
        } else {
            for (zone, role, endpoints) in registry.zones() {
                tracing::trace!("Emitting {} zone {:?}", role, zone);
                renders += self.renderer.render_zone(zone, role, endpoints, out)?;
            }
        }

        Ok(renders)
    }

    /// Nothing reaches `output` unless every zone renders.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<RunSummary> {
        let mut monitor = PhaseMonitor::new(self.options.monitor);
        let mut summary = RunSummary::default();

        tracing::debug!("Build phase started");
        let registry = self.build(input, &mut summary)?;
        monitor.log_phase("build");

        tracing::debug!("Emit phase started");
        let mut rendered = Vec::new();
        summary.renders = self.emit(&registry, &mut rendered)?;
        output.write_all(&rendered)?;
        output.flush()?;
        monitor.log_phase("emit");

        tracing::info!(
            "Rendered {} endpoints across {} zones",
            summary.renders,
            summary.zones
        );
        Ok(summary)
    }
}
