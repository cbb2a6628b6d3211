use std::fmt;

/// Step of GPU initialization that failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GpuStage {
    Surface,
    Adapter,
    Device,
    SurfaceFormat,
}

impl fmt::Display for GpuStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GpuStage::Surface => "surface creation",
            GpuStage::Adapter => "adapter selection",
            GpuStage::Device => "device creation",
            GpuStage::SurfaceFormat => "surface format negotiation",
        })
    }
}

/// The platform cannot provide a drawing surface for the window.
///
/// Returned once at startup; the runtime does not retry.
#[derive(Debug, Clone)]
pub struct GpuUnsupported {
    pub stage: GpuStage,
    pub detail: String,
}

impl GpuUnsupported {
    pub(crate) fn new(stage: GpuStage, detail: impl fmt::Display) -> Self {
        Self { stage, detail: detail.to_string() }
    }
}

impl fmt::Display for GpuUnsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graphics not supported: {} failed: {}", self.stage, self.detail)
    }
}

impl std::error::Error for GpuUnsupported {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_stage_and_detail() {
        let e = GpuUnsupported::new(GpuStage::Adapter, "no adapter");
        assert_eq!(
            e.to_string(),
            "graphics not supported: adapter selection failed: no adapter"
        );
    }
}
