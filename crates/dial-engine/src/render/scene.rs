use std::ops::Range;

use crate::scene::{DrawKind, DrawList};
use crate::text::FontSystem;

use super::shapes::circle::CircleRenderer;
use super::shapes::mesh::MeshRenderer;
use super::shapes::text::TextRenderer;
use super::{RenderCtx, RenderTarget};

/// A run of consecutive draw items (in paint order) that share one kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Batch {
    pub kind: DrawKind,
    /// Number of commands of `kind` covered by this run.
    pub len: usize,
}

/// Groups a paint-ordered sequence of kinds into runs of equal kind.
///
/// Drawing the runs in order preserves the stacking of the whole list while
/// keeping pipeline switches to one per run.
pub fn plan_batches(kinds: impl IntoIterator<Item = DrawKind>) -> Vec<Batch> {
    let mut out: Vec<Batch> = Vec::new();
    for kind in kinds {
        match out.last_mut() {
            Some(b) if b.kind == kind => b.len += 1,
            _ => out.push(Batch { kind, len: 1 }),
        }
    }
    out
}

/// Draws a whole [`DrawList`] in one render pass.
///
/// Each shape renderer uploads its commands once, then the runs from
/// [`plan_batches`] replay them in paint order, so a circle recorded after a
/// mesh ends up on top of it.
#[derive(Default)]
pub struct SceneRenderer {
    circles: CircleRenderer,
    meshes: MeshRenderer,
    text: TextRenderer,
    kinds: Vec<DrawKind>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `draw_list` on top of the current contents of `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        let circle_ranges = self.circles.prepare(ctx, draw_list);
        let mesh_ranges = self.meshes.prepare(ctx, draw_list);
        let text_ranges = self.text.prepare(ctx, draw_list, fonts);

        self.kinds.clear();
        self.kinds.extend(draw_list.iter_in_paint_order().map(|item| item.cmd.kind()));
        let batches = plan_batches(self.kinds.iter().copied());

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("dial scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let mut cursors = Cursors::default();
        for batch in batches {
            match batch.kind {
                DrawKind::Circle => {
                    let span = cursors.circle.take(&circle_ranges, batch.len);
                    self.circles.draw(&mut rpass, span);
                }
                DrawKind::Mesh => {
                    let span = cursors.mesh.take(&mesh_ranges, batch.len);
                    self.meshes.draw(&mut rpass, span);
                }
                DrawKind::Text => {
                    let span = cursors.text.take(&text_ranges, batch.len);
                    self.text.draw(&mut rpass, span);
                }
            }
        }
    }
}

#[derive(Default)]
struct Cursors {
    circle: Cursor,
    mesh: Cursor,
    text: Cursor,
}

/// Walks one renderer's per-command ranges as batches consume them.
#[derive(Default)]
struct Cursor {
    next: usize,
}

impl Cursor {
    /// Span covering the next `len` per-command ranges.
    fn take(&mut self, ranges: &[Range<u32>], len: usize) -> Range<u32> {
        let end = (self.next + len).min(ranges.len());
        let start = self.next.min(end);
        self.next = end;
        super::shapes::span(&ranges[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use DrawKind::{Circle, Mesh, Text};

    #[test]
    fn consecutive_kinds_merge() {
        let batches = plan_batches([Circle, Circle, Mesh, Mesh, Mesh, Circle, Text]);
        assert_eq!(
            batches,
            vec![
                Batch { kind: Circle, len: 2 },
                Batch { kind: Mesh, len: 3 },
                Batch { kind: Circle, len: 1 },
                Batch { kind: Text, len: 1 },
            ]
        );
    }

    #[test]
    fn empty_list_has_no_batches() {
        assert!(plan_batches(std::iter::empty()).is_empty());
    }

    #[test]
    fn cursor_spans_consume_ranges_in_order() {
        let ranges = [0..1, 1..1, 1..3, 3..4];
        let mut c = Cursor::default();
        assert_eq!(c.take(&ranges, 2), 0..1);
        assert_eq!(c.take(&ranges, 1), 1..3);
        assert_eq!(c.take(&ranges, 5), 3..4);
        assert_eq!(c.take(&ranges, 1), 0..0);
    }
}
