use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    grown_capacity, premul_alpha_blend, triangle_list_primitive, viewport_ubo_layout_entry,
    ViewportUniform,
};

/// Renderer for `DrawCmd::Mesh`.
///
/// Every mesh is a solid-colored triangle list in logical pixels. All meshes
/// of a frame share one vertex buffer; each command owns a vertex range.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads every mesh in `draw_list` and returns one vertex range per
    /// mesh command, in paint order.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) -> Vec<Range<u32>> {
        let (vertices, ranges) = collect_vertices(draw_list);

        if vertices.is_empty() {
            return ranges;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue
                .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }
        self.ensure_vertex_capacity(ctx, vertices.len());

        if let Some(vbo) = self.vertex_vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));
        }
        ranges
    }

    /// Draws `vertices` (a span returned by [`prepare`](Self::prepare)).
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, vertices: Range<u32>) {
        if vertices.is_empty() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(vertices, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("dial mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("dial mesh bgl"),
                entries: &[viewport_ubo_layout_entry()],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("dial mesh pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("dial mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: triangle_list_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dial mesh viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }
        let new_cap = grown_capacity(required);
        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dial mesh vbo"),
            size: (new_cap * std::mem::size_of::<MeshVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}

/// Flattens mesh commands into one vertex stream plus a range per command.
fn collect_vertices(draw_list: &mut DrawList) -> (Vec<MeshVertex>, Vec<Range<u32>>) {
    let mut vertices = Vec::new();
    let mut ranges = Vec::new();

    for item in draw_list.iter_in_paint_order() {
        let DrawCmd::Mesh(cmd) = &item.cmd else { continue };
        let start = vertices.len() as u32;
        let color = cmd.color.to_array();
        vertices.extend(cmd.vertices.iter().map(|p| MeshVertex { pos: [p.x, p.y], color }));
        ranges.push(start..vertices.len() as u32);
    }

    (vertices, ranges)
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Vertex layout (24 bytes):
///
///  offset  0  pos    [f32; 2]   loc 0
///  offset  8  color  [f32; 4]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct MeshVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::ZIndex;

    fn tri(x: f32) -> Vec<Vec2> {
        vec![Vec2::new(x, 0.0), Vec2::new(x + 1.0, 0.0), Vec2::new(x, 1.0)]
    }

    #[test]
    fn ranges_follow_paint_order() {
        let mut dl = DrawList::new();
        dl.push_mesh(ZIndex(1), tri(10.0), Color::black());
        dl.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::black());
        dl.push_mesh(ZIndex(0), tri(0.0), Color::white());

        let (vertices, ranges) = collect_vertices(&mut dl);
        assert_eq!(ranges, vec![0..3, 3..6]);
        assert_eq!(vertices[0].pos, [0.0, 0.0]);
        assert_eq!(vertices[3].pos, [10.0, 0.0]);
        assert_eq!(vertices[0].color, Color::white().to_array());
    }
}
