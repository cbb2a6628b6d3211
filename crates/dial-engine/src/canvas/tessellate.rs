//! Triangulation of flattened contours for the mesh renderer.

use lyon_tessellation::math::{point, Point};
use lyon_tessellation::path::Path as LyonPath;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, LineCap as LyonCap, LineJoin,
    StrokeOptions, StrokeTessellator, StrokeVertex, VertexBuffers,
};

use crate::coords::Vec2;

use super::path::{Polyline, TOLERANCE};
use super::LineCap;

/// Canvas default for how far a miter join may extend.
const MITER_LIMIT: f32 = 10.0;

/// Triangle list covering the contours under the non-zero fill rule.
pub(super) fn fill_triangles(contours: &[Polyline]) -> Vec<Vec2> {
    if contours.is_empty() {
        return Vec::new();
    }
    let path = to_lyon(contours);
    let options = FillOptions::non_zero().with_tolerance(TOLERANCE as f32);
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();

    let result = FillTessellator::new().tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position()),
    );
    if let Err(e) = result {
        log::debug!("fill tessellation failed: {e:?}");
        return Vec::new();
    }
    triangle_list(&buffers)
}

/// Triangle list covering a stroke of `width` along the contours.
///
/// Joins are mitered (falling back to bevels past the miter limit); `cap`
/// shapes the ends of open contours.
pub(super) fn stroke_triangles(contours: &[Polyline], width: f32, cap: LineCap) -> Vec<Vec2> {
    if contours.is_empty() || !(width > 0.0) {
        return Vec::new();
    }
    let path = to_lyon(contours);
    let options = StrokeOptions::tolerance(TOLERANCE as f32)
        .with_line_width(width)
        .with_line_cap(match cap {
            LineCap::Butt => LyonCap::Butt,
            LineCap::Round => LyonCap::Round,
            LineCap::Square => LyonCap::Square,
        })
        .with_line_join(LineJoin::Miter)
        .with_miter_limit(MITER_LIMIT);
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();

    let result = StrokeTessellator::new().tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v.position()),
    );
    if let Err(e) = result {
        log::debug!("stroke tessellation failed: {e:?}");
        return Vec::new();
    }
    triangle_list(&buffers)
}

fn to_lyon(contours: &[Polyline]) -> LyonPath {
    let mut builder = LyonPath::builder();
    for contour in contours {
        let Some((first, rest)) = contour.points.split_first() else { continue };
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(contour.closed);
    }
    builder.build()
}

fn triangle_list(buffers: &VertexBuffers<Point, u32>) -> Vec<Vec2> {
    buffers
        .indices
        .iter()
        .map(|&i| {
            let p = buffers.vertices[i as usize];
            Vec2::new(p.x, p.y)
        })
        .collect()
}
