use crate::foundation::core::{Point, Vec3};
use crate::foundation::error::{VizError, VizResult};
use crate::render::style::{PinholePose, ProjectedAxes};

const MIN_DEPTH: f64 = 1e-9;

/// Project a world point through `K (R X + t)`.
///
/// Returns `None` for points at or behind the camera.
pub fn project_point(pose: &PinholePose, world: Vec3) -> Option<Point> {
    let cam = pose.rotation.mul_vec(world) + pose.translation;
    if cam.z <= MIN_DEPTH {
        return None;
    }
    let img = pose.intrinsics.mul_vec(cam);
    if img.z.abs() <= MIN_DEPTH {
        return None;
    }
    let p = Point::new(img.x / img.z, img.y / img.z);
    (p.x.is_finite() && p.y.is_finite()).then_some(p)
}

/// Project the origin and the three axis tips of a pose marker.
pub fn project_axes(pose: &PinholePose, origin: Vec3, lengths: Vec3) -> VizResult<ProjectedAxes> {
    if !pose.intrinsics.is_finite() || !pose.rotation.is_finite() || !pose.translation.is_finite()
    {
        return Err(VizError::draw("pose contains non-finite values"));
    }
    let project = |p: Vec3, what: &str| {
        project_point(pose, p)
            .ok_or_else(|| VizError::draw(format!("{what} projects behind the camera")))
    };
    Ok(ProjectedAxes {
        origin: project(origin, "axes origin")?,
        x: project(origin + Vec3::new(lengths.x, 0.0, 0.0), "x axis tip")?,
        y: project(origin + Vec3::new(0.0, lengths.y, 0.0), "y axis tip")?,
        z: project(origin + Vec3::new(0.0, 0.0, lengths.z), "z axis tip")?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/projection.rs"]
mod tests;
