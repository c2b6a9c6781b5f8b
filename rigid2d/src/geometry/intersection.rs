//! Closed-form kernels shared by the shapes: segment, ray, circle, box and triangle tests.
//!
//! Rays are given as an origin and a direction, the direction does not need to be normalized
//! unless stated otherwise. All functions are total: degenerate input (zero length segments,
//! parallel directions) takes an epsilon-gated branch instead of dividing by ~zero.

use ordered_float::OrderedFloat;

use crate::geometry::primitives::Vector2;
use crate::util::tolerance::{BOUNDARY_EPSILON, NORMALIZATION_EPSILON, PARALLEL_EPSILON};

/// Returns the point on segment `ab` closest to `point`
pub fn closest_point_on_segment(a: Vector2, b: Vector2, point: Vector2) -> Vector2 {
    //from https://stackoverflow.com/a/6853926
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < NORMALIZATION_EPSILON * NORMALIZATION_EPSILON {
        //degenerate segment
        return a;
    }
    let param = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * param
}

/// Whether segment `p1 p2` and segment `q1 q2` share at least one point (collinear overlaps included)
pub fn segments_intersect(p1: Vector2, p2: Vector2, q1: Vector2, q2: Vector2) -> bool {
    if f32::max(p1.x.min(p2.x), q1.x.min(q2.x)) > f32::min(p1.x.max(p2.x), q1.x.max(q2.x)) + BOUNDARY_EPSILON
        || f32::max(p1.y.min(p2.y), q1.y.min(q2.y))
            > f32::min(p1.y.max(p2.y), q1.y.max(q2.y)) + BOUNDARY_EPSILON
    {
        //bounding boxes do not overlap
        return false;
    }

    //based on: https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line_segment
    let r = p2 - p1;
    let s = q2 - q1;
    let (r_len, s_len) = (r.length(), s.length());

    if r_len < NORMALIZATION_EPSILON {
        return closest_point_on_segment(q1, q2, p1).distance_to(p1) <= BOUNDARY_EPSILON;
    }
    if s_len < NORMALIZATION_EPSILON {
        return closest_point_on_segment(p1, p2, q1).distance_to(q1) <= BOUNDARY_EPSILON;
    }

    let qp = q1 - p1;
    let denom = r.perp_dot(s);

    if denom.abs() <= PARALLEL_EPSILON * r_len * s_len {
        //parallel segments, only collinear ones can touch
        if qp.perp_dot(r).abs() > BOUNDARY_EPSILON * r_len {
            return false;
        }
        let t0 = qp.dot(r) / (r_len * r_len);
        let t1 = (q2 - p1).dot(r) / (r_len * r_len);
        let tol = BOUNDARY_EPSILON / r_len;
        return f32::max(t0.min(t1), 0.0) <= f32::min(t0.max(t1), 1.0) + tol;
    }

    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    let (t_tol, u_tol) = (BOUNDARY_EPSILON / r_len, BOUNDARY_EPSILON / s_len);

    (-t_tol..=1.0 + t_tol).contains(&t) && (-u_tol..=1.0 + u_tol).contains(&u)
}

/// Whether the ray starting at `origin` heading along `direction` hits segment `ab`
pub fn ray_intersects_segment(origin: Vector2, direction: Vector2, a: Vector2, b: Vector2) -> bool {
    let d_len = direction.length();
    if d_len < NORMALIZATION_EPSILON {
        //a ray without direction is a single point
        return closest_point_on_segment(a, b, origin).distance_to(origin) <= BOUNDARY_EPSILON;
    }
    let dir = direction / d_len;
    let s = b - a;
    let s_len = s.length();
    let qp = a - origin;

    if s_len < NORMALIZATION_EPSILON {
        //degenerate segment, test whether a lies on the ray
        return qp.dot(dir) >= -BOUNDARY_EPSILON && qp.perp_dot(dir).abs() <= BOUNDARY_EPSILON;
    }

    let denom = dir.perp_dot(s);
    if denom.abs() <= PARALLEL_EPSILON * s_len {
        //parallel, only a collinear segment can be hit, if any of its ends is ahead of the origin
        if qp.perp_dot(dir).abs() > BOUNDARY_EPSILON {
            return false;
        }
        let t_a = qp.dot(dir);
        let t_b = (b - origin).dot(dir);
        return f32::max(t_a, t_b) >= -BOUNDARY_EPSILON;
    }

    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(dir) / denom;
    let u_tol = BOUNDARY_EPSILON / s_len;

    t >= -BOUNDARY_EPSILON && (-u_tol..=1.0 + u_tol).contains(&u)
}

/// Whether two rays share at least one point
pub fn ray_intersects_ray(
    origin_1: Vector2,
    direction_1: Vector2,
    origin_2: Vector2,
    direction_2: Vector2,
) -> bool {
    let d1 = direction_1.normalized();
    let d2 = direction_2.normalized();
    let w = origin_2 - origin_1;
    let denom = d1.perp_dot(d2);

    if denom.abs() <= PARALLEL_EPSILON {
        //parallel rays
        if w.perp_dot(d1).abs() > BOUNDARY_EPSILON {
            return false;
        }
        //collinear: rays heading the same way always overlap, opposing ones only if they face each other
        return d1.dot(d2) > 0.0 || w.dot(d1) >= -BOUNDARY_EPSILON;
    }

    let t = w.perp_dot(d2) / denom;
    let s = w.perp_dot(d1) / denom;

    t >= -BOUNDARY_EPSILON && s >= -BOUNDARY_EPSILON
}

/// Whether the ray hits the solid circle at `center` with `radius`.
///
/// Projects the origin-to-center vector onto the ray to find the closest approach.
pub fn ray_intersects_circle(origin: Vector2, direction: Vector2, center: Vector2, radius: f32) -> bool {
    let d_len_sq = direction.length_squared();
    let t = match d_len_sq < NORMALIZATION_EPSILON * NORMALIZATION_EPSILON {
        true => 0.0,
        false => ((center - origin).dot(direction) / d_len_sq).max(0.0),
    };
    let closest_approach = origin + direction * t;
    let reach = radius + BOUNDARY_EPSILON;

    closest_approach.distance_squared_to(center) <= reach * reach
}

/// Slab test between a ray and the axis-aligned box centered at the origin with `half_extents`.
pub fn ray_intersects_aa_box(origin: Vector2, direction: Vector2, half_extents: Vector2) -> bool {
    let mut t_min: f32 = 0.0;
    let mut t_max = f32::INFINITY;

    for (o, d, h) in [
        (origin.x, direction.x, half_extents.x),
        (origin.y, direction.y, half_extents.y),
    ] {
        let h = h + BOUNDARY_EPSILON;
        if d.abs() < PARALLEL_EPSILON {
            //parallel to this slab, origin has to be inside it
            if o.abs() > h {
                return false;
            }
        } else {
            let inv_d = 1.0 / d;
            let mut t_near = (-h - o) * inv_d;
            let mut t_far = (h - o) * inv_d;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }
            t_min = t_min.max(t_near);
            t_max = t_max.min(t_far);
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}

/// Whether `point` lies inside the axis-aligned box centered at the origin with `half_extents`
pub fn aa_box_contains(point: Vector2, half_extents: Vector2) -> bool {
    point.x.abs() <= half_extents.x + BOUNDARY_EPSILON && point.y.abs() <= half_extents.y + BOUNDARY_EPSILON
}

/// Closest point of the solid axis-aligned box centered at the origin with `half_extents`
pub fn aa_box_closest_point(point: Vector2, half_extents: Vector2) -> Vector2 {
    point.clamp(-half_extents, half_extents)
}

/// Whether `point` lies inside (or within [`BOUNDARY_EPSILON`] of) triangle `abc`, regardless of winding.
pub fn triangle_contains(a: Vector2, b: Vector2, c: Vector2, point: Vector2) -> bool {
    let double_area = (b - a).perp_dot(c - a);
    let edges = [(a, b), (b, c), (c, a)];

    if double_area.abs() < NORMALIZATION_EPSILON {
        //degenerate triangle, collapses onto its edges
        return edges
            .iter()
            .any(|&(s, e)| closest_point_on_segment(s, e, point).distance_to(point) <= BOUNDARY_EPSILON);
    }

    let winding = double_area.signum();
    edges.iter().all(|&(s, e)| {
        let edge = e - s;
        let edge_len = edge.length();
        if edge_len < NORMALIZATION_EPSILON {
            return true;
        }
        //signed distance of the point to the edge, positive on the inner side
        winding * edge.perp_dot(point - s) / edge_len >= -BOUNDARY_EPSILON
    })
}

/// Closest point of the solid triangle `abc` to `point`, using barycentric region tests.
pub fn triangle_closest_point(a: Vector2, b: Vector2, c: Vector2, point: Vector2) -> Vector2 {
    //Real-Time Collision Detection (Ericson), 5.1.5
    let ab = b - a;
    let ac = c - a;

    let ap = point - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        //vertex region A
        return a;
    }

    let bp = point - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        //vertex region B
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        //edge region AB
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = point - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        //vertex region C
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        //edge region AC
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        //edge region BC
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let sum = va + vb + vc;
    if sum.abs() < NORMALIZATION_EPSILON * NORMALIZATION_EPSILON {
        //degenerate triangle, fall back to the nearest edge
        return [(a, b), (b, c), (c, a)]
            .into_iter()
            .map(|(s, e)| closest_point_on_segment(s, e, point))
            .min_by_key(|p| OrderedFloat(p.distance_squared_to(point)))
            .unwrap_or(a);
    }

    //interior region
    let v = vb / sum;
    let w = vc / sum;
    a + ab * v + ac * w
}

/// Whether the ray hits the solid triangle `abc`.
///
/// If the origin lies outside, an entering ray crosses two of the three edges,
/// so testing any pair of edges suffices.
pub fn ray_intersects_triangle(origin: Vector2, direction: Vector2, a: Vector2, b: Vector2, c: Vector2) -> bool {
    triangle_contains(a, b, c, origin)
        || ray_intersects_segment(origin, direction, a, b)
        || ray_intersects_segment(origin, direction, b, c)
}
