#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use rigid2d::geometry::geo_traits::{CircleShape, Interpolate, Shape, Transformable};
    use rigid2d::geometry::{
        AnyShape, Circle, Complex, LineSegment, Ray, Rectangle, RegularPolygon, RegularTriangle, RoundedRectangle,
        Square, Triangle, Vector2,
    };

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test_case(-1.0; "negative")]
    #[test_case(f32::NAN; "not a number")]
    #[test_case(f32::INFINITY; "infinite")]
    fn invalid_sizes_are_rejected(size: f32) {
        init_logger();
        let (c, o) = (Vector2::ZERO, Complex::IDENTITY);
        assert!(LineSegment::try_new(c, o, size).is_err());
        assert!(RegularTriangle::try_new(c, o, size).is_err());
        assert!(Square::try_new(c, o, size).is_err());
        assert!(Rectangle::try_new(c, o, size, 1.0).is_err());
        assert!(Rectangle::try_new(c, o, 1.0, size).is_err());
        assert!(RoundedRectangle::try_new(c, o, size, 1.0, 0.0).is_err());
        assert!(RoundedRectangle::try_new(c, o, 1.0, 1.0, size).is_err());
        assert!(RegularPolygon::try_new(c, o, size, 5).is_err());
        assert!(Circle::try_new(c, size).is_err());
    }

    #[test]
    fn zero_sizes_are_accepted() {
        let (c, o) = (Vector2::ZERO, Complex::IDENTITY);
        let square = Square::try_new(c, o, 0.0).unwrap();
        assert_eq!(square.area(), 0.0);
        assert!(square.contains(Vector2::ZERO));
        assert!(RoundedRectangle::try_new(c, o, 0.0, 0.0, 0.0).is_ok());
        assert!(Circle::try_new(c, 0.0).is_ok());
    }

    #[test]
    fn error_messages_name_the_parameter() {
        let error = Square::try_new(Vector2::ZERO, Complex::IDENTITY, -2.0).unwrap_err();
        assert!(error.to_string().contains("side_length"), "{error}");
        assert!(error.to_string().contains("greater than or equal to zero"), "{error}");

        let error = RoundedRectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 2.0, 4.0, 1.5).unwrap_err();
        assert!(error.to_string().contains("corner_radius"), "{error}");

        let error = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 1).unwrap_err();
        assert!(error.to_string().contains("side_count"), "{error}");
    }

    #[test_case(0; "no sides")]
    #[test_case(1; "one side")]
    fn too_few_sides_are_rejected(side_count: usize) {
        init_logger();
        assert!(RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, side_count).is_err());
        let mut polygon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 6).unwrap();
        assert!(polygon.set_side_count(side_count).is_err());
        assert_eq!(polygon.side_count(), 6);
        assert_eq!(polygon.points().len(), 6);
    }

    #[test]
    fn failed_updates_leave_the_shape_untouched() {
        init_logger();
        let mut square = Square::try_new(Vector2::new(1.0, 1.0), Complex::IDENTITY, 2.0).unwrap();
        let before = square;
        assert!(square.set_side_length(-1.0).is_err());
        assert_eq!(square, before);

        let mut rounded = RoundedRectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 4.0, 2.0, 1.0).unwrap();
        let before = rounded;
        //shrinking the height would leave the radius too large
        assert!(rounded.set_size(4.0, 1.0, 1.0).is_err());
        assert_eq!(rounded, before);
        assert!(rounded.set_size(4.0, 1.0, 0.5).is_ok());
        assert_eq!(rounded.height(), 1.0);

        let mut circle = Circle::try_new(Vector2::ZERO, 1.0).unwrap();
        assert!(circle.set_radius(-3.0).is_err());
        assert_eq!(circle.radius(), 1.0);
    }

    #[test]
    fn setters_recompute_cached_points() {
        let mut rect = Rectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 2.0, 2.0).unwrap();
        rect.set_size(4.0, 2.0).unwrap();
        assert_eq!(rect.points()[0], Vector2::new(2.0, 1.0));

        let mut polygon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 4).unwrap();
        polygon.set_side_count(8).unwrap();
        assert_eq!(polygon.points().len(), 8);
        polygon.set_side_length(2.0).unwrap();
        for p in polygon.points() {
            assert!(approx_eq!(f32, p.length(), polygon.circumradius(), epsilon = 1e-5));
        }

        let mut triangle = Triangle::from_points(Vector2::ZERO, Vector2::UNIT_X, Vector2::UNIT_Y);
        triangle.set_points(Vector2::ZERO, Vector2::new(3.0, 0.0), Vector2::new(0.0, 3.0));
        assert!(approx_eq!(f32, triangle.area(), 4.5, epsilon = 1e-5));
        assert!(approx_eq!(Vector2, triangle.center(), Vector2::new(1.0, 1.0), epsilon = 1e-6));
    }

    #[test]
    fn copies_with_overrides_keep_the_other_parameters() {
        let square = Square::try_new(Vector2::new(1.0, 2.0), Complex::from_degrees(30.0), 2.0).unwrap();
        let moved = square.with_center(Vector2::new(-1.0, 0.0));
        assert_eq!(moved.center(), Vector2::new(-1.0, 0.0));
        assert_eq!(moved.orientation(), square.orientation());
        assert_eq!(moved.side_length(), square.side_length());

        let grown = square.with_side_length(3.0).unwrap();
        assert_eq!(grown.center(), square.center());
        assert!(square.with_side_length(-3.0).is_err());

        let rect = Rectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 2.0, 1.0).unwrap();
        let turned = rect.with_orientation(Complex::from_degrees(90.0));
        assert_eq!(turned.width(), 2.0);
        assert!(approx_eq!(f32, turned.bbox().height(), 2.0, epsilon = 1e-5));

        let polygon = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 5).unwrap();
        let hexagon = polygon.with_side_count(6).unwrap();
        assert_eq!(hexagon.side_count(), 6);
        assert_eq!(hexagon.side_length(), 1.0);

        let ray = Ray::new(Vector2::ZERO, Vector2::UNIT_Y);
        assert_eq!(ray.with_origin(Vector2::ONE).direction(), Vector2::UNIT_Y);
    }

    fn pairs() -> Vec<(AnyShape, AnyShape)> {
        vec![
            (
                LineSegment::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0).unwrap().into(),
                LineSegment::try_new(Vector2::new(2.0, 2.0), Complex::from_degrees(90.0), 3.0).unwrap().into(),
            ),
            (
                Triangle::from_points(Vector2::ZERO, Vector2::new(2.0, 0.0), Vector2::new(0.0, 1.0)).into(),
                Triangle::from_points(Vector2::new(1.0, 1.0), Vector2::new(3.0, 2.0), Vector2::new(0.0, 4.0)).into(),
            ),
            (
                RegularTriangle::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0).unwrap().into(),
                RegularTriangle::try_new(Vector2::ONE, Complex::from_degrees(60.0), 2.0).unwrap().into(),
            ),
            (
                Square::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0).unwrap().into(),
                Square::try_new(Vector2::new(-2.0, 1.0), Complex::from_degrees(-45.0), 3.0).unwrap().into(),
            ),
            (
                Rectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 2.0).unwrap().into(),
                Rectangle::try_new(Vector2::new(4.0, 0.0), Complex::from_degrees(120.0), 3.0, 0.5).unwrap().into(),
            ),
            (
                RoundedRectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 4.0, 2.0, 1.0).unwrap().into(),
                RoundedRectangle::try_new(Vector2::ONE, Complex::from_degrees(10.0), 1.0, 3.0, 0.25)
                    .unwrap()
                    .into(),
            ),
            (
                RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 5).unwrap().into(),
                RegularPolygon::try_new(Vector2::new(0.0, 3.0), Complex::from_degrees(36.0), 2.0, 9).unwrap().into(),
            ),
            (
                Circle::try_new(Vector2::ZERO, 1.0).unwrap().into(),
                Circle::try_new(Vector2::new(-3.0, 2.0), 0.5).unwrap().into(),
            ),
        ]
    }

    fn assert_similar(a: &AnyShape, b: &AnyShape) {
        assert_eq!(a.kind(), b.kind());
        assert!(approx_eq!(Vector2, a.center(), b.center(), epsilon = 1e-4), "{} vs {}", a.center(), b.center());
        assert!(
            approx_eq!(Complex, a.orientation(), b.orientation(), epsilon = 1e-4),
            "{} vs {}",
            a.orientation(),
            b.orientation()
        );
        assert!(approx_eq!(f32, a.area(), b.area(), epsilon = 1e-3));
        assert!(approx_eq!(f32, a.perimeter(), b.perimeter(), epsilon = 1e-3));
    }

    #[test]
    fn interpolation_hits_both_ends() {
        init_logger();
        for (from, to) in pairs() {
            assert_similar(&from.interpolated(&to, 0.0), &from);
            assert_similar(&from.interpolated(&to, 1.0), &to);
        }
    }

    #[test]
    fn interpolation_halfway_blends_position_and_size() {
        let from = Square::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0).unwrap();
        let to = Square::try_new(Vector2::new(2.0, 4.0), Complex::from_degrees(90.0), 3.0).unwrap();
        let halfway = from.interpolated(&to, 0.5);
        assert!(approx_eq!(Vector2, halfway.center(), Vector2::new(1.0, 2.0), epsilon = 1e-6));
        assert!(approx_eq!(f32, halfway.side_length(), 2.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, halfway.orientation().angle().to_degrees(), 45.0, epsilon = 1e-3));

        let mut in_place = from;
        in_place.interpolate(&to, 0.5);
        assert_eq!(in_place, halfway);
    }

    #[test]
    fn rotated_triangles_blend_without_shrinking() {
        let from = Triangle::from_points(Vector2::new(0.0, 0.0), Vector2::new(2.0, 0.0), Vector2::new(0.0, 2.0));
        let to = from.rotated_by(Complex::from_degrees(90.0));
        for by in [0.25, 0.5, 0.75] {
            let blended = from.interpolated(&to, by);
            assert!(approx_eq!(f32, blended.area(), from.area(), epsilon = 1e-4), "{by}: {}", blended.area());
            assert!(approx_eq!(Vector2, blended.center(), from.center(), epsilon = 1e-5));
        }
    }

    #[test]
    fn polygon_side_count_snaps_halfway() {
        let from = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 4).unwrap();
        let to = RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 8).unwrap();
        assert_eq!(from.interpolated(&to, 0.49).side_count(), 4);
        assert_eq!(from.interpolated(&to, 0.5).side_count(), 8);
    }

    #[test]
    fn interpolated_radius_stays_valid() {
        let from = RoundedRectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 4.0, 1.0, 0.5).unwrap();
        let to = RoundedRectangle::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 4.0, 0.5).unwrap();
        for i in 0..=10 {
            let blended = from.interpolated(&to, i as f32 / 10.0);
            assert!(blended.corner_radius() <= blended.width().min(blended.height()) / 2.0);
        }
    }

    #[test]
    fn mismatched_kinds_snap_halfway() {
        let square: AnyShape = Square::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0).unwrap().into();
        let circle: AnyShape = Circle::try_new(Vector2::ONE, 1.0).unwrap().into();
        assert_eq!(square.interpolated(&circle, 0.2), square);
        assert_eq!(square.interpolated(&circle, 0.8), circle);
    }
}
