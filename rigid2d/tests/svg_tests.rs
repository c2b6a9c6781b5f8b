#[cfg(all(test, feature = "svg"))]
mod tests {
    use anyhow::Result;
    use log::debug;

    use rigid2d::geometry::geo_traits::Transformable;
    use rigid2d::geometry::{
        AnyShape, Circle, Complex, LineSegment, RegularPolygon, RoundedRectangle, Square, Triangle, Vector2,
    };
    use rigid2d::io::svg::{SvgDrawOptions, SvgTheme, shapes_to_svg, write_svg};

    fn scene() -> Vec<AnyShape> {
        let square = Square::try_new(Vector2::new(2.0, 2.0), Complex::from_degrees(20.0), 2.0).unwrap();
        vec![
            square.into(),
            square.rotated_around_point_by(Vector2::ZERO, Complex::from_degrees(90.0)).into(),
            Triangle::from_points(Vector2::new(-4.0, -4.0), Vector2::new(-1.0, -4.0), Vector2::new(-2.0, -1.0)).into(),
            RoundedRectangle::try_new(Vector2::new(3.0, -3.0), Complex::IDENTITY, 3.0, 2.0, 0.5)
                .unwrap()
                .into(),
            RegularPolygon::try_new(Vector2::ZERO, Complex::IDENTITY, 1.0, 6)
                .unwrap()
                .into(),
            LineSegment::from_points(Vector2::new(-5.0, 4.0), Vector2::new(-2.0, 5.0)).into(),
            Circle::try_new(Vector2::new(5.0, 5.0), 1.0).unwrap().into(),
        ]
    }

    #[test]
    fn scene_renders_every_shape() {
        let _ = env_logger::builder().is_test(true).try_init();
        let shapes = scene();
        let options = SvgDrawOptions {
            bboxes: true,
            points: true,
            ..SvgDrawOptions::default()
        };
        let svg = shapes_to_svg(&shapes, options, "scene").to_string();
        debug!("rendered {} bytes of svg", svg.len());

        assert!(svg.contains("viewBox"));
        assert!(svg.contains("scale(1 -1)"));
        for (i, shape) in shapes.iter().enumerate() {
            assert!(svg.contains(&format!("{}_{i}", shape.kind())), "{} missing", shape.kind());
        }
        assert!(svg.contains("shapes: 7 | scene"));
    }

    #[test]
    fn empty_scene_still_renders() {
        let svg = shapes_to_svg(&[], SvgDrawOptions::default(), "empty").to_string();
        assert!(svg.contains("shapes: 0 | empty"));
    }

    #[test]
    fn scene_is_written_to_disk() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let options = SvgDrawOptions {
            theme: SvgTheme::GRAY,
            ..SvgDrawOptions::default()
        };
        let document = shapes_to_svg(&scene(), options, "written");
        let path = std::env::temp_dir().join(format!("rigid2d_scene_{}.svg", std::process::id()));
        write_svg(&document, &path)?;

        let written = std::fs::read_to_string(&path)?;
        assert!(written.contains("<svg"));
        assert!(written.contains("written"));
        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn writing_to_a_missing_directory_fails() {
        let document = shapes_to_svg(&scene(), SvgDrawOptions::default(), "unwritable");
        let path = std::env::temp_dir().join("rigid2d_missing_dir").join("nested").join("scene.svg");
        let error = write_svg(&document, &path).unwrap_err();
        assert!(error.to_string().contains("failed to write svg file"));
    }
}
