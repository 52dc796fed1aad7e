use crate::Rect2;

/// Grow `rect` to twice its size around the same center, then clamp it to
/// `extent`.
///
/// Half of the width is added on each horizontal side and half of the
/// height on each vertical side. The origin is clamped to the extent's min
/// edge first; when the grown rect then sticks out past the max edge, the
/// dimension is shrunk (the origin never moves right or down). Used to give a
/// downstream crop some surrounding context.
pub fn expand_rect(rect: Rect2, extent: Rect2) -> Rect2 {
    let dw = rect.width();
    let dh = rect.height();

    let x = (rect.min_x() - 0.5 * dw).max(extent.min_x());
    let mut width = rect.width() + dw;
    if x + width > extent.max_x() {
        width = extent.max_x() - x;
    }

    let y = (rect.min_y() - 0.5 * dh).max(extent.min_y());
    let mut height = rect.height() + dh;
    if y + height > extent.max_y() {
        height = extent.max_y() - y;
    }

    Rect2::new(x, y, width.max(0.0), height.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interior_rect_doubles_around_center() {
        let extent = Rect2::new(0.0, 0.0, 1000.0, 1000.0);
        let r = Rect2::new(400.0, 300.0, 100.0, 50.0);
        let e = expand_rect(r, extent);
        assert_relative_eq!(e.min_x(), 350.0);
        assert_relative_eq!(e.min_y(), 275.0);
        assert_relative_eq!(e.width(), 200.0);
        assert_relative_eq!(e.height(), 100.0);
        assert_relative_eq!(e.center().x, r.center().x);
        assert_relative_eq!(e.center().y, r.center().y);
    }

    #[test]
    fn clamps_on_every_side() {
        let extent = Rect2::new(0.0, 0.0, 640.0, 480.0);

        let near_origin = expand_rect(Rect2::new(10.0, 5.0, 100.0, 100.0), extent);
        assert_relative_eq!(near_origin.min_x(), 0.0);
        assert_relative_eq!(near_origin.min_y(), 0.0);
        assert_relative_eq!(near_origin.width(), 200.0);

        let near_max = expand_rect(Rect2::new(600.0, 450.0, 30.0, 20.0), extent);
        assert_relative_eq!(near_max.max_x(), 640.0);
        assert_relative_eq!(near_max.max_y(), 480.0);
        assert_relative_eq!(near_max.min_x(), 585.0);
    }

    #[test]
    fn respects_extent_with_non_zero_origin() {
        let extent = Rect2::new(100.0, 200.0, 300.0, 300.0);
        let e = expand_rect(Rect2::new(300.0, 400.0, 80.0, 80.0), extent);
        assert!(extent.contains_rect(&e, 1e-9));
        assert_relative_eq!(e.max_x(), 400.0);
        assert_relative_eq!(e.max_y(), 500.0);
    }

    #[test]
    fn result_is_inside_extent_and_contains_original() {
        let extent = Rect2::new(0.0, 0.0, 1280.0, 720.0);
        let mut seed = 7_u64;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 11) as f64) / ((1_u64 << 53) as f64)
        };
        for _ in 0..500 {
            let w = next() * extent.width();
            let h = next() * extent.height();
            let x = next() * (extent.width() - w);
            let y = next() * (extent.height() - h);
            let r = Rect2::new(x, y, w, h);
            let e = expand_rect(r, extent);
            assert!(extent.contains_rect(&e, 1e-9), "{e:?} escapes {extent:?}");
            assert!(e.contains_rect(&r, 1e-9), "{e:?} lost {r:?}");
        }
    }
}
