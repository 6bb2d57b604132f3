mod tests {
    use swarm_light::color::{Rgb, rgb_from_u32, scale_color};
    use swarm_light::math8::{clamp8, ease_out_quad, qsub8, scale_by, scale_floor};

    #[test]
    fn test_scale_floor() {
        assert_eq!(scale_floor(255, 255), 255);
        assert_eq!(scale_floor(200, 0), 0);
        assert_eq!(scale_floor(255, 10), 10);
        assert_eq!(scale_floor(120, 10), 4);
        assert_eq!(scale_floor(35, 10), 1);
        assert_eq!(scale_floor(128, 128), 64);
    }

    #[test]
    fn test_scale_by() {
        assert_eq!(scale_by(200, 1.0), 200);
        assert_eq!(scale_by(200, 0.5), 100);
        assert_eq!(scale_by(200, 2.0), 200);
        assert_eq!(scale_by(200, -1.0), 0);
    }

    #[test]
    fn test_clamp8() {
        assert_eq!(clamp8(-3.0), 0);
        assert_eq!(clamp8(f32::NAN), 0);
        assert_eq!(clamp8(12.9), 12);
        assert_eq!(clamp8(300.0), 255);
    }

    #[test]
    fn test_qsub8() {
        assert_eq!(qsub8(10, 3), 7);
        assert_eq!(qsub8(3, 10), 0);
    }

    #[test]
    fn test_ease_out_quad() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_quad(4.0), 1.0);
    }

    #[test]
    fn test_scale_color() {
        let amber = rgb_from_u32(0xFF7823);
        assert_eq!(amber, Rgb::new(255, 120, 35));
        assert_eq!(scale_color(amber, 10), Rgb::new(10, 4, 1));
        assert_eq!(scale_color(amber, 255), amber);
        assert_eq!(scale_color(amber, 0), Rgb::new(0, 0, 0));
    }
}
