#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, fs, path::Path};

    use icongen::{
        config::{BACKGROUND, FOREGROUND, IconConfig},
        generator::{self, output_file_name},
    };
    use image::GenericImageView;
    use tempfile::TempDir;

    // 指向不存在的字体, 强制使用内置点阵字体, 保证像素结果稳定
    fn builtin_config(dir: &Path) -> IconConfig {
        let mut config = IconConfig::default().with_output_dir(dir);
        config.font_candidates = vec![dir.join("missing-font.ttf")];
        config
    }

    fn file_names(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn default_sizes_produce_six_files() {
        let tmp = TempDir::new().unwrap();
        let created = generator::generate(&builtin_config(tmp.path())).unwrap();

        assert_eq!(created.len(), 6);
        let expected: BTreeSet<String> = [
            "32x32.png",
            "128x128.png",
            "256x256.png",
            "512x512.png",
            "icon.png",
            "128x128@2x.png",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(file_names(tmp.path()), expected);
        assert!(!tmp.path().join("1024x1024.png").exists());
    }

    #[test]
    fn files_have_requested_dimensions() {
        let tmp = TempDir::new().unwrap();
        generator::generate(&builtin_config(tmp.path())).unwrap();

        for size in [32u32, 128, 256, 512] {
            let img = image::open(tmp.path().join(format!("{size}x{size}.png"))).unwrap();
            assert_eq!(img.dimensions(), (size, size));
        }
        let icon = image::open(tmp.path().join("icon.png")).unwrap();
        assert_eq!(icon.dimensions(), (1024, 1024));
    }

    #[test]
    fn retina_copy_matches_source_pixels() {
        let tmp = TempDir::new().unwrap();
        generator::generate(&builtin_config(tmp.path())).unwrap();

        let source = image::open(tmp.path().join("256x256.png")).unwrap().into_rgba8();
        let copy = image::open(tmp.path().join("128x128@2x.png")).unwrap().into_rgba8();
        assert_eq!(copy.dimensions(), (256, 256));
        assert_eq!(source.as_raw(), copy.as_raw());
    }

    #[test]
    fn confirmation_names_written_files_in_order() {
        let tmp = TempDir::new().unwrap();
        let mut reported = Vec::new();
        generator::generate_with(&builtin_config(tmp.path()), |icon| {
            reported.push(icon.file_name())
        })
        .unwrap();

        assert_eq!(
            reported,
            vec![
                "32x32.png",
                "128x128.png",
                "256x256.png",
                "512x512.png",
                "icon.png",
                "128x128@2x.png"
            ]
        );
    }

    #[test]
    fn untouched_pixels_keep_background() {
        let tmp = TempDir::new().unwrap();
        let config = builtin_config(tmp.path());
        let icon = generator::render_icon(256, &config);

        for (x, y) in [(0, 0), (255, 0), (0, 255), (255, 255), (128, 5), (5, 128)] {
            assert_eq!(*icon.get_pixel(x, y), BACKGROUND, "pixel ({x}, {y})");
        }
        assert!(icon.pixels().any(|p| *p == FOREGROUND));
        assert!(icon.pixels().all(|p| *p == BACKGROUND || *p == FOREGROUND));
    }

    #[test]
    fn rerun_overwrites_with_same_file_set() {
        let tmp = TempDir::new().unwrap();
        let config = builtin_config(tmp.path());

        generator::generate(&config).unwrap();
        let first = file_names(tmp.path());
        let first_icon = fs::read(tmp.path().join("32x32.png")).unwrap();

        generator::generate(&config).unwrap();
        assert_eq!(file_names(tmp.path()), first);
        assert_eq!(fs::read(tmp.path().join("32x32.png")).unwrap(), first_icon);
    }

    #[test]
    fn largest_name_follows_size_list() {
        let tmp = TempDir::new().unwrap();
        let mut config = builtin_config(tmp.path());
        config.sizes = vec![16, 64, 256];

        generator::generate(&config).unwrap();
        let icon = image::open(tmp.path().join("icon.png")).unwrap();
        assert_eq!(icon.dimensions(), (256, 256));
        assert!(tmp.path().join("16x16.png").exists());
        assert!(tmp.path().join("64x64.png").exists());
        assert!(!tmp.path().join("256x256.png").exists());
        // 256 是最大尺寸, 复制源即 icon.png
        let copy = image::open(tmp.path().join("128x128@2x.png")).unwrap();
        assert_eq!(copy.dimensions(), (256, 256));
    }

    #[test]
    fn missing_retina_source_fails_after_writing_sizes() {
        let tmp = TempDir::new().unwrap();
        let mut config = builtin_config(tmp.path());
        config.sizes = vec![32, 128];

        let err = generator::generate(&config).unwrap_err();
        assert!(err.to_string().contains("256x256"), "{err}");
        assert!(tmp.path().join("32x32.png").exists());
        assert!(tmp.path().join("icon.png").exists());
        assert!(!tmp.path().join("128x128@2x.png").exists());
    }

    #[test]
    fn retina_copy_can_be_disabled() {
        let tmp = TempDir::new().unwrap();
        let mut config = builtin_config(tmp.path());
        config.sizes = vec![32];
        config.retina = None;

        let created = generator::generate(&config).unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(file_names(tmp.path()).len(), 1);
    }

    #[test]
    fn output_directory_is_created() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("icons").join("app");
        let mut config = builtin_config(&nested);
        config.sizes = vec![32];
        config.retina = None;

        generator::generate(&config).unwrap();
        assert!(nested.join("icon.png").exists());
    }

    #[test]
    fn invalid_size_lists_are_rejected_before_writing() {
        let tmp = TempDir::new().unwrap();
        for sizes in [vec![], vec![0, 32], vec![32, 64, 32]] {
            let mut config = builtin_config(tmp.path());
            config.sizes = sizes;
            assert!(generator::generate(&config).is_err());
        }
        assert!(file_names(tmp.path()).is_empty());
    }

    #[test]
    fn empty_label_is_rejected() {
        let tmp = TempDir::new().unwrap();
        for label in ["", "   "] {
            let mut config = builtin_config(tmp.path());
            config.label = label.to_string();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("label"), "{err}");
            assert!(generator::generate(&config).is_err());
        }
        assert!(file_names(tmp.path()).is_empty());
    }

    #[test]
    fn file_name_rule() {
        assert_eq!(output_file_name(32, 1024), "32x32.png");
        assert_eq!(output_file_name(1024, 1024), "icon.png");
        assert_eq!(output_file_name(512, 512), "icon.png");
    }
}
