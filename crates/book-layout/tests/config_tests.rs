use book_layout::*;

fn assert_sums_to_100(ratio: &[f32]) {
    for pair in ratio.chunks(2) {
        let sum: f32 = pair.iter().sum();
        assert!((sum - 100.0).abs() < 1e-3, "ratio {:?} does not sum to 100", ratio);
    }
}

#[test]
fn test_default_configuration_is_valid() {
    let config = LayoutConfiguration::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.columns, 1);
    assert_eq!(config.split_type, SplitType::None);
    assert_eq!(config.split_ratio, vec![100.0]);
    assert!(!config.is_rtl);
    assert!(config.page_numbers.show);
}

#[test]
fn test_setters_return_new_values() {
    let config = LayoutConfiguration::default();
    let next = config.with_columns(3);
    assert_eq!(config.columns, 1);
    assert_eq!(next.columns, 3);
    assert_eq!(next.margins, config.margins);
}

#[test]
fn test_columns_are_clamped() {
    let config = LayoutConfiguration::default();
    assert_eq!(config.with_columns(0).columns, 1);
    assert_eq!(config.with_columns(4).columns, 4);
    assert_eq!(config.with_columns(9).columns, 4);
}

#[test]
fn test_column_gap_is_non_negative() {
    let config = LayoutConfiguration::default();
    assert_eq!(config.with_column_gap(-5.0).column_gap_mm, 0.0);
    assert_eq!(config.with_column_gap(f32::NAN).column_gap_mm, 0.0);
    assert_eq!(config.with_column_gap(12.0).column_gap_mm, 12.0);
}

#[test]
fn test_two_way_split_ratio_sums_to_100() {
    for kind in [SplitType::Horizontal, SplitType::Vertical] {
        let config = LayoutConfiguration::default().with_split_type(kind);
        assert_eq!(config.split_ratio, vec![50.0, 50.0]);

        for first in [0.0, 12.5, 33.0, 99.5, 150.0, -20.0, f32::NAN] {
            let next = config.with_split_ratio(first);
            assert_eq!(next.split_ratio.len(), 2);
            assert_sums_to_100(&next.split_ratio);
            assert!((0.0..=100.0).contains(&next.split_ratio[0]));
            assert!(next.validate().is_ok());
        }
    }
}

#[test]
fn test_split_ratio_derives_second_value() {
    let config = LayoutConfiguration::default()
        .with_split_type(SplitType::Horizontal)
        .with_split_ratio(30.0);
    assert_eq!(config.split_ratio, vec![30.0, 70.0]);
}

#[test]
fn test_switching_between_two_way_splits_keeps_ratio() {
    let config = LayoutConfiguration::default()
        .with_split_type(SplitType::Horizontal)
        .with_split_ratio(30.0)
        .with_split_type(SplitType::Vertical);
    assert_eq!(config.split_ratio, vec![30.0, 70.0]);
}

#[test]
fn test_quadrant_ratio_is_fixed() {
    let config = LayoutConfiguration::default()
        .with_split_type(SplitType::Horizontal)
        .with_split_ratio(20.0)
        .with_split_type(SplitType::Quadrant);
    assert_eq!(config.split_ratio, vec![50.0, 50.0, 50.0, 50.0]);

    // Ratio edits do not apply to a quadrant split
    let edited = config.with_split_ratio(10.0);
    assert_eq!(edited.split_ratio, vec![50.0, 50.0, 50.0, 50.0]);
    assert!(edited.validate().is_ok());
}

#[test]
fn test_split_none_ignores_ratio_edits() {
    let config = LayoutConfiguration::default().with_split_ratio(25.0);
    assert_eq!(config.split_ratio, vec![100.0]);
}

#[test]
fn test_split_regions_cover_page() {
    let regions = split_regions(SplitType::Vertical, &[30.0, 70.0]);
    assert_eq!(regions.len(), 2);
    let total: f32 = regions.iter().map(|r| r.width * r.height).sum();
    assert!((total - 10_000.0).abs() < 1e-2);
}

#[test]
fn test_background_kind_switch_preserves_slots() {
    let bg = Background::solid("#123456").with_pattern(Pattern {
        opacity: 2.0,
        ..Pattern::default()
    });
    assert_eq!(bg.active, BackgroundKind::Solid);
    assert_eq!(bg.pattern.as_ref().map(|p| p.opacity), Some(1.0));

    let switched = bg.with_kind(BackgroundKind::Gradient);
    assert_eq!(switched.active, BackgroundKind::Gradient);
    assert_eq!(switched.solid.as_deref(), Some("#123456"));
    assert!(switched.pattern.is_some());
    assert!(switched.gradient.is_some());

    let back = switched.with_kind(BackgroundKind::Solid);
    assert_eq!(back.active_fill(), Some(BackgroundFill::Solid("#123456")));
    assert_eq!(back.gradient, switched.gradient);
}

#[test]
fn test_gradient_stops_are_clamped_not_sorted() {
    let gradient = Gradient {
        kind: GradientKind::Linear,
        angle_deg: None,
        stops: vec![
            GradientStop {
                color: "#000".into(),
                position: 140.0,
            },
            GradientStop {
                color: "#fff".into(),
                position: -10.0,
            },
        ],
    };
    let bg = Background::default()
        .with_gradient(gradient)
        .with_kind(BackgroundKind::Gradient);
    let stops = &bg.gradient.as_ref().unwrap().stops;
    assert_eq!(stops[0].position, 100.0);
    assert_eq!(stops[1].position, 0.0);
    assert!(LayoutConfiguration::default().with_background(bg).validate().is_ok());
}

#[test]
fn test_background_image_opacity_clamped() {
    let bg = Background::default().with_image(BackgroundImage {
        url: "https://img.example/paper.png".into(),
        opacity: -0.5,
        fit: ImageFit::Tile,
    });
    assert_eq!(bg.image.as_ref().map(|i| i.opacity), Some(0.0));
}

#[test]
fn test_margins_clamped_on_set() {
    let config = LayoutConfiguration::default().with_margins(PageMargins {
        top_mm: -3.0,
        bottom_mm: 10.0,
        left_mm: f32::NAN,
        right_mm: 5.0,
    });
    assert_eq!(config.margins.top_mm, 0.0);
    assert_eq!(config.margins.left_mm, 0.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_typography_clamped_on_set() {
    let config = LayoutConfiguration::default().with_typography(Typography {
        body_font_size: 400.0,
        line_height: 0.1,
        ..Typography::default()
    });
    assert_eq!(config.typography.body_font_size, 96.0);
    assert_eq!(config.typography.line_height, 0.8);
}

#[test]
fn test_validation_rejects_bad_columns() {
    let mut config = LayoutConfiguration::default();
    config.columns = 7;
    match config.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("Column count")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_unbalanced_ratio() {
    let mut config = LayoutConfiguration::default().with_split_type(SplitType::Horizontal);
    config.split_ratio = vec![40.0, 40.0];
    assert!(matches!(config.validate(), Err(LayoutError::Config(_))));
}

#[test]
fn test_column_width() {
    let config = LayoutConfiguration::default()
        .with_margins(PageMargins::uniform(10.0))
        .with_columns(2)
        .with_column_gap(10.0);
    // 210 - 20 margins - 10 gap = 180 over two columns
    assert_eq!(config.column_width_mm(210.0), 90.0);
}

#[test]
fn test_header_visibility_by_parity() {
    let header = HeaderFooter {
        show_on_even: false,
        ..HeaderFooter::with_text("{title}", "", "")
    };
    assert!(header.visible_on(1));
    assert!(!header.visible_on(2));
    assert!(!HeaderFooter::disabled().visible_on(1));
}

#[test]
fn test_header_tokens_and_rtl_swap() {
    let footer = HeaderFooter::with_text("{title}", "p. {page}", "");
    let band = footer.resolve(Edge::Bottom, 7, "Dune", false).unwrap();
    assert_eq!(band.left, "p. 7");
    assert_eq!(band.center, "Dune");
    assert_eq!(band.right, "");

    let mirrored = footer.resolve(Edge::Bottom, 7, "Dune", true).unwrap();
    assert_eq!(mirrored.left, "");
    assert_eq!(mirrored.right, "p. 7");
}

#[test]
fn test_page_number_outside_position() {
    let position = PageNumberPosition::BottomOutside;
    // Odd pages are recto in left-to-right books
    assert_eq!(position.alignment(1, false), Alignment::Right);
    assert_eq!(position.alignment(2, false), Alignment::Left);
    assert_eq!(position.alignment(1, true), Alignment::Left);
    assert_eq!(PageNumberPosition::BottomInside.alignment(1, false), Alignment::Left);
    assert_eq!(PageNumberPosition::TopOutside.edge(), Edge::Top);
}

#[test]
fn test_templates_by_name() {
    assert_eq!(template_names().len(), 5);
    for name in template_names() {
        let config = template(name).unwrap();
        assert!(config.validate().is_ok(), "template {} is invalid", name);
    }
    assert!(template("Manga-RTL").unwrap().is_rtl);
    assert_eq!(template("two-column").unwrap().columns, 2);
    assert!(matches!(
        template("brutalist"),
        Err(LayoutError::UnknownTemplate(_))
    ));
}

#[tokio::test]
async fn test_save_and_load_configuration() {
    use tempfile::NamedTempFile;

    let config = template("magazine").unwrap().with_rtl(true);
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path();

    config.save(path).await.unwrap();
    let loaded = LayoutConfiguration::load(path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_load_rejects_invalid_configuration() {
    use tempfile::NamedTempFile;

    let mut config = LayoutConfiguration::default();
    config.columns = 12;
    let temp = NamedTempFile::new().unwrap();
    config.save(temp.path()).await.unwrap();

    let result = LayoutConfiguration::load(temp.path()).await;
    assert!(matches!(result, Err(LayoutError::Config(_))));
}

#[tokio::test]
async fn test_load_rejects_malformed_json() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    tokio::fs::write(temp.path(), b"{ not json").await.unwrap();
    let result = LayoutConfiguration::load(temp.path()).await;
    match result {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
