use foldplot_core::{Pipeline, PlotOutput, PlotParams, RawTable};
use foldplot_render::{ExportConfig, OutputFormat, PlotExporter, PlotKind, Rasterizer, Shape};
use tempfile::tempdir;

fn table(lines: &[&str]) -> RawTable {
    let rows = lines
        .iter()
        .map(|l| l.split('\t').map(|s| s.to_string()).collect())
        .collect();
    RawTable::from_rows(rows).unwrap()
}

fn self_output() -> PlotOutput {
    let t = table(&[
        "q\tq_st\tq_en\tr\tr_st\tr_en\tperID_by_events",
        "chr8\t0\t500000\tchr8\t0\t500000\t100",
        "chr8\t500000\t1000000\tchr8\t1500000\t2000000\t96.5",
        "chr8\t1000000\t1500000\tchr8\t2500000\t3000000\t91.0",
    ]);
    Pipeline::new(PlotParams::default()).run(&t).unwrap()
}

fn pairwise_output() -> PlotOutput {
    let t = table(&[
        "q\tq_st\tq_en\tr\tr_st\tr_en\tperID_by_events",
        "hap1\t0\t5000\thap2\t0\t5000\t99.5",
        "hap1\t5000\t10000\thap2\t7000\t12000\t93.0",
    ]);
    Pipeline::new(PlotParams::default()).run(&t).unwrap()
}

fn svg_only() -> ExportConfig {
    ExportConfig {
        formats: vec![OutputFormat::Svg],
        ..Default::default()
    }
}

#[test]
fn self_comparison_writes_full_tri_and_hist() {
    let dir = tempdir().unwrap();
    let exporter = PlotExporter::new(ExportConfig::default());
    let written = exporter.export(&self_output(), dir.path(), None).unwrap();

    let mut names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "chr8_FULL.png",
            "chr8_FULL.svg",
            "chr8_HIST.png",
            "chr8_HIST.svg",
            "chr8_TRI.png",
            "chr8_TRI.svg",
        ]
    );
    for path in &written {
        assert!(path.exists());
    }

    let png = image::open(dir.path().join("chr8_TRI.png")).unwrap();
    assert_eq!((png.width(), png.height()), PlotKind::Triangle.canvas_size(100));

    let full = std::fs::read_to_string(dir.path().join("chr8_FULL.svg")).unwrap();
    assert!(full.contains("Genomic Position (Mbp)"));
    assert!(full.contains(r#"width="900" height="900""#));

    let hist = std::fs::read_to_string(dir.path().join("chr8_HIST.svg")).unwrap();
    assert!(hist.contains("% Identity Estimate"));
    assert!(hist.contains("# of Estimates"));
    assert!(!hist.contains("(thousands)"));
}

#[test]
fn pairwise_names_and_no_histogram() {
    let dir = tempdir().unwrap();
    let config = ExportConfig {
        histogram: false,
        ..svg_only()
    };
    let written = PlotExporter::new(config)
        .export(&pairwise_output(), dir.path(), None)
        .unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].file_name().unwrap(), "hap1_hap2.svg");

    let prefixed = PlotExporter::new(svg_only())
        .export(&pairwise_output(), dir.path(), Some("run 1"))
        .unwrap();
    assert!(prefixed.iter().any(|p| p.ends_with("run_1.svg")));
    assert!(prefixed.iter().any(|p| p.ends_with("run_1_HIST.svg")));
}

#[test]
fn scenes_carry_one_shape_per_tile_and_diamond() {
    let output = self_output();
    let config = ExportConfig {
        show_legend: false,
        show_axes: false,
        ..svg_only()
    };
    let exporter = PlotExporter::new(config);
    let scenes = exporter.scenes(&output, "chr8");
    assert_eq!(scenes.len(), 3);

    let (_, kind, dot) = &scenes[0];
    assert_eq!(*kind, PlotKind::Dot);
    let rects = dot.count(|s| matches!(s, Shape::Rect { .. }));
    assert_eq!(rects, output.dot.tiles.len());

    let (_, kind, tri) = &scenes[1];
    assert_eq!(*kind, PlotKind::Triangle);
    assert_eq!(tri.count(|s| matches!(s, Shape::Polygon { .. })), 3);

    // every dot tile is drawn in its class color
    let palette_colors = &output.palette.colors;
    for shape in &dot.shapes {
        if let Shape::Rect { fill, .. } = shape {
            assert!(palette_colors.contains(fill));
        }
    }
}

#[test]
fn svg_export_is_deterministic() {
    let output = self_output();
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let exporter = PlotExporter::new(svg_only());
    exporter.export(&output, a.path(), None).unwrap();
    exporter.export(&output, b.path(), None).unwrap();

    for name in ["chr8_FULL.svg", "chr8_TRI.svg", "chr8_HIST.svg"] {
        let x = std::fs::read(a.path().join(name)).unwrap();
        let y = std::fs::read(b.path().join(name)).unwrap();
        assert_eq!(x, y, "{} differs between runs", name);
    }
}

#[test]
fn png_is_the_rasterized_svg() {
    let dir = tempdir().unwrap();
    let config = ExportConfig {
        provenance_comment: Some("foldplot test".into()),
        ..ExportConfig::default()
    };
    PlotExporter::new(config)
        .export(&self_output(), dir.path(), None)
        .unwrap();

    let rasterizer = Rasterizer::new();
    for stem in ["chr8_FULL", "chr8_TRI", "chr8_HIST"] {
        let svg = std::fs::read_to_string(dir.path().join(format!("{}.svg", stem))).unwrap();
        let expected = rasterizer.render_svg(&svg).unwrap();
        let png = image::open(dir.path().join(format!("{}.png", stem)))
            .unwrap()
            .to_rgba8();
        assert_eq!(png.dimensions(), expected.dimensions());
        assert!(png.as_raw() == expected.as_raw(), "{}.png differs from its SVG", stem);
    }
}
