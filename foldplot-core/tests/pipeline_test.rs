use foldplot_core::{
    ColorMode, ComparisonKind, PaletteSpec, Pipeline, PlotError, PlotParams, RawTable,
};

fn rows(lines: &[&str]) -> RawTable {
    let rows = lines
        .iter()
        .map(|l| l.split('\t').map(|s| s.to_string()).collect())
        .collect();
    RawTable::from_rows(rows).expect("header row")
}

fn params(palette: &str, mode: ColorMode) -> PlotParams {
    PlotParams {
        palette: PaletteSpec {
            name: palette.to_string(),
            ..Default::default()
        },
        mode,
        comparison: ComparisonKind::Auto,
    }
}

#[test]
fn self_comparison_end_to_end() {
    let table = rows(&[
        "#query_name\tquery_start\tquery_end\treference_name\treference_start\treference_end\tperID_by_events\tstrand",
        "chr8\t0\t1000\tchr8\t3000\t4000\t99.0\t+",
        "chr8\t1000\t2000\tchr8\t5000\t6000\t95.0\t+",
        "chr8\t2000\t3000\tchr8\t8000\t9000\t90.0\t-",
    ]);

    let out = Pipeline::new(params("Spectral_5", ColorMode::EqualWidth))
        .run(&table)
        .expect("pipeline");

    assert_eq!(out.comparison, ComparisonKind::SelfComparison);
    assert_eq!(out.palette.len(), 5);
    assert_eq!(out.breakpoints.edges(), &[90.0, 92.0, 94.0, 96.0, 98.0, 100.0]);

    let classes: Vec<usize> = out.records.iter().map(|r| r.color_class).collect();
    assert_eq!(classes, vec![4, 2, 0]);

    // every record is off-diagonal, so each one gains a mirror
    assert_eq!(out.dot.tiles.len(), 6);
    assert!(out.dot.tiles.iter().all(|t| t.color_class < 5));
    assert_eq!(out.dot.window, 1000);
    assert_eq!(out.dot.max_extent, 9000);

    let tri = out.diamonds.as_ref().expect("self-comparison has diamonds");
    assert_eq!(tri.vertices.len(), 12);
    assert_eq!(tri.num_polygons(), 3);

    assert_eq!(out.histogram.bins.len(), 300);
    assert_eq!(out.histogram.total(), 3);
}

#[test]
fn pairwise_end_to_end_legacy_schema() {
    let table = rows(&[
        "q\tq_st\tq_en\tr\tr_st\tr_en\tperID_by_events",
        "hap1\t0\t5000\thap2\t0\t5000\t99.5",
        "hap1\t5000\t10000\thap2\t5000\t10000\t97.0",
        "hap1\t10000\t15000\thap2\t12000\t17000\t80.0",
        "hap1\t15000\t20000\thap2\t17000\t22000\t88.0",
    ]);

    let out = Pipeline::new(params("Blues_4", ColorMode::Frequency))
        .run(&table)
        .expect("pipeline");

    assert_eq!(out.comparison, ComparisonKind::Pairwise);
    assert!(out.diamonds.is_none());
    assert_eq!(out.dot.tiles.len(), 4);
    assert_eq!(out.dot.axis_range(), (0.0, 22000.0));
    assert_eq!(out.sequence_names(), Some(("hap1", "hap2")));

    // quartile edges put exactly one record in each class
    let mut classes: Vec<usize> = out.records.iter().map(|r| r.color_class).collect();
    classes.sort();
    assert_eq!(classes, vec![0, 1, 2, 3]);
    assert_eq!(out.histogram.total(), 4);
}

#[test]
fn output_serializes_to_json() {
    let table = rows(&[
        "q\tq_st\tq_en\tr\tr_st\tr_en\tperID_by_events",
        "a\t0\t100\ta\t0\t100\t100",
        "a\t100\t200\ta\t400\t500\t91.2",
    ]);
    let out = Pipeline::new(PlotParams::default()).run(&table).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["comparison"], "SelfComparison");
    assert_eq!(json["dot"]["tiles"].as_array().map(|t| t.len()), Some(3));
    assert_eq!(json["histogram"]["bins"].as_array().map(|b| b.len()), Some(300));
}

#[test]
fn errors_abort_the_dataset() {
    let missing = rows(&["q\tq_st\tq_en\tr\tr_st\tr_en", "a\t0\t1\ta\t0\t1"]);
    assert!(matches!(
        Pipeline::new(PlotParams::default()).run(&missing),
        Err(PlotError::Schema { .. })
    ));

    let empty = rows(&["q\tq_st\tq_en\tr\tr_st\tr_en\tperID_by_events"]);
    assert_eq!(
        Pipeline::new(PlotParams::default()).run(&empty),
        Err(PlotError::EmptyDataset)
    );

    let reversed = rows(&[
        "q\tq_st\tq_en\tr\tr_st\tr_en\tperID_by_events",
        "a\t500\t100\ta\t0\t100\t99",
    ]);
    assert!(matches!(
        Pipeline::new(PlotParams::default()).run(&reversed),
        Err(PlotError::InvalidRecord { row: 1, .. })
    ));

    let too_many = PlotParams {
        palette: PaletteSpec {
            custom_colors: Some(vec!["#000000".to_string(); 12]),
            ..Default::default()
        },
        ..Default::default()
    };
    let ok = rows(&[
        "q\tq_st\tq_en\tr\tr_st\tr_en\tperID_by_events",
        "a\t0\t100\tb\t0\t100\t99",
    ]);
    assert!(matches!(
        Pipeline::new(too_many).run(&ok),
        Err(PlotError::Config { .. })
    ));
}
