use selkie::{
    Anchor, AnchorWord, CategoryMode, ChartConfig, Error, HeuristicMetrics, Item, LayoutResult,
    Reading, compute_scales, geom, layout_chart, partition_categories,
};

fn metrics() -> HeuristicMetrics {
    HeuristicMetrics::default()
}

fn center_anchor() -> Anchor {
    Anchor::Center(AnchorWord::new("sea", 400.0))
}

fn edge_anchor() -> Anchor {
    Anchor::Edges(AnchorWord::new("hot", 200.0), AnchorWord::new("cold", 150.0))
}

fn radial_items() -> Vec<Item> {
    vec![
        Item::new("w0", "harbor", 120.0, 2.5),
        Item::new("w1", "tide", 80.0, -1.0),
        Item::new("w2", "salt", 60.0, 0.5),
        Item::new("w3", "gull", 30.0, -2.0),
        Item::new("w4", "brine", 15.0, 1.2),
    ]
}

fn opposed_items() -> Vec<Item> {
    vec![
        Item::new("w0", "spring", 0.0, -2.0)
            .with_readings(Reading::new("w0a", 40.0, -3.0), Reading::new("w0b", 10.0, 1.0)),
        Item::new("w1", "lukewarm", 0.0, 0.3)
            .with_readings(Reading::new("w1a", 20.0, -0.5), Reading::new("w1b", 25.0, 1.0)),
        Item::new("w2", "glacier", 0.0, 3.1)
            .with_readings(Reading::new("w2a", 5.0, 2.0), Reading::new("w2b", 35.0, 4.0)),
    ]
}

fn assert_no_overlaps(result: &LayoutResult) {
    let circles: Vec<_> = result.items.iter().flat_map(|i| &i.circles).collect();
    for (n, a) in circles.iter().enumerate() {
        for b in &circles[n + 1..] {
            let dist = (a.x - b.x).hypot(a.y - b.y);
            assert!(
                dist > a.r + b.r - 1e-9,
                "circles overlap: ({}, {}, r={}) vs ({}, {}, r={})",
                a.x,
                a.y,
                a.r,
                b.x,
                b.y,
                b.r
            );
        }
    }
}

#[test]
fn radial_layout_is_collision_free_when_it_reports_success() {
    let items = radial_items();
    let result = layout_chart(&items, &center_anchor(), &ChartConfig::radial(), &metrics(), 42)
        .unwrap();
    assert!(!result.failed);
    assert_eq!(result.items.len(), items.len());
    assert_no_overlaps(&result);
}

#[test]
fn radial_items_sit_on_their_score_ring() {
    let items = radial_items();
    let cfg = ChartConfig::radial();
    let anchor = center_anchor();
    let scales = compute_scales(&items, &anchor, &cfg);
    let result = layout_chart(&items, &anchor, &cfg, &metrics(), 42).unwrap();

    for placed in &result.items {
        let ring = scales.position.scale(placed.score);
        let dist = placed.x.hypot(placed.y);
        assert!(
            (dist - ring).abs() < 1e-6,
            "{} should sit at radius {ring}, found {dist}",
            placed.text
        );
    }
}

#[test]
fn radial_layout_is_reproducible_from_the_seed() {
    let items = radial_items();
    let cfg = ChartConfig::radial();
    let a = layout_chart(&items, &center_anchor(), &cfg, &metrics(), 7).unwrap();
    let b = layout_chart(&items, &center_anchor(), &cfg, &metrics(), 7).unwrap();
    assert_eq!(a, b);

    let c = layout_chart(&items, &center_anchor(), &cfg, &metrics(), 8).unwrap();
    assert_ne!(
        a.items.iter().map(|i| (i.x, i.y)).collect::<Vec<_>>(),
        c.items.iter().map(|i| (i.x, i.y)).collect::<Vec<_>>()
    );
}

#[test]
fn categorized_items_stay_inside_their_wedge() {
    let items: Vec<Item> = radial_items()
        .into_iter()
        .enumerate()
        .map(|(n, item)| item.with_category(if n % 2 == 0 { "nouns" } else { "verbs" }))
        .collect();
    let mut cfg = ChartConfig::radial();
    cfg.category.mode = CategoryMode::Weighted;

    let anchor = center_anchor();
    let wedges = partition_categories(&items, &cfg);
    let result = layout_chart(&items, &anchor, &cfg, &metrics(), 11).unwrap();
    assert!(!result.failed);

    for placed in &result.items {
        let category = placed.category.as_deref().unwrap();
        let wedge = wedges.iter().find(|w| w.name == category).unwrap();
        let angle = placed.y.atan2(placed.x);
        assert!(
            wedge.contains(angle),
            "{} left wedge {category}: angle {angle}, wedge [{}, {}]",
            placed.text,
            wedge.start,
            wedge.end
        );
    }
}

#[test]
fn radial_anchor_is_centered_with_its_own_circle() {
    let result = layout_chart(
        &radial_items(),
        &center_anchor(),
        &ChartConfig::radial(),
        &metrics(),
        1,
    )
    .unwrap();
    assert_eq!(result.anchors.len(), 1);
    let anchor = &result.anchors[0];
    assert_eq!(anchor.position, geom::Point { x: 0.0, y: 0.0 });
    assert!(anchor.radius > 0.0);
    assert!(anchor.width > 0.0);
}

#[test]
fn overfull_chart_still_places_every_item_and_reports_failure() {
    let items: Vec<Item> = (0..100)
        .map(|n| Item::new(format!("w{n}"), "word", 100.0, 0.0))
        .collect();
    let result = layout_chart(&items, &center_anchor(), &ChartConfig::radial(), &metrics(), 3)
        .unwrap();
    assert!(result.failed);
    assert_eq!(result.items.len(), items.len());
}

#[test]
fn max_items_keeps_only_the_heaviest_words() {
    let mut cfg = ChartConfig::radial();
    cfg.max_items = Some(2);
    let result = layout_chart(&radial_items(), &center_anchor(), &cfg, &metrics(), 5).unwrap();

    let mut texts: Vec<&str> = result.items.iter().map(|i| i.text.as_str()).collect();
    texts.sort_unstable();
    assert_eq!(texts, ["harbor", "tide"]);
}

#[test]
fn max_items_scales_ignore_truncated_items() {
    let items = vec![
        Item::new("w0", "large", 100.0, 1.0),
        Item::new("w1", "small", 80.0, -1.0),
        Item::new("w2", "noise", 1.0, 0.0),
    ];
    let mut cfg = ChartConfig::radial();
    cfg.include_anchor = false;
    cfg.max_items = Some(2);
    let result = layout_chart(&items, &center_anchor(), &cfg, &metrics(), 5).unwrap();
    assert_eq!(result.items.len(), 2);

    let large = result.items.iter().find(|i| i.text == "large").unwrap();
    let small = result.items.iter().find(|i| i.text == "small").unwrap();
    // Shrink rounds scale both radii by the same factor, so the ratio pins
    // the frequency domain to the two surviving items.
    let expected = cfg.radius_range.0 / cfg.radius_range.1;
    assert!(
        (small.circles[0].r / large.circles[0].r - expected).abs() < 1e-9,
        "dropped item still stretched the radius domain"
    );
}

#[test]
fn opposed_horizontal_position_is_fixed_by_the_score() {
    let items = opposed_items();
    let cfg = ChartConfig::opposed();
    let anchor = edge_anchor();
    let scales = compute_scales(&items, &anchor, &cfg);
    let result = layout_chart(&items, &anchor, &cfg, &metrics(), 21).unwrap();
    assert!(!result.failed);

    for placed in &result.items {
        assert!((placed.x - scales.position.scale(placed.score)).abs() < 1e-9);
        assert!(placed.x.abs() < cfg.half_width());
        assert!(placed.y >= 0.0 && placed.y <= cfg.inner_height());
    }
}

#[test]
fn opposed_readings_get_tangent_circles_on_either_side() {
    let items = opposed_items();
    let result = layout_chart(&items, &edge_anchor(), &ChartConfig::opposed(), &metrics(), 21)
        .unwrap();
    assert_no_overlaps(&result);

    for placed in &result.items {
        assert_eq!(placed.circles.len(), 2);
        let (right, left) = (&placed.circles[0], &placed.circles[1]);
        assert!((right.x - (placed.x + right.r)).abs() < 1e-9);
        assert!((left.x - (placed.x - left.r)).abs() < 1e-9);
        assert_eq!(right.y, placed.y);
        assert_eq!(left.y, placed.y);
    }
}

#[test]
fn opposed_anchors_sit_in_their_side_panels() {
    let cfg = ChartConfig::opposed();
    let result =
        layout_chart(&opposed_items(), &edge_anchor(), &cfg, &metrics(), 2).unwrap();
    assert_eq!(result.anchors.len(), 2);

    let expected_x = cfg.half_width() + cfg.anchor_panel_width / 2.0;
    assert!((result.anchors[0].position.x + expected_x).abs() < 1e-9);
    assert!((result.anchors[1].position.x - expected_x).abs() < 1e-9);
    assert_eq!(result.anchors[0].text, "hot");
    assert_eq!(result.anchors[1].text, "cold");
}

#[test]
fn sort_by_score_orders_the_output_items() {
    let mut result = layout_chart(
        &radial_items(),
        &center_anchor(),
        &ChartConfig::radial(),
        &metrics(),
        13,
    )
    .unwrap();
    result.sort_by_score();
    for pair in result.items.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
}

#[test]
fn non_finite_input_is_rejected() {
    let items = vec![Item::new("w0", "bad", f64::NAN, 1.0)];
    let err = layout_chart(&items, &center_anchor(), &ChartConfig::radial(), &metrics(), 1)
        .unwrap_err();
    assert!(matches!(err, Error::NonFinite { .. }));
}

#[test]
fn negative_frequency_is_rejected() {
    let items = vec![Item::new("w0", "bad", -3.0, 1.0)];
    let err = layout_chart(&items, &center_anchor(), &ChartConfig::radial(), &metrics(), 1)
        .unwrap_err();
    assert!(matches!(err, Error::NegativeFrequency { .. }));
}

#[test]
fn non_finite_anchor_frequency_is_rejected() {
    let anchor = Anchor::Center(AnchorWord::new("sea", f64::NAN));
    let err = layout_chart(&radial_items(), &anchor, &ChartConfig::radial(), &metrics(), 1)
        .unwrap_err();
    assert!(matches!(err, Error::NonFinite { .. }));
}

#[test]
fn negative_anchor_frequency_is_rejected() {
    let anchor = Anchor::Edges(AnchorWord::new("hot", 10.0), AnchorWord::new("cold", -1.0));
    let err = layout_chart(&opposed_items(), &anchor, &ChartConfig::opposed(), &metrics(), 1)
        .unwrap_err();
    assert!(matches!(err, Error::NegativeFrequency { .. }));
}

#[test]
fn opposed_items_without_readings_are_rejected() {
    let items = vec![Item::new("w0", "bare", 10.0, 1.0)];
    let err = layout_chart(&items, &edge_anchor(), &ChartConfig::opposed(), &metrics(), 1)
        .unwrap_err();
    assert!(matches!(err, Error::MissingReadings { .. }));
}

#[test]
fn empty_input_yields_an_empty_successful_layout() {
    let result = layout_chart(&[], &center_anchor(), &ChartConfig::radial(), &metrics(), 1)
        .unwrap();
    assert!(!result.failed);
    assert!(result.items.is_empty());
    assert_eq!(result.anchors.len(), 1);
}
