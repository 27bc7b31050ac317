use rstest::rstest;
use warcalc::chart::bars::{
    display_max, show_label, significant_range, to_bars, BarChart, MAX_VISIBLE_BARS,
    SIGNIFICANCE_THRESHOLD,
};
use warcalc::chart::summary::stat_tiles;
use warcalc::chart::DistributionView;
use warcalc::protocol::{CalcResult, Quantity};

#[test]
fn test_empty_and_all_zero_yield_no_bars() {
    assert!(to_bars(&[]).is_empty());
    assert!(to_bars(&[0.0; 12]).is_empty());
    assert!(significant_range(&[0.0, 0.0]).is_none());
}

#[test]
fn test_short_distribution_one_bar_per_outcome() {
    let p = [0.1, 0.2, 0.4, 0.2, 0.1];
    let bars = to_bars(&p);
    assert_eq!(bars.len(), 5);
    assert_eq!(bars[2].label, "2");
    assert_eq!(bars[2].value, 0.4);
    let sum: f64 = bars.iter().map(|b| b.value).sum();
    assert!((sum - 1.0).abs() < 1e-12);
}

#[test]
fn test_long_distribution_is_bucketed_by_sum() {
    // 45 significant outcomes starting at index 5
    let mut p = vec![0.0; 5];
    p.extend(std::iter::repeat(1.0 / 45.0).take(45));
    p.extend([0.0; 3]);

    let chart = BarChart::from_distribution(&p);
    assert_eq!(chart.bucket_size, 2);
    assert_eq!(chart.bars.len(), 23);
    assert_eq!(chart.bars[0].label, "5");
    assert_eq!(chart.bars[1].label, "7");
    assert!((chart.bars[0].value - 2.0 / 45.0).abs() < 1e-12);
    assert!((chart.bars[22].value - 1.0 / 45.0).abs() < 1e-12);
    assert!(chart.bars.len() <= MAX_VISIBLE_BARS);
}

#[test]
fn test_exactly_thirty_is_not_bucketed() {
    let p = vec![1.0 / 30.0; 30];
    let chart = BarChart::from_distribution(&p);
    assert_eq!(chart.bucket_size, 1);
    assert_eq!(chart.bars.len(), 30);
}

#[test]
fn test_display_max_floor() {
    assert_eq!(display_max(&[]), SIGNIFICANCE_THRESHOLD);
    let bars = to_bars(&[0.3, 0.7]);
    assert_eq!(display_max(&bars), 0.7);
}

#[rstest]
#[case(0, 10, true)]
#[case(7, 15, true)]
#[case(5, 16, true)]
#[case(6, 16, false)]
#[case(25, 30, true)]
#[case(26, 30, false)]
#[case(20, 31, true)]
#[case(15, 31, false)]
fn test_label_visibility(#[case] index: usize, #[case] total: usize, #[case] visible: bool) {
    assert_eq!(show_label(index, total), visible);
}

fn sample_result() -> CalcResult {
    CalcResult {
        probabilities: vec![0.1, 0.2, 0.4, 0.2, 0.1],
        avg_value: 2.0,
        prob_at_least_avg: 70.0,
        range80: "1 - 3".into(),
        range_top5: "4 - 4".into(),
        wound_probabilities: Some(vec![0.5, 0.5]),
        wound_avg_value: Some(0.5),
        wound_range80: Some("0 - 1".into()),
        ..Default::default()
    }
}

#[test]
fn test_hit_tiles() {
    let tiles = stat_tiles(&sample_result(), Quantity::Hits);
    assert_eq!(tiles.len(), 4);

    assert_eq!(tiles[0].label, "Avg Hits");
    assert_eq!(tiles[0].value, "2");
    assert_eq!(tiles[0].sub, "40% Probability");
    assert_eq!(tiles[1].label, "Prob ≥ Avg");
    assert_eq!(tiles[1].value, "70%");
    assert_eq!(tiles[1].sub, "Success");
    assert_eq!(tiles[2].value, "1 - 3");
    assert_eq!(tiles[2].sub, "Reliability");
    assert!(tiles[2].long_value);
    assert_eq!(tiles[3].label, "Top 5%");
    assert_eq!(tiles[3].sub, "Lucky Roll");
}

#[test]
fn test_wound_tiles_fall_back_to_hits() {
    let tiles = stat_tiles(&sample_result(), Quantity::Wounds);
    assert_eq!(tiles[0].label, "Avg Wounds");
    assert_eq!(tiles[1].value, "70%");
    assert_eq!(tiles[2].value, "0 - 1");
    assert_eq!(tiles[3].value, "4 - 4");
}

#[test]
fn test_avg_index_clamped_to_distribution() {
    let result = CalcResult {
        probabilities: vec![0.5, 0.5],
        avg_value: 9.0,
        ..Default::default()
    };
    let tiles = stat_tiles(&result, Quantity::Hits);
    assert_eq!(tiles[0].sub, "50% Probability");
    assert_eq!(tiles[2].value, "0 - 0");
    assert!(tiles[2].long_value);
}

#[test]
fn test_missing_damage_has_no_tiles() {
    assert!(stat_tiles(&sample_result(), Quantity::Damage).is_empty());
    let view = DistributionView::new(&sample_result(), Quantity::Damage);
    assert!(view.bars.is_empty());
    assert!(view.summary.is_none());
}

#[test]
fn test_small_negative_mean_renders_as_zero() {
    let result = CalcResult {
        probabilities: vec![0.9, 0.1],
        avg_value: -0.4,
        prob_at_least_avg: -0.2,
        ..Default::default()
    };
    let tiles = stat_tiles(&result, Quantity::Hits);
    assert_eq!(tiles[0].value, "0");
    assert_eq!(tiles[0].sub, "90% Probability");
    assert_eq!(tiles[1].value, "0%");
}
