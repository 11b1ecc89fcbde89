use chrono::NaiveDate;
use eflow_iari::{
    IariClass, IariConfig, IariError, bands_from_matrix, compute_iari, deviation,
    score_against_bands,
};
use eflow_iha::{
    Conventions, FlowSeries, IhaConfig, N_PARAMS, Param, ParameterMatrix, QuantileMethod, compute_iha, pulse_thresholds_from_record,
};
use ndarray::Array2;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seasonal(years: i32, scale: f64) -> FlowSeries {
    let n = (ymd(2001 + years, 1, 1) - ymd(2001, 1, 1)).num_days() as usize;
    let flows = (0..n)
        .map(|i| {
            let t = i as f64;
            // Year-to-year variation so the natural bands have width.
            let wobble = 1.0 + 0.2 * (t / 365.25 * 2.3).sin();
            scale * wobble * (20.0 + 8.0 * (t * std::f64::consts::TAU / 365.25).sin())
        })
        .collect();
    FlowSeries::from_start(ymd(2001, 1, 1), flows).unwrap()
}

fn extract_pair(natural: &FlowSeries, impacted: &FlowSeries) -> (ParameterMatrix, ParameterMatrix) {
    let config = IhaConfig::default();
    let t = pulse_thresholds_from_record(natural, config.conventions().quantile_method).unwrap();
    let config = config.with_pulse_thresholds(t);
    (
        compute_iha(natural, &config).unwrap(),
        compute_iha(impacted, &config).unwrap(),
    )
}

#[test]
fn natural_against_itself_scores_only_tail_years() {
    let s = seasonal(8, 1.0);
    let (nat, imp) = extract_pair(&s, &s);
    let r = compute_iari(&nat, &imp, &IariConfig::default()).unwrap();
    assert_eq!(r.per_year().len(), 8);
    assert_eq!(r.years(), nat.years());
    // Values between their own quartiles score nothing.
    let bands = r.bands();
    for (row, year) in nat.values().outer_iter().zip(r.years()) {
        let devs = r.year_row(*year).unwrap();
        for p in Param::ALL {
            let v = row[p.index()];
            if v >= bands.q25()[p.index()] && v <= bands.q75()[p.index()] {
                assert_eq!(devs[p.index()], 0.0);
            }
        }
    }

    let halved = seasonal(8, 0.5);
    let (_, imp_halved) = extract_pair(&s, &halved);
    let altered = compute_iari(&nat, &imp_halved, &IariConfig::default()).unwrap();
    assert!(r.overall() < altered.overall());
}

#[test]
fn halved_flows_score_poor() {
    let natural = seasonal(8, 1.0);
    let impacted = seasonal(8, 0.5);
    let (nat, imp) = extract_pair(&natural, &impacted);
    let r = compute_iari(&nat, &imp, &IariConfig::default()).unwrap();
    assert_eq!(r.class(), IariClass::Poor);
    assert!(r.overall() > 0.15);
    assert!(r.per_year().iter().all(|&v| v >= 0.0));
    // Monthly means fall well below every natural band.
    assert!(r.param_deviation(Param::Jan).iter().all(|&d| d > 0.0));
    assert!(r.summary().contains("(Poor)"));
}

#[test]
fn deviation_matrix_shape_and_year_lookup() {
    let natural = seasonal(5, 1.0);
    let impacted = seasonal(5, 0.8);
    let (nat, imp) = extract_pair(&natural, &impacted);
    let r = compute_iari(&nat, &imp, &IariConfig::default()).unwrap();
    assert_eq!(r.deviations().dim(), (5, N_PARAMS));
    let row = r.year_row(2003).unwrap();
    let mean: f64 = row.iter().sum::<f64>() / N_PARAMS as f64;
    assert!((mean - r.per_year()[2]).abs() < 1e-12);
    assert!(r.year_row(1999).is_none());
}

#[test]
fn inside_band_is_exactly_zero() {
    for (q25, q75) in [(1.0, 3.0), (0.0, 0.5), (10.0, 1e6)] {
        for v in [q25, (q25 + q75) / 2.0, q75] {
            assert_eq!(deviation(v, q25, q75), 0.0);
        }
    }
}

#[test]
fn degenerate_band_is_zero_or_one() {
    let v = 4.2;
    assert_eq!(deviation(v, v, v), 0.0);
    for other in [0.0, 4.19, 4.21, 100.0] {
        assert_eq!(deviation(other, v, v), 1.0);
    }
}

#[test]
fn bands_from_matrix_without_thresholds_fails() {
    let m = ParameterMatrix::new(
        Array2::from_elem((3, N_PARAMS), 1.0),
        vec![2001, 2002, 2003],
        0.001,
        None,
        Conventions::default(),
    )
    .unwrap();
    assert_eq!(
        bands_from_matrix(&m).unwrap_err(),
        IariError::MissingPulseThresholds
    );
    assert_eq!(
        compute_iari(&m, &m, &IariConfig::default()).unwrap_err(),
        IariError::MissingPulseThresholds
    );
}

#[test]
fn impacted_with_own_thresholds_is_rejected() {
    let natural = seasonal(4, 1.0);
    let impacted = seasonal(4, 0.5);
    let (nat, _) = extract_pair(&natural, &impacted);
    let own = compute_iha(&impacted, &IhaConfig::default()).unwrap();
    assert!(matches!(
        compute_iari(&nat, &own, &IariConfig::default()),
        Err(IariError::PulseThresholdMismatch { .. })
    ));
}

#[test]
fn mixed_quantile_methods_are_rejected() {
    let natural = seasonal(4, 1.0);
    let t = pulse_thresholds_from_record(&natural, QuantileMethod::Type7).unwrap();
    let nat = compute_iha(&natural, &IhaConfig::default().with_pulse_thresholds(t)).unwrap();
    let imp = compute_iha(
        &natural,
        &IhaConfig::default()
            .with_pulse_thresholds(t)
            .with_quantile_method(QuantileMethod::Type6),
    )
    .unwrap();
    assert!(matches!(
        compute_iari(&nat, &imp, &IariConfig::default()),
        Err(IariError::ConventionMismatch { .. })
    ));
}

#[test]
fn mixed_zero_flow_thresholds_are_rejected() {
    let natural = seasonal(3, 1.0);
    let t = pulse_thresholds_from_record(&natural, QuantileMethod::Type7).unwrap();
    let config = IhaConfig::default().with_pulse_thresholds(t);
    let nat = compute_iha(&natural, &config).unwrap();
    let imp = compute_iha(&natural, &config.clone().with_zero_flow_threshold(20.0)).unwrap();
    assert!(imp.param(Param::ZeroFlowDays).iter().any(|&d| d > 0.0));

    match compute_iari(&nat, &imp, &IariConfig::default()) {
        Err(IariError::ZeroFlowThresholdMismatch { natural, impacted }) => {
            assert_eq!(natural, 0.001);
            assert_eq!(impacted, 20.0);
        }
        other => panic!("expected ZeroFlowThresholdMismatch, got {other:?}"),
    }
    let bands = bands_from_matrix(&nat).unwrap();
    assert!(matches!(
        score_against_bands(&imp, &bands),
        Err(IariError::ZeroFlowThresholdMismatch { .. })
    ));
}

#[test]
fn insufficient_years_reported() {
    let s = seasonal(2, 1.0);
    let (nat, imp) = extract_pair(&s, &s);
    assert_eq!(
        compute_iari(&nat, &imp, &IariConfig::default().with_min_years(3)).unwrap_err(),
        IariError::InsufficientYears {
            series: "natural",
            n_years: 2,
            min_years: 3
        }
    );
}

#[test]
fn score_against_bands_matches_full_result() {
    let natural = seasonal(6, 1.0);
    let impacted = seasonal(6, 0.7);
    let (nat, imp) = extract_pair(&natural, &impacted);
    let bands = bands_from_matrix(&nat).unwrap();
    let quick = score_against_bands(&imp, &bands).unwrap();
    let full = compute_iari(&nat, &imp, &IariConfig::default()).unwrap();
    assert_eq!(quick, full.overall());
}
