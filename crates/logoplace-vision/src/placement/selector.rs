// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement selection — ranks all four corners with positional bias and
// applies the admission rules to the winner.

use image::DynamicImage;
use logoplace_core::{Corner, CornerBias, CornerMetrics, Placement, PlacementConfig, PlacementFailure};
use tracing::{debug, instrument};

use super::analyzer::CornerAnalyzer;

/// A corner's metrics together with its bias-adjusted score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCorner {
    pub metrics: CornerMetrics,
    pub score: f64,
}

/// Everything produced by one selection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Corners ordered best-first.
    pub ranked: Vec<RankedCorner>,
    pub outcome: Result<Placement, PlacementFailure>,
}

impl Selection {
    pub fn best(&self) -> Option<&RankedCorner> {
        self.ranked.first()
    }
}

/// Single-pass corner ranking and admission.
pub struct PlacementSelector<'a> {
    analyzer: CornerAnalyzer<'a>,
    config: &'a PlacementConfig,
}

impl<'a> PlacementSelector<'a> {
    pub fn new(analyzer: CornerAnalyzer<'a>, config: &'a PlacementConfig) -> Self {
        Self { analyzer, config }
    }

    /// Analyse every corner, rank them and admit or refuse the winner.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn select(&self, image: &DynamicImage, logo_width: u32, logo_height: u32) -> Selection {
        let metrics: Vec<CornerMetrics> = Corner::ALL
            .iter()
            .filter_map(|&corner| self.analyzer.analyze(image, corner, logo_width, logo_height))
            .collect();

        let ranked = rank(metrics, &self.config.corner_bias);
        let outcome = admit(
            ranked.first(),
            logo_width,
            logo_height,
            self.config.confidence_threshold,
        );
        if let Some(best) = ranked.first() {
            debug!(corner = %best.metrics.corner, score = best.score, admitted = outcome.is_ok(), "Best corner");
        }
        Selection { ranked, outcome }
    }
}

/// Apply the corner bias and order best-first.
///
/// The sort is stable, so equal scores keep evaluation order and the earliest
/// corner wins ties.
pub fn rank(metrics: Vec<CornerMetrics>, bias: &CornerBias) -> Vec<RankedCorner> {
    let mut ranked: Vec<RankedCorner> = metrics
        .into_iter()
        .map(|metrics| {
            let score = metrics.suitability * bias.for_corner(metrics.corner);
            RankedCorner { metrics, score }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Admission rules, checked in order on the winner only.
pub fn admit(
    best: Option<&RankedCorner>,
    logo_width: u32,
    logo_height: u32,
    confidence_threshold: f64,
) -> Result<Placement, PlacementFailure> {
    let best = best.ok_or(PlacementFailure::NoSuitableCorner)?;
    let m = &best.metrics;

    if !m.space_sufficient {
        return Err(PlacementFailure::InsufficientSpace {
            corner: m.corner,
            available_width: m.available_width,
            available_height: m.available_height,
            required_width: logo_width,
            required_height: logo_height,
        });
    }

    if best.score < confidence_threshold {
        return Err(PlacementFailure::LowConfidence {
            corner: m.corner,
            score: best.score,
        });
    }

    Ok(Placement {
        corner: m.corner,
        x: m.anchor_x,
        y: m.anchor_y,
        width: logo_width,
        height: logo_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::analyzer::measure_corner;
    use crate::placement::geometry::corner_region;

    fn metrics(corner: Corner, has_text: bool, edge_density: f64, logo: (u32, u32)) -> CornerMetrics {
        let config = PlacementConfig::default();
        let region = corner_region(800, 600, corner).bounds;
        measure_corner(corner, region, has_text, edge_density, logo.0, logo.1, &config)
    }

    fn all_clean() -> Vec<CornerMetrics> {
        Corner::ALL
            .iter()
            .map(|&c| metrics(c, false, 0.0, (100, 50)))
            .collect()
    }

    #[test]
    fn bias_orders_identical_corners() {
        let ranked = rank(all_clean(), &CornerBias::default());
        let order: Vec<Corner> = ranked.iter().map(|r| r.metrics.corner).collect();
        assert_eq!(
            order,
            [Corner::BottomRight, Corner::BottomLeft, Corner::TopRight, Corner::TopLeft]
        );
        let scores: Vec<f64> = ranked.iter().map(|r| r.score).collect();
        assert_eq!(scores, [1.25, 1.15, 1.05, 1.0]);
    }

    #[test]
    fn ties_go_to_evaluation_order() {
        let flat = CornerBias {
            top_left: 1.0,
            top_right: 1.0,
            bottom_left: 1.0,
            bottom_right: 1.0,
        };
        let ranked = rank(all_clean(), &flat);
        assert_eq!(ranked[0].metrics.corner, Corner::TopLeft);
        assert_eq!(ranked[3].metrics.corner, Corner::BottomRight);
    }

    #[test]
    fn no_corners_fails() {
        assert_eq!(admit(None, 100, 50, 0.3), Err(PlacementFailure::NoSuitableCorner));
    }

    #[test]
    fn insufficient_space_beats_any_score() {
        let mut m = metrics(Corner::BottomRight, false, 0.0, (1000, 500));
        m.suitability = 50.0;
        let best = RankedCorner {
            score: 62.5,
            metrics: m,
        };
        match admit(Some(&best), 1000, 500, 0.3) {
            Err(PlacementFailure::InsufficientSpace {
                corner,
                available_width,
                available_height,
                required_width,
                required_height,
            }) => {
                assert_eq!(corner, Corner::BottomRight);
                assert_eq!((available_width, available_height), (242, 175));
                assert_eq!((required_width, required_height), (1000, 500));
            }
            other => panic!("expected insufficient space, got {other:?}"),
        }
    }

    #[test]
    fn low_confidence_threshold() {
        let m = metrics(Corner::BottomRight, true, 0.25, (100, 50));
        let ranked = rank(vec![m], &CornerBias::default());
        match admit(ranked.first(), 100, 50, 0.3) {
            Err(PlacementFailure::LowConfidence { corner, score }) => {
                assert_eq!(corner, Corner::BottomRight);
                assert!((score - 0.3 * 0.75 * 1.25).abs() < 1e-9);
            }
            other => panic!("expected low confidence, got {other:?}"),
        }
    }

    #[test]
    fn text_everywhere_still_admitted_at_bottom_right() {
        let all_text: Vec<CornerMetrics> = Corner::ALL
            .iter()
            .map(|&c| metrics(c, true, 0.0, (100, 50)))
            .collect();
        let ranked = rank(all_text, &CornerBias::default());
        assert!((ranked[0].score - 0.375).abs() < 1e-9);
        let placement = admit(ranked.first(), 100, 50, 0.3).expect("admitted");
        assert_eq!(placement.corner, Corner::BottomRight);
        assert_eq!((placement.x, placement.y), (675, 525));
    }

    /// Collects `name=value` pairs from every span opened while installed.
    #[derive(Clone, Default)]
    struct SpanFields(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

    impl tracing::field::Visit for SpanFields {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if let Ok(mut fields) = self.0.lock() {
                fields.push(format!("{}={value:?}", field.name()));
            }
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanFields {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::span::Id,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            attrs.record(&mut self.clone());
        }
    }

    #[test]
    fn select_span_records_dimensions() {
        use tracing_subscriber::layer::SubscriberExt;

        let config = PlacementConfig::default();
        let text = crate::NoTextDetector;
        let edges = crate::CannyEdgeDetector::default();
        let selector = PlacementSelector::new(CornerAnalyzer::new(&config, &text, &edges), &config);
        let image = DynamicImage::new_rgb8(90, 60);

        let capture = SpanFields::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, || {
            selector.select(&image, 30, 20);
        });

        let fields = capture.0.lock().expect("lock").clone();
        for expected in ["width=90", "height=60", "logo_width=30", "logo_height=20"] {
            assert!(fields.iter().any(|f| f == expected), "{expected} missing from {fields:?}");
        }
    }
}
