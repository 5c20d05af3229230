//! Sample-to-protobuf conversion for text exposition.
//!
//! Metric names here are produced per scrape from monitor titles, so
//! families cannot be pre-registered; each scrape builds its
//! `MetricFamily` values directly. Samples sharing a name fold into one
//! family, first-seen order preserved.

use std::collections::HashMap;

use prometheus::proto::{LabelPair, Metric, MetricFamily, MetricType};

use crate::domain::Sample;

/// Group samples by name into untyped metric families (help = name).
pub fn to_metric_families(samples: &[Sample]) -> Vec<MetricFamily> {
    let mut families: Vec<MetricFamily> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for sample in samples {
        let idx = *index_by_name.entry(sample.name.clone()).or_insert_with(|| {
            let mut family = MetricFamily::default();
            family.set_name(sample.name.clone());
            family.set_help(sample.name.clone());
            family.set_field_type(MetricType::UNTYPED);
            families.push(family);
            families.len() - 1
        });

        let mut metric = Metric::default();
        for (name, value) in &sample.labels {
            let mut pair = LabelPair::default();
            pair.set_name(name.clone());
            pair.set_value(value.clone());
            metric.mut_label().push(pair);
        }
        let mut untyped = prometheus::proto::Untyped::default();
        untyped.set_value(sample.value);
        metric.set_untyped(untyped);
        families[idx].mut_metric().push(metric);
    }

    families
}
