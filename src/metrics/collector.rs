//! Metrics collection and registry.

use crate::analysis::Measurement;
use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of converter accounting for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Total conversions performed.
    pub conversions: u64,
    /// Entropy consumed in bits, net of what is still buffered.
    pub input_bits: f64,
    /// Entropy delivered in bits.
    pub output_bits: f64,
    /// Entropy currently buffered in the converter.
    pub buffered_bits: f64,
    /// Theoretical bound on the loss, in bits.
    pub bound_bits: f64,
}

impl MetricsSnapshot {
    /// Accumulates a measurement into this snapshot.
    pub fn record(&mut self, measurement: &Measurement) {
        self.conversions += measurement.trials;
        self.input_bits += measurement.input_bits;
        self.output_bits += measurement.output_bits;
        self.bound_bits += measurement.bound_bits;
        self.buffered_bits = measurement.buffered_bits;
    }

    /// Entropy lost in bits.
    pub fn loss_bits(&self) -> f64 {
        self.input_bits - self.output_bits
    }
}

impl From<&Measurement> for MetricsSnapshot {
    fn from(measurement: &Measurement) -> Self {
        let mut snapshot = Self::default();
        snapshot.record(measurement);
        snapshot
    }
}

/// Prometheus metrics registry for entropy accounting.
pub struct MetricsRegistry {
    registry: Registry,

    conversions_total: IntCounter,
    input_bits: Gauge,
    output_bits: Gauge,
    loss_bits: Gauge,
    bound_bits: Gauge,
    buffered_bits: Gauge,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all converter metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let conversions_total = IntCounter::new(
            "entropy_converter_conversions_total",
            "Total number of conversions performed",
        )?;
        let input_bits = Gauge::new(
            "entropy_converter_input_bits",
            "Entropy consumed from the generator, net of buffered entropy",
        )?;
        let output_bits = Gauge::new(
            "entropy_converter_output_bits",
            "Entropy delivered in converted values",
        )?;
        let loss_bits = Gauge::new(
            "entropy_converter_loss_bits",
            "Entropy discarded by conversion",
        )?;
        let bound_bits = Gauge::new(
            "entropy_converter_loss_bound_bits",
            "Upper bound on the expected entropy discarded",
        )?;
        let buffered_bits = Gauge::new(
            "entropy_converter_buffered_bits",
            "Entropy currently held by the converter",
        )?;

        registry.register(Box::new(conversions_total.clone()))?;
        registry.register(Box::new(input_bits.clone()))?;
        registry.register(Box::new(output_bits.clone()))?;
        registry.register(Box::new(loss_bits.clone()))?;
        registry.register(Box::new(bound_bits.clone()))?;
        registry.register(Box::new(buffered_bits.clone()))?;

        Ok(Self {
            registry,
            conversions_total,
            input_bits,
            output_bits,
            loss_bits,
            bound_bits,
            buffered_bits,
        })
    }

    /// Updates all metrics from a snapshot.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        // Counters only move forward; add the difference.
        let current = self.conversions_total.get();
        if snapshot.conversions > current {
            self.conversions_total.inc_by(snapshot.conversions - current);
        }

        self.input_bits.set(snapshot.input_bits);
        self.output_bits.set(snapshot.output_bits);
        self.loss_bits.set(snapshot.loss_bits());
        self.bound_bits.set(snapshot.bound_bits);
        self.buffered_bits.set(snapshot.buffered_bits);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
