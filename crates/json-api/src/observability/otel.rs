//! OpenTelemetry tracer provider setup.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

/// Groups the API with the rest of the storefront's services in trace backends.
const SERVICE_NAMESPACE: &str = "greengrocer";

pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            config.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", SERVICE_NAMESPACE),
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

/// Follow the caller's sampling decision, otherwise sample by ratio.
fn sampler(ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio.clamp(0.0, 1.0))))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use opentelemetry::{Key, Value};
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        observability: ObservabilityConfig,
    }

    #[test]
    fn resource_names_the_storefront_api() -> TestResult {
        let cli = Cli::try_parse_from([
            "greengrocer-json",
            "--otel-service-name",
            "greengrocer-json",
            "--otel-deployment-environment",
            "staging",
        ])?;

        let resource = resource(&cli.observability);

        assert_eq!(
            resource.get(&Key::new("service.name")),
            Some(Value::from("greengrocer-json"))
        );
        assert_eq!(
            resource.get(&Key::new("service.namespace")),
            Some(Value::from(SERVICE_NAMESPACE))
        );
        assert_eq!(
            resource.get(&Key::new("deployment.environment.name")),
            Some(Value::from("staging"))
        );

        Ok(())
    }

    #[test]
    fn sample_ratio_is_clamped() {
        match sampler(4.0) {
            Sampler::ParentBased(root) => assert!(
                matches!(*root, Sampler::TraceIdRatioBased(ratio) if (ratio - 1.0).abs() < f64::EPSILON),
                "expected ratio 1.0, got {root:?}"
            ),
            other => panic!("expected a parent-based sampler, got {other:?}"),
        }
    }
}
