//! Per-run generation state

use crate::symbol_visitor::SymbolVisitor;
use crate::writer::WriterDelegator;
use shapegen_core::{GenerationResult, Model, ServiceShape, Settings, Shape};
use shapegen_logging::ObserverRegistry;
use std::sync::Arc;

/// Everything one generation run shares: the model, settings, the service
/// being generated, the symbol provider and the writer delegator.
///
/// Symbols produced through the context embed the module name captured
/// here, so they must not be reused with a different context.
pub struct GenerationContext {
    model: Arc<Model>,
    settings: Settings,
    service: Shape,
    symbol_provider: SymbolVisitor,
    writer_delegator: Arc<dyn WriterDelegator>,
    observers: Arc<ObserverRegistry>,
}

impl GenerationContext {
    /// Create a context whose resolutions are logged through `tracing`.
    pub fn new(
        model: impl Into<Arc<Model>>,
        settings: Settings,
        writer_delegator: Arc<dyn WriterDelegator>,
    ) -> GenerationResult<Self> {
        Self::with_observers(
            model,
            settings,
            writer_delegator,
            Arc::new(ObserverRegistry::with_tracing()),
        )
    }

    /// Create a context that reports resolutions to `observers`.
    pub fn with_observers(
        model: impl Into<Arc<Model>>,
        settings: Settings,
        writer_delegator: Arc<dyn WriterDelegator>,
        observers: Arc<ObserverRegistry>,
    ) -> GenerationResult<Self> {
        settings.validate()?;
        let model = model.into();
        let (service, _) = model.expect_service(&settings.service)?;
        let service = service.clone();
        let symbol_provider = SymbolVisitor::new(Arc::clone(&model), &settings, Arc::clone(&observers))?;

        tracing::info!(
            service = %settings.service,
            module = %settings.module_name,
            shapes = model.len(),
            "created generation context"
        );

        Ok(Self {
            model,
            settings,
            service,
            symbol_provider,
            writer_delegator,
            observers,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The service shape being generated for
    pub fn service(&self) -> &Shape {
        &self.service
    }

    pub fn service_shape(&self) -> Option<&ServiceShape> {
        self.service.as_service()
    }

    pub fn module_name(&self) -> &str {
        &self.settings.module_name
    }

    pub fn symbol_provider(&self) -> &SymbolVisitor {
        &self.symbol_provider
    }

    pub fn writer_delegator(&self) -> &dyn WriterDelegator {
        self.writer_delegator.as_ref()
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }
}

impl std::fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("service", self.service.id())
            .field("module_name", &self.settings.module_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::writer::InMemoryWriterDelegator;
    use shapegen_core::{GenerationError, ShapeId};

    fn settings(module: &str) -> Settings {
        Settings::new("example.weather#Weather".parse().unwrap(), module)
    }

    fn model() -> Model {
        Model::builder()
            .service("example.weather#Weather", "2006-03-01", &[])
            .build()
            .unwrap()
    }

    #[test]
    fn GenerationContext___new___exposes_run_state() {
        let ctx = GenerationContext::new(
            model(),
            settings("weather"),
            Arc::new(InMemoryWriterDelegator::new()),
        )
        .unwrap();

        assert_eq!(ctx.module_name(), "weather");
        assert_eq!(ctx.service().id().to_string(), "example.weather#Weather");
        assert_eq!(ctx.service_shape().map(|s| s.version.as_str()), Some("2006-03-01"));
        assert_eq!(ctx.observers().len(), 1);
    }

    #[test]
    fn GenerationContext___new___rejects_invalid_module_name() {
        let err = GenerationContext::new(
            model(),
            settings("weather-client"),
            Arc::new(InMemoryWriterDelegator::new()),
        )
        .unwrap_err();

        assert!(matches!(err, GenerationError::ConfigError(_)));
    }

    #[test]
    fn GenerationContext___new___reports_missing_service() {
        let mut settings = settings("weather");
        settings.service = ShapeId::new("example.weather", "Other").unwrap();

        let err = GenerationContext::new(model(), settings, Arc::new(InMemoryWriterDelegator::new()))
            .unwrap_err();

        assert!(matches!(err, GenerationError::MissingService(_)));
    }

    #[test]
    fn GenerationContext___symbol_provider___uses_module_name() {
        let ctx = GenerationContext::with_observers(
            model(),
            settings("forecast"),
            Arc::new(InMemoryWriterDelegator::new()),
            Arc::new(ObserverRegistry::new()),
        )
        .unwrap();

        let symbol = ctx.symbol_provider().symbol_for(ctx.service().id()).unwrap();

        assert_eq!(symbol.namespace(), Some("forecast.client"));
    }
}
