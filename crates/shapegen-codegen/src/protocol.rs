//! Protocol generators and the protocol test hook

use crate::context::GenerationContext;
use crate::writer::PythonWriter;
use once_cell::sync::Lazy;
use shapegen_core::{GenerationError, GenerationResult, ShapeId};

/// File the protocol compliance tests are written to
pub const PROTOCOL_TEST_FILE: &str = "./tests/test_protocol.py";

/// Module name the protocol tests are importable as
pub const PROTOCOL_TEST_MODULE: &str = "tests.test_protocol";

#[allow(clippy::expect_used)] // Safe: constant, well-formed shape id
static REST_JSON_1: Lazy<ShapeId> =
    Lazy::new(|| ShapeId::new("aws.protocols", "restJson1").expect("valid protocol id"));

/// The external compliance-test generator.
pub trait ProtocolTestGenerator: Send + Sync {
    fn run(
        &self,
        ctx: &GenerationContext,
        protocol: &ShapeId,
        writer: &mut PythonWriter,
    ) -> GenerationResult<()>;
}

/// Generation support for one wire protocol.
pub trait ProtocolGenerator: Send + Sync {
    /// Id of the protocol trait this generator handles
    fn protocol(&self) -> ShapeId;

    fn generate_protocol_tests(&self, ctx: &GenerationContext) -> GenerationResult<()>;
}

/// `aws.protocols#restJson1`
///
/// Protocol-agnostic for now: test generation is handed straight to `G`.
#[derive(Debug, Clone, Default)]
pub struct RestJsonProtocolGenerator<G> {
    tests: G,
}

impl<G> RestJsonProtocolGenerator<G> {
    pub fn new(tests: G) -> Self {
        Self { tests }
    }

    pub fn protocol_id() -> &'static ShapeId {
        &REST_JSON_1
    }
}

impl<G: ProtocolTestGenerator> ProtocolGenerator for RestJsonProtocolGenerator<G> {
    fn protocol(&self) -> ShapeId {
        REST_JSON_1.clone()
    }

    fn generate_protocol_tests(&self, ctx: &GenerationContext) -> GenerationResult<()> {
        let protocol = self.protocol();
        tracing::info!(
            protocol = %protocol,
            file = PROTOCOL_TEST_FILE,
            "generating protocol tests"
        );
        ctx.writer_delegator().use_file_writer(
            PROTOCOL_TEST_FILE,
            PROTOCOL_TEST_MODULE,
            &mut |writer| self.tests.run(ctx, &protocol, writer),
        )
    }
}

/// First generator whose protocol trait is applied to the service.
pub fn resolve_protocol_generator<'a>(
    ctx: &GenerationContext,
    generators: &'a [Box<dyn ProtocolGenerator>],
) -> GenerationResult<&'a dyn ProtocolGenerator> {
    let service = ctx.service();
    generators
        .iter()
        .find(|generator| service.has_trait(&generator.protocol().to_string()))
        .map(|generator| generator.as_ref())
        .ok_or_else(|| GenerationError::UnsupportedProtocol {
            service: service.id().clone(),
        })
}
