//! Resolution observers

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use shapegen_core::{LogLevel, ShapeId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Tracing target used for per-shape resolution records
pub const SYMBOLS_TARGET: &str = "shapegen::symbols";

/// One completed shape-to-symbol resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEvent {
    pub shape: ShapeId,
    pub name: String,
    pub namespace: String,
    /// Empty for symbols that are never written to a file
    pub definition_file: String,
}

/// Hook notified after each shape is resolved
///
/// Observers are called from whichever thread performed the resolution, so
/// implementations must be thread-safe.
pub trait ResolutionObserver: Send + Sync {
    fn on_resolved(&self, event: &ResolutionEvent);
}

/// Forwards resolution events to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn on_resolved(&self, event: &ResolutionEvent) {
        tracing::debug!(
            target: SYMBOLS_TARGET,
            shape = %event.shape,
            namespace = %event.namespace,
            definition_file = %event.definition_file,
            "Creating symbol from {}: {}",
            event.shape,
            event.name
        );
    }
}

/// Keeps every event it sees, in arrival order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ResolutionEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<ResolutionEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ResolutionObserver for RecordingObserver {
    fn on_resolved(&self, event: &ResolutionEvent) {
        self.events.lock().push(event.clone());
    }
}

static GLOBAL_REGISTRY: OnceCell<ObserverRegistry> = OnceCell::new();

/// Thread-safe set of observers with a minimum level
///
/// Resolution events are debug-level records; they are delivered only while
/// the registry level is `Debug` or lower.
pub struct ObserverRegistry {
    observers: RwLock<Vec<Arc<dyn ResolutionObserver>>>,
    level: AtomicU8,
}

impl ObserverRegistry {
    /// Create an empty registry that delivers every event
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
            level: AtomicU8::new(LogLevel::Trace as u8),
        }
    }

    /// Create a registry holding a [`TracingObserver`]
    pub fn with_tracing() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(TracingObserver));
        registry
    }

    /// Process-wide registry, initialised with a [`TracingObserver`]
    pub fn global() -> &'static ObserverRegistry {
        GLOBAL_REGISTRY.get_or_init(ObserverRegistry::with_tracing)
    }

    pub fn register(&self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.write().push(observer);
    }

    pub fn clear(&self) {
        self.observers.write().clear();
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Deliver `event` to every registered observer
    pub fn notify(&self, event: &ResolutionEvent) {
        if !self.is_enabled(LogLevel::Debug) {
            return;
        }
        // Clone the list so observers may register others without deadlocking.
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.on_resolved(event);
        }
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .field("level", &self.level())
            .finish()
    }
}
