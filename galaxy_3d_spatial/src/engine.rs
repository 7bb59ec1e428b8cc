/// Galaxy3D Engine - Singleton manager for engine subsystems
///
/// This module provides global singleton management for the spatial index and
/// the logger. It uses thread-safe static storage with RwLock for safe
/// concurrent access.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::bounds::BoundingRegion;
use crate::octree::OctreeConfig;
use crate::scene::SpatialIndex;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Spatial index singleton (wrapped in Mutex for thread-safe mutable access)
    spatial_index: RwLock<Option<Arc<Mutex<SpatialIndex>>>>,
}

impl EngineState {
    /// Create a new empty engine state
    fn new() -> Self {
        Self {
            spatial_index: RwLock::new(None),
        }
    }
}

/// Logger storage, created with a DefaultLogger on first use
fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the lifecycle of the engine subsystems (spatial index, logger)
/// using a singleton pattern with thread-safe access.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_spatial::galaxy3d::{Engine, bounds::BoundingRegion, octree::OctreeConfig};
/// use galaxy_3d_spatial::glam::Vec3;
///
/// // Initialize engine
/// Engine::initialize()?;
///
/// // Create the spatial index singleton
/// let world = BoundingRegion::aabb(Vec3::splat(-100.0), Vec3::splat(100.0))?;
/// Engine::create_spatial_index(world, OctreeConfig::default())?;
///
/// // Access it globally, once per frame
/// let index = Engine::spatial_index()?;
/// index.lock().unwrap().step();
///
/// // Cleanup
/// Engine::shutdown();
/// # Ok::<(), galaxy_3d_spatial::galaxy3d::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    ///
    /// This ensures all Engine errors are automatically logged with proper severity
    /// and source information.
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("galaxy3d::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::engine_error!("galaxy3d::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::engine_error!("galaxy3d::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    /// Initialize the engine
    ///
    /// This must be called once at application startup before creating any subsystems.
    ///
    /// # Errors
    ///
    /// Currently always succeeds, but returns Result for future extensibility.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the entire engine and destroy all singletons
    ///
    /// The octree is torn down before the spatial index is dropped. After
    /// calling this, subsystems must be created again.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut lock) = state.spatial_index.write() {
                if let Some(index) = lock.take() {
                    if let Ok(mut index) = index.lock() {
                        index.destroy();
                    }
                }
            }
        }
    }

    /// Lookup the engine state, failing if `initialize()` was never called
    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))
    }

    // ===== SPATIAL INDEX API =====

    /// Create and register the spatial index singleton
    ///
    /// # Arguments
    ///
    /// * `world_region` - AABB covering the whole simulated world
    /// * `config` - Octree tuning (minimum node size, lifespans)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A spatial index already exists
    /// - The world region or config is rejected by the octree
    /// - The spatial index lock is poisoned
    pub fn create_spatial_index(world_region: BoundingRegion, config: OctreeConfig) -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.spatial_index.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SpatialIndex lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("SpatialIndex already exists. Call Engine::destroy_spatial_index() first.".to_string())
            ));
        }

        *lock = Some(Arc::new(Mutex::new(SpatialIndex::with_config(world_region, config)?)));

        crate::engine_info!("galaxy3d::Engine", "SpatialIndex singleton created successfully");

        Ok(())
    }

    /// Get the spatial index singleton
    ///
    /// # Returns
    ///
    /// A shared pointer to the SpatialIndex wrapped in a Mutex for thread-safe access
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The spatial index has not been created
    pub fn spatial_index() -> Result<Arc<Mutex<SpatialIndex>>> {
        let state = Self::state()?;

        let lock = state.spatial_index.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SpatialIndex lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("SpatialIndex not created. Call Engine::create_spatial_index() first.".to_string())
            ))
    }

    /// Destroy the spatial index singleton
    ///
    /// Tears down the octree and removes the singleton, allowing a new one to
    /// be created. Existing references stay valid (with an empty octree) until
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_spatial_index() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.spatial_index.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SpatialIndex lock poisoned".to_string())
            ))?;

        if let Some(index) = lock.take() {
            let mut index = index.lock()
                .map_err(|_| Self::log_and_return_error(
                    Error::BackendError("SpatialIndex mutex poisoned".to_string())
                ))?;
            index.destroy();
        }

        crate::engine_info!("galaxy3d::Engine", "SpatialIndex singleton destroyed");

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut index) = state.spatial_index.write() {
                *index = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger, test buffer, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use galaxy_3d_spatial::galaxy3d::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "galaxy3d::Octree")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
