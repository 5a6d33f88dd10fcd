//! High-level runtime orchestrator.
//!
//! The runtime owns the zone worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the zone.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use combat_core::{ActionOracle, CombatConfig, RngOracle, SpatialOracle, StaticCatalog, World};

use crate::api::{Result, RuntimeError, ZoneHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::workers::{Command, ZoneWorker};
use crate::zone::Zone;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Zone clock step per timer tick; zero disables the timer.
    pub tick_interval_ms: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Interrupt pending casts of actors that take damage.
    pub interrupt_on_damage: bool,
    /// Interrupt pending casts of actors that move during the cast bar.
    pub interrupt_on_movement: bool,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

    #[must_use]
    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Manual clock: the zone only advances on explicit `advance` calls.
    #[must_use]
    pub fn manual_clock(self) -> Self {
        self.with_tick_interval_ms(0)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            event_buffer_size: 100,
            command_buffer_size: 32,
            interrupt_on_damage: true,
            interrupt_on_movement: true,
        }
    }
}

/// Main runtime that hosts one zone
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`ZoneHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: ZoneHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to the zone
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> ZoneHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        // A worker that already stopped has nothing left to acknowledge.
        match self.handle.shutdown().await {
            Ok(())
            | Err(RuntimeError::CommandChannelClosed | RuntimeError::ReplyChannelClosed(_)) => {}
            Err(other) => return Err(other),
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: World,
    catalog: Option<Arc<dyn ActionOracle>>,
    spatial: Option<Arc<dyn SpatialOracle + Send + Sync>>,
    rng: Option<Arc<dyn RngOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: World::new(),
            catalog: None,
            spatial: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the initial actors
    pub fn world(mut self, world: World) -> Self {
        self.world = world;
        self
    }

    /// Set the required action catalog
    pub fn catalog(mut self, catalog: StaticCatalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Set the required action catalog from any oracle
    pub fn catalog_oracle(mut self, catalog: Arc<dyn ActionOracle>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replace the linear-scan spatial index
    pub fn spatial(mut self, spatial: Arc<dyn SpatialOracle + Send + Sync>) -> Self {
        self.spatial = Some(spatial);
        self
    }

    /// Replace the deterministic rng
    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Build the runtime and spawn its zone worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let mut oracles = OracleManager::new(catalog);
        if let Some(spatial) = self.spatial {
            oracles = oracles.with_spatial(spatial);
        }
        if let Some(rng) = self.rng {
            oracles = oracles.with_rng(rng);
        }

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = ZoneHandle::new(command_tx, event_bus.clone());

        let tick_interval_ms = self.config.tick_interval_ms;
        let zone = Zone::new(self.world, oracles, event_bus, self.config);
        let worker = ZoneWorker::new(zone, command_rx, tick_interval_ms);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
