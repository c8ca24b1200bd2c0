//! Chunked copy executor.
//!
//! Copies the origin table into the destination one primary-key window at a
//! time. Each window is copied with an idempotent statement, so a window that
//! is repeated after an interruption or restart copies nothing twice.
//!
//! Per chunk, in order:
//! 1. run the copy statement and record the affected rows
//! 2. if paused, show the pause menu (blocks until answered)
//! 3. sleep for the throttle if the chunk copied any rows
//! 4. report progress

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::chunk::{ChunkPlan, ChunkRange};
use crate::config::ChunkerOptions;
use crate::core::traits::{Connection, Dialect, OperatorConsole, ProgressSink};
use crate::core::MigrationDescriptor;
use crate::dialect::MysqlDialect;
use crate::error::Result;
use crate::interrupt::{handle_pause, InterruptGuard, PauseFlag, PauseOutcome, Tunables};
use crate::throttle::Throttler;

/// Statistics from a copy run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Chunks whose copy statement ran.
    pub chunks: u64,

    /// Rows inserted into the destination.
    pub rows_copied: u64,

    /// Number of throttle sleeps.
    pub throttle_sleeps: u64,

    /// Time spent in throttle sleeps.
    pub throttled: Duration,

    /// Wall time of the run.
    pub elapsed: Duration,
}

/// Copies one table into its shadow table in throttled primary-key windows.
pub struct Chunker {
    migration: MigrationDescriptor,
    connection: Arc<dyn Connection>,
    dialect: Arc<dyn Dialect>,
    options: ChunkerOptions,
    paused: PauseFlag,
}

impl Chunker {
    /// Create a chunker using the MySQL dialect.
    ///
    /// Missing `start` / `limit` are resolved once from `min(id)` / `max(id)`
    /// of the origin table; an empty table leaves them unset.
    pub async fn new(
        migration: MigrationDescriptor,
        connection: Arc<dyn Connection>,
        options: ChunkerOptions,
    ) -> Result<Self> {
        Self::with_dialect(migration, connection, Arc::new(MysqlDialect::new()), options).await
    }

    /// Create a chunker generating statements for `dialect`.
    pub async fn with_dialect(
        migration: MigrationDescriptor,
        connection: Arc<dyn Connection>,
        dialect: Arc<dyn Dialect>,
        mut options: ChunkerOptions,
    ) -> Result<Self> {
        options.validate()?;

        if options.start.is_none() {
            options.start = connection
                .select_scalar(&dialect.min_id_query(migration.origin()))
                .await?;
        }
        if options.limit.is_none() {
            options.limit = connection
                .select_scalar(&dialect.max_id_query(migration.origin()))
                .await?;
        }

        debug!(
            "{}: resolved id bounds {:?}..={:?}",
            migration.origin(),
            options.start,
            options.limit
        );

        Ok(Self {
            migration,
            connection,
            dialect,
            options,
            paused: PauseFlag::new(),
        })
    }

    /// Handle to the pause flag, e.g. to pause from another task.
    pub fn pause_flag(&self) -> PauseFlag {
        self.paused.clone()
    }

    /// Current options, with resolved bounds and any live changes applied.
    pub fn options(&self) -> &ChunkerOptions {
        &self.options
    }

    pub fn migration(&self) -> &MigrationDescriptor {
        &self.migration
    }

    /// Window layout for the current bounds and stride.
    ///
    /// Fails if both bounds are set and `start > limit`.
    pub fn plan(&self) -> Result<ChunkPlan> {
        ChunkPlan::new(self.options.start, self.options.limit, self.options.stride)
    }

    /// The copy statement for one window.
    pub fn copy_statement(&self, chunk: &ChunkRange) -> String {
        self.dialect.copy_statement(
            self.migration.destination(),
            self.migration.origin(),
            self.migration.columns(),
            chunk,
        )
    }

    /// Copy every window, pausing on SIGINT.
    ///
    /// Bounds are validated before any statement is issued. The interrupt
    /// handler is installed for the duration of the call and restored on
    /// every exit path.
    pub async fn run<C, P>(&mut self, console: &mut C, progress: &mut P) -> Result<CopyStats>
    where
        C: OperatorConsole + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let plan = self.plan()?;
        let _guard = InterruptGuard::install(&self.paused)?;
        self.execute(plan, console, progress).await
    }

    async fn execute<C, P>(
        &mut self,
        mut plan: ChunkPlan,
        console: &mut C,
        progress: &mut P,
    ) -> Result<CopyStats>
    where
        C: OperatorConsole + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let started = Instant::now();
        let mut throttler = Throttler::new();
        let mut stats = CopyStats::default();

        info!(
            "Copying {} -> {} ({}): ids {:?}..={:?} in {} chunks of {} (throttle: {}ms)",
            self.migration.origin(),
            self.migration.destination(),
            self.dialect.name(),
            plan.start(),
            plan.limit(),
            plan.count(),
            plan.stride(),
            self.options.throttle_ms
        );

        let mut n = 1;
        while let Some(chunk) = plan.chunk(n) {
            let sql = self.copy_statement(&chunk);
            let affected_rows = self.connection.exec_update(&sql).await?;
            stats.chunks += 1;
            stats.rows_copied += affected_rows;
            debug!(
                "Chunk {} [{}, {}]: {} rows of {} ids",
                chunk.index,
                chunk.low,
                chunk.high,
                affected_rows,
                chunk.width()
            );

            let mut replanned = None;
            if self.paused.is_paused() {
                info!("Paused after chunk {}", chunk.index);
                let mut tunables = Tunables {
                    stride: self.options.stride,
                    throttle_ms: self.options.throttle_ms,
                };
                let outcome = handle_pause(console, &self.paused, &mut tunables).await?;
                self.options.stride = tunables.stride;
                self.options.throttle_ms = tunables.throttle_ms;

                if let PauseOutcome::StrideChanged { .. } = outcome {
                    let next = plan.replan(&chunk, tunables.stride)?;
                    info!(
                        "Re-planned remaining ids {:?}..={:?} in {} chunks of {}",
                        next.start(),
                        next.limit(),
                        next.count(),
                        next.stride()
                    );
                    replanned = Some(next);
                }
            }

            throttler
                .after_chunk(affected_rows, self.options.throttle_ms)
                .await;
            progress.chunk_copied(&chunk, affected_rows);

            match replanned {
                Some(next) => {
                    plan = next;
                    n = 1;
                }
                None => n += 1,
            }
        }

        stats.throttle_sleeps = throttler.sleeps();
        stats.throttled = throttler.total();
        stats.elapsed = started.elapsed();
        progress.finished(&stats);

        info!(
            "Copied {} rows from {} in {} chunks ({:.2}s, {:.2}s throttled)",
            stats.rows_copied,
            self.migration.origin(),
            stats.chunks,
            stats.elapsed.as_secs_f64(),
            stats.throttled.as_secs_f64()
        );

        Ok(stats)
    }
}
