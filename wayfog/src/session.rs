//! Exploration session: owner of the explored area.
//!
//! A session applies walked paths to its explored area (buffer, union,
//! fill) and keeps it for import and export. Fill decisions take time
//! because they wait on the street oracle; while one is in flight a newer
//! operation may start, or the session may be closed. Oracle calls are
//! never aborted. Instead every operation holds a [`RelevanceTicket`] and
//! its fill result is only applied if the ticket is still relevant when
//! the decision completes.
//!
//! The union step is applied immediately, so superseding an operation
//! never loses the coverage of the path it was recording.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::fill::{BlockFiller, FillOptions, FillOutcome, ProgressSink};
use crate::geojson::{self, GeoJsonError};
use crate::geometry::{buffer_path, union, Geometry, GeometryError, PathGeometry};
use crate::oracle::StreetOracle;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The path could not be buffered. Nothing was changed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// An imported document could not be read.
    #[error(transparent)]
    GeoJson(#[from] GeoJsonError),

    /// The operation needs an explored area and there is none yet.
    #[error("No explored area yet")]
    NoArea,

    /// The session was closed.
    #[error("Session is closed")]
    Closed,
}

/// What happened to an operation's fill result.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// The filled area replaced the session's explored area.
    Applied(FillOutcome),
    /// A newer operation started (or the session closed) while the fill
    /// decision was running; its result was discarded.
    Superseded,
}

impl SessionUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, SessionUpdate::Applied(_))
    }
}

/// Lightweight "is this result still wanted?" check.
///
/// Becomes irrelevant as soon as a newer ticket is issued by the same
/// session or the session is closed.
#[derive(Debug, Clone)]
pub struct RelevanceTicket {
    generation: u64,
    current: Arc<AtomicU64>,
    closed: CancellationToken,
}

impl RelevanceTicket {
    pub fn is_relevant(&self) -> bool {
        !self.closed.is_cancelled() && self.current.load(Ordering::SeqCst) == self.generation
    }

    /// Position of this ticket in the session's operation sequence.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Explored area plus the engine that grows and fills it.
pub struct ExplorationSession<O: StreetOracle> {
    area: RwLock<Option<Geometry>>,
    generation: Arc<AtomicU64>,
    closed: CancellationToken,
    filler: BlockFiller<O>,
    radius_m: f64,
}

impl<O: StreetOracle> ExplorationSession<O> {
    /// Creates a session with no explored area.
    pub fn new(filler: BlockFiller<O>, radius_m: f64) -> Self {
        Self {
            area: RwLock::new(None),
            generation: Arc::new(AtomicU64::new(0)),
            closed: CancellationToken::new(),
            filler,
            radius_m,
        }
    }

    /// Starts the session from an existing explored area.
    pub fn with_area(self, area: Geometry) -> Self {
        *self.area.write() = Some(area);
        self
    }

    /// Snapshot of the current explored area.
    pub fn area(&self) -> Option<Geometry> {
        self.area.read().clone()
    }

    pub fn filler(&self) -> &BlockFiller<O> {
        &self.filler
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Issues a ticket for a new operation, invalidating all older tickets.
    pub fn ticket(&self) -> RelevanceTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RelevanceTicket {
            generation,
            current: Arc::clone(&self.generation),
            closed: self.closed.clone(),
        }
    }

    /// Closes the session. In-flight operations finish but are not applied.
    pub fn close(&self) {
        info!("Closing exploration session");
        self.closed.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Records a walked path: buffers it, merges the corridor into the
    /// explored area, then runs the fill decision on the merged area.
    ///
    /// # Errors
    ///
    /// [`SessionError::Geometry`] when the path cannot be buffered, in which
    /// case the explored area is untouched. [`SessionError::Closed`] after
    /// [`close`](Self::close).
    pub async fn record_path(
        &self,
        path: &PathGeometry,
        options: FillOptions,
        progress: &dyn ProgressSink,
    ) -> Result<SessionUpdate, SessionError> {
        self.ensure_open()?;
        let corridor = buffer_path(path, self.radius_m)?;

        let (ticket, merged) = {
            let mut area = self.area.write();
            let merged = union(area.take(), corridor);
            *area = Some(merged.clone());
            (self.ticket(), merged)
        };
        debug!(
            generation = ticket.generation(),
            polygons = merged.polygon_count(),
            holes = merged.hole_count(),
            "Merged path into explored area"
        );

        let outcome = self.filler.fill(&merged, options, progress).await;
        Ok(self.commit(&ticket, outcome))
    }

    /// Re-runs the fill decision on the current explored area.
    ///
    /// Typically follows a series of fast-path updates with a verified pass.
    pub async fn refill(
        &self,
        options: FillOptions,
        progress: &dyn ProgressSink,
    ) -> Result<SessionUpdate, SessionError> {
        self.ensure_open()?;
        let (ticket, area) = {
            let area = self.area.read();
            let snapshot = area.clone().ok_or(SessionError::NoArea)?;
            (self.ticket(), snapshot)
        };

        let outcome = self.filler.fill(&area, options, progress).await;
        Ok(self.commit(&ticket, outcome))
    }

    /// Replaces the explored area with one read from GeoJSON.
    ///
    /// Accepts the exported Feature, a FeatureCollection or a bare
    /// Polygon/MultiPolygon. Operations in flight are superseded.
    pub fn import(&self, json: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        let area = geojson::parse_area(json)?;
        area.validate()?;

        let mut current = self.area.write();
        self.ticket();
        info!(
            polygons = area.polygon_count(),
            holes = area.hole_count(),
            "Imported explored area"
        );
        *current = Some(area);
        Ok(())
    }

    /// Serializes the explored area as the persisted GeoJSON Feature.
    pub fn export(&self, description: &str) -> Result<String, SessionError> {
        let area = self.area.read();
        let area = area.as_ref().ok_or(SessionError::NoArea)?;
        Ok(geojson::to_json_string(&geojson::export_feature(
            area,
            description,
        ))?)
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.is_closed() {
            Err(SessionError::Closed)
        } else {
            Ok(())
        }
    }

    fn commit(&self, ticket: &RelevanceTicket, outcome: FillOutcome) -> SessionUpdate {
        let mut area = self.area.write();
        if !ticket.is_relevant() {
            debug!(
                generation = ticket.generation(),
                "Discarding superseded fill result"
            );
            return SessionUpdate::Superseded;
        }
        *area = Some(outcome.geometry.clone());
        SessionUpdate::Applied(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStreetCache;
    use crate::fill::{FillConfig, NoProgress};
    use crate::geometry::{area_m2, BoundingBox};
    use crate::oracle::OracleError;

    struct EmptyOracle;

    impl StreetOracle for EmptyOracle {
        async fn has_streets(&self, _bbox: &BoundingBox) -> Result<bool, OracleError> {
            Ok(false)
        }
    }

    fn session() -> ExplorationSession<EmptyOracle> {
        let filler = BlockFiller::new(
            EmptyOracle,
            Arc::new(MemoryStreetCache::new()),
            FillConfig::default(),
        );
        ExplorationSession::new(filler, 15.0)
    }

    fn street() -> PathGeometry {
        PathGeometry::line(vec![[0.0, 0.0], [0.001, 0.0]])
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let session = session();
        let first = session.ticket();
        assert!(first.is_relevant());

        let second = session.ticket();
        assert!(!first.is_relevant());
        assert!(second.is_relevant());
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_close_invalidates_tickets() {
        let session = session();
        let ticket = session.ticket();
        session.close();
        assert!(!ticket.is_relevant());
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_record_path_applies_corridor() {
        let session = session();
        let update = session
            .record_path(&street(), FillOptions::default(), &NoProgress)
            .await
            .unwrap();

        assert!(update.is_applied());
        let area = session.area().unwrap();
        assert!(area_m2(&area) > 3_000.0);
    }

    #[tokio::test]
    async fn test_invalid_path_leaves_area_untouched() {
        let session = session();
        let result = session
            .record_path(
                &PathGeometry::line(vec![[1.0, 1.0]]),
                FillOptions::default(),
                &NoProgress,
            )
            .await;

        assert!(matches!(
            result,
            Err(SessionError::Geometry(GeometryError::InvalidGeometry(_)))
        ));
        assert!(session.area().is_none());
    }

    #[tokio::test]
    async fn test_refill_without_area() {
        let session = session();
        assert!(matches!(
            session.refill(FillOptions::default(), &NoProgress).await,
            Err(SessionError::NoArea)
        ));
    }

    #[tokio::test]
    async fn test_closed_session_rejects_operations() {
        let session = session();
        session.close();
        assert!(matches!(
            session
                .record_path(&street(), FillOptions::default(), &NoProgress)
                .await,
            Err(SessionError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let source = session();
        source
            .record_path(&street(), FillOptions::default(), &NoProgress)
            .await
            .unwrap();
        let json = source.export("Explored area").unwrap();

        let target = session();
        target.import(&json).unwrap();
        assert_eq!(target.area(), source.area());
    }

    #[test]
    fn test_export_without_area() {
        assert!(matches!(session().export("x"), Err(SessionError::NoArea)));
    }

    #[test]
    fn test_import_rejects_lines() {
        let json = r#"{ "type": "LineString", "coordinates": [[0, 0], [1, 1]] }"#;
        assert!(matches!(
            session().import(json),
            Err(SessionError::GeoJson(_))
        ));
    }
}
