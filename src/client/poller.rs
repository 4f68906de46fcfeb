//! Polling snapshot loader
//!
//! Re-fetches the whole board on a fixed interval and publishes a new
//! snapshot through a `watch` channel only when its content signature changes.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::WatchStream;

use super::{ApiClient, ClientResult, RequestDeduper};
use crate::{
    board::{overlapping_ids, BoardClock, SignatureBuilder},
    config::BoardConfig,
    models::{
        reservation::ReservationQuery, schedule::ScheduleQuery, Department, Employee, Equipment,
        EquipmentReservation, Schedule,
    },
};

/// Default refresh period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Where the poller reads board data from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardSource: Send + Sync {
    async fn list_departments(&self) -> ClientResult<Vec<Department>>;
    async fn list_employees(&self) -> ClientResult<Vec<Employee>>;
    async fn list_equipment(&self) -> ClientResult<Vec<Equipment>>;
    async fn list_schedules(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> ClientResult<Vec<Schedule>>;
    async fn list_reservations(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClientResult<Vec<EquipmentReservation>>;
}

#[async_trait]
impl BoardSource for ApiClient {
    async fn list_departments(&self) -> ClientResult<Vec<Department>> {
        self.departments().list().await
    }

    async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        self.employees().list().await
    }

    async fn list_equipment(&self) -> ClientResult<Vec<Equipment>> {
        self.equipment().list().await
    }

    async fn list_schedules(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> ClientResult<Vec<Schedule>> {
        let query = ScheduleQuery {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        };
        self.schedules().list_with(&query).await
    }

    async fn list_reservations(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClientResult<Vec<EquipmentReservation>> {
        let query = ReservationQuery {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        };
        self.reservations().list_with(&query).await
    }
}

/// Everything the board needs to render one month
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub equipment: Vec<Equipment>,
    pub schedules: Vec<Schedule>,
    pub reservations: Vec<EquipmentReservation>,
    /// Schedules overlapping another schedule of the same employee
    pub schedule_overlaps: HashSet<i64>,
    /// Reservations overlapping another reservation of the same equipment
    pub reservation_overlaps: HashSet<i64>,
    pub window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub signature: String,
}

impl BoardSnapshot {
    fn build(
        departments: Vec<Department>,
        employees: Vec<Employee>,
        equipment: Vec<Equipment>,
        schedules: Vec<Schedule>,
        reservations: Vec<EquipmentReservation>,
        window: (DateTime<Utc>, DateTime<Utc>),
    ) -> Self {
        let signature = SignatureBuilder::new()
            .section("departments", &departments)
            .section("employees", &employees)
            .section("equipment", &equipment)
            .section("schedules", &schedules)
            .section("reservations", &reservations)
            .finish();

        Self {
            schedule_overlaps: overlapping_ids(&schedules),
            reservation_overlaps: overlapping_ids(&reservations),
            departments,
            employees,
            equipment,
            schedules,
            reservations,
            window: Some(window),
            signature,
        }
    }

    pub fn schedule_has_overlap(&self, id: i64) -> bool {
        self.schedule_overlaps.contains(&id)
    }

    pub fn reservation_has_overlap(&self, id: i64) -> bool {
        self.reservation_overlaps.contains(&id)
    }

    fn same_content(&self, other: &BoardSnapshot) -> bool {
        self.signature == other.signature && self.window == other.window
    }
}

/// Periodic board loader
pub struct BoardPoller<S> {
    source: Arc<S>,
    clock: BoardClock,
    month: Option<(i32, u32)>,
    period: Duration,
    deduper: RequestDeduper,
    tx: watch::Sender<Arc<BoardSnapshot>>,
}

impl<S: BoardSource + 'static> BoardPoller<S> {
    pub fn new(source: S, clock: BoardClock) -> Self {
        let (tx, _) = watch::channel(Arc::new(BoardSnapshot::default()));
        Self {
            source: Arc::new(source),
            clock,
            month: None,
            period: DEFAULT_POLL_INTERVAL,
            deduper: RequestDeduper::new(),
            tx,
        }
    }

    /// Poller using the board clock and refresh period from configuration
    pub fn from_config(source: S, config: &BoardConfig) -> Self {
        Self::new(source, config.clock()).with_period(config.poll_interval())
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Pin the poller to one month instead of following the current one
    pub fn with_month(mut self, year: i32, month: u32) -> Self {
        self.month = Some((year, month));
        self
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<BoardSnapshot> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<BoardSnapshot>> {
        self.tx.subscribe()
    }

    /// Snapshot updates as a stream, starting with the current value
    pub fn stream(&self) -> WatchStream<Arc<BoardSnapshot>> {
        WatchStream::new(self.tx.subscribe())
    }

    fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.month
            .and_then(|(year, month)| self.clock.month_window(year, month))
            .unwrap_or_else(|| self.clock.current_month_window(Utc::now()))
    }

    /// Fetch once and publish if anything changed.
    ///
    /// Returns `Ok(true)` when a new snapshot was published. A refresh
    /// superseded by a newer one returns `Ok(false)`.
    pub async fn refresh(&self) -> ClientResult<bool> {
        let window = self.window();
        let source = Arc::clone(&self.source);

        let Some(fetched) = self.deduper.run("board", fetch(source, window)).await else {
            return Ok(false);
        };
        let snapshot = fetched?;

        let published = self.tx.send_if_modified(|current| {
            if current.same_content(&snapshot) {
                false
            } else {
                *current = Arc::new(snapshot);
                true
            }
        });

        if published {
            tracing::debug!(signature = %self.snapshot().signature, "Board snapshot updated");
        }
        Ok(published)
    }

    /// Poll forever on the configured period; abort the handle to stop.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh().await {
                    tracing::warn!("Board refresh failed: {}", e);
                }
            }
        })
    }
}

async fn fetch<S: BoardSource>(
    source: Arc<S>,
    window: (DateTime<Utc>, DateTime<Utc>),
) -> ClientResult<BoardSnapshot> {
    let (start, end) = window;
    let (departments, employees, equipment, schedules, reservations) = tokio::try_join!(
        source.list_departments(),
        source.list_employees(),
        source.list_equipment(),
        source.list_schedules(start, end),
        source.list_reservations(start, end),
    )?;
    Ok(BoardSnapshot::build(
        departments,
        employees,
        equipment,
        schedules,
        reservations,
        window,
    ))
}
