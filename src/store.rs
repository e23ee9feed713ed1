use crate::analytics_client::{api, AnalyticsSource, ClientError, Endpoint, Fid};
use crate::fetchable::{Fetchable, IsEmpty};
use bitflags::bitflags;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

// NB: each slice has its own lock and is only ever written by the task loading it, so the three
// fetches never contend with each other.

bitflags! {
    pub struct Slices: u8 {
        const SUMMARY = 0b001;
        const TOP_POSTS = 0b010;
        const ACTIVITY = 0b100;
    }
}

impl Slices {
    pub fn each(self) -> impl Iterator<Item = Slices> {
        [Slices::SUMMARY, Slices::TOP_POSTS, Slices::ACTIVITY]
            .into_iter()
            .filter(move |slice| self.contains(*slice))
    }
}

impl IsEmpty for api::SummaryResponse {
    fn is_empty(&self) -> bool {
        false
    }
}

/// A fetch cycle is the set of requests issued for one fid. Results from an older cycle are
/// dropped on arrival.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchCycle {
    pub generation: u64,
    pub fid: Fid,
}

pub struct Store {
    source: Arc<dyn AnalyticsSource>,
    top_posts_limit: u32,
    fid: Mutex<Fid>,
    generation: AtomicU64,
    pub summary: Mutex<Fetchable<api::SummaryResponse>>,
    pub top_posts: Mutex<Fetchable<Vec<api::TopPost>>>,
    pub activity: Mutex<Fetchable<Vec<api::ActivityDay>>>,
}

impl Store {
    pub fn new(source: Arc<dyn AnalyticsSource>, fid: Fid, top_posts_limit: u32) -> Self {
        Self {
            source,
            top_posts_limit,
            fid: Mutex::new(fid),
            generation: AtomicU64::new(0),
            summary: Mutex::new(Fetchable::Idle),
            top_posts: Mutex::new(Fetchable::Idle),
            activity: Mutex::new(Fetchable::Idle),
        }
    }

    pub fn fid(&self) -> Fid {
        self.fid.lock().unwrap().clone()
    }

    pub fn account(&self) -> Option<api::Account> {
        let summary = self.summary.lock().unwrap();
        summary.data().map(|resp| resp.account.clone())
    }

    pub fn is_current(&self, cycle: &FetchCycle) -> bool {
        self.generation.load(Ordering::SeqCst) == cycle.generation
    }

    /// Switches to `fid`; all slices are cleared and marked loading.
    pub fn start_cycle(&self, fid: Fid) -> FetchCycle {
        info!(%fid, "starting fetch cycle");
        *self.fid.lock().unwrap() = fid.clone();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.summary.lock().unwrap().reset();
        self.top_posts.lock().unwrap().reset();
        self.activity.lock().unwrap().reset();
        self.begin_all();

        FetchCycle { generation, fid }
    }

    /// Refetches the current fid, keeping what is already loaded on screen until it is replaced.
    pub fn refresh(&self) -> FetchCycle {
        let fid = self.fid();
        info!(%fid, "refreshing");
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.begin_all();
        FetchCycle { generation, fid }
    }

    fn begin_all(&self) {
        self.summary.lock().unwrap().begin();
        self.top_posts.lock().unwrap().begin();
        self.activity.lock().unwrap().begin();
    }

    /// Loads one slice; returns whether the outcome was applied (false if superseded).
    pub async fn load(&self, slice: Slices, cycle: &FetchCycle) -> bool {
        if slice == Slices::SUMMARY {
            self.load_summary(cycle).await
        } else if slice == Slices::TOP_POSTS {
            self.load_top_posts(cycle).await
        } else if slice == Slices::ACTIVITY {
            self.load_activity(cycle).await
        } else {
            false
        }
    }

    pub async fn load_summary(&self, cycle: &FetchCycle) -> bool {
        let result = self.source.summary(&cycle.fid).await;
        self.apply(cycle, Endpoint::Summary, &self.summary, result)
    }

    pub async fn load_top_posts(&self, cycle: &FetchCycle) -> bool {
        let result = self
            .source
            .top_posts(&cycle.fid, self.top_posts_limit)
            .await
            .map(|resp| resp.posts);
        self.apply(cycle, Endpoint::TopPosts, &self.top_posts, result)
    }

    pub async fn load_activity(&self, cycle: &FetchCycle) -> bool {
        let result = self
            .source
            .activity(&cycle.fid)
            .await
            .map(|resp| resp.days);
        self.apply(cycle, Endpoint::Activity, &self.activity, result)
    }

    fn apply<T>(
        &self,
        cycle: &FetchCycle,
        endpoint: Endpoint,
        slice: &Mutex<Fetchable<T>>,
        result: Result<T, ClientError>,
    ) -> bool {
        let mut slice = slice.lock().unwrap();

        if !self.is_current(cycle) {
            debug!(%endpoint, fid = %cycle.fid, generation = cycle.generation, "discarding superseded response");
            return false;
        }

        match result {
            Ok(data) => {
                debug!(%endpoint, fid = %cycle.fid, "loaded");
                slice.resolve(data);
            }
            Err(err) => {
                warn!(%endpoint, fid = %cycle.fid, error = %err, "fetch failed");
                slice.reject(err.to_string());
            }
        }
        true
    }
}
