use super::GuideSpec;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Storage for guides keyed by query, owned by whoever orchestrates analyses.
///
/// The scoring engine never touches a cache; callers look a guide up here and
/// pass it by reference to [`crate::analyze`].
pub trait GuideCache: Send + Sync {
    fn get(&self, query: &str) -> Option<Arc<GuideSpec>>;
    fn insert(&self, query: &str, guide: GuideSpec) -> Arc<GuideSpec>;
    fn invalidate(&self, query: &str) -> bool;

    fn get_or_try_insert_with<E, F>(&self, query: &str, load: F) -> Result<Arc<GuideSpec>, E>
    where
        F: FnOnce() -> Result<GuideSpec, E>,
        Self: Sized,
    {
        if let Some(guide) = self.get(query) {
            return Ok(guide);
        }
        let guide = load()?;
        Ok(self.insert(query, guide))
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CachedGuide {
    guide: Arc<GuideSpec>,
    stored_at: DateTime<Utc>,
}

/// Process-local cache whose entries expire after a caller-chosen TTL.
pub struct InMemoryGuideCache<C = SystemClock> {
    ttl: Option<Duration>,
    clock: C,
    entries: Mutex<HashMap<String, CachedGuide>>,
}

impl InMemoryGuideCache<SystemClock> {
    /// `None` keeps entries until they are invalidated.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> InMemoryGuideCache<C> {
    pub fn with_clock(ttl: Option<Duration>, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("guide cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_fresh(&self, entry: &CachedGuide) -> bool {
        match self.ttl {
            Some(ttl) => self.clock.now() - entry.stored_at < ttl,
            None => true,
        }
    }
}

impl<C: Clock> GuideCache for InMemoryGuideCache<C> {
    fn get(&self, query: &str) -> Option<Arc<GuideSpec>> {
        let mut guard = self.entries.lock().expect("guide cache mutex poisoned");
        let lookup = guard
            .get(query)
            .map(|entry| (self.is_fresh(entry), Arc::clone(&entry.guide)));
        match lookup {
            Some((true, guide)) => Some(guide),
            Some((false, _)) => {
                guard.remove(query);
                None
            }
            None => None,
        }
    }

    fn insert(&self, query: &str, guide: GuideSpec) -> Arc<GuideSpec> {
        let guide = Arc::new(guide);
        let entry = CachedGuide {
            guide: Arc::clone(&guide),
            stored_at: self.clock.now(),
        };
        self.entries
            .lock()
            .expect("guide cache mutex poisoned")
            .insert(query.to_string(), entry);
        guide
    }

    fn invalidate(&self, query: &str) -> bool {
        self.entries
            .lock()
            .expect("guide cache mutex poisoned")
            .remove(query)
            .is_some()
    }
}
