use burrow_core::{
    AllocateRequest, ClickData, ClickOutcome, ClickRecord, Clock, EventSink, Result, ShortCode,
    ShortcodeStore, StoreError, UrlRecord,
};
use burrow_generator::Generator;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

/// Package name attached to every event this store emits.
const PACKAGE: &str = "service";

const DEFAULT_VALIDITY_MINUTES: NonZeroU32 = match NonZeroU32::new(24 * 60) {
    Some(minutes) => minutes,
    None => unreachable!(),
};

const DEFAULT_MAX_GENERATE_ATTEMPTS: usize = 8;

/// Tuning knobs for [`InMemoryStore`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreSettings {
    /// Validity applied when a request does not specify one (24 hours).
    #[builder(default = DEFAULT_VALIDITY_MINUTES)]
    pub default_validity: NonZeroU32,
    /// How many generated candidates to try before giving up.
    #[builder(default = DEFAULT_MAX_GENERATE_ATTEMPTS)]
    pub max_generate_attempts: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// In-memory implementation of [`ShortcodeStore`] using DashMap.
///
/// Check-and-insert goes through DashMap's entry API, which holds the shard
/// lock for the whole operation, so two allocations can never both claim the
/// same live code. Operations on codes in different shards do not contend.
///
/// Expired records are evicted lazily, on the first lookup after expiry, or
/// in bulk through [`ShortcodeStore::purge_expired`].
pub struct InMemoryStore<G, C> {
    records: DashMap<String, UrlRecord>,
    generator: G,
    clock: C,
    events: Arc<dyn EventSink>,
    settings: StoreSettings,
}

impl<G: Generator, C: Clock> InMemoryStore<G, C> {
    /// Creates an empty store with default settings.
    pub fn new(generator: G, clock: C, events: Arc<dyn EventSink>) -> Self {
        Self {
            records: DashMap::new(),
            generator,
            clock,
            events,
            settings: StoreSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: StoreSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts `record` unless its code belongs to a live record, in which
    /// case the record is handed back untouched.
    fn try_insert(
        &self,
        record: UrlRecord,
        now: Timestamp,
    ) -> std::result::Result<UrlRecord, UrlRecord> {
        match self.records.entry(record.shortcode.as_str().to_owned()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live_at(now) {
                    return Err(record);
                }
                debug!(code = %record.shortcode, "replacing expired record");
                occupied.insert(record.clone());
                Ok(record)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    fn allocate_requested(&self, record: UrlRecord, now: Timestamp) -> Result<UrlRecord> {
        self.try_insert(record, now).map_err(|rejected| {
            let code = rejected.shortcode.to_string();
            self.events
                .warn(PACKAGE, format!("Shortcode already exists: {code}"));
            warn!(code = %code, "short code already exists");
            StoreError::AlreadyExists(code)
        })
    }

    fn allocate_generated(&self, mut record: UrlRecord, now: Timestamp) -> Result<UrlRecord> {
        let attempts = self.settings.max_generate_attempts;

        for attempt in 1..=attempts {
            record.shortcode = self.generator.generate();
            self.events.debug(
                PACKAGE,
                format!("Generated shortcode: {}", record.shortcode),
            );

            match self.try_insert(record, now) {
                Ok(stored) => return Ok(stored),
                Err(rejected) => {
                    debug!(code = %rejected.shortcode, attempt, "generated short code collided");
                    record = rejected;
                }
            }
        }

        self.events.error(
            PACKAGE,
            format!("Could not generate a free shortcode after {attempts} attempts"),
        );
        warn!(attempts, "short code generation exhausted");
        Err(StoreError::GenerationExhausted { attempts })
    }

    /// Removes `code` if, and only if, it is still expired at `now`. A record
    /// re-allocated in the meantime is left alone.
    fn evict_if_expired(&self, code: &str, now: Timestamp) -> bool {
        self.records
            .remove_if(code, |_, record| record.is_expired_at(now))
            .is_some()
    }

    fn snapshot(&self, filter: impl Fn(&UrlRecord) -> bool) -> Vec<UrlRecord> {
        let mut records: Vec<UrlRecord> = self
            .records
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.shortcode.cmp(&b.shortcode))
        });
        records
    }
}

impl<G: Generator, C: Clock> ShortcodeStore for InMemoryStore<G, C> {
    fn allocate(&self, request: AllocateRequest) -> Result<UrlRecord> {
        self.events.info(PACKAGE, "Creating short URL".to_string());

        let requested = match request.shortcode {
            Some(code) => Some(ShortCode::new(code).inspect_err(|err| {
                self.events
                    .error(PACKAGE, "Invalid shortcode format".to_string());
                warn!(error = %err, "rejected requested short code");
            })?),
            None => None,
        };

        let validity = request.validity.unwrap_or(self.settings.default_validity);
        let now = self.clock.now();
        let expires_at = now
            .checked_add(SignedDuration::from_mins(i64::from(validity.get())))
            .map_err(|err| {
                self.events
                    .error(PACKAGE, "Invalid validity period".to_string());
                warn!(minutes = validity.get(), error = %err, "validity out of range");
                StoreError::InvalidValidity {
                    minutes: validity.get(),
                }
            })?;
        let generated = requested.is_none();

        // placeholder code for generated records; replaced before insertion
        let record = UrlRecord {
            shortcode: requested.unwrap_or_else(|| ShortCode::new_unchecked("")),
            original_url: request.url,
            created_at: now,
            expires_at,
            clicks: Vec::new(),
        };

        let stored = if generated {
            self.allocate_generated(record, now)?
        } else {
            self.allocate_requested(record, now)?
        };

        self.events.info(
            PACKAGE,
            format!("URL shortened successfully: {}", stored.shortcode),
        );
        info!(
            code = %stored.shortcode,
            expires_at = %stored.expires_at,
            generated,
            "allocated short code"
        );

        Ok(stored)
    }

    fn resolve(&self, code: &str) -> Result<UrlRecord> {
        self.events
            .debug(PACKAGE, format!("Looking up shortcode: {code}"));
        let now = self.clock.now();

        let Some(entry) = self.records.get(code) else {
            self.events
                .warn(PACKAGE, format!("Shortcode not found: {code}"));
            return Err(StoreError::NotFound(code.to_string()));
        };

        if entry.is_expired_at(now) {
            // release the shard read lock before taking the write lock
            drop(entry);
            self.evict_if_expired(code, now);
            self.events.warn(PACKAGE, format!("URL expired: {code}"));
            debug!(code, "evicted expired record");
            return Err(StoreError::NotFound(code.to_string()));
        }

        Ok(entry.value().clone())
    }

    fn record_click(&self, code: &str, click: ClickData) -> ClickOutcome {
        self.events
            .info(PACKAGE, format!("Recording click for: {code}"));

        let Some(mut entry) = self.records.get_mut(code) else {
            self.events.error(
                PACKAGE,
                format!("Cannot record click - URL not found: {code}"),
            );
            return ClickOutcome::Ignored;
        };

        // read the clock under the shard lock so appends stay chronological
        let now = self.clock.now();
        if entry.is_expired_at(now) {
            drop(entry);
            self.evict_if_expired(code, now);
            self.events.error(
                PACKAGE,
                format!("Cannot record click - URL expired: {code}"),
            );
            return ClickOutcome::Ignored;
        }

        entry.clicks.push(ClickRecord {
            timestamp: now,
            referrer: click.referrer,
            ip: click.ip,
            user_agent: click.user_agent,
            location: click.location,
        });
        let total = entry.clicks.len();
        drop(entry);

        self.events
            .debug(PACKAGE, format!("Click recorded for: {code}"));
        debug!(code, total, "recorded click");
        ClickOutcome::Recorded
    }

    fn list_all(&self) -> Vec<UrlRecord> {
        self.snapshot(|_| true)
    }

    fn list_live(&self) -> Vec<UrlRecord> {
        let now = self.clock.now();
        self.snapshot(|record| record.is_live_at(now))
    }

    fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.records.retain(|_, record| {
            let live = record.is_live_at(now);
            if !live {
                removed += 1;
            }
            live
        });

        if removed > 0 {
            self.events
                .info(PACKAGE, format!("Purged {removed} expired URLs"));
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::{LogEvent, LogLevel, ManualClock, NullSink};
    use burrow_generator::{RandomGenerator, SeqGenerator};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<LogEvent>>,
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: LogEvent) {
            self.events.lock().push(event);
        }
    }

    /// Always hands out the same code.
    struct FixedGenerator(&'static str);

    impl Generator for FixedGenerator {
        fn generate(&self) -> ShortCode {
            ShortCode::new_unchecked(self.0)
        }
    }

    fn start() -> Timestamp {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    fn test_store() -> (InMemoryStore<SeqGenerator, ManualClock>, ManualClock) {
        let clock = ManualClock::new(start());
        let store = InMemoryStore::new(
            SeqGenerator::with_prefix("bw"),
            clock.clone(),
            Arc::new(NullSink),
        );
        (store, clock)
    }

    fn minutes(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn click(referrer: &str) -> ClickData {
        ClickData {
            referrer: referrer.to_string(),
            ip: "203.0.113.7".to_string(),
            user_agent: "curl/8.0".to_string(),
            ..ClickData::default()
        }
    }

    #[test]
    fn allocate_with_generated_code() {
        let (store, _) = test_store();

        let record = store
            .allocate(AllocateRequest::builder().url("https://example.com").build())
            .unwrap();

        assert_eq!(record.shortcode.as_str(), "bw000000");
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.created_at, start());
        assert!(record.clicks.is_empty());
    }

    #[test]
    fn allocate_with_random_generator_yields_eight_chars() {
        let store = InMemoryStore::new(
            RandomGenerator::new(),
            ManualClock::new(start()),
            Arc::new(NullSink),
        );

        let record = store
            .allocate(AllocateRequest::builder().url("https://example.com").build())
            .unwrap();

        assert_eq!(record.shortcode.as_str().len(), 8);
        assert!(ShortCode::new(record.shortcode.as_str()).is_ok());
    }

    #[test]
    fn allocate_with_requested_code() {
        let (store, _) = test_store();

        let record = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .shortcode("my-alias")
                    .build(),
            )
            .unwrap();

        assert_eq!(record.shortcode.as_str(), "my-alias");
        assert_eq!(store.resolve("my-alias").unwrap(), record);
    }

    #[test]
    fn default_validity_is_one_day() {
        let (store, _) = test_store();

        let record = store
            .allocate(AllocateRequest::builder().url("https://example.com").build())
            .unwrap();

        assert_eq!(
            record.expires_at.duration_since(record.created_at),
            SignedDuration::from_mins(1440)
        );
    }

    #[test]
    fn explicit_validity() {
        let (store, _) = test_store();

        let record = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .validity(minutes(30))
                    .build(),
            )
            .unwrap();

        assert_eq!(
            record.expires_at.duration_since(record.created_at),
            SignedDuration::from_mins(30)
        );
        assert!(record.expires_at > record.created_at);
    }

    #[test]
    fn custom_default_validity() {
        let (store, _) = test_store();
        let store = store.with_settings(
            StoreSettings::builder()
                .default_validity(minutes(5))
                .build(),
        );

        let record = store
            .allocate(AllocateRequest::builder().url("https://example.com").build())
            .unwrap();

        assert_eq!(
            record.expires_at.duration_since(record.created_at),
            SignedDuration::from_mins(5)
        );
    }

    #[test]
    fn invalid_requested_code_is_rejected() {
        let (store, _) = test_store();

        let err = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .validity(minutes(10))
                    .shortcode("bad code!")
                    .build(),
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidShortCode(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_requested_code_is_rejected() {
        let (store, _) = test_store();

        let err = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .shortcode("")
                    .build(),
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidShortCode(_)));
    }

    #[test]
    fn duplicate_live_code_conflicts() {
        let (store, _) = test_store();

        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example1.com")
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();

        let err = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example2.com")
                    .shortcode("abc")
                    .build(),
            )
            .unwrap_err();

        assert_eq!(err, StoreError::AlreadyExists("abc".to_string()));
        // the original mapping survives
        assert_eq!(
            store.resolve("abc").unwrap().original_url,
            "https://example1.com"
        );
    }

    #[test]
    fn expired_code_does_not_block_reuse() {
        let (store, clock) = test_store();

        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://old.com")
                    .validity(minutes(1))
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();

        clock.advance(SignedDuration::from_secs(61));

        // no lookup in between: the stale record is still stored
        assert_eq!(store.len(), 1);

        let record = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://new.com")
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();

        assert_eq!(record.original_url, "https://new.com");
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve("abc").unwrap().original_url, "https://new.com");
    }

    #[test]
    fn eviction_frees_the_key() {
        let (store, clock) = test_store();

        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://old.com")
                    .validity(minutes(1))
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();

        clock.advance(SignedDuration::from_secs(61));
        assert!(matches!(store.resolve("abc"), Err(StoreError::NotFound(_))));
        assert!(store.is_empty());

        assert!(store
            .allocate(
                AllocateRequest::builder()
                    .url("https://new.com")
                    .shortcode("abc")
                    .build(),
            )
            .is_ok());
    }

    #[test]
    fn resolve_unknown_code() {
        let (store, _) = test_store();

        assert_eq!(
            store.resolve("nope"),
            Err(StoreError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn resolve_is_live_until_expiry_instant() {
        let (store, clock) = test_store();

        let record = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .validity(minutes(1))
                    .build(),
            )
            .unwrap();
        let code = record.shortcode.as_str();

        clock.set(record.expires_at);
        assert!(store.resolve(code).is_ok());

        clock.advance(SignedDuration::from_millis(1));
        assert!(store.resolve(code).is_err());
        // every later call keeps failing
        assert!(store.resolve(code).is_err());
    }

    #[test]
    fn end_to_end_expiry() {
        let store = InMemoryStore::new(
            RandomGenerator::new(),
            ManualClock::new(start()),
            Arc::new(NullSink),
        );
        let clock = store.clock.clone();

        let record = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .validity(minutes(1))
                    .build(),
            )
            .unwrap();
        let code = record.shortcode.as_str().to_owned();
        assert_eq!(code.len(), 8);

        assert_eq!(store.resolve(&code).unwrap(), record);

        clock.advance(SignedDuration::from_secs(61));
        assert!(matches!(store.resolve(&code), Err(StoreError::NotFound(_))));
        assert!(store
            .list_all()
            .iter()
            .all(|stored| stored.shortcode.as_str() != code));
    }

    #[test]
    fn clicks_append_in_call_order() {
        let (store, clock) = test_store();
        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();

        for referrer in ["first", "second", "third"] {
            assert_eq!(store.record_click("abc", click(referrer)), ClickOutcome::Recorded);
            clock.advance(SignedDuration::from_secs(1));
        }

        let record = store.resolve("abc").unwrap();
        let referrers: Vec<_> = record.clicks.iter().map(|c| c.referrer.as_str()).collect();
        assert_eq!(referrers, ["first", "second", "third"]);
        assert!(record
            .clicks
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp));
        assert_eq!(record.clicks[0].timestamp, start());
        assert_eq!(record.clicks[0].ip, "203.0.113.7");
        assert_eq!(record.clicks[0].location.country, "Unknown");
    }

    #[test]
    fn clicks_on_unknown_code_are_ignored() {
        let (store, _) = test_store();

        assert_eq!(store.record_click("nope", click("")), ClickOutcome::Ignored);
        assert!(store.is_empty());
    }

    #[test]
    fn clicks_on_expired_code_are_ignored_and_evict() {
        let (store, clock) = test_store();
        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .validity(minutes(1))
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();
        assert_eq!(store.record_click("abc", click("")), ClickOutcome::Recorded);

        clock.advance(SignedDuration::from_secs(61));

        assert_eq!(store.record_click("abc", click("")), ClickOutcome::Ignored);
        assert!(store.is_empty());
    }

    #[test]
    fn returned_records_are_copies() {
        let (store, _) = test_store();
        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();

        let mut copy = store.resolve("abc").unwrap();
        copy.clicks.push(ClickRecord {
            timestamp: start(),
            referrer: String::new(),
            ip: String::new(),
            user_agent: String::new(),
            location: Default::default(),
        });

        assert!(store.resolve("abc").unwrap().clicks.is_empty());
    }

    #[test]
    fn generated_collisions_are_retried() {
        let (store, _) = test_store();
        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .shortcode("bw000000")
                    .build(),
            )
            .unwrap();

        let record = store
            .allocate(AllocateRequest::builder().url("https://example.com").build())
            .unwrap();

        assert_eq!(record.shortcode.as_str(), "bw000001");
    }

    #[test]
    fn generation_gives_up_after_bounded_attempts() {
        let store = InMemoryStore::new(
            FixedGenerator("taken"),
            ManualClock::new(start()),
            Arc::new(NullSink),
        )
        .with_settings(StoreSettings::builder().max_generate_attempts(3).build());

        store
            .allocate(AllocateRequest::builder().url("https://a.com").build())
            .unwrap();

        let err = store
            .allocate(AllocateRequest::builder().url("https://b.com").build())
            .unwrap_err();

        assert_eq!(err, StoreError::GenerationExhausted { attempts: 3 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn validity_past_the_end_of_time_is_rejected() {
        let (store, _) = test_store();

        let err = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .validity(NonZeroU32::MAX)
                    .build(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::InvalidValidity {
                minutes: u32::MAX
            }
        );
        assert!(store.is_empty());

        // nearly two millennia still fits
        let record = store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .validity(minutes(1_000_000_000))
                    .build(),
            )
            .unwrap();
        assert_eq!(record.shortcode.as_str(), "bw000000");
    }

    #[test]
    fn list_all_includes_unevicted_expired_records() {
        let (store, clock) = test_store();
        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://short.com")
                    .validity(minutes(1))
                    .shortcode("short")
                    .build(),
            )
            .unwrap();
        clock.advance(SignedDuration::from_secs(1));
        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://long.com")
                    .shortcode("long")
                    .build(),
            )
            .unwrap();

        clock.advance(SignedDuration::from_mins(2));

        let all: Vec<_> = store
            .list_all()
            .into_iter()
            .map(|r| r.shortcode.to_string())
            .collect();
        assert_eq!(all, ["short", "long"]);

        let live: Vec<_> = store
            .list_live()
            .into_iter()
            .map(|r| r.shortcode.to_string())
            .collect();
        assert_eq!(live, ["long"]);
    }

    #[test]
    fn purge_expired_removes_only_stale_records() {
        let (store, clock) = test_store();
        for (code, validity) in [("a1", 1), ("a2", 1), ("b1", 60)] {
            store
                .allocate(
                    AllocateRequest::builder()
                        .url("https://example.com")
                        .validity(minutes(validity))
                        .shortcode(code)
                        .build(),
                )
                .unwrap();
        }

        clock.advance(SignedDuration::from_mins(2));

        assert_eq!(store.purge_expired(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.resolve("b1").is_ok());
        assert_eq!(store.purge_expired(), 0);
    }

    #[test]
    fn emits_service_events() {
        let sink = Arc::new(RecordingSink::default());
        let store = InMemoryStore::new(
            SeqGenerator::with_prefix("bw"),
            ManualClock::new(start()),
            sink.clone(),
        );

        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();
        let _ = store.resolve("missing");

        let events = sink.events.lock();
        assert!(events.iter().all(|e| e.package == PACKAGE));
        assert_eq!(events[0].message, "Creating short URL");
        assert!(events
            .iter()
            .any(|e| e.level == LogLevel::Info && e.message == "URL shortened successfully: abc"));
        assert!(events
            .iter()
            .any(|e| e.level == LogLevel::Warn && e.message == "Shortcode not found: missing"));
    }

    #[tokio::test]
    async fn concurrent_allocations_of_same_code() {
        let store = Arc::new(test_store().0);
        let mut handles = vec![];

        for i in 0..16u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.allocate(
                    AllocateRequest::builder()
                        .url(format!("https://example{i}.com"))
                        .shortcode("contended")
                        .build(),
                )
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => assert!(matches!(err, StoreError::AlreadyExists(_))),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_clicks_are_all_recorded() {
        let (store, _) = test_store();
        let store = Arc::new(store);
        store
            .allocate(
                AllocateRequest::builder()
                    .url("https://example.com")
                    .shortcode("abc")
                    .build(),
            )
            .unwrap();

        let mut handles = vec![];
        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.record_click("abc", click("https://referrer.example"))
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), ClickOutcome::Recorded);
        }

        assert_eq!(store.resolve("abc").unwrap().total_clicks(), 50);
    }
}
