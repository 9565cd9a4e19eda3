use payloads::responses::{self, Page};
use std::collections::{HashMap, HashSet};
use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(responses::UserProfile),
}

/// One cached list result, stored under the canonical parameter key
/// that produced it.
#[derive(Clone, PartialEq)]
pub struct CacheEntry<T: Clone + PartialEq> {
    pub page: Page<T>,
    /// Set by invalidation. A stale entry still renders (the previous
    /// page stays visible while the replacement is fetched) but
    /// triggers a re-fetch in any mounted consumer.
    pub stale: bool,
}

/// The query cache for a single resource namespace.
///
/// Entries are keyed by `ListParams::cache_key()`; a response is always
/// stored under the key of the request that produced it, so a slow
/// response for superseded parameters can never overwrite the entry the
/// UI is currently rendering. `in_flight` de-duplicates concurrent
/// fetches for the same key.
///
/// Only the query hooks populate entries and only mutation invalidation
/// marks them stale; no other writer exists.
#[derive(Clone, PartialEq)]
pub struct QueryCache<T: Clone + PartialEq> {
    entries: HashMap<String, CacheEntry<T>>,
    in_flight: HashSet<String>,
}

impl<T: Clone + PartialEq> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            in_flight: HashSet::new(),
        }
    }
}

impl<T: Clone + PartialEq> QueryCache<T> {
    pub fn page(&self, key: &str) -> Option<&Page<T>> {
        self.entries.get(key).map(|entry| &entry.page)
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.contains(key)
    }

    /// Whether a mounted consumer of `key` should start a fetch: the
    /// entry is missing or stale, and nobody is already fetching it.
    pub fn needs_fetch(&self, key: &str) -> bool {
        if self.in_flight.contains(key) {
            return false;
        }
        match self.entries.get(key) {
            None => true,
            Some(entry) => entry.stale,
        }
    }

    /// Claim the fetch for `key`. Returns false if another consumer got
    /// there first, in which case the caller must not issue a request.
    pub fn begin_fetch(&mut self, key: &str) -> bool {
        self.in_flight.insert(key.to_string())
    }

    /// Store a completed fetch under the key of the request that
    /// produced it.
    pub fn complete_fetch(&mut self, key: &str, page: Page<T>) {
        self.in_flight.remove(key);
        self.entries
            .insert(key.to_string(), CacheEntry { page, stale: false });
    }

    /// Release the in-flight claim after a failed fetch. Any previous
    /// entry is left as-is so the UI can keep showing it.
    pub fn fail_fetch(&mut self, key: &str) {
        self.in_flight.remove(key);
    }

    /// Mark every entry in this namespace stale. Pages are never
    /// patched in place; the backend re-derives order and pagination on
    /// the re-fetch.
    pub fn invalidate(&mut self) {
        for entry in self.entries.values_mut() {
            entry.stale = true;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
    }
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Authentication (managed by use_authentication) ===
    pub auth_state: AuthState,

    // === Query caches, one per resource namespace ===
    pub documents: QueryCache<responses::Document>,
    /// Admin view of blog posts.
    pub blog_posts: QueryCache<responses::BlogPost>,
    /// Public view of the same underlying entity; invalidated together
    /// with `blog_posts`.
    pub published_posts: QueryCache<responses::BlogPost>,
    pub jobs: QueryCache<responses::Job>,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    pub fn is_admin(&self) -> bool {
        matches!(&self.auth_state, AuthState::LoggedIn(profile) if profile.is_admin)
    }

    pub fn invalidate_documents(&mut self) {
        self.documents.invalidate();
    }

    /// Blog posts have two views over one entity; both go stale on any
    /// blog-post mutation.
    pub fn invalidate_blog_posts(&mut self) {
        self.blog_posts.invalidate();
        self.published_posts.invalidate();
    }

    pub fn invalidate_jobs(&mut self) {
        self.jobs.invalidate();
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
        self.documents.clear();
        self.blog_posts.clear();
        self.published_posts.clear();
        self.jobs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::responses::Pagination;

    fn page_of(items: Vec<&str>) -> Page<String> {
        let total = items.len() as u64;
        Page {
            items: items.into_iter().map(String::from).collect(),
            pagination: Pagination::new(1, 20, total),
        }
    }

    #[test]
    fn stale_response_lands_under_its_own_key() {
        let mut cache = QueryCache::<String>::default();
        // Two rapid parameter changes: the fetch for the old key is
        // still outstanding when the new key's fetch completes.
        assert!(cache.begin_fetch("page=1"));
        assert!(cache.begin_fetch("page=2"));
        cache.complete_fetch("page=2", page_of(vec!["new"]));
        // Old response arrives late.
        cache.complete_fetch("page=1", page_of(vec!["old"]));

        // A consumer currently keyed on page=2 is unaffected by the
        // late arrival.
        assert_eq!(cache.page("page=2").unwrap().items, vec!["new"]);
        assert_eq!(cache.page("page=1").unwrap().items, vec!["old"]);
    }

    #[test]
    fn concurrent_fetches_for_one_key_deduplicate() {
        let mut cache = QueryCache::<String>::default();
        assert!(cache.begin_fetch("page=1"));
        // Second consumer of the identical key must not issue a call.
        assert!(!cache.begin_fetch("page=1"));
        assert!(!cache.needs_fetch("page=1"));
    }

    #[test]
    fn invalidation_marks_stale_but_keeps_data() {
        let mut cache = QueryCache::<String>::default();
        cache.begin_fetch("page=1");
        cache.complete_fetch("page=1", page_of(vec!["a"]));
        assert!(!cache.needs_fetch("page=1"));

        cache.invalidate();
        // The previous page is still renderable while the re-fetch
        // happens.
        assert_eq!(cache.page("page=1").unwrap().items, vec!["a"]);
        assert!(cache.needs_fetch("page=1"));

        cache.begin_fetch("page=1");
        cache.complete_fetch("page=1", page_of(vec!["b"]));
        assert!(!cache.needs_fetch("page=1"));
        assert_eq!(cache.page("page=1").unwrap().items, vec!["b"]);
    }

    #[test]
    fn failed_fetch_releases_claim_and_preserves_entry() {
        let mut cache = QueryCache::<String>::default();
        cache.begin_fetch("page=1");
        cache.complete_fetch("page=1", page_of(vec!["a"]));
        cache.invalidate();

        cache.begin_fetch("page=1");
        cache.fail_fetch("page=1");
        assert_eq!(cache.page("page=1").unwrap().items, vec!["a"]);
        // Still stale, so a retry is possible.
        assert!(cache.needs_fetch("page=1"));
    }

    #[test]
    fn blog_post_mutations_invalidate_both_namespaces() {
        let mut state = State::default();
        state.blog_posts.begin_fetch("page=1");
        state.blog_posts.complete_fetch(
            "page=1",
            Page {
                items: vec![],
                pagination: Pagination::new(1, 20, 0),
            },
        );
        state.published_posts.begin_fetch("page=1");
        state.published_posts.complete_fetch(
            "page=1",
            Page {
                items: vec![],
                pagination: Pagination::new(1, 20, 0),
            },
        );

        state.invalidate_blog_posts();
        assert!(state.blog_posts.needs_fetch("page=1"));
        assert!(state.published_posts.needs_fetch("page=1"));
    }

    #[test]
    fn logout_evicts_every_namespace() {
        let mut state = State::default();
        state.jobs.begin_fetch("page=1");
        state.jobs.complete_fetch(
            "page=1",
            Page {
                items: vec![],
                pagination: Pagination::new(1, 20, 0),
            },
        );

        state.logout();
        assert!(state.jobs.page("page=1").is_none());
        assert!(matches!(state.auth_state, AuthState::LoggedOut));
    }
}
