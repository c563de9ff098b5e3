// Statistics provider — the upstream COVID-19 API the core reads from.
//
// `StatsProvider` is the seam: the web layer and CLI hold an
// `Arc<dyn StatsProvider>`, which in production is the HTTP client wrapped in
// a TTL cache, and in tests is an in-memory fake.

pub mod cache;
pub mod client;
pub mod traits;

pub use cache::CachedStatsProvider;
pub use client::HttpStatsProvider;
pub use traits::StatsProvider;
