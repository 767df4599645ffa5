pub mod config;
pub mod discovery;
pub mod event;
pub mod matcher;
pub mod notifier;
pub mod orchestrator;
pub mod resolver;
pub mod searcher;
pub mod store;
pub mod testing;
pub mod torrent_client;

pub use config::{
    config_path_from_env, load_config, load_config_from_str, validate_config, Config,
    ConfigError, SanitizedConfig,
};
pub use discovery::{DiscoveredEvents, DiscoveryError, EventDiscovery, SherdogDiscovery};
pub use event::{Event, Segment};
pub use matcher::{rank_matches, select_best};
pub use notifier::{Notification, Notifier, NotifyError, PushoverNotifier};
pub use orchestrator::{
    DownloadOrchestrator, OrchestratorError, ProcessReport, SegmentOutcome, SegmentReport,
};
pub use resolver::{HttpMagnetResolver, MagnetResolver, ResolveError};
pub use searcher::{Candidate, ProwlarrSearcher, SearchError, SearchQuery, Searcher};
pub use store::{EventStore, JsonEventStore, StoreError};
pub use torrent_client::{QBittorrentClient, TorrentClient, TorrentClientError};
