use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::adapter::{
    GeminiClassifier, HttpMintImageSource, NeynarClient, PgFollowingStore, PgMintStore,
};
use crate::config::Config;
use crate::domain::Fid;
use crate::error::ServiceError;
use crate::port::{AlignmentClassifier, FollowingStore, MintImageSource, MintStore, SocialGraph};
use crate::service::{AnalysisService, FriendsService, MintService};

/// The outside world as the services see it.
pub struct Ports {
    pub social: Arc<dyn SocialGraph>,
    pub classifier: Arc<dyn AlignmentClassifier>,
    pub mint_store: Arc<dyn MintStore>,
    pub following_store: Arc<dyn FollowingStore>,
    pub mint_images: Option<Arc<dyn MintImageSource>>,
}

/// Knobs the services read at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub default_fid: Fid,
    pub following_max: usize,
    pub social_pacing: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            default_fid: 977_233,
            following_max: 500,
            social_pacing: Duration::ZERO,
        }
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_fid: config.default_fid(),
            following_max: config.following_max(),
            social_pacing: config.social_api_pacing(),
        }
    }
}

struct Services {
    analysis: AnalysisService,
    friends: FriendsService,
    mints: MintService,
    mint_store: Arc<dyn MintStore>,
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    services: Arc<Services>,
}

impl AppState {
    #[must_use]
    pub fn from_ports(ports: Ports, settings: ServiceSettings) -> Self {
        let analysis = AnalysisService::new(
            Arc::clone(&ports.social),
            ports.classifier,
            settings.default_fid,
        );
        let friends = FriendsService::new(
            ports.social,
            Arc::clone(&ports.mint_store),
            ports.following_store,
            settings.following_max,
            settings.social_pacing,
        );
        let mints = MintService::new(Arc::clone(&ports.mint_store), ports.mint_images);

        Self {
            services: Arc::new(Services {
                analysis,
                friends,
                mints,
                mint_store: ports.mint_store,
            }),
        }
    }

    /// Builds the real adapters. The database pool connects lazily, so this
    /// succeeds without a reachable database; readiness reports it instead.
    ///
    /// # Errors
    /// Fails when an HTTP client or the pool cannot be configured.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let retry = config.retry();

        let social = NeynarClient::new(config.neynar_base_url(), config.neynar_api_key(), retry)
            .map_err(|source| ServiceError::Client {
                client: "neynar",
                source,
            })?;
        let classifier = GeminiClassifier::new(
            config.gemini_base_url(),
            config.gemini_api_key(),
            config.gemini_model(),
            config.gemini_timeout(),
            retry,
        )
        .map_err(|source| ServiceError::Client {
            client: "gemini",
            source,
        })?;
        let mint_images = config
            .mint_image_service_url()
            .map(|url| HttpMintImageSource::new(url, retry))
            .transpose()
            .map_err(|source| ServiceError::Client {
                client: "mint image",
                source,
            })?
            .map(|source| Arc::new(source) as Arc<dyn MintImageSource>);

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections())
            .acquire_timeout(config.db_acquire_timeout())
            .test_before_acquire(true)
            .connect_lazy(config.database_url())?;

        let ports = Ports {
            social: Arc::new(social),
            classifier: Arc::new(classifier),
            mint_store: Arc::new(PgMintStore::new(pool.clone())),
            following_store: Arc::new(PgFollowingStore::new(pool)),
            mint_images,
        };
        Ok(Self::from_ports(ports, ServiceSettings::from(config)))
    }

    #[must_use]
    pub fn analysis(&self) -> &AnalysisService {
        &self.services.analysis
    }

    #[must_use]
    pub fn friends(&self) -> &FriendsService {
        &self.services.friends
    }

    #[must_use]
    pub fn mints(&self) -> &MintService {
        &self.services.mints
    }

    #[must_use]
    pub fn mint_store(&self) -> Arc<dyn MintStore> {
        Arc::clone(&self.services.mint_store)
    }
}
