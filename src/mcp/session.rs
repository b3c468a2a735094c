//! Lazily-built, process-wide wallet session.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::blockchain::{Action, ActionSet, EngineError, WalletContext, WalletEngine};
use crate::config::Config;
use crate::utils::with_suppressed_stdout;

/// A configured wallet together with the actions it can run.
#[derive(Debug)]
pub struct Session {
    pub context: WalletContext,
    pub actions: ActionSet,
}

/// Builds the session on first use and hands out the same one afterwards.
///
/// Concurrent callers wait on a single in-flight initialization. A failed
/// attempt is not cached, so the next call starts over.
pub struct SessionInitializer {
    engine: Arc<dyn WalletEngine>,
    config: Config,
    cell: OnceCell<Arc<Session>>,
}

impl SessionInitializer {
    pub fn new(engine: Arc<dyn WalletEngine>, config: Config) -> Self {
        Self {
            engine,
            config,
            cell: OnceCell::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn ensure_session(&self) -> Result<Arc<Session>, EngineError> {
        let session = self
            .cell
            .get_or_try_init(|| async {
                info!("Initializing wallet session...");
                info!("Config: Chain {}", self.config.chain_id);

                let context =
                    match with_suppressed_stdout(self.engine.configure(&self.config)).await {
                        Ok(context) => context,
                        Err(e) => {
                            error!("Failed to initialize wallet session: {}", e);
                            return Err(e);
                        }
                    };
                let actions = self.engine.actions();
                if actions.is_empty() {
                    warn!("Wallet engine published no actions");
                }
                info!("Found {} wallet actions", actions.len());
                for action in actions.iter() {
                    debug!("  {}: {}", action.name(), action.description());
                }

                Ok(Arc::new(Session { context, actions }))
            })
            .await?;
        Ok(Arc::clone(session))
    }
}
