//! Application launcher.

use lorelist_core::{KeyValueStore, LoremGenerator};
use lorelist_ui::{AppOptions, ListApp};
use web_time::{SystemTime, UNIX_EPOCH};

/// Configuration for a launched application.
#[derive(Clone, Debug)]
pub struct AppSettings {
    /// Id of the page element the application mounts into (web only).
    pub root_id: String,
    /// Seed for placeholder text generation.
    pub seed: u64,
    pub options: AppOptions,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            root_id: "app".into(),
            seed: clock_seed(),
            options: AppOptions::default(),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Builder for lorelist applications.
///
/// ```
/// use lorelist_app::AppLauncher;
/// use lorelist_core::MemoryStore;
///
/// let app = AppLauncher::new()
///     .with_seed(1)
///     .build(Some(MemoryStore::new()));
/// assert!(app.items().is_empty());
/// ```
pub struct AppLauncher {
    settings: AppSettings,
}

impl AppLauncher {
    pub fn new() -> Self {
        Self {
            settings: AppSettings::default(),
        }
    }

    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.settings.root_id = id.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_options(mut self, options: AppOptions) -> Self {
        self.settings.options = options;
        self
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Builds the application over `store`, or without persistence.
    pub fn build<S: KeyValueStore>(&self, store: Option<S>) -> ListApp<LoremGenerator, S> {
        log::debug!(
            "building app (seed {}, storage key {:?})",
            self.settings.seed,
            self.settings.options.storage_key
        );
        ListApp::with_options(
            LoremGenerator::new(self.settings.seed),
            store,
            self.settings.options.clone(),
        )
    }

    /// Mounts the application into the element named by `root_id` and starts
    /// its frame loop.
    #[cfg(feature = "web")]
    pub fn run_web(self) -> Result<(), wasm_bindgen::JsValue> {
        crate::web::run(self)
    }
}

impl Default for AppLauncher {
    fn default() -> Self {
        Self::new()
    }
}
